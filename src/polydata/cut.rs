//! Cutting: the curves where an implicit function's level sets cross a surface.

use crate::errors::PipelineError;
use crate::float_types::Real;
use crate::implicit::ImplicitFunction;
use crate::polydata::PolyData;
use crate::polydata::crossing::{PointBuilder, Side, edge_crossing};
use hashbrown::HashSet;
use log::debug;

/// Options for [`PolyData::cut`].
#[derive(Debug, Clone, PartialEq)]
pub struct CutConfig {
    /// Level-set values to extract, one set of segments per value
    pub values: Vec<Real>,
    /// Attach the implicit function's value at each output point as scalars
    pub generate_cut_scalars: bool,
}

impl Default for CutConfig {
    fn default() -> Self {
        CutConfig {
            values: vec![0.0],
            generate_cut_scalars: true,
        }
    }
}

impl PolyData {
    /// Extract the curves where `function` equals each of `config.values`
    /// on this dataset's polygons, as two-point line cells.
    ///
    /// Sides are classified exactly as in [`PolyData::clip`] (values equal to
    /// the threshold count as above), and crossing points are computed by the
    /// same edge interpolation, so at equal thresholds every cut point has the
    /// same coordinates as a boundary point of both clip halves. Segments of
    /// zero length and repeated segments are dropped; segments are otherwise
    /// unordered.
    ///
    /// Fails when the dataset does not [validate](PolyData::validate).
    pub fn cut<F: ImplicitFunction>(
        &self,
        function: &F,
        config: &CutConfig,
    ) -> Result<PolyData, PipelineError> {
        self.validate()?;
        let values: Vec<Real> = self.points.iter().map(|p| function.evaluate(p)).collect();
        let mut builder = PointBuilder::new(self, &values, config.generate_cut_scalars);
        let mut lines = Vec::new();
        let mut seen = HashSet::new();

        for (level, &threshold) in config.values.iter().enumerate() {
            for poly in &self.polys {
                let n = poly.len();
                let sides: Vec<Side> =
                    poly.iter().map(|&i| Side::of(values[i], threshold)).collect();

                // Crossings in loop order; consecutive pairs bound the level set
                // inside this polygon
                let crossings: Vec<_> = (0..n)
                    .filter(|&i| sides[i] != sides[(i + 1) % n])
                    .map(|i| edge_crossing(poly[i], poly[(i + 1) % n], &values, threshold))
                    .collect();

                for pair in crossings.chunks_exact(2) {
                    if pair[0] == pair[1] {
                        continue;
                    }
                    let a = builder.insert(pair[0], threshold, level);
                    let b = builder.insert(pair[1], threshold, level);
                    if seen.insert((a.min(b), a.max(b))) {
                        lines.push(vec![a, b]);
                    }
                }
            }
        }

        let out = builder.finish(Vec::new(), lines);
        debug!(
            "cut: {} polygons at {} values -> {} segments / {} points",
            self.num_polys(),
            config.values.len(),
            out.num_lines(),
            out.num_points()
        );
        Ok(out)
    }
}
