//! Clipping a polygonal dataset with an implicit function.

use crate::errors::PipelineError;
use crate::float_types::Real;
use crate::implicit::ImplicitFunction;
use crate::polydata::PolyData;
use crate::polydata::crossing::{PointBuilder, PointKey, Side, dedup_loop, edge_crossing};
use log::debug;
use nalgebra::Vector3;

/// Options for [`PolyData::clip`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClipConfig {
    /// Threshold on the implicit function. Must match the cutter's value for
    /// the cut curve to coincide with the clip boundary.
    pub value: Real,
    /// Keep the region below `value` instead of at-or-above it
    pub inside_out: bool,
    /// Attach the implicit function's value at each output point as scalars
    pub generate_clip_scalars: bool,
    /// Also build the clipped-away half
    pub generate_clipped_output: bool,
}

impl Default for ClipConfig {
    fn default() -> Self {
        ClipConfig {
            value: 0.0,
            inside_out: false,
            generate_clip_scalars: true,
            generate_clipped_output: true,
        }
    }
}

/// Both halves of a clip. Every boundary point appears, at identical
/// coordinates, in both halves.
#[derive(Debug, Clone)]
pub struct ClipResult {
    /// The kept half (primary output)
    pub kept: PolyData,
    /// The clipped-away half, when requested
    pub clipped: Option<PolyData>,
}

impl ClipResult {
    /// The clipped-away half, or an empty dataset when it was not requested.
    pub fn clipped_output(&self) -> PolyData {
        self.clipped.clone().unwrap_or_default()
    }
}

impl PolyData {
    /// Split this dataset's polygons where `function` crosses `config.value`.
    ///
    /// A point is kept when its function value is at or above the threshold, so
    /// points exactly on the boundary belong to the kept side (with
    /// `inside_out` the sides swap). Polygons are split along their boundary
    /// loop; crossing points are interpolated once per edge and shared by
    /// neighbouring polygons. Pieces with fewer than three distinct points are
    /// dropped. Lines are not clipped.
    ///
    /// Fails when the dataset does not [validate](PolyData::validate).
    pub fn clip<F: ImplicitFunction>(
        &self,
        function: &F,
        config: &ClipConfig,
    ) -> Result<ClipResult, PipelineError> {
        self.validate()?;
        let values: Vec<Real> = self.points.iter().map(|p| function.evaluate(p)).collect();
        let threshold = config.value;
        let keep_side = if config.inside_out {
            Side::Below
        } else {
            Side::Above
        };

        let mut kept = PointBuilder::new(self, &values, config.generate_clip_scalars);
        let mut clipped = PointBuilder::new(self, &values, config.generate_clip_scalars);
        let mut kept_polys = Vec::new();
        let mut clipped_polys = Vec::new();
        let mut kept_cell_normals = Vec::new();
        let mut clipped_cell_normals = Vec::new();
        let input_cell_normals = self.cell_normals.as_deref();

        for (poly_idx, poly) in self.polys.iter().enumerate() {
            let n = poly.len();
            let sides: Vec<Side> = poly.iter().map(|&i| Side::of(values[i], threshold)).collect();

            let mut kept_loop = Vec::with_capacity(n + 2);
            let mut clipped_loop = Vec::with_capacity(n + 2);

            for i in 0..n {
                let j = (i + 1) % n;
                let (a, b) = (poly[i], poly[j]);

                if sides[i] == keep_side {
                    kept_loop.push(kept.insert(PointKey::Input(a), threshold, 0));
                } else if config.generate_clipped_output {
                    clipped_loop.push(clipped.insert(PointKey::Input(a), threshold, 0));
                }

                // If the edge between these two points crosses the threshold,
                // add the crossing to both loops
                if sides[i] != sides[j] {
                    let key = edge_crossing(a, b, &values, threshold);
                    kept_loop.push(kept.insert(key, threshold, 0));
                    if config.generate_clipped_output {
                        clipped_loop.push(clipped.insert(key, threshold, 0));
                    }
                }
            }

            let cell_normal: Option<Vector3<Real>> = input_cell_normals.map(|c| c[poly_idx]);

            dedup_loop(&mut kept_loop);
            if kept_loop.len() >= 3 {
                kept_polys.push(kept_loop);
                kept_cell_normals.extend(cell_normal);
            }
            dedup_loop(&mut clipped_loop);
            if clipped_loop.len() >= 3 {
                clipped_polys.push(clipped_loop);
                clipped_cell_normals.extend(cell_normal);
            }
        }

        // Points inserted only for dropped pieces must not leak into the output
        let mut kept = kept.finish(kept_polys, Vec::new()).compacted();
        if input_cell_normals.is_some() {
            kept.cell_normals = Some(kept_cell_normals);
        }

        let clipped = config.generate_clipped_output.then(|| {
            let mut out = clipped.finish(clipped_polys, Vec::new()).compacted();
            if input_cell_normals.is_some() {
                out.cell_normals = Some(clipped_cell_normals);
            }
            out
        });

        debug!(
            "clip: {} polygons -> kept {} polygons / {} points, clipped {} polygons / {} points",
            self.num_polys(),
            kept.num_polys(),
            kept.num_points(),
            clipped.as_ref().map_or(0, PolyData::num_polys),
            clipped.as_ref().map_or(0, PolyData::num_points),
        );

        Ok(ClipResult { kept, clipped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::ClipPlane;
    use nalgebra::Point3;

    fn unit_square() -> PolyData {
        PolyData::from_polygons(
            vec![
                Point3::new(-1.0, -1.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(-1.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        )
    }

    #[test]
    fn spanning_polygon_splits_in_two() {
        let plane = ClipPlane::new(Point3::origin(), Vector3::y()).unwrap();
        let result = unit_square().clip(&plane, &ClipConfig::default()).unwrap();
        let clipped = result.clipped.unwrap();

        assert_eq!(result.kept.num_polys(), 1);
        assert_eq!(clipped.num_polys(), 1);
        assert_eq!(result.kept.num_points(), 4);
        assert_eq!(clipped.num_points(), 4);
        for p in &result.kept.points {
            assert!(p.y >= 0.0);
        }
        for p in &clipped.points {
            assert!(p.y <= 0.0);
        }
        let scalars = result.kept.scalars.unwrap();
        assert!(scalars.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn boundary_points_go_to_kept_side() {
        // plane through the square's top edge: the whole square is below except the edge
        let plane = ClipPlane::new(Point3::new(0.0, 1.0, 0.0), Vector3::y()).unwrap();
        let result = unit_square().clip(&plane, &ClipConfig::default()).unwrap();
        // kept piece degenerates to the top edge and is dropped
        assert_eq!(result.kept.num_polys(), 0);
        assert_eq!(result.clipped.unwrap().num_polys(), 1);

        let plane = plane.flipped();
        let result = unit_square().clip(&plane, &ClipConfig::default()).unwrap();
        assert_eq!(result.kept.num_polys(), 1);
        assert_eq!(result.kept.num_points(), 4);
        assert_eq!(result.clipped.unwrap().num_polys(), 0);
    }

    #[test]
    fn inside_out_swaps_halves() {
        let plane = ClipPlane::new(Point3::new(0.5, 0.0, 0.0), Vector3::x()).unwrap();
        let normal = unit_square().clip(&plane, &ClipConfig::default()).unwrap();
        let swapped = unit_square().clip(
            &plane,
            &ClipConfig {
                inside_out: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            normal.kept.num_points(),
            swapped.clipped.as_ref().unwrap().num_points()
        );
        for p in &swapped.kept.points {
            assert!(p.x <= 0.5);
        }
    }

    #[test]
    fn clipped_output_can_be_skipped() {
        let plane = ClipPlane::new(Point3::origin(), Vector3::y()).unwrap();
        let config = ClipConfig {
            generate_clipped_output: false,
            generate_clip_scalars: false,
            ..Default::default()
        };
        let result = unit_square().clip(&plane, &config).unwrap();
        assert!(result.clipped.is_none());
        assert!(result.kept.scalars.is_none());
        assert_eq!(result.clipped_output().num_points(), 0);
    }
}
