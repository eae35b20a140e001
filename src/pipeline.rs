//! The full clip/cut/contour pipeline as one eager function composition.
//!
//! ```text
//! source -> normals -> clip -------------------------> kept / clipped halves
//!                   \-> cut -> strip -> triangulate --> intersection surface
//!           kept bounds -> sample plane -> contour ---> plane surface
//! ```

use crate::errors::PipelineError;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::plane::ClipPlane;
use crate::polydata::PolyData;
use crate::polydata::clip::{ClipConfig, ClipResult};
use crate::polydata::cut::CutConfig;
use crate::polydata::normals::NormalsConfig;
use crate::polydata::strip::StripConfig;
use crate::sample::{ContourConfig, SampleConfig, ScalarVolume};
use log::debug;
use nalgebra::{Point3, Vector3};
use std::fmt;
use std::time::Instant;

/// Every tunable of a pipeline run. The defaults clip with the plane through
/// the origin with normal `(0, -1, -1)` and contour its samples at 0.5.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub plane_origin: Point3<Real>,
    /// Need not be unit length; it is normalized when the plane is built
    pub plane_normal: Vector3<Real>,
    pub normals: NormalsConfig,
    pub clip: ClipConfig,
    /// Keep `cut.values` equal to `clip.value` for the intersection curve to lie
    /// on the clip boundary
    pub cut: CutConfig,
    pub strip: StripConfig,
    pub sample: SampleConfig,
    pub contour: ContourConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            plane_origin: Point3::new(0.0, 0.0, 0.0),
            plane_normal: Vector3::new(0.0, -1.0, -1.0),
            normals: NormalsConfig::default(),
            clip: ClipConfig::default(),
            cut: CutConfig::default(),
            strip: StripConfig::default(),
            sample: SampleConfig::default(),
            contour: ContourConfig::default(),
        }
    }
}

/// Vertex counts of one run, plus the kept half's bounds the plane was sampled over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineStats {
    /// Points of the source mesh
    pub source_points: usize,
    /// Points of the intersection curve
    pub intersection_points: usize,
    /// Points of the kept half
    pub clipped_points: usize,
    /// Points of the clipped-away half
    pub remaining_points: usize,
    pub kept_bounds: Aabb,
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mins, maxs) = (self.kept_bounds.mins, self.kept_bounds.maxs);
        writeln!(
            f,
            "bounds: ({}, {}, {}, {}, {}, {})",
            mins.x, maxs.x, mins.y, maxs.y, mins.z, maxs.z
        )?;
        writeln!(f, "vertices of the model: {}", self.source_points)?;
        writeln!(f, "vertices of the intersection: {}", self.intersection_points)?;
        writeln!(f, "vertices of the clipped surface: {}", self.clipped_points)?;
        write!(f, "vertices of the remaining part: {}", self.remaining_points)
    }
}

/// Every intermediate and final dataset of a run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub plane: ClipPlane,
    pub source: PolyData,
    /// Source with normals (and possibly reordered winding)
    pub oriented: PolyData,
    pub clip: ClipResult,
    /// Intersection segments, as cut
    pub cut: PolyData,
    /// Intersection segments joined into polylines
    pub stripped: PolyData,
    /// Triangulated surface bounded by the intersection polylines
    pub intersection_surface: PolyData,
    pub plane_volume: ScalarVolume,
    /// Contour of `plane_volume`: the visible patch of the cutting plane
    pub plane_surface: PolyData,
    pub stats: PipelineStats,
}

/// A configured pipeline. Running it never mutates it, so one pipeline can
/// process any number of meshes.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    plane: ClipPlane,
}

impl Pipeline {
    /// Validate `config` and build the cutting plane.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let plane = ClipPlane::new(config.plane_origin, config.plane_normal)?;
        Ok(Pipeline { config, plane })
    }

    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub const fn plane(&self) -> &ClipPlane {
        &self.plane
    }

    /// Run every stage on `source`.
    ///
    /// Fails when the source references missing points or has no polygons,
    /// when the plane leaves nothing on the kept side (there are then no bounds
    /// to sample the plane over), or when the sample dimensions are invalid.
    pub fn run(&self, source: &PolyData) -> Result<PipelineOutput, PipelineError> {
        let config = &self.config;
        source.validate()?;
        if source.num_polys() == 0 {
            return Err(PipelineError::EmptyMesh("source".to_string()));
        }

        let oriented = timed("normals", || source.compute_normals(&config.normals));
        let clip = timed("clip", || oriented.clip(&self.plane, &config.clip))?;
        let cut = timed("cut", || oriented.cut(&self.plane, &config.cut))?;
        let stripped = timed("strip", || cut.strip(&config.strip));
        let intersection_surface =
            timed("triangulate", || stripped.lines_as_polygons().triangulate());

        let kept_bounds = clip.kept.bounds("kept half")?;
        let plane_volume = timed("sample", || {
            ScalarVolume::sample(&self.plane, &kept_bounds, &config.sample)
        })?;
        let plane_surface = timed("contour", || plane_volume.contour(&config.contour));

        let stats = PipelineStats {
            source_points: source.num_points(),
            intersection_points: cut.num_points(),
            clipped_points: clip.kept.num_points(),
            remaining_points: clip.clipped.as_ref().map_or(0, PolyData::num_points),
            kept_bounds,
        };

        Ok(PipelineOutput {
            plane: self.plane,
            source: source.clone(),
            oriented,
            clip,
            cut,
            stripped,
            intersection_surface,
            plane_volume,
            plane_surface,
            stats,
        })
    }
}

fn timed<T>(stage: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    debug!("pipeline: {stage} took {:?}", start.elapsed());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_normal_is_rejected() {
        let config = PipelineConfig {
            plane_normal: Vector3::zeros(),
            ..Default::default()
        };
        assert!(matches!(
            Pipeline::new(config),
            Err(PipelineError::InvalidPlane { .. })
        ));
    }

    #[test]
    fn empty_source_is_rejected() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        assert!(matches!(
            pipeline.run(&PolyData::new()),
            Err(PipelineError::EmptyMesh(_))
        ));
    }

    #[test]
    fn nothing_kept_is_rejected() {
        // the whole cube lies below the plane
        let config = PipelineConfig {
            plane_origin: Point3::new(0.0, 0.0, 5.0),
            plane_normal: Vector3::z(),
            ..Default::default()
        };
        let pipeline = Pipeline::new(config).unwrap();
        let cube = PolyData::cube(Point3::origin(), 1.0);
        assert!(matches!(
            pipeline.run(&cube),
            Err(PipelineError::EmptyBounds(_))
        ));
    }

    #[test]
    fn stats_display_lists_counts() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let out = pipeline.run(&PolyData::cube(Point3::origin(), 1.0)).unwrap();
        let text = out.stats.to_string();
        assert!(text.contains(&format!("vertices of the model: {}", 8)));
        assert_eq!(text.lines().count(), 5);
    }
}
