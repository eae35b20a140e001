//! Sampling implicit functions onto regular grids, and contouring the result.
//!
//! Sampling is split behind [`SampleOps`] so the grid can be evaluated
//! serially or, with the `parallel` feature, across threads with `rayon`.

pub mod contour;
pub mod grid;
pub mod serial;
pub mod traits;

#[cfg(feature = "parallel")]
pub mod parallel;

// Re-export core types
pub use contour::ContourConfig;
pub use grid::GridShape;
pub use traits::SampleOps;

pub use serial::SerialSampleOps;

#[cfg(feature = "parallel")]
pub use parallel::ParallelSampleOps;

use crate::errors::PipelineError;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::implicit::ImplicitFunction;
use log::debug;
use nalgebra::{Point3, Vector3};

/// Options for [`ScalarVolume::sample`].
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    /// Samples per axis; each must be at least 2
    pub dimensions: [usize; 3],
    /// Also store the function's gradient at each sample
    pub compute_normals: bool,
}

impl Default for SampleConfig {
    fn default() -> Self {
        SampleConfig {
            dimensions: [50, 50, 50],
            compute_normals: false,
        }
    }
}

/// Scalar values on a regular grid. The grid's first sample sits at `origin`
/// and its last at `origin + (dimensions - 1) * spacing`, so the samples span
/// exactly the bounds they were taken over.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarVolume {
    pub dimensions: [usize; 3],
    pub origin: Point3<Real>,
    pub spacing: Vector3<Real>,
    /// One value per sample, x varying fastest, then y, then z
    pub values: Vec<Real>,
    /// Function gradients at each sample, when requested
    pub gradients: Option<Vec<Vector3<Real>>>,
}

impl ScalarVolume {
    /// Evaluate `function` on a `config.dimensions` grid spanning `bounds`.
    ///
    /// An axis along which `bounds` has zero extent gets zero spacing, so all
    /// its samples coincide.
    pub fn sample<F: ImplicitFunction>(
        function: &F,
        bounds: &Aabb,
        config: &SampleConfig,
    ) -> Result<ScalarVolume, PipelineError> {
        let shape = GridShape::new(config.dimensions)?;
        let [nx, ny, nz] = config.dimensions;
        let extent = bounds.maxs - bounds.mins;
        let spacing = Vector3::new(
            extent.x / (nx - 1) as Real,
            extent.y / (ny - 1) as Real,
            extent.z / (nz - 1) as Real,
        );
        let origin = bounds.mins;

        #[cfg(not(feature = "parallel"))]
        let ops = SerialSampleOps::new();
        #[cfg(feature = "parallel")]
        let ops = ParallelSampleOps::new();

        let values = ops.values(function, shape, origin, spacing);
        let gradients = config
            .compute_normals
            .then(|| ops.gradients(function, shape, origin, spacing));

        debug!(
            "sample: {}x{}x{} grid over [{:?} .. {:?}]",
            nx, ny, nz, bounds.mins, bounds.maxs
        );

        Ok(ScalarVolume {
            dimensions: config.dimensions,
            origin,
            spacing,
            values,
            gradients,
        })
    }

    pub const fn num_samples(&self) -> usize {
        self.dimensions[0] * self.dimensions[1] * self.dimensions[2]
    }

    /// Linear index of sample `(i, j, k)`
    #[inline]
    pub const fn index(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.dimensions[1] + j) * self.dimensions[0] + i
    }

    /// World position of sample `(i, j, k)`
    pub fn point(&self, i: usize, j: usize, k: usize) -> Point3<Real> {
        Point3::new(
            self.origin.x + i as Real * self.spacing.x,
            self.origin.y + j as Real * self.spacing.y,
            self.origin.z + k as Real * self.spacing.z,
        )
    }

    /// Value of sample `(i, j, k)`, if it exists
    pub fn value(&self, i: usize, j: usize, k: usize) -> Option<Real> {
        let [nx, ny, nz] = self.dimensions;
        if i >= nx || j >= ny || k >= nz {
            return None;
        }
        self.values.get(self.index(i, j, k)).copied()
    }

    /// The region covered by the samples
    pub fn bounds(&self) -> Aabb {
        let [nx, ny, nz] = self.dimensions;
        Aabb::new(
            self.origin,
            self.point(nx.saturating_sub(1), ny.saturating_sub(1), nz.saturating_sub(1)),
        )
    }

    /// Smallest and largest sampled value
    pub fn value_range(&self) -> Option<(Real, Real)> {
        self.values.iter().copied().fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
