//! Parallel implementation of volume sampling.

use crate::float_types::Real;
use crate::implicit::ImplicitFunction;
use crate::sample::grid::GridShape;
use crate::sample::traits::{SampleOps, sample_point};
use fast_surface_nets::ndshape::Shape;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

/// Parallel implementation of `SampleOps`. Results are identical to the serial
/// version; only the evaluation order differs.
pub struct ParallelSampleOps;

impl ParallelSampleOps {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ParallelSampleOps {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleOps for ParallelSampleOps {
    fn values<F: ImplicitFunction>(
        &self,
        function: &F,
        shape: GridShape,
        origin: Point3<Real>,
        spacing: Vector3<Real>,
    ) -> Vec<Real> {
        (0..shape.usize())
            .into_par_iter()
            .map(|i| function.evaluate(&sample_point(&shape, &origin, &spacing, i)))
            .collect()
    }

    fn gradients<F: ImplicitFunction>(
        &self,
        function: &F,
        shape: GridShape,
        origin: Point3<Real>,
        spacing: Vector3<Real>,
    ) -> Vec<Vector3<Real>> {
        (0..shape.usize())
            .into_par_iter()
            .map(|i| function.gradient(&sample_point(&shape, &origin, &spacing, i)))
            .collect()
    }
}
