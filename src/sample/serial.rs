//! Serial implementation of volume sampling

use crate::float_types::Real;
use crate::implicit::ImplicitFunction;
use crate::sample::grid::GridShape;
use crate::sample::traits::{SampleOps, sample_point};
use fast_surface_nets::ndshape::Shape;
use nalgebra::{Point3, Vector3};

/// Serial implementation of `SampleOps`.
pub struct SerialSampleOps;

impl SerialSampleOps {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SerialSampleOps {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleOps for SerialSampleOps {
    fn values<F: ImplicitFunction>(
        &self,
        function: &F,
        shape: GridShape,
        origin: Point3<Real>,
        spacing: Vector3<Real>,
    ) -> Vec<Real> {
        (0..shape.usize())
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
            .map(|i| function.gradient(&sample_point(&shape, &origin, &spacing, i)))
            .collect()
    }
}
