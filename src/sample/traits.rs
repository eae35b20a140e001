//! Traits defining volume sampling operations for dependency inversion

use crate::float_types::Real;
use crate::implicit::ImplicitFunction;
use crate::sample::grid::GridShape;
use nalgebra::{Point3, Vector3};

/// Evaluates an implicit function at every sample of a regular grid.
/// Sample `i` lies at `origin + coords(i) * spacing`, x varying fastest.
pub trait SampleOps {
    /// Function values, one per sample
    fn values<F: ImplicitFunction>(
        &self,
        function: &F,
        shape: GridShape,
        origin: Point3<Real>,
        spacing: Vector3<Real>,
    ) -> Vec<Real>;

    /// Function gradients, one per sample
    fn gradients<F: ImplicitFunction>(
        &self,
        function: &F,
        shape: GridShape,
        origin: Point3<Real>,
        spacing: Vector3<Real>,
    ) -> Vec<Vector3<Real>>;
}

/// World position of linear sample `i`
#[inline]
pub fn sample_point(
    shape: &GridShape,
    origin: &Point3<Real>,
    spacing: &Vector3<Real>,
    i: usize,
) -> Point3<Real> {
    let [x, y, z] = shape.coords(i);
    Point3::new(
        origin.x + x as Real * spacing.x,
        origin.y + y as Real * spacing.y,
        origin.z + z as Real * spacing.z,
    )
}
