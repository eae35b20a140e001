//! Implicit functions: scalar fields over 3D space whose level sets define surfaces.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A scalar function of position. Clipping keeps the region where the value is at
/// or above a threshold, cutting extracts the level set at a threshold, and
/// sampling evaluates the function on a grid.
pub trait ImplicitFunction: Sync {
    /// Value of the function at `point`.
    fn evaluate(&self, point: &Point3<Real>) -> Real;

    /// Gradient of the function at `point`.
    fn gradient(&self, point: &Point3<Real>) -> Vector3<Real>;
}

impl<F: ImplicitFunction + ?Sized> ImplicitFunction for &F {
    fn evaluate(&self, point: &Point3<Real>) -> Real {
        (**self).evaluate(point)
    }

    fn gradient(&self, point: &Point3<Real>) -> Vector3<Real> {
        (**self).gradient(point)
    }
}
