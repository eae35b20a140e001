//! The cutting plane shared by the clipper, the cutter and the sampler.

use crate::errors::PipelineError;
use crate::float_types::{PI, Real, tolerance};
use crate::implicit::ImplicitFunction;
use nalgebra::{Isometry3, Matrix4, Point3, Rotation3, Translation3, Vector3};
use std::fmt;

/// An infinite plane through `origin` with unit `normal`.
///
/// Its implicit function is the signed distance
/// `distance(p) = dot(p - origin, normal)`: positive on the side the normal
/// points to, zero on the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    origin: Point3<Real>,
    normal: Vector3<Real>,
}

impl ClipPlane {
    /// Create a plane from a point on it and a (not necessarily unit) normal.
    /// The normal is normalized; a zero-length or non-finite normal is rejected.
    pub fn new(origin: Point3<Real>, normal: Vector3<Real>) -> Result<Self, PipelineError> {
        let invalid = |reason| PipelineError::InvalidPlane {
            origin,
            normal,
            reason,
        };

        if !origin.coords.iter().all(|c| c.is_finite()) {
            return Err(invalid("origin is not finite"));
        }
        if !normal.iter().all(|c| c.is_finite()) {
            return Err(invalid("normal is not finite"));
        }
        let len = normal.norm();
        if len < tolerance() {
            return Err(invalid("normal has zero length"));
        }

        Ok(ClipPlane {
            origin,
            normal: normal / len,
        })
    }

    /// Plane from normal and offset `w` along it (plane equation: n·p = w).
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Result<Self, PipelineError> {
        let len = normal.norm();
        let origin = if len > 0.0 {
            Point3::from(normal * (w / (len * len)))
        } else {
            Point3::origin()
        };
        Self::new(origin, normal)
    }

    pub const fn origin(&self) -> Point3<Real> {
        self.origin
    }

    /// Unit normal
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Distance of the plane from the world origin along its normal
    pub fn offset(&self) -> Real {
        self.normal.dot(&self.origin.coords)
    }

    /// Signed distance from `point` to the plane.
    #[inline]
    pub fn distance(&self, point: &Point3<Real>) -> Real {
        (point - self.origin).dot(&self.normal)
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project(&self, point: &Point3<Real>) -> Point3<Real> {
        point - self.normal * self.distance(point)
    }

    /// Return a copy with the normal reversed.
    pub fn flipped(&self) -> Self {
        ClipPlane {
            origin: self.origin,
            normal: -self.normal,
        }
    }

    /// Returns (T, T_inv), where:
    /// - `T` maps a point on this plane into the XY plane (z=0) with the plane's normal going to +Z
    /// - `T_inv` is the inverse transform, mapping back
    pub fn to_xy_transform(&self) -> (Matrix4<Real>, Matrix4<Real>) {
        // Rotate plane.normal -> +Z. Antiparallel normals have no unique rotation,
        // so fall back to a half turn about X.
        let rot = Rotation3::rotation_between(&self.normal, &Vector3::z()).unwrap_or_else(|| {
            Rotation3::from_axis_angle(&Vector3::x_axis(), PI)
        });
        let iso_rot = Isometry3::from_parts(Translation3::identity(), rot.into());

        // Shift so the plane's origin lands at z=0
        let origin_rot = iso_rot.transform_point(&self.origin);
        let iso_trans = Translation3::new(0.0, 0.0, -origin_rot.z);

        let transform_to_xy = iso_trans.to_homogeneous() * iso_rot.to_homogeneous();
        let transform_from_xy = transform_to_xy
            .try_inverse()
            .unwrap_or_else(Matrix4::identity);

        (transform_to_xy, transform_from_xy)
    }
}

impl ImplicitFunction for ClipPlane {
    #[inline]
    fn evaluate(&self, point: &Point3<Real>) -> Real {
        self.distance(point)
    }

    #[inline]
    fn gradient(&self, _point: &Point3<Real>) -> Vector3<Real> {
        self.normal
    }
}

impl fmt::Display for ClipPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClipPlane {{ origin: ({}, {}, {}), normal: ({:.6}, {:.6}, {:.6}) }}",
            self.origin.x,
            self.origin.y,
            self.origin.z,
            self.normal.x,
            self.normal.y,
            self.normal.z
        )
    }
}
