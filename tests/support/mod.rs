//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::{Point3, Vector3};
use planeclip::{
    ClipPlane, Pipeline, PipelineConfig, PipelineOutput, PolyData, float_types::Real,
};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Unit cube centered on the origin
pub fn unit_cube() -> PolyData {
    PolyData::cube(Point3::origin(), 1.0)
}

/// The plane through the origin with normal (0, -1, -1)
pub fn diagonal_plane() -> ClipPlane {
    ClipPlane::new(Point3::origin(), Vector3::new(0.0, -1.0, -1.0)).unwrap()
}

/// Run the default pipeline on `mesh`
pub fn run_default(mesh: &PolyData) -> PipelineOutput {
    Pipeline::new(PipelineConfig::default())
        .unwrap()
        .run(mesh)
        .unwrap()
}

/// True when `points` contains `p` with bit-identical coordinates
pub fn contains_exact(points: &[Point3<Real>], p: &Point3<Real>) -> bool {
    points.iter().any(|q| q == p)
}

/// True when `points` contains a point within `eps` of `p`
pub fn contains_near(points: &[Point3<Real>], p: &Point3<Real>, eps: Real) -> bool {
    points.iter().any(|q| (q - p).norm() < eps)
}

/// Sum of polygon areas (Newell)
pub fn surface_area(mesh: &PolyData) -> Real {
    (0..mesh.num_polys())
        .map(|i| PolyData::newell_normal(mesh.polygon_points(i)).norm() / 2.0)
        .sum()
}
