//! Pipeline errors

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Every way a clip/cut pipeline run can fail. None of them are recovered from:
/// callers are expected to propagate the error and stop.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The input file could not be opened or read
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),

    /// The STL reader rejected the input
    #[error("malformed STL input: {0}")]
    Stl(String),

    /// The plane normal has zero length, or origin/normal are not finite
    #[error("invalid plane (origin {origin}, normal {normal}): {reason}")]
    InvalidPlane {
        origin: Point3<Real>,
        normal: Vector3<Real>,
        reason: &'static str,
    },

    /// Every sample dimension must be at least 2
    #[error("invalid sample dimensions {0:?}: each dimension must be at least 2")]
    InvalidSampleDimensions([usize; 3]),

    /// The source mesh has no polygons to clip or cut
    #[error("mesh `{0}` has no polygons")]
    EmptyMesh(String),

    /// A bounding box was requested from geometry without points
    #[error("cannot take bounds of `{0}`: it has no points")]
    EmptyBounds(String),

    /// An attribute array does not have one entry per point (or per polygon)
    #[error("{name} has {len} entries, expected {expected}")]
    AttributeLength {
        name: &'static str,
        len: usize,
        expected: usize,
    },

    /// A connectivity entry references a point that does not exist
    #[error("cell {cell} references point {index}, but only {len} points exist")]
    InvalidConnectivity { cell: usize, index: usize, len: usize },
}
