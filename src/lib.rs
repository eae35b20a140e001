//! Plane **clipping**, **cutting** and **cross-section surfaces** for triangulated meshes.
//!
//! A mesh ([`PolyData`]) is split by an implicit function (usually a
//! [`ClipPlane`]) into a kept half and a clipped half; the same function's level
//! set is cut out as line segments, joined into polylines, and filled into an
//! intersection surface. The plane itself can be sampled into a
//! [`ScalarVolume`] over the kept half's bounds and contoured for display.
//! [`Pipeline`] runs all of it eagerly, and [`Scene`] describes how to show it.
//!
//! Clip and cut share one crossing-point computation, so the intersection curve
//! is bit-identical to the boundary of both clip halves.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` import/export, and the `planeclip` binary
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to sample volumes on multiple threads

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod implicit;
pub mod io;
pub mod pipeline;
pub mod plane;
pub mod polydata;
pub mod sample;
pub mod scene;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::PipelineError;
pub use implicit::ImplicitFunction;
pub use pipeline::{Pipeline, PipelineConfig, PipelineOutput, PipelineStats};
pub use plane::ClipPlane;
pub use polydata::PolyData;
pub use sample::ScalarVolume;
pub use scene::{Scene, SceneConfig};
