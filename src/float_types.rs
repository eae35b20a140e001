//! Scalar precision, selected by the `f64` (default) or `f32` feature.

#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;

#[cfg(feature = "f32")]
pub use parry3d;

#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

#[cfg(feature = "f32")]
pub use core::f32::consts::{PI, TAU};
#[cfg(feature = "f64")]
pub use core::f64::consts::{PI, TAU};

use std::sync::OnceLock;

static TOLERANCE: OnceLock<Real> = OnceLock::new();

/// Lengths below this are treated as zero (a plane normal, for one).
///
/// `PLANECLIP_TOLERANCE` at build time overrides the precision default of
/// `1e-6` (`f64`) or `1e-4` (`f32`).
pub fn tolerance() -> Real {
    *TOLERANCE.get_or_init(|| {
        option_env!("PLANECLIP_TOLERANCE")
            .and_then(|raw| raw.parse::<Real>().ok())
            .map_or(DEFAULT_TOLERANCE, |value| value.max(Real::EPSILON))
    })
}

#[cfg(feature = "f32")]
const DEFAULT_TOLERANCE: Real = 1e-4;
#[cfg(feature = "f64")]
const DEFAULT_TOLERANCE: Real = 1e-6;

/// Widen an `f32` read from a file into the active `Real`.
#[inline]
#[allow(clippy::unnecessary_cast)]
pub const fn real_from_f32(value: f32) -> Real {
    value as Real
}

/// Narrow the active `Real` to `f32` for file output and the surface-nets field.
#[inline]
#[allow(clippy::unnecessary_cast)]
pub const fn real_to_f32(value: Real) -> f32 {
    value as f32
}
