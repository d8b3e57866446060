// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Threshold used by the numeric guards of the library: degenerate determinants,
/// gimbal lock detection, uniform scale checks and near-zero lengths.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-6;
/// Threshold used by the numeric guards of the library: degenerate determinants,
/// gimbal lock detection, uniform scale checks and near-zero lengths.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-8;

/// Lazily-initialized tolerance used by every "equal within epsilon" comparison.
/// Defaults to [`EPSILON`], but can be overridden:
///  1) **Build-time**: set env var `GMATH_TOLERANCE` (e.g. `GMATH_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before comparing anything
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

/// Returns the current comparison tolerance.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("GMATH_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        EPSILON
    })
}

/// Set the comparison tolerance programmatically once (subsequent calls are ignored).
/// Returns `true` when the value was accepted.
pub fn set_tolerance(value: Real) -> bool {
    TOLERANCE_CELL.set(value.max(Real::EPSILON)).is_ok()
}

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Frac Pi 2
/// π/2
#[cfg(feature = "f32")]
pub const HALF_PI: Real = core::f32::consts::FRAC_PI_2;
/// π/2
#[cfg(feature = "f64")]
pub const HALF_PI: Real = core::f64::consts::FRAC_PI_2;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Angle conversion
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
pub const DEG_TO_RAD: Real = PI / 180.0;
pub const RAD_TO_DEG: Real = 180.0 / PI;
