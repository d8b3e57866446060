//! Scalar helpers shared by every type: clamped inverse trigonometry,
//! degree/radian conversion and tolerance-based comparisons.

use crate::float_types::{DEG_TO_RAD, EPSILON, RAD_TO_DEG, Real, tolerance};

/// Arc cosine with the argument clamped to `[-1, 1]`.
///
/// Dot products of unit vectors routinely land a few ulps outside the domain,
/// `f64::acos` would answer NaN there.
#[inline]
pub fn acos(value: Real) -> Real {
    value.clamp(-1.0, 1.0).acos()
}

/// Arc sine with the argument clamped to `[-1, 1]`.
#[inline]
pub fn asin(value: Real) -> Real {
    value.clamp(-1.0, 1.0).asin()
}

#[inline]
pub fn to_radians(degrees: Real) -> Real {
    degrees * DEG_TO_RAD
}

#[inline]
pub fn to_degrees(radians: Real) -> Real {
    radians * RAD_TO_DEG
}

/// Clamp `value` between `min` and `max`. With `min > max`, values below `min`
/// give `min` and everything else gives `max`.
#[inline]
pub fn clamp(value: Real, min: Real, max: Real) -> Real {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// `true` when `|value|` is below the current [`tolerance`].
#[inline]
pub fn is_close_to_zero(value: Real) -> bool {
    value.abs() < tolerance()
}

/// Compare two scalars within the current [`tolerance`].
#[inline]
pub fn almost_equal(a: Real, b: Real) -> bool {
    almost_equal_with(a, b, tolerance())
}

#[inline]
pub fn almost_equal_with(a: Real, b: Real, epsilon: Real) -> bool {
    (a - b).abs() <= epsilon
}

/// **Mathematical Foundation: stable sinc**
///
/// ```text
/// sinc(x) = sin(x) / x,   sinc(0) = 1
/// ```
/// Below `x² < EPSILON` the first Taylor term is returned directly, which keeps
/// slerp and `exp` well defined for vanishing angles.
#[inline]
pub fn sinx_over_x(x: Real) -> Real {
    if x * x < EPSILON { 1.0 } else { x.sin() / x }
}
