//! Scalar math utilities shared across the crate
//!
//! Small helpers for epsilon-aware comparison, sign handling, clamping and
//! angle range normalization. Every numerical routine in this crate funnels
//! its floating-point comparisons through these functions so tolerances are
//! applied consistently.

use crate::constants::{EPSILON14, TWO_PI};
use std::f64::consts::PI;

/// Compares two values with a combined relative and absolute tolerance.
///
/// Returns `true` when `|left - right|` is within `absolute_epsilon`, or
/// within `relative_epsilon` scaled by the larger magnitude of the two
/// inputs. The relative test keeps comparisons meaningful for values far
/// from 1.0, while the absolute test handles values near zero.
///
/// # Examples
///
/// ```rust
/// use ellipsoidal::math::equals_epsilon;
///
/// assert!(equals_epsilon(1.0, 1.0 + 1e-15, 1e-12, 1e-12));
/// assert!(!equals_epsilon(1.0, 1.01, 1e-12, 1e-12));
/// ```
pub fn equals_epsilon(left: f64, right: f64, relative_epsilon: f64, absolute_epsilon: f64) -> bool {
    let abs_diff = (left - right).abs();
    abs_diff <= absolute_epsilon || abs_diff <= relative_epsilon * left.abs().max(right.abs())
}

/// Returns 1.0 when positive, -1.0 when negative, and 0.0 for zero.
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Returns 1.0 when the value is positive or zero, and -1.0 when negative.
///
/// Unlike [`sign`], zero maps to 1.0. Branch selection in the cubic solver
/// depends on this convention at the zero boundary.
pub fn sign_not_zero(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Restricts a value to the closed range `[min, max]`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Reduces an angle in radians to the range `[0, 2π)`.
pub fn mod_two_pi(angle: f64) -> f64 {
    angle.rem_euclid(TWO_PI)
}

/// Produces an angle in the range `[0, 2π]`.
///
/// Angles that are an exact positive multiple of `2π` come back as `2π`
/// rather than 0 so that the wrap is continuous from below.
pub fn zero_to_two_pi(angle: f64) -> f64 {
    if (0.0..=TWO_PI).contains(&angle) {
        return angle;
    }
    let remainder = mod_two_pi(angle);
    if remainder.abs() < EPSILON14 && angle.abs() > EPSILON14 {
        return TWO_PI;
    }
    remainder
}

/// Produces an angle in the range `[-π, π]`.
///
/// Inputs already inside the range are returned unchanged; anything else is
/// wrapped, with wrapped values landing in `(-π, π]`.
pub fn negative_pi_to_pi(angle: f64) -> f64 {
    if (-PI..=PI).contains(&angle) {
        return angle;
    }
    zero_to_two_pi(angle + PI) - PI
}
