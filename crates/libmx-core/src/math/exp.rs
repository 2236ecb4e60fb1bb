//! Exponential minus one.

use super::error::{MathError, MathOutcome};

/// `eˣ - 1`, accurate for `x` near zero.
#[inline]
#[must_use]
pub fn expm1(x: f64) -> f64 {
    libm::expm1(x)
}

/// `eˣ - 1` with overflow reported as [`MathError::Range`].
///
/// Underflow towards `-1` is exact and never raises.
#[must_use]
pub fn expm1_r(x: f64) -> MathOutcome {
    let value = expm1(x);
    if x.is_finite() && value.is_infinite() {
        MathOutcome::err(value, MathError::Range)
    } else {
        MathOutcome::ok(value)
    }
}
