//! ABI layer for the `<math.h>` log-gamma and `expm1` functions.
//!
//! Each entry resolves the runtime mode once per call, evaluates the core
//! kernel with that mode's sentinel, and on a domain/range condition sets
//! `errno` and files a ledger record. A successful call leaves `errno`
//! untouched, as C requires.

use std::ffi::c_int;

use libmx_core::errno::set_errno;
use libmx_core::math::{MathError, expm1_r, lgamma_r_with};
use libmx_membrane::config::{SafetyLevel, safety_level};
use libmx_membrane::heal::HealingPolicy;
use libmx_membrane::ledger::global_ledger;

static HEALING: HealingPolicy = HealingPolicy::new();

/// Repair counters for the math entry points.
#[must_use]
pub fn healing_policy() -> &'static HealingPolicy {
    &HEALING
}

#[inline]
fn raise(function: &'static str, kind: MathError, x: f64, mode: SafetyLevel) {
    set_errno(kind.errno());
    if mode.recording_enabled() {
        global_ledger().report(function, kind, x);
    }
}

#[inline]
fn lgamma_entry(function: &'static str, x: f64) -> (f64, c_int) {
    let mode = safety_level();
    let out = lgamma_r_with(x, mode.sentinel());
    if let Some(kind) = out.status {
        raise(function, kind, x, mode);
    }
    (HEALING.heal(mode, x.is_finite(), out.value), out.sign)
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn lgamma(x: f64) -> f64 {
    lgamma_entry("lgamma", x).0
}

/// Reentrant log-gamma; the sign of Γ(x) is stored through `signp` when it
/// is non-null.
#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn lgamma_r(x: f64, signp: *mut c_int) -> f64 {
    let (value, sign) = lgamma_entry("lgamma_r", x);
    if !signp.is_null() {
        // SAFETY: caller passes a writable int or null.
        unsafe { *signp = sign };
    }
    value
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn __lgamma_r(x: f64, signp: *mut c_int) -> f64 {
    // SAFETY: same contract as `lgamma_r`.
    unsafe { lgamma_r(x, signp) }
}

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn expm1(x: f64) -> f64 {
    let mode = safety_level();
    let out = expm1_r(x);
    if let Some(kind) = out.status {
        raise("expm1", kind, x, mode);
    }
    HEALING.heal(mode, x.is_finite(), out.value)
}
