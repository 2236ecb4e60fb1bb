//! Healing policy for non-finite math results.
//!
//! In hardened mode a finite input must never produce an infinite or NaN
//! result at the ABI boundary. Kernels that accept a [`Sentinel`] already
//! return `±MAXNUM`; everything else is repaired here.
//!
//! [`Sentinel`]: libmx_core::math::Sentinel

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::SafetyLevel;

/// Repair applied to a math result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealingAction {
    /// Infinity clamped to the largest finite value of the same sign.
    ClampToFinite { negative: bool },
    /// NaN from a finite input replaced with `0.0`.
    ReturnSafeDefault,
    /// Result passed through unchanged.
    None,
}

impl HealingAction {
    #[must_use]
    pub const fn is_heal(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Decides and counts repairs.
pub struct HealingPolicy {
    pub total_heals: AtomicU64,
    pub clamps: AtomicU64,
    pub safe_defaults: AtomicU64,
}

impl HealingPolicy {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_heals: AtomicU64::new(0),
            clamps: AtomicU64::new(0),
            safe_defaults: AtomicU64::new(0),
        }
    }

    pub fn record(&self, action: &HealingAction) {
        if action.is_heal() {
            self.total_heals.fetch_add(1, Ordering::Relaxed);
        }
        match action {
            HealingAction::ClampToFinite { .. } => {
                self.clamps.fetch_add(1, Ordering::Relaxed);
            }
            HealingAction::ReturnSafeDefault => {
                self.safe_defaults.fetch_add(1, Ordering::Relaxed);
            }
            HealingAction::None => {}
        }
    }

    /// Decide the repair for `raw`; see [`decide_action`].
    #[must_use]
    pub fn decide(&self, mode: SafetyLevel, input_finite: bool, raw: f64) -> HealingAction {
        decide_action(mode, input_finite, raw)
    }

    /// Apply (and count) the repair for `raw`.
    pub fn heal(&self, mode: SafetyLevel, input_finite: bool, raw: f64) -> f64 {
        let action = self.decide(mode, input_finite, raw);
        self.record(&action);
        apply(action, raw)
    }
}

impl Default for HealingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Repair for `raw`, computed from an input that was finite iff
/// `input_finite`. Pure; counters are only touched by [`HealingPolicy::heal`].
#[must_use]
pub fn decide_action(mode: SafetyLevel, input_finite: bool, raw: f64) -> HealingAction {
    if !mode.heals_enabled() || !input_finite || raw.is_finite() {
        return HealingAction::None;
    }
    if raw.is_nan() {
        HealingAction::ReturnSafeDefault
    } else {
        HealingAction::ClampToFinite {
            negative: raw.is_sign_negative(),
        }
    }
}

/// Result of applying `action` to `raw`.
#[must_use]
pub const fn apply(action: HealingAction, raw: f64) -> f64 {
    match action {
        HealingAction::ClampToFinite { negative: true } => f64::MIN,
        HealingAction::ClampToFinite { negative: false } => f64::MAX,
        HealingAction::ReturnSafeDefault => 0.0,
        HealingAction::None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_never_heals() {
        let policy = HealingPolicy::new();
        assert_eq!(
            policy.decide(SafetyLevel::Strict, true, f64::INFINITY),
            HealingAction::None
        );
        assert_eq!(policy.heal(SafetyLevel::Strict, true, f64::INFINITY), f64::INFINITY);
        assert_eq!(policy.total_heals.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn hardened_clamps_infinity_from_finite_input() {
        let policy = HealingPolicy::new();
        assert_eq!(policy.heal(SafetyLevel::Hardened, true, f64::INFINITY), f64::MAX);
        assert_eq!(
            policy.heal(SafetyLevel::Hardened, true, f64::NEG_INFINITY),
            f64::MIN
        );
        assert_eq!(policy.heal(SafetyLevel::Hardened, true, f64::NAN), 0.0);
        assert_eq!(policy.clamps.load(Ordering::Relaxed), 2);
        assert_eq!(policy.safe_defaults.load(Ordering::Relaxed), 1);
        assert_eq!(policy.total_heals.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn non_finite_input_passes_through() {
        let policy = HealingPolicy::new();
        assert_eq!(
            policy.decide(SafetyLevel::Hardened, false, f64::INFINITY),
            HealingAction::None
        );
        assert_eq!(policy.heal(SafetyLevel::Hardened, true, 2.5), 2.5);
    }

    #[test]
    fn decide_action_leaves_counters_alone() {
        let policy = HealingPolicy::new();
        let action = decide_action(SafetyLevel::Hardened, true, f64::NEG_INFINITY);
        assert_eq!(action, HealingAction::ClampToFinite { negative: true });
        assert_eq!(policy.decide(SafetyLevel::Hardened, true, f64::NEG_INFINITY), action);
        assert_eq!(apply(action, f64::NEG_INFINITY), f64::MIN);
        assert_eq!(policy.total_heals.load(Ordering::Relaxed), 0);
    }
}
