//! Runtime mode configuration.
//!
//! The runtime mode is read from the `LIBMX_MODE` environment variable:
//! - `strict` (default): C99 Annex F results. Poles and overflow return
//!   `±∞` and set `errno` to `EDOM`/`ERANGE`.
//! - `hardened`: same errno reporting, but non-finite results produced from
//!   finite inputs are clamped to `±MAXNUM` so callers never see infinity.
//! - `off`: no ledger recording. Benchmark baseline only; not reachable
//!   from the environment.

use std::sync::atomic::{AtomicU8, Ordering};

use libmx_core::math::Sentinel;

/// Runtime operating mode for the math boundary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyLevel {
    /// IEEE results: infinities pass through, errno reports the condition.
    #[default]
    Strict,
    /// Infinities from finite inputs are clamped to the largest finite value.
    Hardened,
    /// No ledger bookkeeping.
    Off,
}

impl SafetyLevel {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "strict" | "default" | "abi" => Self::Strict,
            "hardened" | "repair" | "tsm" | "full" => Self::Hardened,
            "off" | "none" | "disabled" => Self::Off,
            _ => Self::Strict,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Hardened => "hardened",
            Self::Off => "off",
        }
    }

    /// Returns true if non-finite results are clamped.
    #[must_use]
    pub const fn heals_enabled(self) -> bool {
        matches!(self, Self::Hardened)
    }

    /// Returns true if error conditions are recorded in the ledger.
    #[must_use]
    pub const fn recording_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Value the kernels return for poles and overflow in this mode.
    #[must_use]
    pub const fn sentinel(self) -> Sentinel {
        match self {
            Self::Hardened => Sentinel::MaxFinite,
            Self::Strict | Self::Off => Sentinel::Infinity,
        }
    }
}

// Atomic cache: 0=unresolved, 1=Strict, 2=Hardened, 3=Off, 255=resolving.
// A reentrant call made while the environment is being read sees RESOLVING
// and gets Strict instead of blocking.
static CACHED_LEVEL: AtomicU8 = AtomicU8::new(0);

const LEVEL_UNRESOLVED: u8 = 0;
const LEVEL_STRICT: u8 = 1;
const LEVEL_HARDENED: u8 = 2;
const LEVEL_OFF: u8 = 3;
const LEVEL_RESOLVING: u8 = 255;

/// Environment variable selecting the runtime mode.
pub const MODE_ENV: &str = "LIBMX_MODE";

fn parse_runtime_mode_env(raw: &str) -> SafetyLevel {
    match raw.to_ascii_lowercase().as_str() {
        "hardened" | "repair" | "tsm" | "full" => SafetyLevel::Hardened,
        // `Off` is for benches and tests only; pin it with `pin_safety_level`.
        _ => SafetyLevel::Strict,
    }
}

fn level_to_u8(level: SafetyLevel) -> u8 {
    match level {
        SafetyLevel::Strict => LEVEL_STRICT,
        SafetyLevel::Hardened => LEVEL_HARDENED,
        SafetyLevel::Off => LEVEL_OFF,
    }
}

fn u8_to_level(v: u8) -> SafetyLevel {
    match v {
        LEVEL_HARDENED => SafetyLevel::Hardened,
        LEVEL_OFF => SafetyLevel::Off,
        _ => SafetyLevel::Strict,
    }
}

/// Get the configured safety level (reads `LIBMX_MODE` on first call, cached
/// thereafter).
#[must_use]
pub fn safety_level() -> SafetyLevel {
    let cached = CACHED_LEVEL.load(Ordering::Relaxed);

    if cached != LEVEL_UNRESOLVED && cached != LEVEL_RESOLVING {
        return u8_to_level(cached);
    }
    if cached == LEVEL_RESOLVING {
        return SafetyLevel::Strict;
    }

    if CACHED_LEVEL
        .compare_exchange(
            LEVEL_UNRESOLVED,
            LEVEL_RESOLVING,
            Ordering::SeqCst,
            Ordering::Relaxed,
        )
        .is_err()
    {
        let v = CACHED_LEVEL.load(Ordering::Relaxed);
        return if v != LEVEL_UNRESOLVED && v != LEVEL_RESOLVING {
            u8_to_level(v)
        } else {
            SafetyLevel::Strict
        };
    }

    let level = std::env::var(MODE_ENV)
        .map(|v| parse_runtime_mode_env(&v))
        .unwrap_or_default();
    CACHED_LEVEL.store(level_to_u8(level), Ordering::Release);
    level
}

/// Pin the process-wide mode, bypassing `LIBMX_MODE`.
///
/// Used by the harness `--mode` flag, benches, and tests.
pub fn pin_safety_level(level: SafetyLevel) {
    CACHED_LEVEL.store(level_to_u8(level), Ordering::Release);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_safety_levels() {
        assert_eq!(SafetyLevel::from_str_loose("strict"), SafetyLevel::Strict);
        assert_eq!(SafetyLevel::from_str_loose("STRICT"), SafetyLevel::Strict);
        assert_eq!(SafetyLevel::from_str_loose("abi"), SafetyLevel::Strict);
        assert_eq!(
            SafetyLevel::from_str_loose("Hardened"),
            SafetyLevel::Hardened
        );
        assert_eq!(SafetyLevel::from_str_loose("repair"), SafetyLevel::Hardened);
        assert_eq!(SafetyLevel::from_str_loose("off"), SafetyLevel::Off);
        assert_eq!(SafetyLevel::from_str_loose("bogus"), SafetyLevel::Strict);
    }

    #[test]
    fn env_parser_never_yields_off() {
        assert_eq!(parse_runtime_mode_env("strict"), SafetyLevel::Strict);
        assert_eq!(parse_runtime_mode_env("hardened"), SafetyLevel::Hardened);
        assert_eq!(parse_runtime_mode_env("off"), SafetyLevel::Strict);
        assert_eq!(parse_runtime_mode_env(""), SafetyLevel::Strict);
    }

    #[test]
    fn sentinel_follows_mode() {
        assert_eq!(SafetyLevel::Strict.sentinel(), Sentinel::Infinity);
        assert_eq!(SafetyLevel::Off.sentinel(), Sentinel::Infinity);
        assert_eq!(SafetyLevel::Hardened.sentinel(), Sentinel::MaxFinite);
    }

    #[test]
    fn flags_by_mode() {
        assert!(!SafetyLevel::Strict.heals_enabled());
        assert!(SafetyLevel::Hardened.heals_enabled());
        assert!(SafetyLevel::Strict.recording_enabled());
        assert!(!SafetyLevel::Off.recording_enabled());
        assert_eq!(SafetyLevel::Hardened.as_str(), "hardened");
    }

    #[test]
    fn cached_mode_is_sticky_and_resolving_reads_strict() {
        let previous = CACHED_LEVEL.swap(LEVEL_HARDENED, Ordering::SeqCst);
        assert_eq!(safety_level(), SafetyLevel::Hardened);
        assert_eq!(safety_level(), SafetyLevel::Hardened);

        CACHED_LEVEL.store(LEVEL_RESOLVING, Ordering::SeqCst);
        assert_eq!(safety_level(), SafetyLevel::Strict);

        pin_safety_level(SafetyLevel::Off);
        assert_eq!(safety_level(), SafetyLevel::Off);

        CACHED_LEVEL.store(previous, Ordering::SeqCst);
    }
}
