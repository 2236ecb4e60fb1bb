//! Grid and branch-boundary sweeps of the log-gamma evaluator.
//!
//! The grid sweep checks, at every point, that the sign is `±1`, that it
//! follows the parity rule on the negative axis, and that a condition is
//! raised exactly at poles and past `MAXLGM`. The boundary checks compare
//! results on either side of every branch switch.

use libmx_core::math::{MAXLGM, MathError, lgamma, lgamma_r};
use serde::Serialize;

use crate::error::HarnessError;

/// Grid to sweep: `steps + 1` evenly spaced points over `[from, to]`.
#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    pub from: f64,
    pub to: f64,
    pub steps: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            from: -40.0,
            to: 40.0,
            steps: 8_000,
        }
    }
}

impl SweepConfig {
    fn validate(&self) -> Result<(), HarnessError> {
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(HarnessError::InvalidSweep(
                "bounds must be finite".to_string(),
            ));
        }
        if self.from >= self.to {
            return Err(HarnessError::InvalidSweep(format!(
                "from ({}) must be below to ({})",
                self.from, self.to
            )));
        }
        if self.steps == 0 {
            return Err(HarnessError::InvalidSweep("steps must be > 0".to_string()));
        }
        Ok(())
    }

    fn points(&self) -> impl Iterator<Item = f64> + '_ {
        let h = (self.to - self.from) / f64::from(self.steps);
        (0..=self.steps).map(move |i| self.from + f64::from(i) * h)
    }
}

/// A point where an invariant did not hold.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub x: f64,
    pub rule: &'static str,
    pub detail: String,
}

/// Comparison of results across one branch switch.
#[derive(Debug, Clone, Serialize)]
pub struct BoundaryCheck {
    pub label: &'static str,
    pub x: f64,
    pub left: f64,
    pub right: f64,
    pub deviation: f64,
    pub tolerance: f64,
    pub passed: bool,
}

/// Outcome of a sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub points: usize,
    pub poles: usize,
    pub violations: Vec<Violation>,
    pub boundaries: Vec<BoundaryCheck>,
}

impl SweepReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty() && self.boundaries.iter().all(|b| b.passed)
    }
}

const BOUNDARY_TOLERANCE: f64 = 1e-13;

/// Expected sign of Γ(x) for finite non-pole `x`.
#[must_use]
pub fn expected_sign(x: f64) -> i32 {
    if x > 0.0 {
        return 1;
    }
    if (-x).floor() % 2.0 == 0.0 { -1 } else { 1 }
}

fn expected_status(x: f64) -> Option<MathError> {
    if x <= 0.0 && x == x.floor() {
        Some(MathError::Domain)
    } else if x > MAXLGM {
        Some(MathError::Range)
    } else {
        None
    }
}

/// Run the grid sweep plus the boundary checks.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepReport, HarnessError> {
    config.validate()?;

    let mut points = 0;
    let mut poles = 0;
    let mut violations = Vec::new();
    for x in config.points() {
        points += 1;
        let out = lgamma_r(x);
        let want_status = expected_status(x);
        if want_status == Some(MathError::Domain) {
            poles += 1;
        }
        if out.status != want_status {
            violations.push(Violation {
                x,
                rule: "status",
                detail: format!("expected {want_status:?}, got {:?}", out.status),
            });
        }
        if out.sign != 1 && out.sign != -1 {
            violations.push(Violation {
                x,
                rule: "sign-range",
                detail: format!("sign {}", out.sign),
            });
        } else if want_status.is_none() && out.sign != expected_sign(x) {
            violations.push(Violation {
                x,
                rule: "sign-parity",
                detail: format!("expected {}, got {}", expected_sign(x), out.sign),
            });
        }
        if want_status.is_none() && !out.value.is_finite() {
            violations.push(Violation {
                x,
                rule: "finite",
                detail: format!("value {:?}", out.value),
            });
        }
    }

    Ok(SweepReport {
        points,
        poles,
        violations,
        boundaries: boundary_checks(),
    })
}

/// Continuity at each branch switch, and the recurrence
/// `ln|Γ(x)| = ln|Γ(x + 1)| - ln|x|` across the reflection switch at -34
/// (itself a pole, so adjacent values cannot be compared directly).
#[must_use]
pub fn boundary_checks() -> Vec<BoundaryCheck> {
    let mut checks = Vec::new();
    for (label, b) in [
        ("stirling", 13.0_f64),
        ("reduce-up", 3.0),
        ("reduce-down", 2.0),
        ("small-positive", 0.031_25),
        ("small-negative", -0.031_25),
    ] {
        let left = lgamma(b.next_down());
        let right = lgamma(b.next_up());
        checks.push(check(label, b, left, right));
    }
    for x in [-34.1, -34.5, -34.9, -35.5] {
        let left = lgamma(x);
        let right = lgamma(x + 1.0) - (-x).ln();
        checks.push(check("reflection-recurrence", x, left, right));
    }
    for x in [12.25, 12.5, 12.75] {
        let left = lgamma(x + 1.0);
        let right = lgamma(x) + x.ln();
        checks.push(check("stirling-recurrence", x, left, right));
    }
    checks
}

fn check(label: &'static str, x: f64, left: f64, right: f64) -> BoundaryCheck {
    let deviation = (left - right).abs();
    let tolerance = BOUNDARY_TOLERANCE * left.abs().max(right.abs()).max(1.0);
    BoundaryCheck {
        label,
        x,
        left,
        right,
        deviation,
        tolerance,
        passed: deviation <= tolerance,
    }
}
