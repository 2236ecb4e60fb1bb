//! Test execution engine.

use libmx_core::math::{expm1_r, lgamma_r_with};
use libmx_membrane::config::SafetyLevel;
use libmx_membrane::heal::{apply, decide_action};

use crate::error::{HarnessError, parse_f64};
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::verify::{VerificationResult, values_match};

/// What one evaluation produced, as the C boundary would see it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Execution {
    pub value: f64,
    /// Sign of Γ(x); `None` for functions without one.
    pub sign: Option<i32>,
    /// errno the ABI entry would have set (0 when none).
    pub errno: i32,
}

// What the ABI hands back after the hardened-mode repair.
fn healed(mode: SafetyLevel, x: f64, raw: f64) -> f64 {
    apply(decide_action(mode, x.is_finite(), raw), raw)
}

/// Evaluate `function` at `x` with the semantics of `mode`.
pub fn execute(function: &str, x: f64, mode: SafetyLevel) -> Result<Execution, HarnessError> {
    match function {
        "lgamma_r" | "__lgamma_r" | "lgamma" => {
            let out = lgamma_r_with(x, mode.sentinel());
            Ok(Execution {
                value: healed(mode, x, out.value),
                sign: (function != "lgamma").then_some(out.sign),
                errno: out.status.map_or(0, |e| e.errno()),
            })
        }
        "expm1" => {
            let out = expm1_r(x);
            Ok(Execution {
                value: healed(mode, x, out.value),
                sign: None,
                errno: out.status.map_or(0, |e| e.errno()),
            })
        }
        other => Err(HarnessError::UnknownFunction(other.to_string())),
    }
}

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Mode being tested.
    pub mode: SafetyLevel,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: SafetyLevel) -> Self {
        Self {
            campaign: campaign.into(),
            mode,
        }
    }

    /// Run all fixtures that apply to this runner's mode.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .filter(|case| mode_matches(self.mode, &case.mode))
            .map(|case| self.run_case(case))
            .collect()
    }

    fn run_case(&self, case: &FixtureCase) -> VerificationResult {
        let case_name = if case.mode.eq_ignore_ascii_case("both") {
            format!("{} [{}]", case.name, self.mode.as_str())
        } else {
            case.name.clone()
        };
        let (actual, mismatches) = match check_case(case, self.mode) {
            Ok(pair) => pair,
            Err(err) => (format!("error:{err}"), vec![err.to_string()]),
        };
        VerificationResult {
            case_name,
            function: case.function.clone(),
            passed: mismatches.is_empty(),
            expected: case.expected.clone(),
            actual,
            diff: (!mismatches.is_empty()).then(|| mismatches.join("\n")),
        }
    }
}

fn mode_matches(active: SafetyLevel, case_mode: &str) -> bool {
    let case = case_mode.to_ascii_lowercase();
    case == "both" || case == active.as_str()
}

fn check_case(case: &FixtureCase, mode: SafetyLevel) -> Result<(String, Vec<String>), HarnessError> {
    let x = parse_f64("input", &case.input)?;
    let expected = parse_f64("expected", &case.expected)?;
    let run = execute(&case.function, x, mode)?;

    let mut mismatches = Vec::new();
    if !values_match(expected, run.value, case.tolerance) {
        mismatches.push(format!(
            "value: expected {expected:e}, got {:e} (tolerance {:e})",
            run.value, case.tolerance
        ));
    }
    if let Some(want) = case.expected_sign
        && run.sign != Some(want)
    {
        mismatches.push(format!("sign: expected {want}, got {:?}", run.sign));
    }
    if run.errno != case.expected_errno {
        mismatches.push(format!(
            "errno: expected {}, got {}",
            case.expected_errno, run.errno
        ));
    }
    Ok((format!("{:?}", run.value), mismatches))
}
