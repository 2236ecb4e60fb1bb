//! Output comparison and verification.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Result of verifying a single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Name of the test case.
    pub case_name: String,
    /// Function exercised.
    pub function: String,
    /// Whether the case passed.
    pub passed: bool,
    /// Expected output.
    pub expected: String,
    /// Actual output from our implementation.
    pub actual: String,
    /// Mismatch description if the case failed.
    pub diff: Option<String>,
}

/// Aggregate verification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    /// Build a summary from a list of results.
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        Self {
            total,
            passed,
            failed,
            results,
        }
    }

    /// Returns true if all cases passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Render a markdown report.
    #[must_use]
    pub fn to_markdown(&self, campaign: &str, mode: &str, timestamp: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Conformance report: {campaign}");
        let _ = writeln!(out);
        let _ = writeln!(out, "- mode: `{mode}`");
        let _ = writeln!(out, "- generated: {timestamp}");
        let _ = writeln!(
            out,
            "- passed: {}/{} ({} failed)",
            self.passed, self.total, self.failed
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "| case | function | result | expected | actual |");
        let _ = writeln!(out, "|------|----------|--------|----------|--------|");
        for r in &self.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(
                out,
                "| {} | {} | {} | `{}` | `{}` |",
                r.case_name, r.function, status, r.expected, r.actual
            );
        }
        let failures: Vec<_> = self.results.iter().filter(|r| !r.passed).collect();
        if !failures.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "## Failures");
            for r in failures {
                let _ = writeln!(out);
                let _ = writeln!(out, "### {}", r.case_name);
                if let Some(diff) = &r.diff {
                    let _ = writeln!(out, "```\n{diff}\n```");
                }
            }
        }
        out
    }
}

/// Compare `actual` with `expected` under a mixed relative/absolute tolerance.
///
/// NaN matches NaN; infinities match only an identical infinity.
#[must_use]
pub fn values_match(expected: f64, actual: f64, tolerance: f64) -> bool {
    if expected.is_nan() || actual.is_nan() {
        return expected.is_nan() && actual.is_nan();
    }
    if expected.is_infinite() || actual.is_infinite() {
        return expected == actual;
    }
    (actual - expected).abs() <= tolerance * expected.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool) -> VerificationResult {
        VerificationResult {
            case_name: name.to_string(),
            function: "lgamma_r".to_string(),
            passed,
            expected: "1".to_string(),
            actual: if passed { "1" } else { "2" }.to_string(),
            diff: (!passed).then(|| "value: expected 1, got 2".to_string()),
        }
    }

    #[test]
    fn summary_counts() {
        let s = VerificationSummary::from_results(vec![result("a", true), result("b", false)]);
        assert_eq!((s.total, s.passed, s.failed), (2, 1, 1));
        assert!(!s.all_passed());
    }

    #[test]
    fn markdown_lists_failures() {
        let s = VerificationSummary::from_results(vec![result("a", true), result("b", false)]);
        let md = s.to_markdown("lgamma", "strict", "2026-01-01T00:00:00Z");
        assert!(md.contains("passed: 1/2"));
        assert!(md.contains("### b"));
        assert!(!md.contains("### a"));
    }

    #[test]
    fn tolerance_is_mixed() {
        assert!(values_match(0.0, 5e-14, 1e-13));
        assert!(values_match(1000.0, 1000.0 + 5e-11, 1e-13));
        assert!(!values_match(1000.0, 1000.0 + 5e-10, 1e-13));
        assert!(values_match(f64::NAN, f64::NAN, 0.0));
        assert!(!values_match(f64::INFINITY, f64::MAX, 1e-13));
        assert!(!values_match(f64::INFINITY, f64::NEG_INFINITY, 1e-13));
    }
}
