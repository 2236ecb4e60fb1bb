//! Fixture loading and management.

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Function under test: `lgamma_r`, `lgamma`, or `expm1`.
    pub function: String,
    /// Argument as a float literal (`nan`/`inf` allowed).
    pub input: String,
    /// Expected result as a float literal.
    pub expected: String,
    /// Expected sign of Γ(x) for `lgamma_r`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_sign: Option<i32>,
    /// Expected errno after the call (0 when none is raised).
    pub expected_errno: i32,
    /// Relative tolerance; absolute when `|expected| <= 1`.
    pub tolerance: f64,
    /// `strict`, `hardened`, or `both`.
    pub mode: String,
}

/// A collection of fixture cases for a function family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Function family name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &std::path::Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_sign_round_trips_as_absent() {
        let set = FixtureSet::from_json(
            r#"{
                "version":"v1","family":"lgamma","captured_at":"now",
                "cases":[{"name":"e","function":"expm1","input":"1","expected":"1.718281828459045",
                          "expected_errno":0,"tolerance":1e-13,"mode":"both"}]
            }"#,
        )
        .unwrap();
        assert_eq!(set.cases[0].expected_sign, None);
        assert!(!set.to_json().unwrap().contains("expected_sign"));
    }
}
