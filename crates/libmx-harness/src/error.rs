//! Harness error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid float literal for {field}: {value:?}")]
    InvalidFloat { field: &'static str, value: String },
    #[error("unsupported function: {0}")]
    UnknownFunction(String),
    #[error("invalid sweep: {0}")]
    InvalidSweep(String),
    #[error("{count} structured log violation(s)")]
    LogValidation { count: usize },
}

/// Parse a float literal as written in fixtures and on the command line.
///
/// Accepts anything `f64::from_str` does, including `nan`, `inf`, `-inf`.
pub fn parse_f64(field: &'static str, raw: &str) -> Result<f64, HarnessError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| HarnessError::InvalidFloat {
            field,
            value: raw.to_string(),
        })
}
