//! Domain/range conditions raised by the math kernels.

use std::fmt;

use crate::errno::{EDOM, ERANGE};

/// Largest finite binary64 value, returned in place of infinity when the
/// caller selects [`Sentinel::MaxFinite`].
pub const MAXNUM: f64 = f64::MAX;

/// Error condition raised by a math kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathError {
    /// Argument is a pole or otherwise outside the function's domain.
    Domain,
    /// Result magnitude exceeds the representable range.
    Range,
}

impl MathError {
    /// C `errno` value for this condition.
    #[must_use]
    pub const fn errno(self) -> i32 {
        match self {
            Self::Domain => EDOM,
            Self::Range => ERANGE,
        }
    }

    /// Classic Cephes `mtherr` code (`SING` = 2, `OVERFLOW` = 3).
    #[must_use]
    pub const fn cephes_code(self) -> i32 {
        match self {
            Self::Domain => 2,
            Self::Range => 3,
        }
    }

    /// Short label used in reports and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Range => "range",
        }
    }
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain => f.write_str("argument singularity (domain error)"),
            Self::Range => f.write_str("result overflow (range error)"),
        }
    }
}

impl std::error::Error for MathError {}

/// Value returned for a pole or an overflow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// IEEE infinity.
    #[default]
    Infinity,
    /// `MAXNUM`, for hosts that cannot carry infinities.
    MaxFinite,
}

impl Sentinel {
    /// Sentinel magnitude with the given sign (`sign < 0` yields negative).
    #[must_use]
    pub fn signed(self, sign: i32) -> f64 {
        let magnitude = match self {
            Self::Infinity => f64::INFINITY,
            Self::MaxFinite => MAXNUM,
        };
        if sign < 0 { -magnitude } else { magnitude }
    }
}

/// Result of a single-valued kernel together with its error condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MathOutcome {
    pub value: f64,
    pub status: Option<MathError>,
}

impl MathOutcome {
    #[must_use]
    pub const fn ok(value: f64) -> Self {
        Self {
            value,
            status: None,
        }
    }

    #[must_use]
    pub const fn err(value: f64, status: MathError) -> Self {
        Self {
            value,
            status: Some(status),
        }
    }

    pub fn into_result(self) -> Result<f64, MathError> {
        match self.status {
            None => Ok(self.value),
            Some(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errno_mapping() {
        assert_eq!(MathError::Domain.errno(), EDOM);
        assert_eq!(MathError::Range.errno(), ERANGE);
        assert_eq!(MathError::Domain.cephes_code(), 2);
        assert_eq!(MathError::Range.cephes_code(), 3);
    }

    #[test]
    fn sentinel_sign() {
        assert_eq!(Sentinel::Infinity.signed(1), f64::INFINITY);
        assert_eq!(Sentinel::Infinity.signed(-1), f64::NEG_INFINITY);
        assert_eq!(Sentinel::MaxFinite.signed(1), f64::MAX);
        assert_eq!(Sentinel::MaxFinite.signed(-1), f64::MIN);
        assert_eq!(Sentinel::default(), Sentinel::Infinity);
    }

    #[test]
    fn outcome_into_result() {
        assert_eq!(MathOutcome::ok(1.5).into_result(), Ok(1.5));
        assert_eq!(
            MathOutcome::err(f64::INFINITY, MathError::Range).into_result(),
            Err(MathError::Range)
        );
    }
}
