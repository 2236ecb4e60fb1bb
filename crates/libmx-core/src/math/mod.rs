//! Mathematical functions.
//!
//! Implements the `<math.h>` special functions carried by libmx: the
//! log-gamma evaluator and `expm1`, plus the floating-point utilities and
//! polynomial kernels they are built from.

pub mod error;
pub mod exp;
pub mod float;
pub mod poly;
pub mod special;

pub use error::{MathError, MathOutcome, Sentinel};
pub use exp::{expm1, expm1_r};
pub use float::{fabs, floor, log, sin};
pub use poly::{p1evl, polevl};
pub use special::{LgammaOutcome, MAXLGM, lgamma, lgamma_r, lgamma_r_with};
