//! # libmx-membrane
//!
//! Runtime policy shared by the libmx ABI boundary:
//!
//! - [`config`]: the `LIBMX_MODE` safety level, resolved once per process.
//! - [`heal`]: how non-finite results are repaired in hardened mode.
//! - [`ledger`]: process-wide record of domain/range conditions (the
//!   `mtherr` report channel).

pub mod config;
pub mod heal;
pub mod ledger;

pub use config::{SafetyLevel, safety_level};
pub use heal::{HealingAction, HealingPolicy};
pub use ledger::{MathErrorLedger, MathErrorRecord, global_ledger};
