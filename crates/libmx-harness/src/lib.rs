//! Conformance testing harness for libmx.
//!
//! This crate provides:
//! - Fixtures: reference values for `lgamma_r`/`lgamma`/`expm1` as JSON
//! - Runner: evaluate fixtures against the core kernels under a runtime mode
//! - Sweep: grid and branch-boundary checks of the log-gamma invariants
//! - Structured logging: JSONL evidence for every run
//! - Report generation: markdown summaries of verification runs

#![forbid(unsafe_code)]

pub mod error;
pub mod fixtures;
pub mod runner;
pub mod structured_log;
pub mod sweep;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureCase, FixtureSet};
pub use runner::TestRunner;
pub use sweep::{SweepConfig, SweepReport};
pub use verify::{VerificationResult, VerificationSummary};
