//! Process-wide ledger of math error reports.
//!
//! Every domain or range condition raised at the ABI boundary is recorded
//! here, the equivalent of the Cephes `mtherr` report. The ledger keeps the
//! most recent [`LEDGER_CAPACITY`] records plus lifetime counters per kind.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use libmx_core::math::MathError;
use parking_lot::Mutex;

/// Number of records retained.
pub const LEDGER_CAPACITY: usize = 64;

/// One reported condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathErrorRecord {
    /// C symbol that raised the condition (e.g. `"lgamma_r"`).
    pub function: &'static str,
    pub kind: MathError,
    /// Bit pattern of the offending argument.
    pub input_bits: u64,
}

impl MathErrorRecord {
    #[must_use]
    pub fn input(&self) -> f64 {
        f64::from_bits(self.input_bits)
    }
}

/// Bounded ring of recent records plus per-kind counters.
pub struct MathErrorLedger {
    recent: Mutex<VecDeque<MathErrorRecord>>,
    domain_errors: AtomicU64,
    range_errors: AtomicU64,
}

impl MathErrorLedger {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recent: parking_lot::const_mutex(VecDeque::new()),
            domain_errors: AtomicU64::new(0),
            range_errors: AtomicU64::new(0),
        }
    }

    /// Record a condition raised by `function` for argument `x`.
    pub fn report(&self, function: &'static str, kind: MathError, x: f64) {
        match kind {
            MathError::Domain => self.domain_errors.fetch_add(1, Ordering::Relaxed),
            MathError::Range => self.range_errors.fetch_add(1, Ordering::Relaxed),
        };
        let mut recent = self.recent.lock();
        if recent.len() == LEDGER_CAPACITY {
            recent.pop_front();
        }
        recent.push_back(MathErrorRecord {
            function,
            kind,
            input_bits: x.to_bits(),
        });
    }

    /// Lifetime count of conditions of `kind`.
    #[must_use]
    pub fn count(&self, kind: MathError) -> u64 {
        match kind {
            MathError::Domain => self.domain_errors.load(Ordering::Relaxed),
            MathError::Range => self.range_errors.load(Ordering::Relaxed),
        }
    }

    /// Most recent record, if any.
    #[must_use]
    pub fn last(&self) -> Option<MathErrorRecord> {
        self.recent.lock().back().copied()
    }

    /// Retained records, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<MathErrorRecord> {
        self.recent.lock().iter().copied().collect()
    }

    /// Drop retained records and zero the counters.
    pub fn clear(&self) {
        self.recent.lock().clear();
        self.domain_errors.store(0, Ordering::Relaxed);
        self.range_errors.store(0, Ordering::Relaxed);
    }
}

impl Default for MathErrorLedger {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_LEDGER: MathErrorLedger = MathErrorLedger::new();

/// The ledger shared by all ABI entry points.
#[must_use]
pub fn global_ledger() -> &'static MathErrorLedger {
    &GLOBAL_LEDGER
}
