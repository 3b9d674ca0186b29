//! Core traits for the ledger's external collaborators
//!
//! The ledger stamps every transaction record with the current wall-clock
//! time. The source of that time is abstracted so tests (and report
//! fixtures) can pin it.

use chrono::{Local, NaiveDateTime};
use std::fmt::Debug;

/// Source of timestamps for transaction records
pub trait Clock: Send + Sync + Debug {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    /// Create a clock frozen at `instant`
    pub fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}
