//! Source of "today".
//!
//! Every request reads the clock once and passes the resulting date to both
//! validation and age calculation, so a request that straddles midnight
//! still sees a single day.

use chrono::{Local, NaiveDate};

pub trait Clock {
    /// Current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Reads the local system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date. Used for `--today` and in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
