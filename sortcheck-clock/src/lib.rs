//! Clock abstraction for sortcheck.
//!
//! Birth dates are drawn relative to "today". The trait lets tests pin that
//! date so generated corpora are reproducible from a seed.

use chrono::{Local, NaiveDate};

/// Trait for getting the current calendar date.
pub trait Clock: Send + Sync {
    /// Returns today's date in local time.
    fn today(&self) -> NaiveDate;
}

/// Real system clock implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Mock clock for testing with a fixed date.
#[derive(Debug, Clone, Copy)]
pub struct MockClock {
    date: NaiveDate,
}

impl MockClock {
    /// Create a mock clock pinned to `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Create a mock clock from year, month and day.
    ///
    /// Returns `None` if the triple is not a valid calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::new)
    }
}

impl Clock for MockClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}
