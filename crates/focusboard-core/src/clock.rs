//! Calendar-date source for the aggregate stores.
//!
//! The date key is recomputed on every access, so a phase that spans midnight
//! is credited to the date on which it completes.

use std::cell::Cell;

use chrono::{Days, Local, NaiveDate};

/// Storage date format (`YYYY-MM-DD`).
pub const DATE_FMT: &str = "%Y-%m-%d";

pub trait Clock {
    /// The current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A settable clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    date: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Cell::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }

    /// Move forward by `days` calendar days.
    pub fn advance_days(&self, days: u64) {
        let current = self.date.get();
        self.date
            .set(current.checked_add_days(Days::new(days)).unwrap_or(current));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Format a date as a storage key suffix.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).ok()
}
