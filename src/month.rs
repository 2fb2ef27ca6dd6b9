//! Calendar month used to scope a query
//!
//! A `YearMonth` both selects which films are ranked and stands in for the
//! watched date of grid entries, which carry no day of their own.

use crate::BoxdlyError;
use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// A calendar year and month (e.g. 2024-12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    /// Creates a month, returning None for an out of range year or month
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Returns true if `date` falls in this month (day is ignored)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = BoxdlyError;

    /// Parses `YYYY-MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoxdlyError::InvalidMonth {
            value: s.to_string(),
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).ok_or_else(invalid)
    }
}
