//! Calendar date ranges
//!
//! Billing works on whole calendar days. Every range here is inclusive at
//! both ends and built from `chrono::NaiveDate`, so there is no time of
//! day and no timezone to get wrong.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Date out of range: {date} plus {months} month(s)")]
    OutOfRange {
        date: String,
        months: u32,
    },
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days between start and end (end minus start)
    ///
    /// A single-day range yields 0. Proration uses this difference rather
    /// than the inclusive day count.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Returns true if the two ranges share at least one day
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Returns true if `other` begins the day after this range ends
    pub fn is_followed_by(&self, other: &DateRange) -> bool {
        self.end.succ_opt() == Some(other.start)
    }
}

/// Adds calendar months, clamping the day to the end of shorter months
///
/// 31 January plus one month is 28 (or 29) February.
pub fn add_months_clamped(date: NaiveDate, months: u32) -> Result<NaiveDate, TemporalError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| TemporalError::OutOfRange {
            date: date.to_string(),
            months,
        })
}
