//! Billing periods
//!
//! A billing period is the concrete span an invoice charges for. Quarterly
//! rent bills the quarter-day period containing the start date; monthly
//! rent bills one calendar month minus a day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::temporal::add_months_clamped;
use core_kernel::{DateRange, TemporalError};

use crate::error::BillingError;
use crate::quarter::resolve_quarter;
use crate::terms::RentFrequency;

/// The span an invoice bills for, inclusive at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BillingPeriod {
    /// Builds the period an invoice of the given frequency covers from `start`
    ///
    /// # Errors
    ///
    /// Returns a temporal error only when the month step leaves chrono's
    /// representable date range.
    pub fn for_frequency(frequency: RentFrequency, start: NaiveDate) -> Result<Self, BillingError> {
        match frequency {
            RentFrequency::Quarterly => {
                let quarter = resolve_quarter(start);
                Ok(Self {
                    start: quarter.start,
                    end: quarter.end,
                })
            }
            RentFrequency::Monthly => {
                let end = monthly_end(start)?;
                Ok(Self { start, end })
            }
        }
    }

    /// Rebuilds a period from stored dates
    ///
    /// # Errors
    ///
    /// Returns a validation error on `period` if `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BillingError> {
        let range = DateRange::new(start, end)
            .map_err(|e| BillingError::validation("period", e.to_string()))?;
        Ok(Self {
            start: range.start,
            end: range.end,
        })
    }

    /// Returns true if this is exactly the period `frequency` would bill from its start
    pub fn matches_frequency(&self, frequency: RentFrequency) -> bool {
        match frequency {
            RentFrequency::Quarterly => {
                let quarter = resolve_quarter(self.start);
                quarter.start == self.start && quarter.end == self.end
            }
            RentFrequency::Monthly => monthly_end(self.start).map_or(false, |end| end == self.end),
        }
    }

    /// Days from start to end (end minus start)
    pub fn days(&self) -> i64 {
        self.as_range().days()
    }

    /// Returns true if the date falls inside the period, inclusive
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.as_range().contains(date)
    }

    /// The period as an inclusive date range
    pub fn as_range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }
}

fn monthly_end(start: NaiveDate) -> Result<NaiveDate, TemporalError> {
    let next = add_months_clamped(start, 1)?;
    next.pred_opt().ok_or_else(|| TemporalError::OutOfRange {
        date: start.to_string(),
        months: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_quarterly_period_snaps_to_quarter() {
        let period = BillingPeriod::for_frequency(RentFrequency::Quarterly, date(2025, 8, 1)).unwrap();
        assert_eq!(period.start, date(2025, 6, 24));
        assert_eq!(period.end, date(2025, 9, 28));
        assert!(period.matches_frequency(RentFrequency::Quarterly));
        assert!(!period.matches_frequency(RentFrequency::Monthly));
    }

    #[test]
    fn test_monthly_period_is_one_month_minus_a_day() {
        let period = BillingPeriod::for_frequency(RentFrequency::Monthly, date(2025, 3, 15)).unwrap();
        assert_eq!(period.start, date(2025, 3, 15));
        assert_eq!(period.end, date(2025, 4, 14));
        assert!(period.matches_frequency(RentFrequency::Monthly));
    }

    #[test]
    fn test_monthly_period_crosses_year_end() {
        let period = BillingPeriod::for_frequency(RentFrequency::Monthly, date(2025, 12, 1)).unwrap();
        assert_eq!(period.end, date(2025, 12, 31));

        let period = BillingPeriod::for_frequency(RentFrequency::Monthly, date(2025, 12, 20)).unwrap();
        assert_eq!(period.end, date(2026, 1, 19));
    }

    #[test]
    fn test_monthly_period_clamps_short_months() {
        let period = BillingPeriod::for_frequency(RentFrequency::Monthly, date(2025, 1, 31)).unwrap();
        assert_eq!(period.end, date(2025, 2, 27));
    }

    #[test]
    fn test_new_rejects_reversed_dates() {
        let err = BillingPeriod::new(date(2025, 6, 1), date(2025, 5, 1)).unwrap_err();
        assert_eq!(err.field(), Some("period"));
    }
}
