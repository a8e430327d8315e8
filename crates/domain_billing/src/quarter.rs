//! English quarter-day rental periods
//!
//! Commercial rent in England is traditionally billed on the four quarter
//! days: Lady Day (25 March), Midsummer (24 June), Michaelmas
//! (29 September) and Christmas (25 December). A quarter runs from one
//! quarter day up to the day before the next, so the Christmas quarter
//! ends on 24 March of the following year.
//!
//! All four periods come from the single ordered [`QUARTER_DAYS`] table.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::DateRange;

/// One of the four English quarter days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuarterDay {
    /// 25 March
    LadyDay,
    /// 24 June
    Midsummer,
    /// 29 September
    Michaelmas,
    /// 25 December
    Christmas,
}

/// Quarter days in calendar order
pub const QUARTER_DAYS: [QuarterDay; 4] = [
    QuarterDay::LadyDay,
    QuarterDay::Midsummer,
    QuarterDay::Michaelmas,
    QuarterDay::Christmas,
];

impl QuarterDay {
    /// Returns the (month, day) on which this quarter day falls
    pub const fn month_day(self) -> (u32, u32) {
        match self {
            QuarterDay::LadyDay => (3, 25),
            QuarterDay::Midsummer => (6, 24),
            QuarterDay::Michaelmas => (9, 29),
            QuarterDay::Christmas => (12, 25),
        }
    }

    /// Returns the traditional name of the quarter day
    pub fn name(self) -> &'static str {
        match self {
            QuarterDay::LadyDay => "Lady Day",
            QuarterDay::Midsummer => "Midsummer",
            QuarterDay::Michaelmas => "Michaelmas",
            QuarterDay::Christmas => "Christmas",
        }
    }

    fn date_in(self, year: i32) -> Option<NaiveDate> {
        let (month, day) = self.month_day();
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// The quarter-day period containing a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuarterPeriod {
    /// First day of the quarter (a quarter day)
    pub start: NaiveDate,
    /// Last day of the quarter (the day before the next quarter day)
    pub end: NaiveDate,
}

impl QuarterPeriod {
    /// Returns true if the date falls inside this quarter, inclusive
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Days from start to end (end minus start)
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// The quarter day that opens this period
    pub fn quarter_day(&self) -> QuarterDay {
        QUARTER_DAYS[opening_index(self.start).unwrap_or(QUARTER_DAYS.len() - 1)]
    }

    /// The quarter immediately after this one
    pub fn next(&self) -> Option<QuarterPeriod> {
        self.end.succ_opt().map(resolve_quarter)
    }

    /// The quarter immediately before this one
    pub fn previous(&self) -> Option<QuarterPeriod> {
        self.start.pred_opt().map(resolve_quarter)
    }

    /// The quarter as an inclusive date range
    pub fn as_range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }
}

/// Resolves the quarter-day period containing `date`
///
/// A quarter day belongs to the period it opens: 24 June is the first day
/// of the Midsummer quarter, not the last day of the Lady Day quarter.
pub fn resolve_quarter(date: NaiveDate) -> QuarterPeriod {
    let period = match opening_index(date) {
        Some(index) => period_from(index, date.year()),
        // before Lady Day: still inside last year's Christmas quarter
        None => period_from(QUARTER_DAYS.len() - 1, date.year() - 1),
    };

    debug!(%date, start = %period.start, end = %period.end, "resolved quarter period");
    period
}

/// The four quarters whose start falls in `year`, in calendar order
///
/// Laid end to end they cover 25 March of `year` to 24 March of the next
/// year with no gap or overlap.
pub fn quarters_starting_in(year: i32) -> [QuarterPeriod; 4] {
    std::array::from_fn(|index| period_from(index, year))
}

/// Index of the last quarter day on or before the date within its own year
fn opening_index(date: NaiveDate) -> Option<usize> {
    let month_day = (date.month(), date.day());
    QUARTER_DAYS
        .iter()
        .rposition(|quarter_day| quarter_day.month_day() <= month_day)
}

fn period_from(index: usize, start_year: i32) -> QuarterPeriod {
    let (next_index, next_year) = if index + 1 < QUARTER_DAYS.len() {
        (index + 1, start_year)
    } else {
        (0, start_year + 1)
    };

    // Clamping only matters at the edges of chrono's representable range
    let start = QUARTER_DAYS[index]
        .date_in(start_year)
        .unwrap_or(NaiveDate::MIN);
    let end = QUARTER_DAYS[next_index]
        .date_in(next_year)
        .and_then(|next_start| next_start.pred_opt())
        .unwrap_or(NaiveDate::MAX);

    QuarterPeriod { start, end }
}
