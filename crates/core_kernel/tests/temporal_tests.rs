//! Unit tests for the Temporal module

use chrono::NaiveDate;
use core_kernel::temporal::{add_months_clamped, DateRange, TemporalError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod date_range {
    use super::*;

    #[test]
    fn test_single_day_range_has_zero_days() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 1)).unwrap();
        assert_eq!(range.days(), 0);
        assert!(range.contains(date(2025, 1, 1)));
    }

    #[test]
    fn test_days_is_end_minus_start() {
        let range = DateRange::new(date(2025, 3, 25), date(2025, 6, 23)).unwrap();
        assert_eq!(range.days(), 90);
    }

    #[test]
    fn test_reversed_range_error_message() {
        let err = DateRange::new(date(2025, 2, 1), date(2025, 1, 1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid period: start 2025-02-01 must not be after end 2025-01-01"
        );
    }

    #[test]
    fn test_overlap_and_adjacency() {
        let first = DateRange::new(date(2025, 3, 25), date(2025, 6, 23)).unwrap();
        let second = DateRange::new(date(2025, 6, 24), date(2025, 9, 28)).unwrap();
        let straddle = DateRange::new(date(2025, 6, 1), date(2025, 7, 1)).unwrap();

        assert!(!first.overlaps(&second));
        assert!(first.is_followed_by(&second));
        assert!(!second.is_followed_by(&first));
        assert!(first.overlaps(&straddle));
        assert!(straddle.overlaps(&second));
    }
}

mod month_arithmetic {
    use super::*;

    #[test]
    fn test_plain_month_step() {
        assert_eq!(add_months_clamped(date(2025, 3, 15), 1).unwrap(), date(2025, 4, 15));
        assert_eq!(add_months_clamped(date(2025, 12, 15), 1).unwrap(), date(2026, 1, 15));
    }

    #[test]
    fn test_clamps_to_short_month() {
        assert_eq!(add_months_clamped(date(2025, 1, 31), 1).unwrap(), date(2025, 2, 28));
        assert_eq!(add_months_clamped(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(add_months_clamped(date(2025, 8, 31), 1).unwrap(), date(2025, 9, 30));
    }

    #[test]
    fn test_out_of_range() {
        let result = add_months_clamped(NaiveDate::MAX, 1);
        assert!(matches!(result, Err(TemporalError::OutOfRange { months: 1, .. })));
    }
}
