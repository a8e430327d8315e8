//! Unit tests for en-GB formatting and boundary parsing

use chrono::NaiveDate;
use core_kernel::format::{format_date, format_gbp};
use core_kernel::parse::{amount_from_f64, amount_or_zero, parse_amount, parse_date};
use rust_decimal_macros::dec;

mod formatting {
    use super::*;

    #[test]
    fn test_format_gbp_rounds_half_up() {
        assert_eq!(format_gbp(dec!(0.125)), "£0.13");
        assert_eq!(format_gbp(dec!(2465.7534)), "£2,465.75");
    }

    #[test]
    fn test_format_gbp_negative_and_zero() {
        assert_eq!(format_gbp(dec!(-1500)), "-£1,500.00");
        assert_eq!(format_gbp(dec!(-0.001)), "£0.00");
        assert_eq!(format_gbp(dec!(0)), "£0.00");
    }

    #[test]
    fn test_format_date_is_day_first() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(format_date(date), "05/03/2025");
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_amount_accepts_form_input() {
        assert_eq!(parse_amount("net_amount", "1200").unwrap(), dec!(1200));
        assert_eq!(parse_amount("net_amount", " £1,200.50 ").unwrap(), dec!(1200.50));
        assert_eq!(parse_amount("net_amount", "-£20").unwrap(), dec!(-20));
    }

    #[test]
    fn test_parse_amount_names_the_field() {
        let err = parse_amount("payment_made", "twelve").unwrap_err();
        assert_eq!(err.field, "payment_made");
        assert_eq!(err.to_string(), "Invalid payment_made: 'twelve' is not a number");

        let err = parse_amount("payment_made", "").unwrap_err();
        assert_eq!(err.reason, "value is required");
    }

    #[test]
    fn test_amount_or_zero() {
        assert_eq!(amount_or_zero("credit_note_amount", None).unwrap(), dec!(0));
        assert_eq!(amount_or_zero("credit_note_amount", Some("")).unwrap(), dec!(0));
        assert_eq!(amount_or_zero("credit_note_amount", Some("75")).unwrap(), dec!(75));
    }

    #[test]
    fn test_amount_from_f64_rejects_non_finite() {
        assert!(amount_from_f64("annual_rent", f64::NAN).is_err());
        assert!(amount_from_f64("annual_rent", f64::INFINITY).is_err());
        assert_eq!(amount_from_f64("annual_rent", 1200.5).unwrap(), dec!(1200.5));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("invoice_date", "2025-03-25").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 25).unwrap()
        );
        assert_eq!(parse_date("invoice_date", "25/03/2025").unwrap_err().field, "invoice_date");
    }
}
