//! Display formatting for the en-GB locale
//!
//! Currency is always pounds sterling and dates are always day/month/year.
//! There is deliberately no locale parameter.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::money::round_half_up;

/// Formats an amount as GBP, e.g. `£1,234.50` or `-£20.00`
pub fn format_gbp(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}£{grouped}.{fraction}")
}

/// Formats a date as `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
