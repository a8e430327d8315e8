//! Boundary parsing for values arriving from forms and JSON payloads
//!
//! These helpers turn loosely typed input into `Decimal` and `NaiveDate`
//! and name the offending field on failure. They are the only place a
//! missing amount may become zero, and only through [`amount_or_zero`],
//! so the default is visible at the call site.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// A field could not be turned into a typed value
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {reason}")]
pub struct ParseError {
    pub field: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Parses a monetary amount such as `"1200"`, `"1,200.50"` or `"£75"`
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(field, "value is required"));
    }

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let cleaned: String = unsigned
        .strip_prefix('£')
        .unwrap_or(unsigned)
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let value = Decimal::from_str(&cleaned)
        .map_err(|_| ParseError::new(field, format!("'{raw}' is not a number")))?;
    Ok(if negative { -value } else { value })
}

/// Converts a float from a JSON payload, rejecting NaN and infinities
pub fn amount_from_f64(field: &str, value: f64) -> Result<Decimal, ParseError> {
    if !value.is_finite() {
        return Err(ParseError::new(field, format!("{value} is not a finite number")));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| ParseError::new(field, format!("{value} is out of range")))
}

/// Parses an optional amount, treating an absent or blank value as zero
pub fn amount_or_zero(field: &str, raw: Option<&str>) -> Result<Decimal, ParseError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Decimal::ZERO),
        Some(value) => parse_amount(field, value),
    }
}

/// Parses an ISO-8601 calendar date (`yyyy-mm-dd`)
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ParseError::new(field, format!("'{raw}' is not a yyyy-mm-dd date")))
}
