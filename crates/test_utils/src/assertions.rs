//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for billing types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_billing::{InvoiceAmounts, InvoiceIdentity, QuarterPeriod};
use rust_decimal::Decimal;

/// Asserts that a Money value is a whole number of pence
pub fn assert_whole_pence(money: &Money) {
    assert!(
        money.amount().round_dp(2) == money.amount(),
        "Expected a whole number of pence, got {}",
        money.amount()
    );
}

/// Asserts that a Money value equals the expected amount exactly
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Money mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts the arithmetic relationships that every set of invoice amounts must satisfy
pub fn assert_amounts_consistent(amounts: &InvoiceAmounts) {
    assert_eq!(
        amounts.total_amount,
        amounts.net_amount + amounts.vat_amount,
        "Total {} is not net {} plus VAT {}",
        amounts.total_amount,
        amounts.net_amount,
        amounts.vat_amount
    );
    assert_whole_pence(&amounts.vat_amount);
    assert_whole_pence(&amounts.prorated_daily_rate);
    assert_whole_pence(&amounts.prorated_period_total);
    assert!(
        amounts.days_in_period >= 0,
        "Negative period length: {}",
        amounts.days_in_period
    );
}

/// Asserts that `quarters` tile the calendar with no gap or overlap
pub fn assert_contiguous_quarters(quarters: &[QuarterPeriod]) {
    for pair in quarters.windows(2) {
        assert_eq!(
            pair[0].end.succ_opt(),
            Some(pair[1].start),
            "Quarter ending {} is not followed by quarter starting {}",
            pair[0].end,
            pair[1].start
        );
    }
}

/// Asserts that a string is a canonical invoice number
pub fn assert_canonical_number(number: &str) -> InvoiceIdentity {
    match InvoiceIdentity::parse(number) {
        Some(identity) => {
            assert_eq!(identity.as_str(), number, "Number is not in canonical form");
            identity
        }
        None => panic!("'{number}' is not a canonical invoice number"),
    }
}
