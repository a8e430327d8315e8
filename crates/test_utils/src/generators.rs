//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::Money;
use domain_billing::{InvoiceType, MonetaryState, RentFrequency, RentTerms};
use proptest::prelude::*;

/// Strategy for calendar dates between 1900 and 2199
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..109_572i64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + Duration::days(offset)
    })
}

/// Strategy for non-negative amounts in pence, up to £10m
pub fn non_negative_money_strategy() -> impl Strategy<Value = Money> {
    (0i64..1_000_000_000i64).prop_map(Money::from_pence)
}

/// Strategy for signed amounts in pence, up to ±£10m
pub fn money_strategy() -> impl Strategy<Value = Money> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(Money::from_pence)
}

pub fn frequency_strategy() -> impl Strategy<Value = RentFrequency> {
    prop_oneof![Just(RentFrequency::Monthly), Just(RentFrequency::Quarterly)]
}

pub fn invoice_type_strategy() -> impl Strategy<Value = InvoiceType> {
    proptest::sample::select(InvoiceType::ALL.to_vec())
}

/// Strategy for valid rent terms
pub fn rent_terms_strategy() -> impl Strategy<Value = RentTerms> {
    (non_negative_money_strategy(), frequency_strategy())
        .prop_map(|(annual_rent, frequency)| RentTerms { annual_rent, frequency })
}

/// Strategy for ledger state, balances may be negative (credit)
pub fn monetary_state_strategy() -> impl Strategy<Value = MonetaryState> {
    (money_strategy(), non_negative_money_strategy(), non_negative_money_strategy())
        .prop_map(|(previous, paid, credit)| MonetaryState::new(previous, paid, credit))
}

/// Strategy for free-text names and addresses, including punctuation and non-ASCII
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9 ]{0,30}",
        "[a-z&'., -]{0,20}",
        "\\PC{0,20}",
    ]
}
