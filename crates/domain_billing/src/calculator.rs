//! Invoice amounts and balance due
//!
//! Everything here is a free function over immutable inputs. The net
//! amount is chosen by the caller (the invoice form lets a user override
//! the suggested figure); these functions add VAT, work out the
//! informational proration figures, and roll the prior ledger state into
//! a balance due.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::money::round_half_up;
use core_kernel::parse::amount_or_zero;
use core_kernel::{Money, Rate};

use crate::error::BillingError;
use crate::period::BillingPeriod;
use crate::terms::RentTerms;

/// UK standard VAT rate applied to every invoice
pub const VAT_RATE: Rate = Rate::new(dec!(0.20));

/// How the daily proration rate is derived from the net amount
///
/// `daily_rate = net_amount * annualisation_factor / days_in_year`
///
/// The default factor of 10 matches invoices already issued. It is not the
/// number of periods in a year (12 monthly, 4 quarterly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProrationBasis {
    pub annualisation_factor: Decimal,
    pub days_in_year: u32,
}

impl Default for ProrationBasis {
    fn default() -> Self {
        Self {
            annualisation_factor: dec!(10),
            days_in_year: 365,
        }
    }
}

impl ProrationBasis {
    /// Creates a validated proration basis
    pub fn new(annualisation_factor: Decimal, days_in_year: u32) -> Result<Self, BillingError> {
        let basis = Self {
            annualisation_factor,
            days_in_year,
        };
        basis.validate()?;
        Ok(basis)
    }

    /// Rejects a zero year length or a negative factor
    pub fn validate(&self) -> Result<(), BillingError> {
        if self.days_in_year == 0 {
            return Err(BillingError::Configuration(
                "proration.days_in_year must be greater than zero".to_string(),
            ));
        }
        if self.annualisation_factor.is_sign_negative() && !self.annualisation_factor.is_zero() {
            return Err(BillingError::Configuration(
                "proration.annualisation_factor must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Derived invoice figures
///
/// `vat_amount`, `prorated_daily_rate` and `prorated_period_total` are
/// rounded to pence, half-up. `total_amount` is `net_amount + vat_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceAmounts {
    pub net_amount: Money,
    pub vat_amount: Money,
    pub total_amount: Money,
    pub prorated_daily_rate: Money,
    pub prorated_period_total: Money,
    pub days_in_period: i64,
}

/// Carry-over ledger facts for a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonetaryState {
    pub previous_balance: Money,
    pub payment_made: Money,
    pub credit_note_amount: Money,
}

impl MonetaryState {
    pub fn new(previous_balance: Money, payment_made: Money, credit_note_amount: Money) -> Self {
        Self {
            previous_balance,
            payment_made,
            credit_note_amount,
        }
    }

    /// Builds the state from raw form fields
    ///
    /// A missing or blank field is taken as zero. This is the one place
    /// absent money is defaulted; the calculator itself never does it.
    pub fn from_form_fields(
        previous_balance: Option<&str>,
        payment_made: Option<&str>,
        credit_note_amount: Option<&str>,
    ) -> Result<Self, BillingError> {
        Ok(Self {
            previous_balance: Money::new(amount_or_zero("previous_balance", previous_balance)?),
            payment_made: Money::new(amount_or_zero("payment_made", payment_made)?),
            credit_note_amount: Money::new(amount_or_zero("credit_note_amount", credit_note_amount)?),
        })
    }
}

/// The net amount offered before the user overrides it
///
/// Annual rent spread evenly over the year's invoices, rounded to pence.
pub fn suggested_net_amount(terms: &RentTerms) -> Money {
    Money::new(round_half_up(terms.rent_per_period()))
}

/// Computes VAT, total and proration for an invoice using the default basis
pub fn compute_invoice_amounts(
    terms: &RentTerms,
    period: &BillingPeriod,
    net_amount: Money,
) -> Result<InvoiceAmounts, BillingError> {
    compute_invoice_amounts_with(terms, period, net_amount, &ProrationBasis::default())
}

/// Computes VAT, total and proration for an invoice
///
/// # Errors
///
/// Returns a validation error naming the field when:
/// - `annual_rent` is negative
/// - `net_amount` is negative
/// - `period` ends before it starts, or is not the period `terms.frequency` bills
/// - `net_amount` is too large for the VAT or proration arithmetic
///
/// Returns a configuration error if `basis` is invalid.
pub fn compute_invoice_amounts_with(
    terms: &RentTerms,
    period: &BillingPeriod,
    net_amount: Money,
    basis: &ProrationBasis,
) -> Result<InvoiceAmounts, BillingError> {
    terms.validate()?;
    basis.validate()?;

    if net_amount.is_negative() {
        return Err(BillingError::validation(
            "net_amount",
            format!("must not be negative, got {}", net_amount.amount()),
        ));
    }
    if period.end < period.start {
        return Err(BillingError::validation(
            "period",
            format!("start {} is after end {}", period.start, period.end),
        ));
    }
    if !period.matches_frequency(terms.frequency) {
        return Err(BillingError::validation(
            "period",
            format!(
                "{} to {} is not a {} billing period",
                period.start, period.end, terms.frequency
            ),
        ));
    }

    let out_of_range = || {
        BillingError::validation(
            "net_amount",
            format!("{} is out of range", net_amount.amount()),
        )
    };

    // Round once, straight from the exact product
    let vat_raw = net_amount
        .amount()
        .checked_mul(VAT_RATE.as_decimal())
        .ok_or_else(out_of_range)?;
    let vat_amount = Money::new(round_half_up(vat_raw));
    let total_amount = net_amount
        .checked_add(&vat_amount)
        .map_err(|_| out_of_range())?;

    let days_in_period = period.days();
    let daily_rate = net_amount
        .amount()
        .checked_mul(basis.annualisation_factor)
        .and_then(|annual| annual.checked_div(Decimal::from(basis.days_in_year)))
        .ok_or_else(out_of_range)?;
    let period_total = daily_rate
        .checked_mul(Decimal::from(days_in_period))
        .ok_or_else(out_of_range)?;

    let amounts = InvoiceAmounts {
        net_amount,
        vat_amount,
        total_amount,
        prorated_daily_rate: Money::new(round_half_up(daily_rate)),
        prorated_period_total: Money::new(round_half_up(period_total)),
        days_in_period,
    };

    debug!(
        net = %amounts.net_amount.amount(),
        vat = %amounts.vat_amount.amount(),
        total = %amounts.total_amount.amount(),
        days = amounts.days_in_period,
        "computed invoice amounts"
    );
    Ok(amounts)
}

/// Outstanding balance after this invoice
///
/// `previous_balance + total_amount - payment_made - credit_note_amount`.
/// Not clamped: a negative result is credit owed to the tenant.
///
/// # Errors
///
/// Returns a validation error naming the ledger field whose term takes the
/// balance out of the representable range.
pub fn compute_balance_due(total_amount: Money, state: &MonetaryState) -> Result<Money, BillingError> {
    let out_of_range = |field: &str| BillingError::validation(field, "balance is out of range");

    state
        .previous_balance
        .checked_add(&total_amount)
        .map_err(|_| out_of_range("previous_balance"))?
        .checked_sub(&state.payment_made)
        .map_err(|_| out_of_range("payment_made"))?
        .checked_sub(&state.credit_note_amount)
        .map_err(|_| out_of_range("credit_note_amount"))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use crate::terms::RentFrequency;

    proptest! {
        #[test]
        fn total_is_net_plus_vat(pence in 0i64..100_000_000i64, start_offset in 0i64..3650i64) {
            let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(start_offset);
            let terms = RentTerms::new(Money::new(dec!(24000)), RentFrequency::Monthly).unwrap();
            let period = BillingPeriod::for_frequency(RentFrequency::Monthly, start).unwrap();
            let net = Money::from_pence(pence);

            let first = compute_invoice_amounts(&terms, &period, net).unwrap();
            let second = compute_invoice_amounts(&terms, &period, net).unwrap();

            prop_assert_eq!(first, second);
            prop_assert_eq!(first.total_amount, first.net_amount + first.vat_amount);
            prop_assert_eq!(first.vat_amount.amount().scale() <= 2, true);
        }

        #[test]
        fn balance_due_is_linear(
            previous in -1_000_000i64..1_000_000i64,
            total in 0i64..1_000_000i64,
            paid in 0i64..1_000_000i64,
            credit in 0i64..1_000_000i64,
        ) {
            let state = MonetaryState::new(
                Money::from_pence(previous),
                Money::from_pence(paid),
                Money::from_pence(credit),
            );
            let balance = compute_balance_due(Money::from_pence(total), &state).unwrap();
            prop_assert_eq!(balance, Money::from_pence(previous + total - paid - credit));
        }
    }
}
