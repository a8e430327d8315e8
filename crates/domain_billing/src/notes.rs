//! Human-readable invoice notes

use core_kernel::format::{format_date, format_gbp};

use crate::calculator::InvoiceAmounts;
use crate::period::BillingPeriod;

/// Describes the billed period and its proration figures
///
/// ```
/// # use chrono::NaiveDate;
/// # use core_kernel::Money;
/// # use domain_billing::calculator::compute_invoice_amounts;
/// # use domain_billing::notes::proration_note;
/// # use domain_billing::period::BillingPeriod;
/// # use domain_billing::terms::{RentFrequency, RentTerms};
/// # use rust_decimal_macros::dec;
/// let terms = RentTerms::new(Money::new(dec!(12000)), RentFrequency::Quarterly).unwrap();
/// let start = NaiveDate::from_ymd_opt(2025, 3, 25).unwrap();
/// let period = BillingPeriod::for_frequency(terms.frequency, start).unwrap();
/// let amounts = compute_invoice_amounts(&terms, &period, Money::new(dec!(1000))).unwrap();
///
/// assert_eq!(
///     proration_note(&period, &amounts),
///     "Period 25/03/2025 to 23/06/2025 (90 days). Daily rate £27.40, prorated total £2,465.75."
/// );
/// ```
pub fn proration_note(period: &BillingPeriod, amounts: &InvoiceAmounts) -> String {
    format!(
        "Period {} to {} ({} days). Daily rate {}, prorated total {}.",
        format_date(period.start),
        format_date(period.end),
        amounts.days_in_period,
        format_gbp(amounts.prorated_daily_rate.amount()),
        format_gbp(amounts.prorated_period_total.amount()),
    )
}
