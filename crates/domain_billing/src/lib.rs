//! Billing Domain - Rent invoicing for commercial lettings
//!
//! This crate computes everything needed to raise a rent invoice:
//!
//! - **Quarter resolver**: the English quarter-day period containing a date
//! - **Invoice numbering**: `PROPERTY/TENANT/TYPE/NNN` numbers, next in
//!   sequence per scope
//! - **Calculator**: VAT at 20%, totals, informational proration and the
//!   balance due carried from the ledger
//!
//! The three are pure functions over their inputs. [`draft::InvoiceDraftService`]
//! composes them behind port traits that the host application implements.
//!
//! # Rounding
//!
//! Monetary results are rounded to pence with half-up (away from zero)
//! rounding. Intermediate values keep full decimal precision.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::Money;
//! use domain_billing::{
//!     compute_balance_due, compute_invoice_amounts, next_invoice_number, BillingPeriod,
//!     InvoiceType, MonetaryState, RentFrequency, RentTerms,
//! };
//! use rust_decimal_macros::dec;
//!
//! let terms = RentTerms::new(Money::new(dec!(12000)), RentFrequency::Quarterly).unwrap();
//! let start = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
//! let period = BillingPeriod::for_frequency(terms.frequency, start).unwrap();
//! let amounts = compute_invoice_amounts(&terms, &period, Money::new(dec!(3000))).unwrap();
//! assert_eq!(amounts.total_amount.amount(), dec!(3600));
//!
//! let balance = compute_balance_due(amounts.total_amount, &MonetaryState::default()).unwrap();
//! assert_eq!(balance, amounts.total_amount);
//!
//! let existing = ["12/ABC/RI/001", "12/ABC/RI/002"];
//! let number = next_invoice_number("12 High Street", "ABC Ltd", InvoiceType::Rental, &existing)
//!     .unwrap();
//! assert_eq!(number.as_str(), "12/ABC/RI/003");
//! ```

pub mod error;
pub mod quarter;
pub mod terms;
pub mod period;
pub mod numbering;
pub mod calculator;
pub mod notes;
pub mod invoice;
pub mod config;
pub mod ports;
pub mod draft;

pub use error::BillingError;
pub use quarter::{resolve_quarter, quarters_starting_in, QuarterDay, QuarterPeriod, QUARTER_DAYS};
pub use terms::{RentFrequency, RentTerms};
pub use period::BillingPeriod;
pub use numbering::{next_invoice_number, InvoiceIdentity, InvoiceNumberScope, InvoiceType};
pub use calculator::{
    compute_balance_due, compute_invoice_amounts, compute_invoice_amounts_with,
    suggested_net_amount, InvoiceAmounts, MonetaryState, ProrationBasis, VAT_RATE,
};
pub use notes::proration_note;
pub use invoice::InvoiceDraft;
pub use config::BillingConfig;
pub use ports::{IssuedNumberStore, LedgerSnapshot, Tenancy, TenancyDirectory};
pub use draft::{DraftRequest, InvoiceDraftService};
