//! Invoice drafts
//!
//! An [`InvoiceDraft`] gathers everything the billing core works out for a
//! new invoice. It has no id and no lifecycle; persistence assigns both
//! when the draft is saved.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PropertyId, TenantId};

use crate::calculator::InvoiceAmounts;
use crate::error::BillingError;
use crate::numbering::{InvoiceIdentity, InvoiceType};
use crate::period::BillingPeriod;

/// A fully computed invoice ready to be stored or shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Invoice number and its parsed parts
    pub identity: InvoiceIdentity,
    pub invoice_type: InvoiceType,
    pub property_id: PropertyId,
    pub tenant_id: TenantId,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    /// The span billed
    pub period: BillingPeriod,
    pub amounts: InvoiceAmounts,
    /// Outstanding balance once this invoice is raised; negative is credit
    pub balance_due: Money,
    pub notes: String,
}

impl InvoiceDraft {
    /// The formatted invoice number, e.g. `12/ABC/RI/003`
    pub fn invoice_number(&self) -> &str {
        self.identity.as_str()
    }

    pub fn total(&self) -> Money {
        self.amounts.total_amount
    }

    /// Returns true if the tenant is in credit after this invoice
    pub fn is_credit(&self) -> bool {
        self.balance_due.is_negative()
    }
}

/// Due date for an invoice raised on `invoice_date`
pub fn due_date(invoice_date: NaiveDate, payment_terms_days: u32) -> Result<NaiveDate, BillingError> {
    invoice_date
        .checked_add_days(Days::new(u64::from(payment_terms_days)))
        .ok_or_else(|| {
            BillingError::validation(
                "invoice_date",
                format!("{invoice_date} plus {payment_terms_days} days is out of range"),
            )
        })
}
