//! Invoice draft service
//!
//! Composes the quarter resolver, numbering and calculator into a single
//! "draft an invoice for this tenant" operation. All I/O goes through the
//! ports in [`crate::ports`]; the service itself holds no state beyond
//! configuration.
//!
//! The service does not serialise concurrent drafts. Two callers drafting
//! for the same tenant and invoice type at the same moment can receive the
//! same number; the host must hold a per-scope lock or retry on a unique
//! constraint when saving.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use core_kernel::{Money, TenantId};

use crate::calculator::{compute_balance_due, compute_invoice_amounts_with, suggested_net_amount};
use crate::config::BillingConfig;
use crate::error::BillingError;
use crate::invoice::{due_date, InvoiceDraft};
use crate::notes::proration_note;
use crate::numbering::{InvoiceNumberScope, InvoiceType};
use crate::period::BillingPeriod;
use crate::ports::{IssuedNumberStore, LedgerSnapshot, TenancyDirectory};

/// What the user asked to invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRequest {
    pub tenant_id: TenantId,
    pub invoice_type: InvoiceType,
    pub invoice_date: NaiveDate,
    /// Any date inside the period to bill; quarterly rent snaps to its quarter
    pub period_start: NaiveDate,
    /// Net amount override; the suggested amount is used when absent
    pub net_amount: Option<Money>,
}

/// Drafts invoices from tenancy data
pub struct InvoiceDraftService {
    tenancies: Arc<dyn TenancyDirectory>,
    ledger: Arc<dyn LedgerSnapshot>,
    issued: Arc<dyn IssuedNumberStore>,
    config: BillingConfig,
}

impl InvoiceDraftService {
    /// Creates a service with default configuration
    pub fn new(
        tenancies: Arc<dyn TenancyDirectory>,
        ledger: Arc<dyn LedgerSnapshot>,
        issued: Arc<dyn IssuedNumberStore>,
    ) -> Self {
        Self {
            tenancies,
            ledger,
            issued,
            config: BillingConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BillingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// Drafts an invoice
    ///
    /// # Errors
    ///
    /// - `BillingError::Port` if a lookup fails (including an unknown tenant)
    /// - `BillingError::Validation` for a negative or out-of-range net amount,
    ///   invalid terms, or a balance due outside the representable range
    /// - `BillingError::SequenceOverflow` if the number scope is exhausted
    #[instrument(
        skip(self, request),
        fields(
            tenant_id = %request.tenant_id,
            invoice_type = %request.invoice_type
        ),
        err
    )]
    pub async fn draft(&self, request: DraftRequest) -> Result<InvoiceDraft, BillingError> {
        self.config.validate()?;

        let tenancy = self.tenancies.tenancy(request.tenant_id).await?;
        let period = BillingPeriod::for_frequency(tenancy.terms.frequency, request.period_start)?;

        let net_amount = match request.net_amount {
            Some(amount) => amount,
            None => {
                let suggested = suggested_net_amount(&tenancy.terms);
                debug!(net = %suggested.amount(), "using suggested net amount");
                suggested
            }
        };
        let amounts =
            compute_invoice_amounts_with(&tenancy.terms, &period, net_amount, &self.config.proration)?;

        let state = self.ledger.monetary_state(request.tenant_id).await?;
        let balance_due = compute_balance_due(amounts.total_amount, &state)?;

        let existing = self
            .issued
            .issued_numbers(tenancy.property_id, tenancy.tenant_id, request.invoice_type)
            .await?;
        let scope = InvoiceNumberScope::new(
            &tenancy.property_address,
            &tenancy.tenant_name,
            request.invoice_type,
        );
        let identity = scope.next(&existing)?;

        let draft = InvoiceDraft {
            identity,
            invoice_type: request.invoice_type,
            property_id: tenancy.property_id,
            tenant_id: tenancy.tenant_id,
            invoice_date: request.invoice_date,
            due_date: due_date(request.invoice_date, self.config.payment_terms_days)?,
            notes: proration_note(&period, &amounts),
            period,
            amounts,
            balance_due,
        };

        info!(
            invoice_number = %draft.invoice_number(),
            total = %draft.total().amount(),
            balance_due = %draft.balance_due.amount(),
            "drafted invoice"
        );
        Ok(draft)
    }
}
