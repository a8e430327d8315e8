//! In-memory adapters for the billing ports
//!
//! [`InMemoryBillingStore`] implements all three ports over shared maps so
//! a single store can be handed to an [`InvoiceDraftService`] three times.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, PortError, PropertyId, TenantId};
use domain_billing::{
    InvoiceDraft, InvoiceDraftService, InvoiceType, IssuedNumberStore, LedgerSnapshot,
    MonetaryState, Tenancy, TenancyDirectory,
};

type NumberScope = (PropertyId, TenantId, InvoiceType);

/// Tenancies, ledger balances and issued numbers held in memory
#[derive(Debug, Default)]
pub struct InMemoryBillingStore {
    tenancies: RwLock<HashMap<TenantId, Tenancy>>,
    ledger: RwLock<HashMap<TenantId, MonetaryState>>,
    issued: RwLock<HashMap<NumberScope, Vec<String>>>,
    unavailable: AtomicBool,
}

impl InMemoryBillingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn add_tenancy(&self, tenancy: Tenancy) {
        self.tenancies.write().await.insert(tenancy.tenant_id, tenancy);
    }

    pub async fn set_monetary_state(&self, tenant_id: TenantId, state: MonetaryState) {
        self.ledger.write().await.insert(tenant_id, state);
    }

    /// Records a number as issued, as persistence would on save
    pub async fn record_issued(
        &self,
        property_id: PropertyId,
        tenant_id: TenantId,
        invoice_type: InvoiceType,
        number: impl Into<String>,
    ) {
        self.issued
            .write()
            .await
            .entry((property_id, tenant_id, invoice_type))
            .or_default()
            .push(number.into());
    }

    /// Records a draft's number as issued
    pub async fn save_draft(&self, draft: &InvoiceDraft) {
        self.record_issued(
            draft.property_id,
            draft.tenant_id,
            draft.invoice_type,
            draft.invoice_number(),
        )
        .await;
    }

    /// Makes every port call fail with `ServiceUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), PortError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PortError::ServiceUnavailable {
                service: "in-memory billing store".to_string(),
            });
        }
        Ok(())
    }

    /// Builds a draft service whose three ports all point at this store
    pub fn draft_service(self: &Arc<Self>) -> InvoiceDraftService {
        InvoiceDraftService::new(self.clone(), self.clone(), self.clone())
    }
}

impl DomainPort for InMemoryBillingStore {}

#[async_trait]
impl TenancyDirectory for InMemoryBillingStore {
    async fn tenancy(&self, tenant_id: TenantId) -> Result<Tenancy, PortError> {
        self.check_available()?;
        self.tenancies
            .read()
            .await
            .get(&tenant_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Tenancy", tenant_id))
    }
}

#[async_trait]
impl LedgerSnapshot for InMemoryBillingStore {
    async fn monetary_state(&self, tenant_id: TenantId) -> Result<MonetaryState, PortError> {
        self.check_available()?;
        Ok(self
            .ledger
            .read()
            .await
            .get(&tenant_id)
            .copied()
            .unwrap_or_default())
    }
}

#[async_trait]
impl IssuedNumberStore for InMemoryBillingStore {
    async fn issued_numbers(
        &self,
        property_id: PropertyId,
        tenant_id: TenantId,
        invoice_type: InvoiceType,
    ) -> Result<Vec<String>, PortError> {
        self.check_available()?;
        Ok(self
            .issued
            .read()
            .await
            .get(&(property_id, tenant_id, invoice_type))
            .cloned()
            .unwrap_or_default())
    }
}
