//! Billing Domain Ports
//!
//! The draft service reads tenancy terms, ledger state and previously
//! issued invoice numbers through these traits. The host supplies the
//! adapters (typically backed by the rent-management backend); tests use
//! in-memory ones.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, PortError, PropertyId, TenantId};

use crate::calculator::MonetaryState;
use crate::numbering::InvoiceType;
use crate::terms::RentTerms;

/// The tenant record as the billing core needs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenancy {
    pub property_id: PropertyId,
    pub tenant_id: TenantId,
    /// Full property address; its leading characters make the property code
    pub property_address: String,
    /// Tenant display name; its leading characters make the tenant code
    pub tenant_name: String,
    pub terms: RentTerms,
}

/// Looks up tenancies
#[async_trait]
pub trait TenancyDirectory: DomainPort {
    /// Returns the tenancy, or `PortError::NotFound`
    async fn tenancy(&self, tenant_id: TenantId) -> Result<Tenancy, PortError>;
}

/// Reads carry-over balances from the ledger
#[async_trait]
pub trait LedgerSnapshot: DomainPort {
    /// Returns the tenant's prior balance, payments and credit notes
    ///
    /// A tenant with no ledger history has an all-zero state.
    async fn monetary_state(&self, tenant_id: TenantId) -> Result<MonetaryState, PortError>;
}

/// Lists invoice numbers already issued
#[async_trait]
pub trait IssuedNumberStore: DomainPort {
    /// Returns every number issued for this property, tenant and type
    ///
    /// Adapters may over-report (numbers from other scopes are ignored by
    /// the generator) but must not omit any.
    async fn issued_numbers(
        &self,
        property_id: PropertyId,
        tenant_id: TenantId,
        invoice_type: InvoiceType,
    ) -> Result<Vec<String>, PortError>;
}
