//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{Money, PropertyId, TenantId};
use domain_billing::{DraftRequest, InvoiceType, MonetaryState, RentFrequency, RentTerms, Tenancy};

use crate::fixtures::{DateFixtures, MoneyFixtures, TenancyFixtures};

/// Builder for tenancy records
pub struct TenancyBuilder {
    property_id: PropertyId,
    tenant_id: TenantId,
    property_address: String,
    tenant_name: String,
    annual_rent: Money,
    frequency: RentFrequency,
}

impl Default for TenancyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TenancyBuilder {
    /// Creates a builder for ABC Ltd at 12 High Street, quarterly
    pub fn new() -> Self {
        Self {
            property_id: PropertyId::new(),
            tenant_id: TenantId::new(),
            property_address: TenancyFixtures::property_address().to_string(),
            tenant_name: TenancyFixtures::tenant_name().to_string(),
            annual_rent: MoneyFixtures::annual_rent(),
            frequency: RentFrequency::Quarterly,
        }
    }

    pub fn with_property_id(mut self, id: PropertyId) -> Self {
        self.property_id = id;
        self
    }

    pub fn with_tenant_id(mut self, id: TenantId) -> Self {
        self.tenant_id = id;
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.property_address = address.into();
        self
    }

    pub fn with_tenant_name(mut self, name: impl Into<String>) -> Self {
        self.tenant_name = name.into();
        self
    }

    pub fn with_annual_rent(mut self, rent: Money) -> Self {
        self.annual_rent = rent;
        self
    }

    pub fn monthly(mut self) -> Self {
        self.frequency = RentFrequency::Monthly;
        self
    }

    pub fn quarterly(mut self) -> Self {
        self.frequency = RentFrequency::Quarterly;
        self
    }

    /// Builds the tenancy without validating the rent
    pub fn build(self) -> Tenancy {
        Tenancy {
            property_id: self.property_id,
            tenant_id: self.tenant_id,
            property_address: self.property_address,
            tenant_name: self.tenant_name,
            terms: RentTerms {
                annual_rent: self.annual_rent,
                frequency: self.frequency,
            },
        }
    }
}

/// Builder for ledger state
#[derive(Default)]
pub struct MonetaryStateBuilder {
    state: MonetaryState,
}

impl MonetaryStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous_balance(mut self, amount: Money) -> Self {
        self.state.previous_balance = amount;
        self
    }

    pub fn payment_made(mut self, amount: Money) -> Self {
        self.state.payment_made = amount;
        self
    }

    pub fn credit_note(mut self, amount: Money) -> Self {
        self.state.credit_note_amount = amount;
        self
    }

    pub fn build(self) -> MonetaryState {
        self.state
    }
}

/// Builder for draft requests
pub struct DraftRequestBuilder {
    request: DraftRequest,
}

impl DraftRequestBuilder {
    /// A rental invoice for `tenant_id` covering the 2025 Lady Day quarter
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            request: DraftRequest {
                tenant_id,
                invoice_type: InvoiceType::Rental,
                invoice_date: DateFixtures::invoice_date(),
                period_start: DateFixtures::lady_day_2025(),
                net_amount: None,
            },
        }
    }

    pub fn invoice_type(mut self, invoice_type: InvoiceType) -> Self {
        self.request.invoice_type = invoice_type;
        self
    }

    pub fn invoice_date(mut self, date: NaiveDate) -> Self {
        self.request.invoice_date = date;
        self
    }

    pub fn period_start(mut self, date: NaiveDate) -> Self {
        self.request.period_start = date;
        self
    }

    pub fn net_amount(mut self, amount: Money) -> Self {
        self.request.net_amount = Some(amount);
        self
    }

    pub fn build(self) -> DraftRequest {
        self.request
    }
}
