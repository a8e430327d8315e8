//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the billing domain. These fixtures
//! are consistent and predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::{Money, PropertyId, TenantId};
use domain_billing::{MonetaryState, RentFrequency, RentTerms, Tenancy};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Annual rent for a small commercial unit
    pub fn annual_rent() -> Money {
        Money::new(dec!(12000.00))
    }

    /// One quarter of [`MoneyFixtures::annual_rent`]
    pub fn quarterly_rent() -> Money {
        Money::new(dec!(3000.00))
    }

    /// A round net amount for VAT checks
    pub fn net_1000() -> Money {
        Money::new(dec!(1000.00))
    }

    /// An open balance carried from a previous invoice
    pub fn arrears() -> Money {
        Money::new(dec!(250.00))
    }
}

/// Fixture for dates around the 2025 quarter days
pub struct DateFixtures;

impl DateFixtures {
    pub fn lady_day_2025() -> NaiveDate {
        date(2025, 3, 25)
    }

    pub fn midsummer_2025() -> NaiveDate {
        date(2025, 6, 24)
    }

    pub fn michaelmas_2025() -> NaiveDate {
        date(2025, 9, 29)
    }

    pub fn christmas_2025() -> NaiveDate {
        date(2025, 12, 25)
    }

    /// A date inside the Christmas quarter but in the following year
    pub fn new_year_2026() -> NaiveDate {
        date(2026, 1, 10)
    }

    /// Day the fixture invoices are raised
    pub fn invoice_date() -> NaiveDate {
        date(2025, 3, 20)
    }
}

/// Fixture for tenancy records
pub struct TenancyFixtures;

impl TenancyFixtures {
    pub fn property_address() -> &'static str {
        "12 High Street"
    }

    pub fn tenant_name() -> &'static str {
        "ABC Ltd"
    }

    pub fn quarterly_terms() -> RentTerms {
        RentTerms {
            annual_rent: MoneyFixtures::annual_rent(),
            frequency: RentFrequency::Quarterly,
        }
    }

    pub fn monthly_terms() -> RentTerms {
        RentTerms {
            annual_rent: MoneyFixtures::annual_rent(),
            frequency: RentFrequency::Monthly,
        }
    }

    /// ABC Ltd at 12 High Street on £12,000 a year, billed quarterly
    pub fn abc_ltd() -> Tenancy {
        Tenancy {
            property_id: PropertyId::new(),
            tenant_id: TenantId::new(),
            property_address: Self::property_address().to_string(),
            tenant_name: Self::tenant_name().to_string(),
            terms: Self::quarterly_terms(),
        }
    }

    /// A tenant with £250 arrears and nothing paid yet
    pub fn in_arrears() -> MonetaryState {
        MonetaryState::new(MoneyFixtures::arrears(), Money::zero(), Money::zero())
    }
}

/// Fixture for invoice numbers
pub struct NumberFixtures;

impl NumberFixtures {
    /// Two rental invoices already issued to ABC Ltd
    pub fn abc_rental_history() -> Vec<String> {
        vec!["12/ABC/RI/001".to_string(), "12/ABC/RI/002".to_string()]
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
