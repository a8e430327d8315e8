//! Rent terms held on the tenant record

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::Money;

use crate::error::BillingError;

/// How often rent is invoiced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentFrequency {
    /// Calendar-monthly invoices
    Monthly,
    /// Quarter-day invoices
    Quarterly,
}

impl RentFrequency {
    /// Returns the number of invoices per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            RentFrequency::Monthly => 12,
            RentFrequency::Quarterly => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RentFrequency::Monthly => "monthly",
            RentFrequency::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for RentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentFrequency {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(RentFrequency::Monthly),
            "quarterly" => Ok(RentFrequency::Quarterly),
            other => Err(BillingError::validation(
                "frequency",
                format!("'{other}' is not monthly or quarterly"),
            )),
        }
    }
}

/// Annual rent and invoicing frequency for a tenancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentTerms {
    pub annual_rent: Money,
    pub frequency: RentFrequency,
}

impl RentTerms {
    /// Creates validated rent terms
    ///
    /// # Errors
    ///
    /// Returns a validation error on `annual_rent` if it is negative
    pub fn new(annual_rent: Money, frequency: RentFrequency) -> Result<Self, BillingError> {
        let terms = Self { annual_rent, frequency };
        terms.validate()?;
        Ok(terms)
    }

    /// Re-checks invariants, for terms that arrived through deserialization
    pub fn validate(&self) -> Result<(), BillingError> {
        if self.annual_rent.is_negative() {
            return Err(BillingError::validation(
                "annual_rent",
                format!("must not be negative, got {}", self.annual_rent.amount()),
            ));
        }
        Ok(())
    }

    /// Annual rent divided evenly over the invoicing periods, before rounding
    pub fn rent_per_period(&self) -> Decimal {
        self.annual_rent.amount() / Decimal::from(self.frequency.periods_per_year())
    }
}
