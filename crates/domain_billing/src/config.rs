//! Billing configuration
//!
//! Loaded once by the host application and passed into the draft
//! service. The calculation functions never read configuration
//! themselves; they take a [`ProrationBasis`] argument.

use serde::Deserialize;
use std::path::Path;

use crate::calculator::ProrationBasis;
use crate::error::BillingError;

/// Billing configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// How proration figures are derived
    pub proration: ProrationBasis,
    /// Days from invoice date to due date
    pub payment_terms_days: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            proration: ProrationBasis::default(),
            payment_terms_days: 30,
        }
    }
}

impl BillingConfig {
    /// Loads configuration from `BILLING__*` environment variables
    ///
    /// Nested keys use a double underscore, e.g.
    /// `BILLING__PRORATION__ANNUALISATION_FACTOR=4`.
    pub fn from_env() -> Result<Self, BillingError> {
        let config: Self = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("BILLING")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file, format picked by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BillingError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML string
    pub fn from_toml(source: &str) -> Result<Self, BillingError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the proration basis
    pub fn validate(&self) -> Result<(), BillingError> {
        self.proration.validate()
    }
}
