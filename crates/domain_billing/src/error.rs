//! Billing domain errors

use thiserror::Error;

use core_kernel::{ParseError, PortError, TemporalError};

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Malformed or missing input
    #[error("Validation error on {field}: {message}")]
    Validation {
        field: String,
        message: String,
    },

    /// Invoice type string is not in the closed type table
    #[error("Unsupported invoice type: {0}")]
    UnsupportedInvoiceType(String),

    /// The sequence counter for an invoice number scope cannot advance
    #[error("Invoice sequence overflow for {scope}")]
    SequenceOverflow {
        scope: String,
    },

    /// Invalid billing configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Date arithmetic failed
    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    /// A host adapter failed
    #[error("Port error: {0}")]
    Port(#[from] PortError),
}

impl BillingError {
    /// Creates a validation error for the named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the offending field for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            BillingError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<ParseError> for BillingError {
    fn from(error: ParseError) -> Self {
        BillingError::Validation {
            field: error.field,
            message: error.reason,
        }
    }
}

impl From<config::ConfigError> for BillingError {
    fn from(error: config::ConfigError) -> Self {
        BillingError::Configuration(error.to_string())
    }
}
