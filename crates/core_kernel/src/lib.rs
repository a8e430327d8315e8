//! Core Kernel - Foundational types and utilities for rent billing
//!
//! This crate provides the fundamental building blocks used by the billing domain:
//! - Money in pounds sterling with precise decimal arithmetic
//! - Inclusive calendar date ranges
//! - Strongly typed identifiers for properties and tenants
//! - Port error types for host-supplied adapters
//! - en-GB formatting and boundary parsing helpers

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod format;
pub mod parse;

pub use money::{Money, MoneyError, Rate};
pub use temporal::{DateRange, TemporalError};
pub use identifiers::{PropertyId, TenantId};
pub use ports::{DomainPort, PortError};
pub use parse::ParseError;
