//! Structured invoice numbers
//!
//! Numbers have the form `{property}/{tenant}/{type}/{sequence}`, e.g.
//! `12/ABC/RI/003`. The sequence is scoped to one (property, tenant, type)
//! triple and continues from the highest number already issued for it.
//!
//! Existing numbers are read with a strict parser rather than a pattern
//! search. Anything that is not a canonical number (wrong case, other
//! separators, wrong field widths, unpadded sequences) is ignored: it
//! neither blocks numbering nor raises the next sequence.
//!
//! Generation is not serialised here. Callers that can create invoices
//! for the same triple concurrently must hold a per-triple lock or rely
//! on a unique constraint and retry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

use crate::error::BillingError;

pub const PROPERTY_CODE_WIDTH: usize = 2;
pub const TENANT_CODE_WIDTH: usize = 3;
pub const TYPE_CODE_WIDTH: usize = 2;
pub const PROPERTY_FALLBACK: &str = "PR";
pub const TENANT_FALLBACK: &str = "TEN";

/// Minimum width of the sequence field; wider once the sequence passes 999
pub const SEQUENCE_WIDTH: usize = 3;

const SEPARATOR: char = '/';

/// Invoice category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    Rental,
    ServiceCharge,
    Maintenance,
    Insurance,
    RentsDeposit,
    Other,
}

struct TypeEntry {
    invoice_type: InvoiceType,
    key: &'static str,
    code: &'static str,
    label: &'static str,
}

// Indexed by discriminant; keep rows in variant order.
const TYPE_TABLE: [TypeEntry; 6] = [
    TypeEntry { invoice_type: InvoiceType::Rental, key: "rental", code: "RI", label: "Rental Invoice" },
    TypeEntry { invoice_type: InvoiceType::ServiceCharge, key: "service_charge", code: "SC", label: "Service Charge" },
    TypeEntry { invoice_type: InvoiceType::Maintenance, key: "maintenance", code: "MA", label: "Maintenance" },
    TypeEntry { invoice_type: InvoiceType::Insurance, key: "insurance", code: "IN", label: "Insurance" },
    TypeEntry { invoice_type: InvoiceType::RentsDeposit, key: "rents_deposit", code: "RD", label: "Rents Deposit" },
    TypeEntry { invoice_type: InvoiceType::Other, key: "other", code: "OT", label: "Other" },
];

impl InvoiceType {
    pub const ALL: [InvoiceType; 6] = [
        InvoiceType::Rental,
        InvoiceType::ServiceCharge,
        InvoiceType::Maintenance,
        InvoiceType::Insurance,
        InvoiceType::RentsDeposit,
        InvoiceType::Other,
    ];

    fn entry(self) -> &'static TypeEntry {
        &TYPE_TABLE[self as usize]
    }

    /// Two-letter code used in invoice numbers
    pub fn code(self) -> &'static str {
        self.entry().code
    }

    /// Key used by the backend, e.g. `service_charge`
    pub fn as_str(self) -> &'static str {
        self.entry().key
    }

    /// Human-readable name
    pub fn label(self) -> &'static str {
        self.entry().label
    }

    /// Looks up a type by its two-letter code
    pub fn from_code(code: &str) -> Option<InvoiceType> {
        TYPE_TABLE
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.invoice_type)
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceType {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TYPE_TABLE
            .iter()
            .find(|entry| entry.key == s)
            .map(|entry| entry.invoice_type)
            .ok_or_else(|| BillingError::UnsupportedInvoiceType(s.to_string()))
    }
}

/// Reduces a name to a fixed-width uppercase code
///
/// Keeps ASCII letters and digits only, uppercased. Short results are
/// padded on the right with repeats of `fallback`; long results are cut.
/// An empty `fallback` disables padding, so the result can then be
/// shorter than `width` (or empty). Number generation always passes a
/// non-empty fallback.
///
/// ```
/// use domain_billing::numbering::abbreviate;
///
/// assert_eq!(abbreviate("ABC Holdings", 3, "TEN"), "ABC");
/// assert_eq!(abbreviate("", 3, "TEN"), "TEN");
/// assert_eq!(abbreviate("Jo", 3, "TEN"), "JOT");
/// assert_eq!(abbreviate("Jo", 3, ""), "JO");
/// assert_eq!(abbreviate("", 3, ""), "");
/// ```
pub fn abbreviate(input: &str, width: usize, fallback: &str) -> String {
    let mut code: String = input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if !fallback.is_empty() {
        while code.chars().count() < width {
            code.push_str(fallback);
        }
    }

    code.chars().take(width).collect()
}

/// Renders a sequence, zero-padded to three digits
pub fn format_sequence(sequence: u32) -> String {
    format!("{:0width$}", sequence, width = SEQUENCE_WIDTH)
}

/// A parsed or generated invoice number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceIdentity {
    pub property_code: String,
    pub tenant_code: String,
    pub type_code: String,
    pub sequence: u32,
    /// Canonical rendering, e.g. `12/ABC/RI/003`
    pub formatted: String,
}

impl InvoiceIdentity {
    fn new(property_code: &str, tenant_code: &str, type_code: &str, sequence: u32) -> Self {
        let formatted = format!(
            "{property_code}{SEPARATOR}{tenant_code}{SEPARATOR}{type_code}{SEPARATOR}{}",
            format_sequence(sequence)
        );
        Self {
            property_code: property_code.to_string(),
            tenant_code: tenant_code.to_string(),
            type_code: type_code.to_string(),
            sequence,
            formatted,
        }
    }

    /// Parses a canonical invoice number
    ///
    /// Returns `None` unless the input is exactly four `/`-separated fields:
    /// a 2- and a 3-character uppercase alphanumeric code, a known type
    /// code, and a positive sequence rendered the way [`format_sequence`]
    /// renders it.
    pub fn parse(number: &str) -> Option<InvoiceIdentity> {
        let mut fields = number.split(SEPARATOR);
        let property_code = fields.next()?;
        let tenant_code = fields.next()?;
        let type_code = fields.next()?;
        let suffix = fields.next()?;
        if fields.next().is_some() {
            return None;
        }

        if !is_code(property_code, PROPERTY_CODE_WIDTH)
            || !is_code(tenant_code, TENANT_CODE_WIDTH)
            || InvoiceType::from_code(type_code).is_none()
        {
            return None;
        }

        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let sequence: u32 = suffix.parse().ok()?;
        if sequence == 0 || format_sequence(sequence) != suffix {
            return None;
        }

        Some(Self::new(property_code, tenant_code, type_code, sequence))
    }

    /// The canonical rendering, e.g. `12/ABC/RI/003`
    pub fn as_str(&self) -> &str {
        &self.formatted
    }
}

impl fmt::Display for InvoiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

fn is_code(field: &str, width: usize) -> bool {
    field.len() == width
        && field
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// The (property, tenant, type) triple a sequence is counted within
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvoiceNumberScope {
    property_code: String,
    tenant_code: String,
    invoice_type: InvoiceType,
}

impl InvoiceNumberScope {
    /// Derives the scope from the property address and tenant name
    pub fn new(property_address: &str, tenant_name: &str, invoice_type: InvoiceType) -> Self {
        Self {
            property_code: abbreviate(property_address, PROPERTY_CODE_WIDTH, PROPERTY_FALLBACK),
            tenant_code: abbreviate(tenant_name, TENANT_CODE_WIDTH, TENANT_FALLBACK),
            invoice_type,
        }
    }

    pub fn property_code(&self) -> &str {
        &self.property_code
    }

    pub fn tenant_code(&self) -> &str {
        &self.tenant_code
    }

    pub fn invoice_type(&self) -> InvoiceType {
        self.invoice_type
    }

    /// Returns the sequence of `number` if it is a canonical number in this scope
    pub fn sequence_of(&self, number: &str) -> Option<u32> {
        let identity = InvoiceIdentity::parse(number)?;
        let in_scope = identity.property_code == self.property_code
            && identity.tenant_code == self.tenant_code
            && identity.type_code == self.invoice_type.code();
        in_scope.then_some(identity.sequence)
    }

    pub fn matches(&self, number: &str) -> bool {
        self.sequence_of(number).is_some()
    }

    /// Computes the next invoice number after everything in `existing`
    ///
    /// # Errors
    ///
    /// Returns `SequenceOverflow` if the highest existing sequence is `u32::MAX`.
    pub fn next<I, S>(&self, existing: I) -> Result<InvoiceIdentity, BillingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut highest: Option<u32> = None;
        for number in existing {
            let number = number.as_ref();
            match self.sequence_of(number) {
                Some(sequence) => highest = highest.max(Some(sequence)),
                None if InvoiceIdentity::parse(number).is_none() => {
                    trace!(number, "ignoring non-canonical invoice number");
                }
                None => {}
            }
        }

        let sequence = match highest {
            Some(max) => max.checked_add(1).ok_or_else(|| BillingError::SequenceOverflow {
                scope: self.to_string(),
            })?,
            None => 1,
        };

        let identity = InvoiceIdentity::new(
            &self.property_code,
            &self.tenant_code,
            self.invoice_type.code(),
            sequence,
        );
        debug!(scope = %self, sequence, number = %identity, "allocated invoice number");
        Ok(identity)
    }
}

impl fmt::Display for InvoiceNumberScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.property_code,
            self.tenant_code,
            self.invoice_type.code()
        )
    }
}

/// Generates the next invoice number for a property, tenant and type
///
/// Deterministic for a given input; never returns a number already in
/// `existing_numbers` for the same triple, provided those numbers were
/// produced by this function.
pub fn next_invoice_number<S: AsRef<str>>(
    property_address: &str,
    tenant_name: &str,
    invoice_type: InvoiceType,
    existing_numbers: &[S],
) -> Result<InvoiceIdentity, BillingError> {
    InvoiceNumberScope::new(property_address, tenant_name, invoice_type).next(existing_numbers)
}
