//! Order intake errors.

use std::fmt;

use crate::domain::shared::DomainError;

/// Reasons an order request is refused before it reaches the router.
///
/// Validation errors are client-caused and never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field is missing or carries an unacceptable value.
    MalformedField(&'static str),

    /// The client already submitted this `clientOrderId` within the
    /// retention window.
    DuplicateOrder {
        /// The repeated idempotency key.
        client_order_id: String,
    },
}

impl ValidationError {
    /// Wire name of the offending field, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MalformedField(field) => Some(field),
            Self::DuplicateOrder { .. } => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedField(field) => {
                write!(f, "Malformed field '{field}': {}", expectation(field))
            }
            Self::DuplicateOrder { client_order_id } => {
                write!(
                    f,
                    "Duplicate order: clientOrderId '{client_order_id}' was already submitted"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<DomainError> for ValidationError {
    fn from(err: DomainError) -> Self {
        Self::MalformedField(err.field())
    }
}

fn expectation(field: &str) -> &'static str {
    match field {
        "side" => "expected BUY or SELL",
        "symbol" => "expected an uppercase asset identifier of 1-21 characters",
        "quantity" => "expected a positive decimal",
        "price" => "expected a positive decimal when present",
        "clientOrderId" => "expected 1-64 characters without whitespace",
        _ => "invalid value",
    }
}
