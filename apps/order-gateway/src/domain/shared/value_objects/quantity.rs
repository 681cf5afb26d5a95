//! Quantity value object for order quantities.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::domain::shared::DomainError;

/// A strictly positive order quantity.
///
/// Represented as a Decimal so fractional assets (e.g. 1.5 BTC) keep full
/// precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a quantity, rejecting zero and negative amounts.
    ///
    /// # Errors
    ///
    /// Returns error if `amount <= 0`.
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::invalid(
                "quantity",
                "Order quantity must be positive",
            ));
        }
        Ok(Self(amount))
    }

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
