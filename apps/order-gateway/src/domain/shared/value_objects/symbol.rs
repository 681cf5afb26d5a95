//! Symbol value object for asset identifiers.

use serde::Serialize;
use std::fmt;

use crate::domain::shared::DomainError;

/// A tradeable asset identifier.
///
/// Examples: "AAPL", "BTC", "BRK.B", "BTC-USD", "ETH/USDT".
///
/// Symbols are never case-normalized: lowercase input is rejected so that a
/// validated order carries exactly what the client sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Maximum symbol length.
    pub const MAX_LEN: usize = 21;

    /// Parse and validate a symbol.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol is empty, too long, or contains anything
    /// other than uppercase letters, digits, `.`, `-` and `/`.
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::invalid("symbol", "Symbol cannot be empty"));
        }

        if value.len() > Self::MAX_LEN {
            return Err(DomainError::invalid(
                "symbol",
                "Symbol exceeds maximum length",
            ));
        }

        if !value.starts_with(|c: char| c.is_ascii_uppercase() || c.is_ascii_digit()) {
            return Err(DomainError::invalid(
                "symbol",
                "Symbol must start with a letter or digit",
            ));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '/'))
        {
            return Err(DomainError::invalid(
                "symbol",
                "Symbol must be an uppercase asset identifier",
            ));
        }

        Ok(Self(value))
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
