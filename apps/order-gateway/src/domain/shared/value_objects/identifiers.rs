//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up IDs from different contexts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Generate a new unique identifier using UUID v4.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Get the inner string value.
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

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(OrderId, "Gateway-generated identifier for an acknowledged order.");
define_id!(
    ClientOrderId,
    "Client-supplied idempotency key for an order submission."
);
define_id!(ClientId, "Identity of the caller that scopes idempotency keys.");
define_id!(UserId, "Resolved identity of an auto-trading user.");
define_id!(ReceiptId, "Execution backend's identifier for a received order.");

impl ClientOrderId {
    /// Maximum accepted length.
    pub const MAX_LEN: usize = 64;

    /// Parse a client-supplied idempotency key.
    ///
    /// # Errors
    ///
    /// Returns error if the key is empty, too long, or contains whitespace.
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::invalid(
                "clientOrderId",
                "Client order ID cannot be empty",
            ));
        }
        if value.len() > Self::MAX_LEN {
            return Err(DomainError::invalid(
                "clientOrderId",
                format!("Client order ID exceeds {} characters", Self::MAX_LEN),
            ));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::invalid(
                "clientOrderId",
                "Client order ID cannot contain whitespace",
            ));
        }
        Ok(Self(value))
    }
}

impl ClientId {
    /// Client used when a request carries no client identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new("anonymous")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_new_and_display() {
        let id = OrderId::new("ord-123");
        assert_eq!(id.as_str(), "ord-123");
        assert_eq!(format!("{id}"), "ord-123");
    }

    #[test]
    fn order_id_generate_is_unique() {
        let id1 = OrderId::generate();
        let id2 = OrderId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn client_order_id_parse_valid() {
        let id = ClientOrderId::parse("abc123").unwrap();
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn client_order_id_parse_rejects_empty() {
        let err = ClientOrderId::parse("").unwrap_err();
        assert_eq!(err.field(), "clientOrderId");
    }

    #[test]
    fn client_order_id_parse_rejects_whitespace() {
        assert!(ClientOrderId::parse("abc 123").is_err());
        assert!(ClientOrderId::parse(" abc").is_err());
    }

    #[test]
    fn client_order_id_parse_rejects_too_long() {
        assert!(ClientOrderId::parse("x".repeat(ClientOrderId::MAX_LEN)).is_ok());
        assert!(ClientOrderId::parse("x".repeat(ClientOrderId::MAX_LEN + 1)).is_err());
    }

    #[test]
    fn client_id_anonymous() {
        assert_eq!(ClientId::anonymous().as_str(), "anonymous");
    }

    #[test]
    fn serde_is_transparent() {
        let id = UserId::new("alice");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"alice\"");
    }

    #[test]
    fn hash_works_for_collections() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ClientOrderId::new("ord-1"));
        set.insert(ClientOrderId::new("ord-2"));
        set.insert(ClientOrderId::new("ord-1"));

        assert_eq!(set.len(), 2);
    }
}
