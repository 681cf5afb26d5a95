//! Identity Resolver Port (Driven Port)
//!
//! Resolves user identifiers supplied by clients.

use async_trait::async_trait;

use crate::domain::shared::UserId;

/// Identity resolver error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// No such user.
    #[error("User not found: {user_id}")]
    NotFound {
        /// User ID as supplied.
        user_id: String,
    },

    /// The identity service could not be reached.
    #[error("Identity service unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for identity resolution.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolverPort: Send + Sync {
    /// Resolve a raw user ID to a known user.
    async fn resolve(&self, user_id: &str) -> Result<UserId, IdentityError>;
}
