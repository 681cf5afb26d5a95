//! Static identity resolver backed by a configured user list.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::application::ports::{IdentityError, IdentityResolverPort};
use crate::domain::shared::UserId;

/// Resolves users against a fixed set.
///
/// An empty set accepts any non-blank user ID.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityResolver {
    known_users: HashSet<String>,
}

impl StaticIdentityResolver {
    /// Create a resolver over `known_users`.
    #[must_use]
    pub fn new<I, S>(known_users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_users: known_users.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolver accepting any non-blank user ID.
    #[must_use]
    pub fn open() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityResolverPort for StaticIdentityResolver {
    async fn resolve(&self, user_id: &str) -> Result<UserId, IdentityError> {
        let trimmed = user_id.trim();
        let known = if self.known_users.is_empty() {
            !trimmed.is_empty()
        } else {
            self.known_users.contains(trimmed)
        };

        if known {
            Ok(UserId::new(trimmed))
        } else {
            Err(IdentityError::NotFound {
                user_id: user_id.to_string(),
            })
        }
    }
}
