//! Identity resolver configuration.

use serde::{Deserialize, Serialize};

/// Users known to the static identity resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Known user IDs. Empty accepts any non-blank ID.
    #[serde(default)]
    pub known_users: Vec<String>,
}
