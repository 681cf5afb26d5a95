//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::auto_trade::AutoTradeRule;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Body of `GET /api/auto_trade/{userId}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoTradeRulesResponse {
    /// User as resolved by the identity collaborator.
    pub user_id: String,
    /// Stored rules, buy side first.
    pub rules: Vec<AutoTradeRule>,
}
