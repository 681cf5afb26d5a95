//! Rich error handling for the order gateway.
//!
//! Every failure that reaches a client is expressed as a [`GatewayError`]
//! carrying a stable [`ErrorCode`]. The code decides the HTTP status and the
//! `code` string in the response body.
//!
//! # HTTP Status Codes
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `MALFORMED_FIELD` | 400 | Missing or invalid field, unparseable body |
//! | `DUPLICATE_ORDER` | 409 | `clientOrderId` already submitted |
//! | `ORDER_REJECTED` | 422 | Backend refused the order |
//! | `BACKEND_UNAVAILABLE` | 502 | Retries exhausted or deadline elapsed |
//! | `UNKNOWN_USER` | 404 | Identity resolver does not know the user |
//! | `IDENTITY_UNAVAILABLE` | 503 | Identity resolver unreachable |
//! | `EVALUATOR_UNAVAILABLE` | 503 | Signal evaluator unreachable |
//! | `STORAGE_ERROR` | 500 | Rule store failed |
//! | `INTERNAL_ERROR` | 500 | Unexpected server error |

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for the order gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing or invalid request field.
    MalformedField,
    /// Idempotency key already used.
    DuplicateOrder,
    /// Order rejected by the execution backend.
    OrderRejected,
    /// Execution backend unreachable after retries.
    BackendUnavailable,
    /// User not known to the identity resolver.
    UnknownUser,
    /// Identity resolver unreachable.
    IdentityUnavailable,
    /// Signal evaluator unreachable.
    EvaluatorUnavailable,
    /// Rule store failure.
    StorageError,
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::MalformedField => StatusCode::BAD_REQUEST,
            Self::DuplicateOrder => StatusCode::CONFLICT,
            Self::OrderRejected => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BackendUnavailable => StatusCode::BAD_GATEWAY,
            Self::UnknownUser => StatusCode::NOT_FOUND,
            Self::IdentityUnavailable | Self::EvaluatorUnavailable => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::StorageError | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the stable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MalformedField => "MALFORMED_FIELD",
            Self::DuplicateOrder => "DUPLICATE_ORDER",
            Self::OrderRejected => "ORDER_REJECTED",
            Self::BackendUnavailable => "BACKEND_UNAVAILABLE",
            Self::UnknownUser => "UNKNOWN_USER",
            Self::IdentityUnavailable => "IDENTITY_UNAVAILABLE",
            Self::EvaluatorUnavailable => "EVALUATOR_UNAVAILABLE",
            Self::StorageError => "STORAGE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A client-facing error with a stable code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct GatewayError {
    code: ErrorCode,
    message: String,
    field: Option<&'static str>,
}

impl GatewayError {
    /// Create a new gateway error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    /// Attach the wire name of the offending field.
    #[must_use]
    pub const fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the offending field, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        self.field
    }

    /// Convert to the HTTP error body.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            field: self.field.map(str::to_string),
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

/// HTTP error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Offending field, for malformed input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Convenience constructors for common errors.
impl GatewayError {
    /// Malformed request field.
    #[must_use]
    pub fn malformed(field: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedField, message).with_field(field)
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}
