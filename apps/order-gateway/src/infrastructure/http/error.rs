//! Mapping of use-case errors onto HTTP responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};

use crate::application::use_cases::PlaceOrderError;
use crate::domain::auto_trade::ControllerError;
use crate::domain::order_intake::{OrderAck, ValidationError};
use crate::error::{ErrorCode, GatewayError};

/// Error returned by the HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Failure with a `{code, message, field?}` body.
    Gateway(GatewayError),
    /// Backend rejection; the body is the rejected acknowledgment.
    Rejected(OrderAck),
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Gateway(GatewayError::malformed("body", rejection.body_text()))
    }
}

impl From<PlaceOrderError> for ApiError {
    fn from(err: PlaceOrderError) -> Self {
        let message = err.to_string();
        match err {
            PlaceOrderError::Validation(ValidationError::MalformedField(field)) => {
                Self::Gateway(GatewayError::malformed(field, message))
            }
            PlaceOrderError::Validation(ValidationError::DuplicateOrder { .. }) => {
                Self::Gateway(GatewayError::new(ErrorCode::DuplicateOrder, message))
            }
            PlaceOrderError::BackendUnavailable { .. } => {
                Self::Gateway(GatewayError::new(ErrorCode::BackendUnavailable, message))
            }
            PlaceOrderError::Rejected { ack, .. } => Self::Rejected(ack),
        }
    }
}

impl From<ControllerError> for ApiError {
    fn from(err: ControllerError) -> Self {
        let code = match err {
            ControllerError::UnknownUser { .. } => ErrorCode::UnknownUser,
            ControllerError::IdentityUnavailable { .. } => ErrorCode::IdentityUnavailable,
            ControllerError::EvaluatorUnavailable { .. } => ErrorCode::EvaluatorUnavailable,
            ControllerError::Storage(_) => ErrorCode::StorageError,
        };
        Self::Gateway(GatewayError::new(code, err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Gateway(err) => {
                let status = err.code().http_status();
                if status.is_server_error() {
                    tracing::error!(code = %err.code(), error = %err.message(), "Request failed");
                } else {
                    tracing::debug!(code = %err.code(), error = %err.message(), "Request refused");
                }
                (status, Json(err.to_http_response())).into_response()
            }
            Self::Rejected(ack) => {
                (ErrorCode::OrderRejected.http_status(), Json(ack)).into_response()
            }
        }
    }
}
