//! Execution Backend Port (Driven Port)
//!
//! Interface to the external system that actually places orders.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::order_intake::Order;
use crate::domain::shared::{ClientOrderId, ReceiptId, Timestamp};
use crate::resilience::ErrorCategory;

/// Proof that the backend received an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReceipt {
    /// Backend-assigned receipt ID.
    pub receipt_id: ReceiptId,
    /// Client order ID echoed back.
    pub client_order_id: ClientOrderId,
    /// When the backend received the order.
    pub received_at: Timestamp,
}

/// Execution backend error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The backend did not answer in time.
    #[error("Execution backend timed out")]
    Timeout,

    /// The backend could not be reached or is overloaded.
    #[error("Execution backend unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The order was already received under the same client order ID.
    #[error("Order already received: {}", receipt.receipt_id)]
    AlreadyReceived {
        /// The original receipt.
        receipt: ExecutionReceipt,
    },

    /// The backend refused the order.
    #[error("Order rejected: {reason}")]
    Rejected {
        /// Rejection reason.
        reason: String,
    },
}

impl BackendError {
    /// Retry category for this error.
    ///
    /// `AlreadyReceived` is terminal but not a failure; callers treat it as
    /// success.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Timeout | Self::Unavailable { .. } => ErrorCategory::Retryable,
            Self::AlreadyReceived { .. } | Self::Rejected { .. } => ErrorCategory::NonRetryable,
        }
    }
}

/// Port for order submission.
///
/// Implementations must recognize resubmissions of the same
/// `(client, clientOrderId)` and answer with
/// [`BackendError::AlreadyReceived`].
#[async_trait]
pub trait ExecutionBackendPort: Send + Sync {
    /// Submit an order.
    async fn submit(&self, order: &Order) -> Result<ExecutionReceipt, BackendError>;
}
