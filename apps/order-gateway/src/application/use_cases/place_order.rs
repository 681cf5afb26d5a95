//! Place Order Use Case

use std::sync::Arc;

use crate::application::ports::ExecutionBackendPort;
use crate::application::services::{OrderRouter, RoutingError};
use crate::domain::order_intake::{
    OrderAck, OrderRequest, OrderValidator, RecentOrderStore, ValidationError,
};
use crate::domain::shared::ClientId;
use crate::observability::record_order_request;
use crate::resilience::RetryPolicy;

/// Errors returned when placing an order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceOrderError {
    /// The request was malformed or duplicated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The execution backend could not be reached.
    #[error("Execution backend unavailable after {attempts} attempt(s)")]
    BackendUnavailable {
        /// Backend calls made before giving up.
        attempts: u32,
    },

    /// The execution backend refused the order.
    #[error("Order rejected: {reason}")]
    Rejected {
        /// Rejection reason.
        reason: String,
        /// Rejected acknowledgment returned to the client.
        ack: OrderAck,
    },
}

/// Use case for validating and routing a single order.
///
/// Owns the idempotency reservation: it is kept when the backend accepts
/// or rejects the order, and released when the backend stays unavailable
/// so the client may retry with the same `clientOrderId`.
pub struct PlaceOrderUseCase<S, B>
where
    S: RecentOrderStore,
    B: ExecutionBackendPort,
{
    validator: OrderValidator<S>,
    router: OrderRouter<B>,
}

impl<S, B> PlaceOrderUseCase<S, B>
where
    S: RecentOrderStore,
    B: ExecutionBackendPort,
{
    /// Create a new `PlaceOrderUseCase`.
    #[must_use]
    pub const fn new(recent_orders: Arc<S>, backend: Arc<B>, policy: RetryPolicy) -> Self {
        Self {
            validator: OrderValidator::new(recent_orders),
            router: OrderRouter::new(backend, policy),
        }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for malformed or duplicate requests, `Rejected`
    /// when the backend refuses the order, and `BackendUnavailable` when
    /// routing gave up.
    pub async fn execute(
        &self,
        client: &ClientId,
        request: &OrderRequest,
    ) -> Result<OrderAck, PlaceOrderError> {
        let side = request.side.map_or("unknown", |s| s.as_label());

        let order = match self.validator.validate(client, request) {
            Ok(order) => order,
            Err(err) => {
                let outcome = match err {
                    ValidationError::MalformedField(_) => "malformed",
                    ValidationError::DuplicateOrder { .. } => "duplicate",
                };
                record_order_request(side, outcome);
                tracing::info!(client = %client, side, error = %err, "Order request refused");
                return Err(err.into());
            }
        };

        match self.router.route(&order).await {
            Ok(ack) => {
                record_order_request(side, "accepted");
                Ok(ack)
            }
            Err(RoutingError::Rejected { order_id, reason }) => {
                record_order_request(side, "rejected");
                let ack = OrderAck::rejected(order_id, order.client_order_id().clone(), &reason);
                Err(PlaceOrderError::Rejected { reason, ack })
            }
            Err(RoutingError::BackendUnavailable { attempts }) => {
                record_order_request(side, "backend_unavailable");
                self.validator.release(&order.dedup_key());
                tracing::warn!(
                    client = %client,
                    client_order_id = %order.client_order_id(),
                    attempts,
                    "Released idempotency key after routing failure"
                );
                Err(PlaceOrderError::BackendUnavailable { attempts })
            }
        }
    }
}
