//! Order validation and idempotency-key reservation.

use std::sync::Arc;

use super::errors::ValidationError;
use super::order::{DedupKey, Order, OrderRequest};
use super::recent_orders::RecentOrderStore;
use crate::domain::shared::{ClientId, ClientOrderId, Price, Quantity, Symbol, Timestamp};

/// Checks order requests and reserves their idempotency keys.
///
/// Field checks run in wire order (`side`, `symbol`, `quantity`, `price`,
/// `clientOrderId`) and all of them run before the reservation, so a
/// malformed request never consumes a key.
pub struct OrderValidator<S: RecentOrderStore> {
    recent_orders: Arc<S>,
}

impl<S: RecentOrderStore> OrderValidator<S> {
    /// Create a validator over a recent-order store.
    #[must_use]
    pub const fn new(recent_orders: Arc<S>) -> Self {
        Self { recent_orders }
    }

    /// Validate `request` for `client` and reserve its `clientOrderId`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedField` for the first invalid field, or
    /// `DuplicateOrder` if the key is already reserved for this client.
    pub fn validate(
        &self,
        client: &ClientId,
        request: &OrderRequest,
    ) -> Result<Order, ValidationError> {
        self.validate_at(client, request, Timestamp::now())
    }

    /// Same as [`validate`](Self::validate) with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn validate_at(
        &self,
        client: &ClientId,
        request: &OrderRequest,
        now: Timestamp,
    ) -> Result<Order, ValidationError> {
        let order = check_fields(client, request)?;

        if !self.recent_orders.try_reserve(&order.dedup_key(), now) {
            return Err(ValidationError::DuplicateOrder {
                client_order_id: order.client_order_id().to_string(),
            });
        }

        Ok(order)
    }

    /// Release the reservation held for `key`.
    pub fn release(&self, key: &DedupKey) {
        self.recent_orders.release(key);
    }
}

fn check_fields(client: &ClientId, request: &OrderRequest) -> Result<Order, ValidationError> {
    let side = request.side.ok_or(ValidationError::MalformedField("side"))?;

    let symbol = request
        .symbol
        .as_deref()
        .ok_or(ValidationError::MalformedField("symbol"))
        .and_then(|s| Symbol::parse(s).map_err(ValidationError::from))?;

    let quantity = request
        .quantity
        .ok_or(ValidationError::MalformedField("quantity"))
        .and_then(|q| Quantity::new(q).map_err(ValidationError::from))?;

    let price = request.price.map(Price::new).transpose()?;

    let client_order_id = request
        .client_order_id
        .as_deref()
        .ok_or(ValidationError::MalformedField("clientOrderId"))
        .and_then(|id| ClientOrderId::parse(id).map_err(ValidationError::from))?;

    Ok(Order::new(
        client.clone(),
        side,
        symbol,
        quantity,
        price,
        client_order_id,
    ))
}
