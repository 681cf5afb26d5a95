//! Simulated execution backend.
//!
//! Receives orders in-process and remembers a receipt per
//! `(client, clientOrderId)`, answering resubmissions with the original
//! receipt.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::application::ports::{BackendError, ExecutionBackendPort, ExecutionReceipt};
use crate::config::BackendConfig;
use crate::domain::order_intake::{DedupKey, Order};
use crate::domain::shared::{ReceiptId, Timestamp};

/// Rejection reason for orders over the notional limit.
pub const INSUFFICIENT_FUNDS: &str = "insufficient funds";

/// In-process execution backend.
#[derive(Debug, Default)]
pub struct SimulatedExecutionBackend {
    receipts: Mutex<HashMap<DedupKey, ExecutionReceipt>>,
    max_notional: Option<Decimal>,
    latency: Duration,
}

impl SimulatedExecutionBackend {
    /// Backend accepting every order immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend configured from `config`.
    #[must_use]
    pub fn from_config(config: &BackendConfig) -> Self {
        Self {
            max_notional: config.max_notional,
            latency: Duration::from_millis(config.latency_ms),
            ..Self::default()
        }
    }

    /// Reject limit orders whose notional exceeds `limit`.
    #[must_use]
    pub fn with_max_notional(mut self, limit: Decimal) -> Self {
        self.max_notional = Some(limit);
        self
    }

    /// Delay every submission by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of distinct orders received.
    #[must_use]
    pub fn received_count(&self) -> usize {
        self.receipts.lock().len()
    }
}

#[async_trait]
impl ExecutionBackendPort for SimulatedExecutionBackend {
    async fn submit(&self, order: &Order) -> Result<ExecutionReceipt, BackendError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(limit) = self.max_notional
            && order.exceeds_notional(limit)
        {
            return Err(BackendError::Rejected {
                reason: INSUFFICIENT_FUNDS.to_string(),
            });
        }

        let mut receipts = self.receipts.lock();
        if let Some(receipt) = receipts.get(&order.dedup_key()) {
            return Err(BackendError::AlreadyReceived {
                receipt: receipt.clone(),
            });
        }

        let receipt = ExecutionReceipt {
            receipt_id: ReceiptId::generate(),
            client_order_id: order.client_order_id().clone(),
            received_at: Timestamp::now(),
        };
        receipts.insert(order.dedup_key(), receipt.clone());

        tracing::debug!(
            client_order_id = %order.client_order_id(),
            symbol = %order.symbol(),
            side = %order.side(),
            quantity = %order.quantity(),
            order_type = %order.order_type(),
            "Simulated backend received order"
        );

        Ok(receipt)
    }
}
