//! Order Router
//!
//! Forwards validated orders to the execution backend with bounded,
//! backed-off retry and turns the outcome into a single acknowledgment.

use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{BackendError, ExecutionBackendPort, ExecutionReceipt};
use crate::domain::order_intake::{Order, OrderAck};
use crate::domain::shared::OrderId;
use crate::observability::{record_route_attempt, record_route_latency};
use crate::resilience::{ExponentialBackoffCalculator, RetryPolicy};

/// Terminal routing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    /// Retries were exhausted or the request deadline elapsed.
    #[error("Execution backend unavailable after {attempts} attempt(s)")]
    BackendUnavailable {
        /// Backend calls made before giving up.
        attempts: u32,
    },

    /// The backend refused the order. Never retried.
    #[error("Order rejected: {reason}")]
    Rejected {
        /// Gateway order ID assigned to the rejected order.
        order_id: OrderId,
        /// Rejection reason as reported by the backend.
        reason: String,
    },
}

enum Terminal {
    Rejected(String),
    Exhausted,
}

/// Routes orders to an execution backend.
pub struct OrderRouter<B: ExecutionBackendPort> {
    backend: Arc<B>,
    policy: RetryPolicy,
}

impl<B: ExecutionBackendPort> OrderRouter<B> {
    /// Create a router over `backend` with the given retry policy.
    #[must_use]
    pub const fn new(backend: Arc<B>, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    /// Retry policy in use.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Route `order` and return exactly one terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the backend refuses the order, and
    /// `BackendUnavailable` when every attempt failed transiently or the
    /// request deadline elapsed.
    pub async fn route(&self, order: &Order) -> Result<OrderAck, RoutingError> {
        let order_id = OrderId::generate();
        let started = Instant::now();
        let mut attempts = 0;

        let outcome = tokio::time::timeout(
            self.policy.request_timeout,
            self.submit_with_retry(order, &mut attempts),
        )
        .await;

        record_route_latency(started.elapsed().as_secs_f64());

        match outcome {
            Ok(Ok(receipt)) => {
                tracing::info!(
                    order_id = %order_id,
                    client_order_id = %order.client_order_id(),
                    receipt_id = %receipt.receipt_id,
                    attempts,
                    "Order accepted by execution backend"
                );
                Ok(OrderAck::accepted(
                    order_id,
                    receipt.client_order_id,
                    receipt.receipt_id,
                ))
            }
            Ok(Err(Terminal::Rejected(reason))) => {
                tracing::info!(
                    order_id = %order_id,
                    client_order_id = %order.client_order_id(),
                    reason = %reason,
                    "Order rejected by execution backend"
                );
                Err(RoutingError::Rejected { order_id, reason })
            }
            Ok(Err(Terminal::Exhausted)) => {
                tracing::warn!(
                    client_order_id = %order.client_order_id(),
                    attempts,
                    "Retries exhausted, execution backend unavailable"
                );
                Err(RoutingError::BackendUnavailable { attempts })
            }
            Err(_) => {
                tracing::warn!(
                    client_order_id = %order.client_order_id(),
                    attempts,
                    timeout = ?self.policy.request_timeout,
                    "Routing deadline elapsed"
                );
                Err(RoutingError::BackendUnavailable { attempts })
            }
        }
    }

    async fn submit_with_retry(
        &self,
        order: &Order,
        attempts: &mut u32,
    ) -> Result<ExecutionReceipt, Terminal> {
        let mut backoff = ExponentialBackoffCalculator::new(&self.policy);

        loop {
            *attempts += 1;

            let result =
                tokio::time::timeout(self.policy.attempt_timeout, self.backend.submit(order))
                    .await
                    .unwrap_or(Err(BackendError::Timeout));

            let err = match result {
                Ok(receipt) => {
                    record_route_attempt("received");
                    return Ok(receipt);
                }
                Err(BackendError::AlreadyReceived { receipt }) => {
                    record_route_attempt("already_received");
                    tracing::debug!(
                        client_order_id = %order.client_order_id(),
                        receipt_id = %receipt.receipt_id,
                        "Backend already received order, using original receipt"
                    );
                    return Ok(receipt);
                }
                Err(BackendError::Rejected { reason }) => {
                    record_route_attempt("rejected");
                    return Err(Terminal::Rejected(reason));
                }
                Err(err) => err,
            };

            record_route_attempt(match err {
                BackendError::Timeout => "timeout",
                _ => "unavailable",
            });

            let Some(delay) = backoff.next_backoff() else {
                return Err(Terminal::Exhausted);
            };

            tracing::warn!(
                client_order_id = %order.client_order_id(),
                attempt = *attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "Backend submission failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_intake::{AckStatus, OrderRequest, OrderSide, OrderValidator};
    use crate::domain::shared::{ClientId, ReceiptId, Timestamp};
    use crate::infrastructure::persistence::InMemoryRecentOrderStore;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use rust_decimal_macros::dec;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[derive(Clone)]
    enum Step {
        Hang,
        Fail(BackendError),
        Receive,
    }

    struct ScriptedBackend {
        calls: AtomicU32,
        script: Mutex<VecDeque<Step>>,
        fallback: Step,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Step>, fallback: Step) -> Self {
            Self {
                calls: AtomicU32::new(0),
                script: Mutex::new(script.into()),
                fallback,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn receipt_for(order: &Order) -> ExecutionReceipt {
        ExecutionReceipt {
            receipt_id: ReceiptId::new("rcpt-1"),
            client_order_id: order.client_order_id().clone(),
            received_at: Timestamp::now(),
        }
    }

    #[async_trait]
    impl ExecutionBackendPort for ScriptedBackend {
        async fn submit(&self, order: &Order) -> Result<ExecutionReceipt, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self
                .script
                .lock()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone());
            match step {
                Step::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Err(BackendError::Timeout)
                }
                Step::Fail(err) => Err(err),
                Step::Receive => Ok(receipt_for(order)),
            }
        }
    }

    fn order() -> Order {
        let validator = OrderValidator::new(Arc::new(InMemoryRecentOrderStore::new(
            chrono::Duration::hours(1),
        )));
        validator
            .validate(
                &ClientId::anonymous(),
                &OrderRequest {
                    side: Some(OrderSide::Buy),
                    symbol: Some("BTC".to_string()),
                    quantity: Some(dec!(1.5)),
                    price: None,
                    client_order_id: Some("abc123".to_string()),
                },
            )
            .unwrap()
    }

    fn router(backend: &Arc<ScriptedBackend>) -> OrderRouter<ScriptedBackend> {
        OrderRouter::new(
            Arc::clone(backend),
            RetryPolicy::immediate(3, Duration::from_millis(20)),
        )
    }

    #[tokio::test]
    async fn accepted_on_first_attempt() {
        let backend = Arc::new(ScriptedBackend::new(vec![], Step::Receive));

        let ack = router(&backend).route(&order()).await.unwrap();

        assert_eq!(ack.status, AckStatus::Accepted);
        assert_eq!(ack.client_order_id.as_str(), "abc123");
        assert_eq!(ack.receipt_id, Some(ReceiptId::new("rcpt-1")));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn three_timeouts_give_backend_unavailable_after_three_calls() {
        let backend = Arc::new(ScriptedBackend::new(vec![], Step::Hang));

        let err = router(&backend).route(&order()).await.unwrap_err();

        assert_eq!(err, RoutingError::BackendUnavailable { attempts: 3 });
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test]
    async fn reported_unavailability_is_retried() {
        let backend = Arc::new(ScriptedBackend::new(
            vec![
                Step::Fail(BackendError::Unavailable {
                    message: "503".to_string(),
                }),
                Step::Fail(BackendError::Timeout),
            ],
            Step::Receive,
        ));

        let ack = router(&backend).route(&order()).await.unwrap();

        assert!(ack.is_accepted());
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test]
    async fn rejection_is_not_retried() {
        let backend = Arc::new(ScriptedBackend::new(
            vec![],
            Step::Fail(BackendError::Rejected {
                reason: "insufficient funds".to_string(),
            }),
        ));

        let err = router(&backend).route(&order()).await.unwrap_err();

        assert!(matches!(
            err,
            RoutingError::Rejected { ref reason, .. } if reason == "insufficient funds"
        ));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn already_received_short_circuits_to_success() {
        let original = ExecutionReceipt {
            receipt_id: ReceiptId::new("rcpt-original"),
            client_order_id: order().client_order_id().clone(),
            received_at: Timestamp::now(),
        };
        let backend = Arc::new(ScriptedBackend::new(
            vec![
                Step::Hang,
                Step::Fail(BackendError::AlreadyReceived { receipt: original }),
            ],
            Step::Receive,
        ));

        let ack = router(&backend).route(&order()).await.unwrap();

        assert_eq!(ack.receipt_id, Some(ReceiptId::new("rcpt-original")));
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn request_deadline_truncates_retries() {
        let backend = Arc::new(ScriptedBackend::new(vec![], Step::Hang));
        let policy = RetryPolicy {
            max_attempts: 10,
            attempt_timeout: Duration::from_millis(50),
            request_timeout: Duration::from_millis(120),
            ..RetryPolicy::immediate(10, Duration::from_millis(50))
        };
        let router = OrderRouter::new(Arc::clone(&backend), policy);

        let err = router.route(&order()).await.unwrap_err();

        let RoutingError::BackendUnavailable { attempts } = err else {
            panic!("expected BackendUnavailable, got {err:?}");
        };
        assert!(attempts < 10);
        assert_eq!(attempts, backend.calls());
    }

    #[tokio::test]
    async fn each_route_call_generates_a_new_order_id() {
        let backend = Arc::new(ScriptedBackend::new(vec![], Step::Receive));
        let router = router(&backend);
        let order = order();

        let first = router.route(&order).await.unwrap();
        let second = router.route(&order).await.unwrap();

        assert_ne!(first.order_id, second.order_id);
    }
}
