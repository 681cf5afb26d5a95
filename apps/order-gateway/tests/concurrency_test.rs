//! Concurrency and Backend Outage Integration Tests
//!
//! Races identical requests through the router and exercises the retry path
//! against a backend that is down, then recovers.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use order_gateway::application::ports::{BackendError, ExecutionBackendPort, ExecutionReceipt};
use order_gateway::application::use_cases::{AutoTradeController, PlaceOrderUseCase};
use order_gateway::config::Config;
use order_gateway::domain::order_intake::Order;
use order_gateway::domain::shared::{ReceiptId, Timestamp};
use order_gateway::infrastructure::config::Container;
use order_gateway::infrastructure::http::{AppState, create_router};
use order_gateway::infrastructure::identity::StaticIdentityResolver;
use order_gateway::infrastructure::persistence::{
    InMemoryAutoTradeRuleRepository, InMemoryRecentOrderStore,
};
use order_gateway::infrastructure::signals::InMemorySignalRegistry;
use order_gateway::resilience::RetryPolicy;

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Backend that is unreachable until switched on.
#[derive(Default)]
struct SwitchableBackend {
    up: AtomicBool,
    calls: AtomicU32,
}

#[async_trait]
impl ExecutionBackendPort for SwitchableBackend {
    async fn submit(&self, order: &Order) -> Result<ExecutionReceipt, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.up.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable {
                message: "connection refused".to_string(),
            });
        }
        Ok(ExecutionReceipt {
            receipt_id: ReceiptId::generate(),
            client_order_id: order.client_order_id().clone(),
            received_at: Timestamp::now(),
        })
    }
}

fn router_with_backend(backend: Arc<SwitchableBackend>) -> Router {
    let state = AppState {
        place_order: Arc::new(PlaceOrderUseCase::new(
            Arc::new(InMemoryRecentOrderStore::new(chrono::Duration::hours(24))),
            backend,
            RetryPolicy::immediate(3, Duration::from_millis(200)),
        )),
        auto_trade: Arc::new(AutoTradeController::new(
            Arc::new(StaticIdentityResolver::open()),
            Arc::new(InMemorySignalRegistry::new()),
            Arc::new(InMemoryAutoTradeRuleRepository::new()),
        )),
        version: "test".to_string(),
    };
    create_router(state, &[])
}

#[tokio::test]
async fn backend_outage_is_bad_gateway_after_bounded_retries() {
    let backend = Arc::new(SwitchableBackend::default());
    let router = router_with_backend(Arc::clone(&backend));

    let (status, body) = send(
        &router,
        post(
            "/api/buy",
            &json!({"symbol": "BTC", "quantity": 1, "clientOrderId": "outage-1"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "BACKEND_UNAVAILABLE");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn key_is_reusable_after_outage() {
    let backend = Arc::new(SwitchableBackend::default());
    let router = router_with_backend(Arc::clone(&backend));
    let order = json!({"symbol": "BTC", "quantity": 1, "clientOrderId": "outage-2"});

    let (first, _) = send(&router, post("/api/sell", &order)).await;
    backend.up.store(true, Ordering::SeqCst);
    let (second, ack) = send(&router, post("/api/sell", &order)).await;

    assert_eq!(first, StatusCode::BAD_GATEWAY);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(ack["status"], "Accepted");
}

#[tokio::test]
async fn concurrent_duplicates_yield_one_ack() {
    let container = Container::from_config(&Config::default());
    let router = create_router(container.app_state("test"), &[]);
    let order = json!({"symbol": "BTC", "quantity": 1.5, "clientOrderId": "race-1"});

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let router = router.clone();
            let order = order.clone();
            tokio::spawn(async move { send(&router, post("/api/buy", &order)).await.0 })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    let accepted = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    let duplicates = statuses
        .iter()
        .filter(|s| **s == StatusCode::CONFLICT)
        .count();
    assert_eq!(accepted, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(container.backend().received_count(), 1);
}

#[tokio::test]
async fn concurrent_toggles_settle_on_one_rule() {
    let container = Container::from_config(&Config::default());
    let router = create_router(container.app_state("test"), &[]);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let router = router.clone();
            let enabled = i % 2 == 0;
            tokio::spawn(async move {
                send(
                    &router,
                    post("/api/auto_buy", &json!({"userId": "carol", "enabled": enabled})),
                )
                .await
                .0
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let (_, body) = send(
        &router,
        Request::builder()
            .uri("/api/auto_trade/carol")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let rules = body["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 1);

    let enabled = rules[0]["enabled"].as_bool().unwrap();
    let registered = container.signals().registered_count() == 1;
    assert_eq!(enabled, registered);
}
