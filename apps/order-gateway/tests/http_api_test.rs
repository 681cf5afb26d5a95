//! HTTP API Integration Tests
//!
//! Drives the full router (HTTP → use cases → in-process adapters) the way a
//! client would, one request at a time.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

use order_gateway::config::Config;
use order_gateway::infrastructure::config::Container;
use order_gateway::infrastructure::http::{CLIENT_ID_HEADER, create_router};

// =============================================================================
// Helpers
// =============================================================================

fn gateway(config: &Config) -> (Container, Router) {
    let container = Container::from_config(config);
    let router = create_router(
        container.app_state("test"),
        &config.server.cors_allowed_origins,
    );
    (container, router)
}

fn default_gateway() -> (Container, Router) {
    let mut config = Config::default();
    config.identity.known_users = vec!["alice".to_string(), "bob".to_string()];
    gateway(&config)
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_as(client: &str, uri: &str, body: &Value) -> Request<Body> {
    let mut request = post(uri, body);
    request
        .headers_mut()
        .insert(CLIENT_ID_HEADER, client.parse().unwrap());
    request
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_version() {
    let (_, router) = default_gateway();

    let (status, body) = send(&router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], "test");
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn buy_market_order_is_accepted() {
    let (container, router) = default_gateway();

    let (status, body) = send(
        &router,
        post(
            "/api/buy",
            &json!({"symbol": "BTC", "quantity": 1.5, "clientOrderId": "abc123"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Accepted");
    assert_eq!(body["clientOrderId"], "abc123");
    assert!(body["orderId"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(body["receiptId"].is_string());
    assert!(body.get("reason").is_none());
    assert_eq!(container.backend().received_count(), 1);
}

#[tokio::test]
async fn sell_limit_order_is_accepted() {
    let (_, router) = default_gateway();

    let (status, body) = send(
        &router,
        post(
            "/api/sell",
            &json!({"symbol": "ETH/USDT", "quantity": "2", "price": "3100.50", "clientOrderId": "s-1"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Accepted");
}

#[tokio::test]
async fn empty_symbol_is_malformed() {
    let (container, router) = default_gateway();

    let (status, body) = send(
        &router,
        post(
            "/api/buy",
            &json!({"symbol": "", "quantity": 1.5, "clientOrderId": "abc124"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_FIELD");
    assert_eq!(body["field"], "symbol");
    assert_eq!(container.backend().received_count(), 0);
}

#[tokio::test]
async fn non_positive_quantity_is_malformed() {
    let (_, router) = default_gateway();

    for quantity in [json!(0), json!(-1), json!("-0.5")] {
        let (status, body) = send(
            &router,
            post(
                "/api/sell",
                &json!({"symbol": "AAPL", "quantity": quantity, "clientOrderId": "q-1"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "quantity");
    }
}

#[tokio::test]
async fn unparseable_json_is_malformed_body() {
    let (_, router) = default_gateway();

    let request = Request::builder()
        .method("POST")
        .uri("/api/buy")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"symbol\": \"BTC\", "))
        .unwrap();
    let (status, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_FIELD");
    assert_eq!(body["field"], "body");
}

#[tokio::test]
async fn resubmission_is_duplicate() {
    let (container, router) = default_gateway();
    let order = json!({"symbol": "BTC", "quantity": 1, "clientOrderId": "dup-1"});

    let (first, _) = send(&router, post("/api/buy", &order)).await;
    let (second, body) = send(&router, post("/api/buy", &order)).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_ORDER");
    assert_eq!(container.backend().received_count(), 1);
}

#[tokio::test]
async fn idempotency_keys_are_scoped_per_client() {
    let (_, router) = default_gateway();
    let order = json!({"symbol": "BTC", "quantity": 1, "clientOrderId": "shared-key"});

    let (desk_a, _) = send(&router, post_as("desk-a", "/api/buy", &order)).await;
    let (desk_b, _) = send(&router, post_as("desk-b", "/api/buy", &order)).await;
    let (desk_a_again, _) = send(&router, post_as("desk-a", "/api/buy", &order)).await;

    assert_eq!(desk_a, StatusCode::OK);
    assert_eq!(desk_b, StatusCode::OK);
    assert_eq!(desk_a_again, StatusCode::CONFLICT);
}

#[tokio::test]
async fn over_limit_order_is_rejected_with_ack() {
    let mut config = Config::default();
    config.backend.max_notional = Some(dec!(1000));
    let (_, router) = gateway(&config);

    let (status, body) = send(
        &router,
        post(
            "/api/buy",
            &json!({"symbol": "AAPL", "quantity": 10, "price": 150, "clientOrderId": "big-1"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "Rejected");
    assert_eq!(body["clientOrderId"], "big-1");
    assert_eq!(body["reason"], "insufficient funds");
}

#[tokio::test]
async fn rejected_key_stays_reserved() {
    let mut config = Config::default();
    config.backend.max_notional = Some(dec!(1000));
    let (_, router) = gateway(&config);
    let order = json!({"symbol": "AAPL", "quantity": 10, "price": 150, "clientOrderId": "big-2"});

    let (first, _) = send(&router, post("/api/buy", &order)).await;
    let (second, _) = send(&router, post("/api/buy", &order)).await;

    assert_eq!(first, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(second, StatusCode::CONFLICT);
}

#[tokio::test]
async fn huge_limit_order_does_not_crash_the_gateway() {
    let order = json!({
        "symbol": "BTC",
        "quantity": "10000000000000000000000",
        "price": "10000000",
        "clientOrderId": "huge-1",
    });

    let (_, router) = default_gateway();
    let (status, body) = send(&router, post("/api/buy", &order)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Accepted");

    let mut config = Config::default();
    config.backend.max_notional = Some(dec!(1000));
    let (_, limited) = gateway(&config);
    let (status, body) = send(&limited, post("/api/buy", &order)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["reason"], "insufficient funds");
}

// =============================================================================
// Auto-trade
// =============================================================================

#[tokio::test]
async fn auto_buy_enable_twice_stays_enabled() {
    let (container, router) = default_gateway();
    let body = json!({"userId": "alice", "enabled": true});

    let (first, rule) = send(&router, post("/api/auto_buy", &body)).await;
    let (second, again) = send(&router, post("/api/auto_buy", &body)).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(rule["userId"], "alice");
    assert_eq!(rule["side"], "BUY");
    assert_eq!(again["enabled"], true);
    assert_eq!(container.signals().registered_count(), 1);
}

#[tokio::test]
async fn auto_sell_disable_deregisters() {
    let (container, router) = default_gateway();

    send(
        &router,
        post("/api/auto_sell", &json!({"userId": "bob", "enabled": true})),
    )
    .await;
    let (status, rule) = send(
        &router,
        post("/api/auto_sell", &json!({"userId": "bob", "enabled": false})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(rule["side"], "SELL");
    assert_eq!(rule["enabled"], false);
    assert_eq!(container.signals().registered_count(), 0);
}

#[tokio::test]
async fn auto_trade_unknown_user_is_not_found() {
    let (container, router) = default_gateway();

    let (status, body) = send(
        &router,
        post("/api/auto_buy", &json!({"userId": "mallory", "enabled": true})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "UNKNOWN_USER");
    assert_eq!(container.rules().len(), 0);
}

#[tokio::test]
async fn auto_trade_missing_enabled_is_malformed() {
    let (_, router) = default_gateway();

    let (status, body) = send(&router, post("/api/auto_buy", &json!({"userId": "alice"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_FIELD");
}

#[tokio::test]
async fn rules_listing_is_per_user_buy_first() {
    let (_, router) = default_gateway();

    send(
        &router,
        post("/api/auto_sell", &json!({"userId": "alice", "enabled": true})),
    )
    .await;
    send(
        &router,
        post("/api/auto_buy", &json!({"userId": "alice", "enabled": false})),
    )
    .await;
    send(
        &router,
        post("/api/auto_buy", &json!({"userId": "bob", "enabled": true})),
    )
    .await;

    let (status, body) = send(&router, get("/api/auto_trade/alice")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], "alice");
    let rules = body["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0]["side"], "BUY");
    assert_eq!(rules[0]["enabled"], false);
    assert_eq!(rules[1]["side"], "SELL");
    assert_eq!(rules[1]["enabled"], true);
}

#[tokio::test]
async fn rules_listing_unknown_user_is_not_found() {
    let (_, router) = default_gateway();

    let (status, _) = send(&router, get("/api/auto_trade/mallory")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn default_cors_allows_any_origin() {
    let (_, router) = default_gateway();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/buy")
        .header(header::ORIGIN, "https://anywhere.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn configured_cors_ignores_other_origins() {
    let mut config = Config::default();
    config.server.cors_allowed_origins = vec!["https://app.example.com".to_string()];
    let (_, router) = gateway(&config);

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
