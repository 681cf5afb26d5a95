//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::ports::{
    ExecutionBackendPort, IdentityResolverPort, SignalEvaluatorPort,
};
use crate::application::use_cases::{AutoTradeController, PlaceOrderUseCase};
use crate::domain::auto_trade::{AutoTradeRule, AutoTradeRuleRepository};
use crate::domain::order_intake::{OrderAck, OrderSide, RecentOrderStore};
use crate::domain::shared::ClientId;

use super::error::ApiError;
use super::request::{PlaceOrderRequest, SetAutoTradeRequest};
use super::response::{AutoTradeRulesResponse, HealthResponse};

/// Header naming the caller that scopes idempotency keys.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Application state shared across handlers.
pub struct AppState<S, B, I, E, R>
where
    S: RecentOrderStore,
    B: ExecutionBackendPort,
    I: IdentityResolverPort,
    E: SignalEvaluatorPort,
    R: AutoTradeRuleRepository,
{
    /// Use case for buy and sell orders.
    pub place_order: Arc<PlaceOrderUseCase<S, B>>,
    /// Use case for auto-trade toggles.
    pub auto_trade: Arc<AutoTradeController<I, E, R>>,
    /// Application version.
    pub version: String,
}

impl<S, B, I, E, R> Clone for AppState<S, B, I, E, R>
where
    S: RecentOrderStore,
    B: ExecutionBackendPort,
    I: IdentityResolverPort,
    E: SignalEvaluatorPort,
    R: AutoTradeRuleRepository,
{
    fn clone(&self) -> Self {
        Self {
            place_order: Arc::clone(&self.place_order),
            auto_trade: Arc::clone(&self.auto_trade),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
///
/// An empty `allowed_origins` list allows any origin.
pub fn create_router<S, B, I, E, R>(
    state: AppState<S, B, I, E, R>,
    allowed_origins: &[String],
) -> Router
where
    S: RecentOrderStore + 'static,
    B: ExecutionBackendPort + 'static,
    I: IdentityResolverPort + 'static,
    E: SignalEvaluatorPort + 'static,
    R: AutoTradeRuleRepository + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/buy", post(buy))
        .route("/api/sell", post(sell))
        .route("/api/auto_buy", post(auto_buy))
        .route("/api/auto_sell", post(auto_sell))
        .route("/api/auto_trade/{user_id}", get(auto_trade_rules))
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn client_from(headers: &HeaderMap) -> ClientId {
    headers
        .get(CLIENT_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or_else(ClientId::anonymous, ClientId::new)
}

/// Health check endpoint.
async fn health_check<S, B, I, E, R>(
    State(state): State<AppState<S, B, I, E, R>>,
) -> impl IntoResponse
where
    S: RecentOrderStore,
    B: ExecutionBackendPort,
    I: IdentityResolverPort,
    E: SignalEvaluatorPort,
    R: AutoTradeRuleRepository,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

async fn buy<S, B, I, E, R>(
    State(state): State<AppState<S, B, I, E, R>>,
    headers: HeaderMap,
    body: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<Json<OrderAck>, ApiError>
where
    S: RecentOrderStore,
    B: ExecutionBackendPort,
    I: IdentityResolverPort,
    E: SignalEvaluatorPort,
    R: AutoTradeRuleRepository,
{
    place_order(&state, &headers, body, OrderSide::Buy).await
}

async fn sell<S, B, I, E, R>(
    State(state): State<AppState<S, B, I, E, R>>,
    headers: HeaderMap,
    body: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<Json<OrderAck>, ApiError>
where
    S: RecentOrderStore,
    B: ExecutionBackendPort,
    I: IdentityResolverPort,
    E: SignalEvaluatorPort,
    R: AutoTradeRuleRepository,
{
    place_order(&state, &headers, body, OrderSide::Sell).await
}

async fn place_order<S, B, I, E, R>(
    state: &AppState<S, B, I, E, R>,
    headers: &HeaderMap,
    body: Result<Json<PlaceOrderRequest>, JsonRejection>,
    side: OrderSide,
) -> Result<Json<OrderAck>, ApiError>
where
    S: RecentOrderStore,
    B: ExecutionBackendPort,
    I: IdentityResolverPort,
    E: SignalEvaluatorPort,
    R: AutoTradeRuleRepository,
{
    let Json(request) = body?;
    let client = client_from(headers);

    let ack = state
        .place_order
        .execute(&client, &request.into_order_request(side))
        .await?;

    Ok(Json(ack))
}

async fn auto_buy<S, B, I, E, R>(
    State(state): State<AppState<S, B, I, E, R>>,
    body: Result<Json<SetAutoTradeRequest>, JsonRejection>,
) -> Result<Json<AutoTradeRule>, ApiError>
where
    S: RecentOrderStore,
    B: ExecutionBackendPort,
    I: IdentityResolverPort,
    E: SignalEvaluatorPort,
    R: AutoTradeRuleRepository,
{
    set_auto_trade(&state, body, OrderSide::Buy).await
}

async fn auto_sell<S, B, I, E, R>(
    State(state): State<AppState<S, B, I, E, R>>,
    body: Result<Json<SetAutoTradeRequest>, JsonRejection>,
) -> Result<Json<AutoTradeRule>, ApiError>
where
    S: RecentOrderStore,
    B: ExecutionBackendPort,
    I: IdentityResolverPort,
    E: SignalEvaluatorPort,
    R: AutoTradeRuleRepository,
{
    set_auto_trade(&state, body, OrderSide::Sell).await
}

async fn set_auto_trade<S, B, I, E, R>(
    state: &AppState<S, B, I, E, R>,
    body: Result<Json<SetAutoTradeRequest>, JsonRejection>,
    side: OrderSide,
) -> Result<Json<AutoTradeRule>, ApiError>
where
    S: RecentOrderStore,
    B: ExecutionBackendPort,
    I: IdentityResolverPort,
    E: SignalEvaluatorPort,
    R: AutoTradeRuleRepository,
{
    let Json(request) = body?;

    let rule = state
        .auto_trade
        .set_auto_trade(&request.user_id, side, request.enabled)
        .await?;

    Ok(Json(rule))
}

async fn auto_trade_rules<S, B, I, E, R>(
    State(state): State<AppState<S, B, I, E, R>>,
    Path(user_id): Path<String>,
) -> Result<Json<AutoTradeRulesResponse>, ApiError>
where
    S: RecentOrderStore,
    B: ExecutionBackendPort,
    I: IdentityResolverPort,
    E: SignalEvaluatorPort,
    R: AutoTradeRuleRepository,
{
    let rules = state.auto_trade.rules_for(&user_id).await?;

    Ok(Json(AutoTradeRulesResponse { user_id, rules }))
}
