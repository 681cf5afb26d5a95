//! Order Gateway Binary
//!
//! Starts the order intake and auto-trade HTTP API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-gateway
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_GATEWAY_CONFIG`: Path to the YAML config (default: config.yaml)
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`
//!
//! Any `${VAR}` referenced from the config file is read from the
//! environment or a `.env` file.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use order_gateway::config::{Config, load_config_or_default};
use order_gateway::infrastructure::config::Container;
use order_gateway::infrastructure::http::create_router;
use order_gateway::infrastructure::persistence::spawn_purge_task;
use order_gateway::observability::{MetricsConfig, init_logging, init_metrics};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Time allowed for background tasks to stop after the server exits.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = load_config_or_default(None).context("failed to load configuration")?;
    init_logging(&config.observability.logging).context("failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting order gateway"
    );
    log_config(&config);

    if config.observability.metrics.enabled {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics.port));
        init_metrics(&MetricsConfig::with_addr(addr))
            .context("failed to start metrics exporter")?;
        tracing::info!(%addr, "Metrics exporter listening");
    }

    let container = Container::from_config(&config);
    let shutdown_token = CancellationToken::new();

    let purge_handle = spawn_purge_task(
        container.recent_orders(),
        config.dedup.purge_interval(),
        shutdown_token.clone(),
    );

    let app = create_router(
        container.app_state(env!("CARGO_PKG_VERSION")),
        &config.server.cors_allowed_origins,
    );

    let http_addr: SocketAddr = format!(
        "{}:{}",
        config.server.bind_address, config.server.http_port
    )
    .parse()
    .context("invalid server.bind_address")?;

    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  POST /api/buy");
    tracing::info!("  POST /api/sell");
    tracing::info!("  POST /api/auto_buy");
    tracing::info!("  POST /api/auto_sell");
    tracing::info!("  GET  /api/auto_trade/{{userId}}");

    let listener = TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    if let Err(e) = server.await {
        tracing::error!(error = %e, "HTTP server error");
    }

    shutdown_token.cancel();
    if tokio::time::timeout(SHUTDOWN_TIMEOUT, purge_handle)
        .await
        .is_err()
    {
        tracing::warn!("Dedup purge task did not stop in time");
    }

    tracing::info!("Order gateway stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

fn log_config(config: &Config) {
    let routing = &config.routing;
    tracing::info!(
        max_attempts = routing.max_attempts,
        initial_backoff_ms = routing.initial_backoff_ms,
        attempt_timeout_ms = routing.attempt_timeout_ms,
        request_timeout_ms = routing.request_timeout_ms,
        "Routing configuration"
    );
    tracing::info!(
        retention_secs = config.dedup.retention_secs,
        known_users = config.identity.known_users.len(),
        max_notional = ?config.backend.max_notional,
        "Gateway configuration"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
