//! Configuration module for the order gateway.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for all gateway components.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_gateway::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod backend;
mod dedup;
mod identity;
mod observability;
mod routing;
mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use backend::BackendConfig;
pub use dedup::{DedupConfig, MAX_DEDUP_SECS};
pub use identity::IdentityConfig;
pub use observability::{LogFormat, LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use routing::RoutingConfig;
pub use server::ServerConfig;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "ORDER_GATEWAY_CONFIG";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Order routing retry configuration.
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Idempotency cache configuration.
    #[serde(default)]
    pub dedup: DedupConfig,
    /// Identity resolver configuration.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Simulated execution backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration, falling back to defaults when the file does not exist.
///
/// The path is taken from `ORDER_GATEWAY_CONFIG` when `path` is `None`.
/// Any other read, parse, or validation failure is still an error.
///
/// # Errors
///
/// Returns a `ConfigError` if an existing file cannot be read, parsed, or validated.
pub fn load_config_or_default(path: Option<&str>) -> Result<Config, ConfigError> {
    let from_env = std::env::var(CONFIG_PATH_ENV).ok();
    let path = path
        .or(from_env.as_deref())
        .unwrap_or(DEFAULT_CONFIG_PATH);

    match load_config(Some(path)) {
        Err(ConfigError::ReadError { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            tracing::warn!(path, "Config file not found, using defaults");
            let config = Config::default();
            validate_config(&config)?;
            Ok(config)
        }
        other => other,
    }
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let invalid = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));

    if config.server.http_port == 0 {
        return invalid("server.http_port must be non-zero");
    }

    let metrics = &config.observability.metrics;
    if metrics.enabled {
        if metrics.port == 0 {
            return invalid("observability.metrics.port must be non-zero");
        }
        if metrics.port == config.server.http_port {
            return invalid("server.http_port and observability.metrics.port must be different");
        }
    }

    let routing = &config.routing;
    if routing.max_attempts < 1 {
        return invalid("routing.max_attempts must be at least 1");
    }
    if routing.backoff_multiplier < 1.0 {
        return invalid("routing.backoff_multiplier must be at least 1.0");
    }
    if !(0.0..=1.0).contains(&routing.jitter_factor) {
        return invalid("routing.jitter_factor must be between 0.0 and 1.0");
    }
    if routing.max_backoff_ms < routing.initial_backoff_ms {
        return invalid("routing.max_backoff_ms must not be below routing.initial_backoff_ms");
    }
    if routing.attempt_timeout_ms == 0 {
        return invalid("routing.attempt_timeout_ms must be positive");
    }
    if routing.attempt_timeout_ms > routing.request_timeout_ms {
        return invalid("routing.attempt_timeout_ms must not exceed routing.request_timeout_ms");
    }

    if config.dedup.retention_secs == 0 {
        return invalid("dedup.retention_secs must be positive");
    }
    if config.dedup.purge_interval_secs == 0 {
        return invalid("dedup.purge_interval_secs must be positive");
    }
    if config.dedup.retention_secs > MAX_DEDUP_SECS {
        return invalid("dedup.retention_secs must not exceed ten years");
    }
    if config.dedup.purge_interval_secs > MAX_DEDUP_SECS {
        return invalid("dedup.purge_interval_secs must not exceed ten years");
    }

    if config.identity.known_users.iter().any(|u| u.trim().is_empty()) {
        return invalid("identity.known_users must not contain blank entries");
    }

    if let Some(limit) = config.backend.max_notional
        && limit <= rust_decimal::Decimal::ZERO
    {
        return invalid("backend.max_notional must be positive");
    }

    Ok(())
}
