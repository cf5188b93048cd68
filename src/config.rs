// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// Fails fast with a human-readable message when the variable is missing.
/// Missing configuration is a deployment error, not a runtime condition.
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used. This macro is appropriate for non-critical
/// tuning parameters where fallback behavior is acceptable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

/// Reads an optional environment variable as a lowercase backend selector.
macro_rules! backend_env {
    // ---
    ($key:literal, $default:literal) => {
        std::env::var($key)
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_else(|_| $default.to_string())
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub sessions: SessionConfig,
    pub metrics: MetricsKind,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or a backend
    /// selector names an unknown backend.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            storage: StorageConfig::from_env()?,
            sessions: SessionConfig::from_env()?,
            metrics: MetricsKind::from_env()?,
            server: ServerConfig::from_env(),
        })
    }
}

// ============================================================
// Storage configuration
// ============================================================

/// Which repository backend to build at startup (`CATALOG_STORAGE`).
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Postgres(DatabaseConfig),
    Memory,
}

impl StorageConfig {
    // ---
    pub fn from_env() -> Result<Self> {
        // ---
        match backend_env!("CATALOG_STORAGE", "postgres").as_str() {
            "postgres" => Ok(Self::Postgres(DatabaseConfig::from_env()?)),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("Unknown CATALOG_STORAGE backend: {other}"),
        }
    }
}

mod database {
    // ---
    use super::*;

    /// Database-related configuration derived from environment variables.
    #[derive(Debug, Clone)]
    pub struct DatabaseConfig {
        /// PostgreSQL connection string.
        pub database_url: String,

        /// Number of attempts when initializing the database connection. Defaults to 50.
        pub retry_count: u32,

        /// Maximum time to wait when acquiring a connection from the pool. Defaults to 30 seconds.
        pub acquire_timeout: Duration,

        /// Minimum number of connections to keep in the pool, even when idle. Defaults to 2.
        pub min_connections: u32,

        /// Maximum number of connections open concurrently. Defaults to 15.
        pub max_connections: u32,
    }

    impl DatabaseConfig {
        /// Builds a [`DatabaseConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `DATABASE_URL` is missing.
        pub fn from_env() -> Result<Self> {
            // ---
            let database_url = required_env!("DATABASE_URL");
            let retry_count = optional_env_parse!("CATALOG_DB_RETRY_COUNT", u32, 50);
            let acquire_timeout_secs =
                optional_env_parse!("CATALOG_DB_ACQUIRE_TIMEOUT_SEC", u64, 30);
            let min_connections = optional_env_parse!("CATALOG_DB_MIN_CONNECTIONS", u32, 2);
            let max_connections = optional_env_parse!("CATALOG_DB_MAX_CONNECTIONS", u32, 15);

            Ok(Self {
                database_url,
                retry_count,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
                min_connections,
                max_connections,
            })
        }
    }
}
pub use database::DatabaseConfig;

// ============================================================
// Session configuration
// ============================================================

/// Which session store backs bearer tokens (`CATALOG_SESSIONS`).
#[derive(Debug, Clone)]
pub enum SessionConfig {
    Redis(RedisConfig),
    Memory,
}

impl SessionConfig {
    // ---
    pub fn from_env() -> Result<Self> {
        // ---
        match backend_env!("CATALOG_SESSIONS", "redis").as_str() {
            "redis" => Ok(Self::Redis(RedisConfig::from_env()?)),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("Unknown CATALOG_SESSIONS backend: {other}"),
        }
    }
}

mod redis {
    // ---
    use super::*;

    /// Redis connection settings for the session store.
    #[derive(Debug, Clone)]
    pub struct RedisConfig {
        /// Redis connection string.
        pub url: String,
    }

    impl RedisConfig {
        /// Builds a [`RedisConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `CATALOG_REDIS_URL` is missing.
        pub fn from_env() -> Result<Self> {
            // ---
            let url = required_env!("CATALOG_REDIS_URL");
            Ok(Self { url })
        }
    }
}
pub use redis::RedisConfig;

// ============================================================
// Metrics and server configuration
// ============================================================

/// Metrics backend (`CATALOG_METRICS_TYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsKind {
    Noop,
    Prometheus,
}

impl MetricsKind {
    // ---
    pub fn from_env() -> Result<Self> {
        // ---
        match backend_env!("CATALOG_METRICS_TYPE", "noop").as_str() {
            "noop" => Ok(Self::Noop),
            "prom" | "prometheus" => Ok(Self::Prometheus),
            other => anyhow::bail!("Unknown CATALOG_METRICS_TYPE: {other}"),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address. Defaults to `127.0.0.1:8080`.
    pub bind_addr: String,

    /// Upper bound on each repository call made by a handler. Defaults to 10 seconds.
    pub db_timeout: Duration,
}

impl ServerConfig {
    // ---
    pub fn from_env() -> Self {
        // ---
        let bind_addr =
            std::env::var("CATALOG_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let db_timeout_secs = optional_env_parse!("CATALOG_DB_TIMEOUT_SEC", u64, 10);

        Self {
            bind_addr,
            db_timeout: Duration::from_secs(db_timeout_secs),
        }
    }
}

// ============================================================
// Tests
// ============================================================
