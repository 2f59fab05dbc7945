//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which durable store implementation to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Which cache implementation to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    Redis,
    Memory,
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// PostgreSQL host
    pub db_host: String,
    /// PostgreSQL port
    pub db_port: u16,
    /// PostgreSQL user
    pub db_user: String,
    /// PostgreSQL password
    pub db_password: String,
    /// PostgreSQL database name
    pub db_name: String,
    /// Upper bound on pooled database connections
    pub db_max_connections: u32,
    /// Redis host
    pub redis_host: String,
    /// Redis port
    pub redis_port: u16,
    /// Durable store implementation
    pub store_backend: StoreBackend,
    /// Cache implementation
    pub cache_backend: CacheBackendKind,
    /// Bound on every individual store or cache call
    pub dependency_timeout: Duration,
    /// Bound on each health probe
    pub health_timeout: Duration,
    /// Memory cache expiry sweep interval in seconds
    pub cleanup_interval: u64,
}

/// Returns the value of `key`, or `default` when it is unset or empty.
pub fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 8080)
    /// - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` - PostgreSQL
    ///   connection (default: localhost:5432, postgres/postgres, guestbook)
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
    /// - `REDIS_HOST`, `REDIS_PORT` - Redis connection (default: localhost:6379)
    /// - `STORE_BACKEND` - `postgres` or `memory` (default: postgres)
    /// - `CACHE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `DEPENDENCY_TIMEOUT_MS` - Per-call bound in ms (default: 2000)
    /// - `HEALTH_TIMEOUT_MS` - Per-probe bound in ms (default: 1000)
    /// - `CLEANUP_INTERVAL` - Memory cache sweep in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let store_backend = match env_or("STORE_BACKEND", "postgres").to_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            _ => StoreBackend::Postgres,
        };
        let cache_backend = match env_or("CACHE_BACKEND", "redis").to_lowercase().as_str() {
            "memory" => CacheBackendKind::Memory,
            _ => CacheBackendKind::Redis,
        };

        Self {
            server_port: parse_or("PORT", defaults.server_port),
            db_host: env_or("DB_HOST", &defaults.db_host),
            db_port: parse_or("DB_PORT", defaults.db_port),
            db_user: env_or("DB_USER", &defaults.db_user),
            db_password: env_or("DB_PASSWORD", &defaults.db_password),
            db_name: env_or("DB_NAME", &defaults.db_name),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            redis_host: env_or("REDIS_HOST", &defaults.redis_host),
            redis_port: parse_or("REDIS_PORT", defaults.redis_port),
            store_backend,
            cache_backend,
            dependency_timeout: Duration::from_millis(parse_or("DEPENDENCY_TIMEOUT_MS", 2000)),
            health_timeout: Duration::from_millis(parse_or("HEALTH_TIMEOUT_MS", 1000)),
            cleanup_interval: parse_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }

    /// PostgreSQL connection URL built from the individual settings.
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }

    /// Redis connection URL built from the individual settings.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_user: "postgres".to_string(),
            db_password: "postgres".to_string(),
            db_name: "guestbook".to_string(),
            db_max_connections: 10,
            redis_host: "localhost".to_string(),
            redis_port: 6379,
            store_backend: StoreBackend::Postgres,
            cache_backend: CacheBackendKind::Redis,
            dependency_timeout: Duration::from_millis(2000),
            health_timeout: Duration::from_millis(1000),
            cleanup_interval: 1,
        }
    }
}
