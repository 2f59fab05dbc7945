//! Response DTOs for the guestbook API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Probe result for a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    Healthy,
    Unhealthy,
}

impl DependencyStatus {
    pub fn is_healthy(self) -> bool {
        self == DependencyStatus::Healthy
    }
}

/// Combined status. A single unhealthy dependency only degrades the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Degraded,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Overall status
    pub status: OverallStatus,
    /// Durable store probe result
    pub database: DependencyStatus,
    /// Cache probe result
    pub redis: DependencyStatus,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthReport {
    /// Composes a report from the two probe results.
    pub fn from_probes(database: DependencyStatus, redis: DependencyStatus) -> Self {
        let status = if database.is_healthy() && redis.is_healthy() {
            OverallStatus::Healthy
        } else {
            OverallStatus::Degraded
        };
        Self {
            status,
            database,
            redis,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /api/stats)
///
/// Cache-derived fields are omitted when the cache did not answer.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// Exact row count from the durable store
    pub total_entries_db: i64,
    /// Running creation counter kept in the cache, as stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_entries_created: Option<String>,
    /// Whether the cache answered the INFO query
    pub cache_available: bool,
    /// Raw cache server statistics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis_info: Option<String>,
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
