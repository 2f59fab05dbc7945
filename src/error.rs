//! Error types for the guestbook backend
//!
//! Provides unified error handling using thiserror. Store and cache failures
//! have separate types because they are handled differently: store errors
//! fail the operation, cache errors are downgraded where they are used.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Store Error ==
/// Failure talking to the durable store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Query or connection failure reported by the driver
    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// The call did not complete within the configured bound
    #[error("database call timed out after {0:?}")]
    Timeout(Duration),

    /// The store refused the call (in-process backend switched off)
    #[error("database unavailable: {0}")]
    Unavailable(String),
}

// == Cache Error ==
/// Failure talking to the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Command or connection failure reported by the Redis client
    #[error("cache command failed: {0}")]
    Command(#[from] redis::RedisError),

    /// The call did not complete within the configured bound
    #[error("cache call timed out after {0:?}")]
    Timeout(Duration),

    /// The cache refused the call (in-process backend switched off)
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    /// INCR on a key whose value is not an integer
    #[error("value at '{0}' is not an integer")]
    NotAnInteger(String),

    /// INCR would move the value past the 64-bit signed range
    #[error("increment at '{0}' would overflow")]
    Overflow(String),
}

// == App Error ==
/// Error returned by the service layer to the HTTP layer.
///
/// Cache errors never appear here: they are absorbed by the services and
/// only show up as altered response metadata.
#[derive(Error, Debug)]
pub enum AppError {
    /// Client supplied invalid input; nothing was attempted
    #[error("{0}")]
    Validation(String),

    /// The durable store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The cached value exists but cannot be decoded
    #[error("cached value at '{key}' is corrupt: {source}")]
    CorruptCache {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Store(err) => {
                error!("Request failed on database: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::CorruptCache { .. } => {
                error!("Request failed on cache content: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Cache content error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service layer.
pub type Result<T> = std::result::Result<T, AppError>;
