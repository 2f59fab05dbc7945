//! API Handlers
//!
//! HTTP request handlers for each guestbook endpoint. Handlers only decode
//! requests and encode results; all behavior lives in the services.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::cache::CacheBackend;
use crate::error::{AppError, Result};
use crate::models::{CreateEntryRequest, Entry, HealthReport, StatsReport};
use crate::services::{EntryService, HealthService, StatsService};
use crate::store::EntryStore;

/// Response header carrying the listing's cache outcome.
pub const CACHE_HEADER: &str = "x-cache";

/// Application state shared across all handlers.
///
/// The services share one store handle and one cache handle; both are safe
/// for concurrent use, so no extra locking is needed here.
#[derive(Clone)]
pub struct AppState {
    pub entries: Arc<EntryService>,
    pub health: Arc<HealthService>,
    pub stats: Arc<StatsService>,
}

impl AppState {
    /// Wires every service to the given adapters.
    pub fn new(
        store: Arc<dyn EntryStore>,
        cache: Arc<dyn CacheBackend>,
        health_timeout: Duration,
    ) -> Self {
        Self {
            entries: Arc::new(EntryService::new(store.clone(), cache.clone())),
            health: Arc::new(HealthService::new(
                store.clone(),
                cache.clone(),
                health_timeout,
            )),
            stats: Arc::new(StatsService::new(store, cache)),
        }
    }
}

/// Handler for GET /health
///
/// Always answers 200; dependency trouble shows up in the body.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.health.check().await)
}

/// Handler for GET /api/entries
///
/// Returns all entries, with `X-Cache: HIT|MISS`.
pub async fn list_entries_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let listing = state.entries.list_entries().await?;

    Ok((
        [(CACHE_HEADER, listing.outcome.as_str())],
        Json(listing.entries),
    ))
}

/// Handler for POST /api/entries
///
/// Malformed JSON is a client error, same as a failed validation.
pub async fn create_entry_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>)> {
    let Json(req) = payload
        .map_err(|rejection| AppError::Validation(format!("Invalid JSON: {}", rejection.body_text())))?;

    let created = state.entries.create_entry(req).await?;

    Ok((StatusCode::CREATED, Json(created.entry)))
}

/// Handler for GET /api/stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsReport>> {
    Ok(Json(state.stats.get_stats().await?))
}
