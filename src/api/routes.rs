//! API Routes
//!
//! Configures the Axum router with all guestbook endpoints.

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_entry_handler, health_handler, list_entries_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Dependency health
/// - `GET /api/entries` - List entries (cache-aside)
/// - `POST /api/entries` - Create an entry
/// - `GET /api/stats` - Usage statistics
///
/// # Middleware
/// - CORS: Any origin; GET, POST and OPTIONS with a `Content-Type` header
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/entries",
            get(list_entries_handler).post(create_entry_handler),
        )
        .route("/api/stats", get(stats_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
