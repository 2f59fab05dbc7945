//! API Module
//!
//! HTTP handlers and routing for the guestbook REST API.
//!
//! # Endpoints
//! - `GET /health` - Dependency health
//! - `GET /api/entries` - List entries, `X-Cache: HIT|MISS`
//! - `POST /api/entries` - Create an entry
//! - `GET /api/stats` - Usage statistics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
