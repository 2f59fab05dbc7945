//! Guestbook - API backend for guestbook entries
//!
//! Entries live in PostgreSQL; listings are served through a Redis
//! cache-aside layer that is invalidated on every write. Health and usage
//! statistics report on both dependencies independently.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
