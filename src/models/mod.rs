//! Data model and DTOs for the guestbook API
//!
//! `Entry` is the stored record; the request and response types define the
//! JSON bodies exchanged with the HTTP layer.

pub mod entry;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use entry::Entry;
pub use requests::CreateEntryRequest;
pub use responses::{
    DependencyStatus, ErrorResponse, HealthReport, OverallStatus, StatsReport,
};
