//! Services Module
//!
//! Orchestration between the HTTP layer, the cache and the durable store.
//! Services receive their adapters at construction and hold no other
//! shared state.

mod entries;
mod health;
mod read_through;
mod stats;


use std::time::Duration;

pub use entries::{CreatedEntry, EntryService, Listing, SideEffect};
pub use health::HealthService;
pub use read_through::{CacheOutcome, ReadThrough};
pub use stats::StatsService;

// == Cache Keys ==
/// Key holding the serialized listing of all entries.
pub const LISTING_KEY: &str = "entries:all";

/// Lifetime of a cached listing when no write invalidates it earlier.
pub const LISTING_TTL: Duration = Duration::from_secs(30);

/// Running tally of created entries, kept in the cache only.
pub const ENTRY_COUNTER_KEY: &str = "stats:total_entries";
