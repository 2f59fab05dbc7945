//! Durable Store Module
//!
//! The `entries` table is the source of truth for guestbook data. Services
//! depend on the [`EntryStore`] trait so that the PostgreSQL backend can be
//! swapped for the in-process one in tests and local runs.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::models::Entry;

pub use memory::MemoryEntryStore;
pub use postgres::PgEntryStore;

// == Entry Store Trait ==
/// Durable storage for guestbook entries.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait EntryStore: Send + Sync + 'static {
    /// Checks connectivity.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Inserts an entry, returning the store-assigned id and timestamp.
    async fn insert_entry(
        &self,
        name: &str,
        message: &str,
    ) -> Result<(i32, DateTime<Utc>), StoreError>;

    /// Returns all entries in insertion order.
    async fn list_entries(&self) -> Result<Vec<Entry>, StoreError>;

    /// Returns the number of stored entries.
    async fn count_entries(&self) -> Result<i64, StoreError>;
}
