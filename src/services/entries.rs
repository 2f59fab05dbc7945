//! Entry Service
//!
//! Listing goes through the read-through cache. Creation writes to the store
//! first, then invalidates the cached listing and bumps the running counter.
//! The two cache steps are secondary: once the insert has committed, their
//! failure is reported alongside the entry instead of failing the request.

use std::sync::Arc;

use tracing::{info, warn};

use super::{CacheOutcome, ReadThrough, ENTRY_COUNTER_KEY, LISTING_KEY, LISTING_TTL};
use crate::cache::CacheBackend;
use crate::error::{AppError, CacheError, Result};
use crate::models::{CreateEntryRequest, Entry};
use crate::store::EntryStore;

/// All entries plus where they were served from.
#[derive(Debug, Clone)]
pub struct Listing {
    pub entries: Vec<Entry>,
    pub outcome: CacheOutcome,
}

/// Result of a secondary cache effect that follows a committed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    Applied,
    Failed(String),
}

impl SideEffect {
    fn from_result<T>(what: &str, result: std::result::Result<T, CacheError>) -> Self {
        match result {
            Ok(_) => SideEffect::Applied,
            Err(err) => {
                warn!("Entry committed but {} failed: {}", what, err);
                SideEffect::Failed(err.to_string())
            }
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, SideEffect::Applied)
    }
}

/// A committed entry and the outcome of each follow-up cache effect.
#[derive(Debug, Clone)]
pub struct CreatedEntry {
    pub entry: Entry,
    /// Deletion of the cached listing
    pub invalidation: SideEffect,
    /// Increment of the running counter
    pub counter: SideEffect,
}

impl CreatedEntry {
    /// True when every follow-up effect was applied.
    pub fn is_complete(&self) -> bool {
        self.invalidation.is_applied() && self.counter.is_applied()
    }
}

// == Entry Service ==
pub struct EntryService {
    store: Arc<dyn EntryStore>,
    cache: Arc<dyn CacheBackend>,
    listing: ReadThrough,
}

impl EntryService {
    pub fn new(store: Arc<dyn EntryStore>, cache: Arc<dyn CacheBackend>) -> Self {
        Self {
            store,
            cache,
            listing: ReadThrough::new(LISTING_KEY, LISTING_TTL),
        }
    }

    /// Returns every entry in insertion order.
    ///
    /// Store failures fail the call. Cache failures only turn a hit into a
    /// miss, except for undecodable cached content, which fails the call.
    pub async fn list_entries(&self) -> Result<Listing> {
        let (entries, outcome) = self
            .listing
            .fetch(self.cache.as_ref(), || self.store.list_entries())
            .await?;

        Ok(Listing { entries, outcome })
    }

    /// Validates and stores a new entry.
    ///
    /// Invalid input is rejected before any store or cache access. After the
    /// insert commits, the cached listing is deleted and the counter is
    /// incremented; each of those is attempted regardless of the other.
    pub async fn create_entry(&self, request: CreateEntryRequest) -> Result<CreatedEntry> {
        if let Some(msg) = request.validate() {
            return Err(AppError::Validation(msg));
        }

        let (id, created_at) = self
            .store
            .insert_entry(&request.name, &request.message)
            .await?;

        let entry = Entry {
            id,
            name: request.name,
            message: request.message,
            created_at,
        };

        let invalidation = SideEffect::from_result(
            "listing invalidation",
            self.cache.delete(self.listing.key()).await,
        );
        let counter = SideEffect::from_result(
            "counter increment",
            self.cache.incr(ENTRY_COUNTER_KEY).await,
        );

        info!("Created entry {} by '{}'", entry.id, entry.name);

        Ok(CreatedEntry {
            entry,
            invalidation,
            counter,
        })
    }
}
