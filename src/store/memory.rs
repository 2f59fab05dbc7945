//! In-Process Entry Store
//!
//! Keeps entries in a vector behind an async lock. Used for local runs
//! without PostgreSQL and as the store in tests; it can be switched off to
//! simulate an outage and counts the calls it receives.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::EntryStore;
use crate::error::StoreError;
use crate::models::Entry;

// == Memory Store ==
/// Entry store held entirely in process memory.
#[derive(Debug)]
pub struct MemoryEntryStore {
    entries: RwLock<Vec<Entry>>,
    available: AtomicBool,
    calls: AtomicUsize,
}

impl MemoryEntryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    /// Creates a store pre-populated with `entries`.
    ///
    /// New ids continue after the largest existing id.
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: RwLock::new(entries),
            available: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        }
    }

    /// Switches the store on or off. While off every call fails.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of calls received so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store is switched off".to_string()))
        }
    }
}

impl Default for MemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.enter()
    }

    async fn insert_entry(
        &self,
        name: &str,
        message: &str,
    ) -> Result<(i32, DateTime<Utc>), StoreError> {
        self.enter()?;

        let mut entries = self.entries.write().await;
        let id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let created_at = Utc::now();
        entries.push(Entry {
            id,
            name: name.to_string(),
            message: message.to_string(),
            created_at,
        });

        Ok((id, created_at))
    }

    async fn list_entries(&self) -> Result<Vec<Entry>, StoreError> {
        self.enter()?;
        Ok(self.entries.read().await.clone())
    }

    async fn count_entries(&self) -> Result<i64, StoreError> {
        self.enter()?;
        Ok(self.entries.read().await.len() as i64)
    }
}
