//! In-Process Cache Backend
//!
//! HashMap storage with per-key TTL expiry and keyspace statistics,
//! following Redis semantics for the commands the services use. It can be
//! switched off to simulate an unreachable cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{CacheBackend, CacheEntry, CacheStats};
use crate::error::CacheError;

#[derive(Debug, Default)]
struct Keyspace {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

impl Keyspace {
    /// Returns the live entry for `key`, dropping it first if it has expired.
    fn live(&mut self, key: &str) -> Option<&mut CacheEntry> {
        if self.entries.get(key).is_some_and(CacheEntry::is_expired) {
            self.entries.remove(key);
            self.stats.record_expired(1);
        }
        self.entries.get_mut(key)
    }
}

// == Memory Cache ==
/// Cache held in process memory.
#[derive(Debug)]
pub struct MemoryCache {
    keyspace: Mutex<Keyspace>,
    available: AtomicBool,
    calls: AtomicUsize,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates an empty, reachable cache.
    pub fn new() -> Self {
        Self {
            keyspace: Mutex::new(Keyspace::default()),
            available: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        }
    }

    /// Switches the cache on or off. While off every command fails.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of commands received so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Remaining lifetime of `key`. `None` when the key is absent or has no
    /// deadline. Does not count as a command.
    pub async fn ttl_of(&self, key: &str) -> Option<Duration> {
        let mut keyspace = self.keyspace.lock().await;
        keyspace.live(key).and_then(|entry| entry.ttl_remaining())
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut keyspace = self.keyspace.lock().await;
        let before = keyspace.entries.len();
        keyspace.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - keyspace.entries.len();
        keyspace.stats.record_expired(removed as u64);
        removed
    }

    /// Number of stored keys, expired ones included until swept.
    pub async fn key_count(&self) -> usize {
        self.keyspace.lock().await.entries.len()
    }

    fn enter(&self) -> Result<(), CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CacheError::Unavailable("memory cache is switched off".to_string()))
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn ping(&self) -> Result<(), CacheError> {
        self.enter()
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.enter()?;
        let mut keyspace = self.keyspace.lock().await;

        match keyspace.live(key).map(|entry| entry.value.clone()) {
            Some(value) => {
                keyspace.stats.record_hit();
                Ok(Some(value))
            }
            None => {
                keyspace.stats.record_miss();
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.enter()?;
        let mut keyspace = self.keyspace.lock().await;
        keyspace
            .entries
            .insert(key.to_string(), CacheEntry::with_ttl(value.to_string(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        self.enter()?;
        let mut keyspace = self.keyspace.lock().await;
        let removed = keyspace.live(key).is_some();
        keyspace.entries.remove(key);
        Ok(removed)
    }

    async fn incr(&self, key: &str) -> Result<i64, CacheError> {
        self.enter()?;
        let mut keyspace = self.keyspace.lock().await;

        // INCR keeps an existing deadline, like Redis.
        match keyspace.live(key) {
            Some(entry) => {
                let current: i64 = entry
                    .value
                    .parse()
                    .map_err(|_| CacheError::NotAnInteger(key.to_string()))?;
                let next = current
                    .checked_add(1)
                    .ok_or_else(|| CacheError::Overflow(key.to_string()))?;
                entry.value = next.to_string();
                Ok(next)
            }
            None => {
                keyspace
                    .entries
                    .insert(key.to_string(), CacheEntry::persistent("1".to_string()));
                Ok(1)
            }
        }
    }

    async fn info(&self, section: &str) -> Result<String, CacheError> {
        self.enter()?;
        let keyspace = self.keyspace.lock().await;
        let live_keys = keyspace
            .entries
            .values()
            .filter(|entry| !entry.is_expired())
            .count();
        Ok(keyspace.stats.render_info(section, live_keys))
    }
}
