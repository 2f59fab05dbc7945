//! Read-Through Cache Strategy
//!
//! Cache-aside reads for a single key: serve from the cache when present,
//! otherwise load from the store and populate the cache with a TTL.
//! Concurrent misses each load and write; the load is idempotent.

use std::future::Future;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::CacheBackend;
use crate::error::{AppError, Result, StoreError};

/// Where a read-through result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
}

impl CacheOutcome {
    /// Value used for the `X-Cache` response header.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheOutcome::Hit => "HIT",
            CacheOutcome::Miss => "MISS",
        }
    }
}

// == Read Through ==
/// Read-through-with-TTL strategy bound to one cache key.
#[derive(Debug, Clone)]
pub struct ReadThrough {
    key: String,
    ttl: Duration,
}

impl ReadThrough {
    pub fn new(key: impl Into<String>, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            ttl,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the cached value, or loads it with `load` and caches it.
    ///
    /// A cached value that fails to decode is an error; the store is not
    /// consulted. An unreachable cache is treated as a miss and the write
    /// back is skipped. A failed write back is logged and ignored. A failed
    /// load is returned and nothing is cached.
    pub async fn fetch<T, F, Fut>(&self, cache: &dyn CacheBackend, load: F) -> Result<(T, CacheOutcome)>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, StoreError>>,
    {
        let cache_reachable = match cache.get(&self.key).await {
            Ok(Some(raw)) => {
                let value = serde_json::from_str(&raw).map_err(|source| AppError::CorruptCache {
                    key: self.key.clone(),
                    source,
                })?;
                debug!("Cache hit for '{}'", self.key);
                return Ok((value, CacheOutcome::Hit));
            }
            Ok(None) => {
                debug!("Cache miss for '{}'", self.key);
                true
            }
            Err(err) => {
                warn!("Cache read for '{}' failed, reading from store: {}", self.key, err);
                false
            }
        };

        let value = load().await?;

        if cache_reachable {
            self.populate(cache, &value).await;
        }

        Ok((value, CacheOutcome::Miss))
    }

    async fn populate<T: Serialize>(&self, cache: &dyn CacheBackend, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Could not serialize value for '{}': {}", self.key, err);
                return;
            }
        };

        if let Err(err) = cache.set(&self.key, &raw, self.ttl).await {
            warn!("Cache write for '{}' failed: {}", self.key, err);
        }
    }
}
