//! Cache Module
//!
//! Key-value cache used as an accelerator in front of the durable store.
//! Services talk to it through [`CacheBackend`]; Redis is the production
//! backend, [`MemoryCache`] is an in-process stand-in with the same semantics.

mod entry;
mod memory;
mod redis;
mod stats;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use redis::RedisCache;
pub use stats::CacheStats;

// == Cache Backend Trait ==
/// String key-value cache with TTLs and atomic counters.
///
/// Each call is a single atomic operation on the backend; no cross-key
/// transactions are offered.
#[async_trait]
pub trait CacheBackend: Send + Sync + 'static {
    /// Checks connectivity.
    async fn ping(&self) -> Result<(), CacheError>;

    /// Reads a value. `Ok(None)` is a clean miss, distinct from an error.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Writes a value that expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Removes a key. Returns whether a key was removed.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Increments an integer counter by one, creating it at zero first if
    /// absent. Returns the new value.
    async fn incr(&self, key: &str) -> Result<i64, CacheError>;

    /// Returns the server's diagnostic text for one INFO section.
    async fn info(&self, section: &str) -> Result<String, CacheError>;
}
