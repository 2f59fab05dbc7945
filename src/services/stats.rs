//! Stats Service
//!
//! Combines the exact row count from the store with the cache-resident
//! creation counter and the cache server's INFO text. Only the store part
//! is mandatory.

use std::sync::Arc;

use tracing::warn;

use super::ENTRY_COUNTER_KEY;
use crate::cache::CacheBackend;
use crate::error::Result;
use crate::models::StatsReport;
use crate::store::EntryStore;

/// INFO section reported alongside the counters.
const INFO_SECTION: &str = "stats";

// == Stats Service ==
pub struct StatsService {
    store: Arc<dyn EntryStore>,
    cache: Arc<dyn CacheBackend>,
}

impl StatsService {
    pub fn new(store: Arc<dyn EntryStore>, cache: Arc<dyn CacheBackend>) -> Self {
        Self { store, cache }
    }

    /// Builds the usage report.
    ///
    /// A store failure fails the call. Cache availability is decided by the
    /// INFO query; when it fails, every cache-derived field is omitted. An
    /// absent counter reads as `"0"`.
    pub async fn get_stats(&self) -> Result<StatsReport> {
        let total_entries_db = self.store.count_entries().await?;

        let counter = match self.cache.get(ENTRY_COUNTER_KEY).await {
            Ok(value) => Some(value.unwrap_or_else(|| "0".to_string())),
            Err(err) => {
                warn!("Could not read '{}': {}", ENTRY_COUNTER_KEY, err);
                None
            }
        };

        let report = match self.cache.info(INFO_SECTION).await {
            Ok(info) => StatsReport {
                total_entries_db,
                total_entries_created: counter,
                cache_available: true,
                redis_info: Some(info),
            },
            Err(err) => {
                warn!("Cache INFO failed, reporting cache as unavailable: {}", err);
                StatsReport {
                    total_entries_db,
                    total_entries_created: None,
                    cache_available: false,
                    redis_info: None,
                }
            }
        };

        Ok(report)
    }
}
