//! Health Service
//!
//! Probes the store and the cache independently and concurrently. Each probe
//! is bounded by its own timeout, so a hung dependency reports unhealthy
//! instead of stalling the check.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheBackend;
use crate::models::{DependencyStatus, HealthReport};
use crate::store::EntryStore;

// == Health Service ==
pub struct HealthService {
    store: Arc<dyn EntryStore>,
    cache: Arc<dyn CacheBackend>,
    probe_timeout: Duration,
}

impl HealthService {
    pub fn new(
        store: Arc<dyn EntryStore>,
        cache: Arc<dyn CacheBackend>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            store,
            cache,
            probe_timeout,
        }
    }

    /// Pings both dependencies and composes the report.
    pub async fn check(&self) -> HealthReport {
        let (database, redis) = tokio::join!(
            probe("database", self.probe_timeout, self.store.ping()),
            probe("redis", self.probe_timeout, self.cache.ping()),
        );

        HealthReport::from_probes(database, redis)
    }
}

async fn probe<E: Display>(
    name: &str,
    limit: Duration,
    ping: impl Future<Output = Result<(), E>>,
) -> DependencyStatus {
    match tokio::time::timeout(limit, ping).await {
        Ok(Ok(())) => DependencyStatus::Healthy,
        Ok(Err(err)) => {
            warn!("Health probe for {} failed: {}", name, err);
            DependencyStatus::Unhealthy
        }
        Err(_) => {
            warn!("Health probe for {} timed out after {:?}", name, limit);
            DependencyStatus::Unhealthy
        }
    }
}
