//! Cache Statistics Module
//!
//! Keyspace counters for the in-process cache, rendered in the same
//! `field:value` layout as the Redis INFO command.

use std::fmt::Write;

// == Cache Stats ==
/// Keyspace counters.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// GETs that found a live key
    pub keyspace_hits: u64,
    /// GETs that found nothing or an expired key
    pub keyspace_misses: u64,
    /// Keys removed because their TTL elapsed
    pub expired_keys: u64,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.keyspace_hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.keyspace_misses += 1;
    }

    pub fn record_expired(&mut self, count: u64) {
        self.expired_keys += count;
    }

    // == INFO Rendering ==
    /// Renders one INFO section. Unknown sections render as empty text,
    /// which is what Redis answers as well.
    ///
    /// # Arguments
    /// * `section` - `stats`, `keyspace`, or empty for both
    /// * `keys` - Number of live keys
    pub fn render_info(&self, section: &str, keys: usize) -> String {
        let mut out = String::new();
        let section = section.to_ascii_lowercase();

        if section.is_empty() || section == "stats" {
            let _ = write!(
                out,
                "# Stats\r\nkeyspace_hits:{}\r\nkeyspace_misses:{}\r\nexpired_keys:{}\r\n",
                self.keyspace_hits, self.keyspace_misses, self.expired_keys
            );
        }
        if section.is_empty() || section == "keyspace" {
            let _ = write!(out, "# Keyspace\r\ndb0:keys={}\r\n", keys);
        }

        out
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.keyspace_hits, 0);
        assert_eq!(stats.keyspace_misses, 0);
        assert_eq!(stats.expired_keys, 0);
    }

    #[test]
    fn test_render_stats_section() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_miss();
        stats.record_expired(3);

        let info = stats.render_info("stats", 10);
        assert!(info.starts_with("# Stats\r\n"));
        assert!(info.contains("keyspace_hits:1\r\n"));
        assert!(info.contains("keyspace_misses:2\r\n"));
        assert!(info.contains("expired_keys:3\r\n"));
        assert!(!info.contains("# Keyspace"));
    }

    #[test]
    fn test_render_all_sections() {
        let info = CacheStats::new().render_info("", 4);
        assert!(info.contains("# Stats"));
        assert!(info.contains("db0:keys=4"));
    }

    #[test]
    fn test_render_unknown_section_is_empty() {
        assert!(CacheStats::new().render_info("replication", 0).is_empty());
    }
}
