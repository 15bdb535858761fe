//! Cache Metrics Module
//!
//! Tracks how reads and writes through the home cache resolve.

use serde::Serialize;

// == Cache Metrics ==
/// Counters for cache outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheMetrics {
    /// Loads that returned fresh data
    pub hits: u64,
    /// Loads that found nothing stored
    pub misses: u64,
    /// Stale entries removed, on read or by the sweep
    pub evictions: u64,
    /// Operations that failed or were skipped while backgrounded
    pub failures: u64,
}

impl CacheMetrics {
    // == Constructor ==
    /// Creates a new CacheMetrics with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses + evictions), or 0.0 if no load has
    /// resolved yet. Failed loads are not counted.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.evictions;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the eviction counter by `count`.
    pub fn record_evictions(&mut self, count: u64) {
        self.evictions += count;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }
}
