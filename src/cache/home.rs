//! Home Cache Module
//!
//! Public entry point: the transaction list and the statistics object,
//! each cached independently with the same TTL.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::cache::{
    CacheMetrics, Clock, Lookup, SystemClock, TtlEntry, DEFAULT_TTL_MS, STATS_KEY,
    TRANSACTIONS_KEY,
};
use crate::config::Config;
use crate::error::Result;
use crate::lifecycle::ForegroundOracle;
use crate::models::{HomeStats, Transaction};
use crate::store::{GuardedStore, KeyValueStore};

// == Home Cache ==
/// Cache for the home screen's transaction list and statistics.
///
/// The plain methods never fail: a failed or skipped operation is
/// indistinguishable from a cache miss. The `try_*` variants return the
/// underlying [`Result`] so callers can tell "absent" from "failed".
pub struct HomeCache<Tx = Transaction, St = HomeStats> {
    store: GuardedStore,
    transactions: TtlEntry<Vec<Tx>>,
    stats: TtlEntry<St>,
    metrics: Mutex<CacheMetrics>,
}

impl<Tx, St> HomeCache<Tx, St> {
    // == Constructors ==
    /// Creates a cache with the default TTL and the system clock.
    pub fn new(store: Arc<dyn KeyValueStore>, oracle: Arc<dyn ForegroundOracle>) -> Self {
        Self::from_parts(
            GuardedStore::new(store, oracle),
            Arc::new(SystemClock),
            DEFAULT_TTL_MS,
        )
    }

    /// Creates a cache using the TTL and transient pattern from the Config.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn KeyValueStore>,
        oracle: Arc<dyn ForegroundOracle>,
    ) -> Self {
        let guarded =
            GuardedStore::with_transient_pattern(store, oracle, config.transient_pattern.clone());
        Self::from_parts(guarded, Arc::new(SystemClock), config.ttl_ms)
    }

    /// Assembles a cache from an existing guarded store and clock.
    pub fn from_parts(store: GuardedStore, clock: Arc<dyn Clock>, ttl_ms: u64) -> Self {
        Self {
            transactions: TtlEntry::new(TRANSACTIONS_KEY, store.clone(), clock.clone(), ttl_ms),
            stats: TtlEntry::new(STATS_KEY, store.clone(), clock, ttl_ms),
            store,
            metrics: Mutex::new(CacheMetrics::new()),
        }
    }

    /// The transaction list entry.
    pub fn transactions_entry(&self) -> &TtlEntry<Vec<Tx>> {
        &self.transactions
    }

    /// The statistics entry.
    pub fn stats_entry(&self) -> &TtlEntry<St> {
        &self.stats
    }

    // == Metrics ==
    /// Returns a snapshot of the cache counters.
    pub fn metrics(&self) -> CacheMetrics {
        self.metrics
            .lock()
            .map(|metrics| metrics.clone())
            .unwrap_or_default()
    }

    // == Clear All ==
    /// Removes both entries' data and timestamp keys.
    pub async fn clear_all(&self) {
        let _ = self.try_clear_all().await;
    }

    /// Every removal is attempted even if an earlier one fails; the first
    /// failure is returned.
    pub async fn try_clear_all(&self) -> Result<()> {
        let transactions = self.transactions.clear().await;
        let stats = self.stats.clear().await;
        let result = transactions.and(stats);
        if result.is_err() {
            self.record(CacheMetrics::record_failure);
        }
        result
    }

    // == Purge Stale ==
    /// Bulk-evicts every entry whose data is present but stale.
    ///
    /// Returns the number of entries evicted; 0 if the sweep could not run.
    pub async fn purge_stale(&self) -> usize {
        self.try_purge_stale().await.unwrap_or(0)
    }

    pub async fn try_purge_stale(&self) -> Result<usize> {
        let result = self.sweep().await;
        match &result {
            Ok(evicted) => self.record(|m| m.record_evictions(*evicted as u64)),
            Err(_) => self.record(CacheMetrics::record_failure),
        }
        result
    }

    async fn sweep(&self) -> Result<usize> {
        let present = self.store.list_all_keys().await?;

        let mut doomed = Vec::new();
        if let Some(keys) = self.transactions.stale_keys(&present).await? {
            doomed.extend(keys);
        }
        if let Some(keys) = self.stats.stale_keys(&present).await? {
            doomed.extend(keys);
        }

        self.store.remove_many(&doomed).await?;

        let evicted = doomed.len() / 2;
        if evicted > 0 {
            info!(evicted, "Purged stale home cache entries");
        }
        Ok(evicted)
    }

    fn record(&self, update: impl FnOnce(&mut CacheMetrics)) {
        if let Ok(mut metrics) = self.metrics.lock() {
            update(&mut metrics);
        }
    }

    fn observe_save(&self, result: &Result<()>) {
        if let Err(err) = result {
            debug!(error = %err, "Cache save did not complete");
            self.record(CacheMetrics::record_failure);
        }
    }

    fn observe_load<T>(&self, result: &Result<Lookup<T>>) {
        match result {
            Ok(Lookup::Fresh(_)) => self.record(CacheMetrics::record_hit),
            Ok(Lookup::Absent) => self.record(CacheMetrics::record_miss),
            Ok(Lookup::Evicted) => self.record(|m| m.record_evictions(1)),
            Err(err) => {
                debug!(error = %err, "Cache load did not complete");
                self.record(CacheMetrics::record_failure);
            }
        }
    }
}

impl<Tx: Serialize, St: Serialize> HomeCache<Tx, St> {
    // == Save Transactions ==
    /// Caches the transaction list and refreshes its timestamp.
    pub async fn save_transactions(&self, transactions: &[Tx]) {
        let _ = self.try_save_transactions(transactions).await;
    }

    pub async fn try_save_transactions(&self, transactions: &[Tx]) -> Result<()> {
        let result = self.transactions.save(transactions).await;
        self.observe_save(&result);
        result
    }

    // == Save Stats ==
    /// Caches the statistics object and refreshes its timestamp.
    pub async fn save_stats(&self, stats: &St) {
        let _ = self.try_save_stats(stats).await;
    }

    pub async fn try_save_stats(&self, stats: &St) -> Result<()> {
        let result = self.stats.save(stats).await;
        self.observe_save(&result);
        result
    }
}

impl<Tx: DeserializeOwned, St: DeserializeOwned> HomeCache<Tx, St> {
    // == Load Transactions ==
    /// Returns the cached transaction list if present and fresh.
    pub async fn load_transactions(&self) -> Option<Vec<Tx>> {
        self.try_load_transactions()
            .await
            .ok()
            .and_then(Lookup::into_option)
    }

    pub async fn try_load_transactions(&self) -> Result<Lookup<Vec<Tx>>> {
        let result = self.transactions.load().await;
        self.observe_load(&result);
        result
    }

    // == Load Stats ==
    /// Returns the cached statistics if present and fresh.
    pub async fn load_stats(&self) -> Option<St> {
        self.try_load_stats().await.ok().and_then(Lookup::into_option)
    }

    pub async fn try_load_stats(&self) -> Result<Lookup<St>> {
        let result = self.stats.load().await;
        self.observe_load(&result);
        result
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::CacheError;
    use crate::lifecycle::ForegroundFlag;
    use crate::store::MemoryStore;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    struct Fixture {
        backend: Arc<MemoryStore>,
        clock: ManualClock,
        flag: ForegroundFlag,
        cache: HomeCache,
    }

    fn fixture() -> Fixture {
        let backend = Arc::new(MemoryStore::new());
        let clock = ManualClock::new(1_700_000_000_000);
        let flag = ForegroundFlag::new(true);
        let store = GuardedStore::new(backend.clone(), Arc::new(flag.clone()));
        let cache = HomeCache::from_parts(store, Arc::new(clock.clone()), DEFAULT_TTL_MS);
        Fixture {
            backend,
            clock,
            flag,
            cache,
        }
    }

    #[tokio::test]
    async fn test_stats_round_trip_then_expiry() {
        let f = fixture();

        f.cache.save_stats(&HomeStats::with_total(42)).await;
        assert_eq!(f.cache.load_stats().await, Some(HomeStats::with_total(42)));

        f.clock.advance(DAY_MS + 1);
        assert_eq!(f.cache.load_stats().await, None);

        let entry = f.cache.stats_entry();
        assert_eq!(entry.key(), STATS_KEY);
        assert_eq!(entry.timestamp_key(), "@cache_timestamp_@home_stats");
        assert_eq!(f.backend.get(entry.timestamp_key()).await.unwrap(), None);
        assert_eq!(f.backend.get(entry.key()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_background_save_writes_nothing() {
        let f = fixture();
        f.flag.set_foreground(false);

        f.cache.save_transactions(&[Transaction::new(1, 0)]).await;
        assert!(f.backend.is_empty().await);

        f.flag.set_foreground(true);
        assert_eq!(f.cache.load_transactions().await, None);
    }

    #[tokio::test]
    async fn test_entries_are_independent() {
        let f = fixture();

        f.cache.save_stats(&HomeStats::with_total(1)).await;
        f.clock.advance(DAY_MS / 2);
        f.cache
            .save_transactions(&[Transaction::new(1, -250), Transaction::new(2, 1_000)])
            .await;
        f.clock.advance(DAY_MS / 2);

        assert_eq!(f.cache.load_stats().await, None);
        assert_eq!(
            f.cache.load_transactions().await.map(|txs| txs.len()),
            Some(2)
        );
    }

    #[tokio::test]
    async fn test_clear_all_removes_every_key() {
        let f = fixture();

        f.cache.save_stats(&HomeStats::with_total(3)).await;
        f.cache.save_transactions(&[Transaction::new(1, 5)]).await;
        f.backend.set("unrelated", "keep").await.unwrap();
        assert_eq!(f.backend.len().await, 5);

        f.cache.clear_all().await;
        assert_eq!(f.backend.list_keys().await.unwrap(), vec!["unrelated"]);
    }

    #[tokio::test]
    async fn test_try_variants_distinguish_absent_from_failed() {
        let f = fixture();

        assert_eq!(f.cache.try_load_stats().await.unwrap(), Lookup::Absent);

        f.flag.set_foreground(false);
        assert!(matches!(
            f.cache.try_load_stats().await,
            Err(CacheError::Backgrounded)
        ));
        assert!(f.cache.try_clear_all().await.is_err());
    }

    #[tokio::test]
    async fn test_purge_stale_evicts_only_stale_entries() {
        let f = fixture();

        f.cache.save_stats(&HomeStats::with_total(1)).await;
        f.clock.advance(DAY_MS);
        f.cache.save_transactions(&[Transaction::new(1, 5)]).await;

        assert_eq!(f.cache.purge_stale().await, 1);
        let entry = f.cache.transactions_entry();
        assert_eq!(entry.key(), TRANSACTIONS_KEY);
        assert_eq!(
            f.backend.list_keys().await.unwrap(),
            vec![entry.timestamp_key(), entry.key()]
        );

        // Nothing left to purge
        assert_eq!(f.cache.purge_stale().await, 0);
    }

    #[tokio::test]
    async fn test_purge_stale_in_background_is_noop() {
        let f = fixture();
        f.cache.save_stats(&HomeStats::with_total(1)).await;
        f.clock.advance(DAY_MS);
        f.flag.set_foreground(false);

        assert_eq!(f.cache.purge_stale().await, 0);
        assert_eq!(f.backend.len().await, 2);
    }

    #[tokio::test]
    async fn test_metrics_track_outcomes() {
        let f = fixture();

        f.cache.load_stats().await; // miss
        f.cache.save_stats(&HomeStats::with_total(1)).await;
        f.cache.load_stats().await; // hit
        f.clock.advance(DAY_MS);
        f.cache.load_stats().await; // eviction
        f.flag.set_foreground(false);
        f.cache.load_transactions().await; // failure

        assert_eq!(
            f.cache.metrics(),
            CacheMetrics {
                hits: 1,
                misses: 1,
                evictions: 1,
                failures: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_generic_payloads() {
        let backend = Arc::new(MemoryStore::new());
        let store = GuardedStore::new(backend, Arc::new(ForegroundFlag::default()));
        let cache: HomeCache<serde_json::Value, serde_json::Value> =
            HomeCache::from_parts(store, Arc::new(ManualClock::new(0)), DEFAULT_TTL_MS);

        let stats = serde_json::json!({"total": 42});
        cache.save_stats(&stats).await;
        assert_eq!(cache.load_stats().await, Some(stats));

        let txs = vec![serde_json::json!({"id": 1})];
        cache.save_transactions(&txs).await;
        assert_eq!(cache.load_transactions().await, Some(txs));
    }
}
