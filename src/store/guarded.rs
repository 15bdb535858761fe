//! Guarded Store Module
//!
//! Wraps a [`KeyValueStore`] so that every operation is gated on the
//! foreground oracle and every backend failure is classified before it
//! reaches the cache layer.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::INTERACTION_NOT_ALLOWED;
use crate::error::{CacheError, Result, StoreError};
use crate::lifecycle::ForegroundOracle;
use crate::store::KeyValueStore;

// == Guarded Store ==
/// Foreground-gated, failure-classifying view over a key-value store.
///
/// Operations never touch the backend while the oracle reports background
/// and yield [`CacheError::Backgrounded`] instead. Backend failures whose
/// message contains the transient pattern become
/// [`CacheError::InteractionNotAllowed`] and are only traced at debug
/// level; all other failures are logged as warnings.
#[derive(Clone)]
pub struct GuardedStore {
    inner: Arc<dyn KeyValueStore>,
    oracle: Arc<dyn ForegroundOracle>,
    transient_pattern: String,
}

impl GuardedStore {
    // == Constructor ==
    /// Creates a guarded store using the default transient pattern.
    pub fn new(inner: Arc<dyn KeyValueStore>, oracle: Arc<dyn ForegroundOracle>) -> Self {
        Self::with_transient_pattern(inner, oracle, INTERACTION_NOT_ALLOWED)
    }

    /// Creates a guarded store that treats failures containing `pattern` as transient.
    pub fn with_transient_pattern(
        inner: Arc<dyn KeyValueStore>,
        oracle: Arc<dyn ForegroundOracle>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            oracle,
            transient_pattern: pattern.into(),
        }
    }

    // == Get ==
    /// Reads `key`. `Ok(None)` means the key is genuinely absent.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        self.admit("get", key)?;
        self.inner
            .get(key)
            .await
            .map_err(|err| self.classify("get", key, err))
    }

    // == Set ==
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.admit("set", key)?;
        self.inner
            .set(key, value)
            .await
            .map_err(|err| self.classify("set", key, err))
    }

    // == Remove ==
    pub async fn remove(&self, key: &str) -> Result<()> {
        self.admit("remove", key)?;
        self.inner
            .remove(key)
            .await
            .map_err(|err| self.classify("remove", key, err))
    }

    // == List All Keys ==
    /// Returns every key in the backing store.
    pub async fn list_all_keys(&self) -> Result<Vec<String>> {
        self.admit("list_all_keys", "*")?;
        self.inner
            .list_keys()
            .await
            .map_err(|err| self.classify("list_all_keys", "*", err))
    }

    // == Remove Many ==
    /// Bulk delete. An empty `keys` slice never reaches the backend.
    pub async fn remove_many(&self, keys: &[String]) -> Result<()> {
        self.admit("remove_many", "*")?;
        if keys.is_empty() {
            return Ok(());
        }
        self.inner
            .remove_many(keys)
            .await
            .map_err(|err| self.classify("remove_many", "*", err))
    }

    fn admit(&self, op: &str, key: &str) -> Result<()> {
        if self.oracle.is_foreground() {
            Ok(())
        } else {
            debug!(op, key, "Skipping store operation while in background");
            Err(CacheError::Backgrounded)
        }
    }

    fn classify(&self, op: &str, key: &str, err: StoreError) -> CacheError {
        if err.message.contains(&self.transient_pattern) {
            debug!(op, key, "Store rejected call without interaction rights");
            CacheError::InteractionNotAllowed(err.message)
        } else {
            warn!(op, key, error = %err, "Store operation failed");
            CacheError::Store(err.message)
        }
    }
}
