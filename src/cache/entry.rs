//! TTL Entry Module
//!
//! A single named cache entry: a JSON payload under its data key and the
//! save time under the paired timestamp key.

use std::borrow::Borrow;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::timestamp;
use crate::cache::Clock;
use crate::error::{CacheError, Result};
use crate::store::GuardedStore;

// == Lookup ==
/// Outcome of a successful read.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// Data present and within the TTL
    Fresh(T),
    /// No data stored under the key
    Absent,
    /// Data was stale and has been removed together with its timestamp
    Evicted,
}

impl<T> Lookup<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Fresh(value) => Some(value),
            Lookup::Absent | Lookup::Evicted => None,
        }
    }
}

// == TTL Entry ==
/// One independently expiring cache entry holding a `T`.
///
/// State is entirely in the store: Absent (no data key), Fresh (data key
/// with a timestamp younger than the TTL) or Stale (anything else with a
/// data key, including a missing or unreadable timestamp).
pub struct TtlEntry<T> {
    key: String,
    timestamp_key: String,
    store: GuardedStore,
    clock: Arc<dyn Clock>,
    ttl_ms: u64,
    _payload: PhantomData<fn() -> T>,
}

impl<T> TtlEntry<T> {
    // == Constructor ==
    /// Creates an entry stored under `key`, with its timestamp under the
    /// derived timestamp key.
    pub fn new(
        key: impl Into<String>,
        store: GuardedStore,
        clock: Arc<dyn Clock>,
        ttl_ms: u64,
    ) -> Self {
        let key = key.into();
        Self {
            timestamp_key: timestamp::timestamp_key(&key),
            key,
            store,
            clock,
            ttl_ms,
            _payload: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn timestamp_key(&self) -> &str {
        &self.timestamp_key
    }

    /// Returns true if an entry saved at `saved_at` is still fresh.
    pub fn is_fresh(&self, saved_at: Option<i64>) -> bool {
        saved_at.is_some_and(|ts| timestamp::is_fresh(ts, self.clock.now_ms(), self.ttl_ms))
    }

    // == Saved At ==
    /// Reads the stored save time. Unparseable timestamps read as `None`.
    pub async fn saved_at(&self) -> Result<Option<i64>> {
        let raw = self.store.get(&self.timestamp_key).await?;
        Ok(raw.as_deref().and_then(timestamp::decode))
    }

    // == Stale Keys ==
    /// Given the keys currently in the store, returns this entry's data and
    /// timestamp keys if the data is present but stale.
    pub async fn stale_keys(&self, present: &[String]) -> Result<Option<[String; 2]>> {
        if !present.iter().any(|key| *key == self.key) {
            return Ok(None);
        }
        let saved_at = self.saved_at().await?;
        if self.is_fresh(saved_at) {
            Ok(None)
        } else {
            Ok(Some([self.key.clone(), self.timestamp_key.clone()]))
        }
    }

    // == Clear ==
    /// Removes the data key and the timestamp key.
    ///
    /// Both removals are always attempted; the first failure is returned.
    pub async fn clear(&self) -> Result<()> {
        let data = self.store.remove(&self.key).await;
        let stamp = self.store.remove(&self.timestamp_key).await;
        data.and(stamp)
    }
}

impl<T: Serialize> TtlEntry<T> {
    // == Save ==
    /// Writes the payload, then refreshes the timestamp.
    ///
    /// If the timestamp write fails the data is left without a fresh
    /// timestamp and the next read treats it as stale.
    pub async fn save<Q>(&self, value: &Q) -> Result<()>
    where
        T: Borrow<Q>,
        Q: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value).map_err(|err| {
            warn!(key = %self.key, error = %err, "Failed to encode cache payload");
            CacheError::from(err)
        })?;

        self.store.set(&self.key, &json).await?;
        self.store
            .set(&self.timestamp_key, &timestamp::encode(self.clock.now_ms()))
            .await
    }
}

impl<T: DeserializeOwned> TtlEntry<T> {
    // == Load ==
    /// Reads the payload if present and fresh; evicts it if stale.
    pub async fn load(&self) -> Result<Lookup<T>> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Lookup::Absent);
        };

        let saved_at = self.saved_at().await?;
        if !self.is_fresh(saved_at) {
            debug!(key = %self.key, ?saved_at, "Evicting stale cache entry");
            self.clear().await?;
            return Ok(Lookup::Evicted);
        }

        let value = serde_json::from_str(&raw).map_err(|err| {
            warn!(key = %self.key, error = %err, "Failed to decode cache payload");
            CacheError::from(err)
        })?;
        Ok(Lookup::Fresh(value))
    }
}
