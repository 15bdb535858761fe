//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use home_cache::cache::{ManualClock, DEFAULT_TTL_MS, INTERACTION_NOT_ALLOWED};
use home_cache::error::StoreResult;
use home_cache::{ForegroundFlag, GuardedStore, HomeCache, KeyValueStore, MemoryStore, StoreError};

// == Faulty Store ==
/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Get,
    Set,
    Remove,
    ListKeys,
    RemoveMany,
}

/// Wraps a [`MemoryStore`] and fails selected operations, optionally only
/// for one key.
pub struct FaultyStore {
    pub inner: MemoryStore,
    faults: Mutex<HashSet<(Op, Option<String>)>>,
    message: Mutex<String>,
    calls: Mutex<Vec<Op>>,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            faults: Mutex::new(HashSet::new()),
            message: Mutex::new("database or disk is full".to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call of `op`.
    pub fn fail(&self, op: Op) {
        self.faults.lock().unwrap().insert((op, None));
    }

    /// Fails calls of `op` that target `key`.
    pub fn fail_key(&self, op: Op, key: &str) {
        self.faults
            .lock()
            .unwrap()
            .insert((op, Some(key.to_string())));
    }

    /// Makes injected failures carry the transient background message.
    pub fn fail_as_transient(&self) {
        *self.message.lock().unwrap() =
            format!("Error Domain=NSCocoaErrorDomain Code=4099: {INTERACTION_NOT_ALLOWED}.");
    }

    pub fn heal(&self) {
        self.faults.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, op: Op, key: Option<&str>) -> StoreResult<()> {
        self.calls.lock().unwrap().push(op);
        let faults = self.faults.lock().unwrap();
        let hit = faults.contains(&(op, None))
            || key.is_some_and(|k| faults.contains(&(op, Some(k.to_string()))));
        if hit {
            Err(StoreError::new(self.message.lock().unwrap().clone()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueStore for FaultyStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check(Op::Get, Some(key))?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check(Op::Set, Some(key))?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.check(Op::Remove, Some(key))?;
        self.inner.remove(key).await
    }

    async fn list_keys(&self) -> StoreResult<Vec<String>> {
        self.check(Op::ListKeys, None)?;
        self.inner.list_keys().await
    }

    async fn remove_many(&self, keys: &[String]) -> StoreResult<()> {
        self.check(Op::RemoveMany, None)?;
        self.inner.remove_many(keys).await
    }
}

// == Fixture ==
pub struct Fixture {
    pub backend: Arc<FaultyStore>,
    pub clock: ManualClock,
    pub flag: ForegroundFlag,
    pub cache: HomeCache,
}

pub fn fixture() -> Fixture {
    let backend = Arc::new(FaultyStore::new());
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
