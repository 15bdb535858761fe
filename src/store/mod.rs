//! Store Module
//!
//! The asynchronous key-value store contract, its backends, and the
//! foreground-gated wrapper the cache talks to.

mod file;
mod guarded;
mod memory;

use async_trait::async_trait;

use crate::error::StoreResult;

pub use file::FileStore;
pub use guarded::GuardedStore;
pub use memory::MemoryStore;

// == Key-Value Store ==
/// Opaque asynchronous string store.
///
/// Every operation may fail with a [`crate::error::StoreError`] carrying a
/// human-readable message. Implementations must be atomic per key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Returns every key currently stored.
    async fn list_keys(&self) -> StoreResult<Vec<String>>;

    /// Deletes all of `keys`.
    async fn remove_many(&self, keys: &[String]) -> StoreResult<()>;
}
