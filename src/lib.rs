//! Home Cache - foreground-gated on-device cache for home screen data
//!
//! Caches a transaction list and an aggregate statistics object in an
//! asynchronous key-value store with a fixed TTL. Every operation degrades
//! to a cache miss instead of failing when the host app is backgrounded or
//! the store rejects a call.

pub mod cache;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod store;
pub mod tasks;

pub use cache::{CacheMetrics, HomeCache, Lookup};
pub use config::Config;
pub use error::{CacheError, Result, StoreError};
pub use lifecycle::{AlwaysForeground, ForegroundFlag, ForegroundOracle};
pub use store::{FileStore, GuardedStore, KeyValueStore, MemoryStore};
pub use tasks::spawn_sweep_task;
