//! Cache Module
//!
//! Two independent TTL entries (transactions and stats) persisted through
//! the guarded store, plus the clock and timestamp helpers they rely on.

mod clock;
mod entry;
mod home;
mod metrics;
pub mod timestamp;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{Lookup, TtlEntry};
pub use home::HomeCache;
pub use metrics::CacheMetrics;

// == Public Constants ==
/// Storage key of the cached transaction list
pub const TRANSACTIONS_KEY: &str = "@home_transactions";

/// Storage key of the cached statistics object
pub const STATS_KEY: &str = "@home_stats";

/// Prefix prepended to a data key to form its timestamp key
pub const TIMESTAMP_PREFIX: &str = "@cache_timestamp_";

/// Entries older than this are stale
pub const DEFAULT_TTL_MS: u64 = 24 * 60 * 60 * 1000; // 24 hours

/// Message fragment of the error raised when storage is touched without
/// foreground interaction rights
pub const INTERACTION_NOT_ALLOWED: &str = "User interaction is not allowed";
