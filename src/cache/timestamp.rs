//! Timestamp helpers
//!
//! Timestamps are stored as the decimal string of Unix epoch milliseconds
//! under `<TIMESTAMP_PREFIX><data key>`.

use crate::cache::TIMESTAMP_PREFIX;

/// Returns the timestamp key paired with `data_key`.
pub fn timestamp_key(data_key: &str) -> String {
    format!("{TIMESTAMP_PREFIX}{data_key}")
}

/// Encodes a timestamp for storage.
pub fn encode(ms: i64) -> String {
    ms.to_string()
}

/// Decodes a stored timestamp. Returns `None` for anything that is not an
/// integer, which the read path treats the same as a missing timestamp.
pub fn decode(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

// == Is Fresh ==
/// An entry saved at `saved_at` is fresh while `now - saved_at < ttl_ms`.
pub fn is_fresh(saved_at: i64, now: i64, ttl_ms: u64) -> bool {
    let age = i128::from(now) - i128::from(saved_at);
    age < i128::from(ttl_ms)
}
