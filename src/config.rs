//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{DEFAULT_TTL_MS, INTERACTION_NOT_ALLOWED};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Time-to-live of cached entries in milliseconds
    pub ttl_ms: u64,
    /// Location of the JSON file used by the file-backed store
    pub store_path: PathBuf,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// Error message fragment identifying the transient background failure
    pub transient_pattern: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HOME_CACHE_TTL_MS` - Entry TTL in milliseconds (default: 86400000)
    /// - `HOME_CACHE_PATH` - Store file path (default: home_cache.json)
    /// - `HOME_CACHE_SWEEP_INTERVAL` - Sweep frequency in seconds (default: 300)
    /// - `HOME_CACHE_TRANSIENT_PATTERN` - Transient error fragment
    ///   (default: "User interaction is not allowed")
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            ttl_ms: env::var("HOME_CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_ms),
            store_path: env::var("HOME_CACHE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            sweep_interval: env::var("HOME_CACHE_SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval),
            transient_pattern: env::var("HOME_CACHE_TRANSIENT_PATTERN")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.transient_pattern),
        }
    }

    // == Sweep Period ==
    /// Interval between background sweeps. Never zero, so a sweep loop
    /// cannot spin.
    pub fn sweep_period(&self) -> Duration {
        Duration::from_secs(self.sweep_interval.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            store_path: PathBuf::from("home_cache.json"),
            sweep_interval: 300,
            transient_pattern: INTERACTION_NOT_ALLOWED.to_string(),
        }
    }
}
