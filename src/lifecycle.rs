//! Lifecycle Module
//!
//! The foreground oracle consulted by the guarded store before every operation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// == Foreground Oracle ==
/// Point-in-time query for whether the host application has foreground
/// (user-interaction) standing.
pub trait ForegroundOracle: Send + Sync {
    fn is_foreground(&self) -> bool;
}

impl<F> ForegroundOracle for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_foreground(&self) -> bool {
        self()
    }
}

/// Oracle for hosts without a lifecycle (CLIs, tests, servers).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysForeground;

impl ForegroundOracle for AlwaysForeground {
    fn is_foreground(&self) -> bool {
        true
    }
}

// == Foreground Flag ==
/// Shared flag the host flips from its lifecycle callbacks.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct ForegroundFlag {
    active: Arc<AtomicBool>,
}

impl ForegroundFlag {
    /// Creates a flag with the given initial state.
    pub fn new(foreground: bool) -> Self {
        Self {
            active: Arc::new(AtomicBool::new(foreground)),
        }
    }

    pub fn set_foreground(&self, foreground: bool) {
        self.active.store(foreground, Ordering::SeqCst);
    }
}

impl Default for ForegroundFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ForegroundOracle for ForegroundFlag {
    fn is_foreground(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}
