//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the host is alive.
//!
//! # Tasks
//! - Stale sweep: evicts expired home cache entries at a configured interval

mod sweep;

pub use sweep::spawn_sweep_task;
