//! Models Module
//!
//! Default payload types cached for the home screen.

mod stats;
mod transaction;

pub use stats::HomeStats;
pub use transaction::Transaction;
