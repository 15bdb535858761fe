//! Stale Sweep Task
//!
//! Background task that periodically evicts stale home cache entries, so
//! expired data does not linger until the next read.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::HomeCache;

/// Spawns a background task that periodically purges stale cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between
/// sweeps. A sweep attempted while the host is backgrounded is skipped by
/// the guarded store and simply evicts nothing.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache: Arc<HomeCache> = Arc::new(HomeCache::new(store, oracle));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<Tx, St>(
    cache: Arc<HomeCache<Tx, St>>,
    interval: Duration,
) -> JoinHandle<()>
where
    Tx: 'static,
    St: 'static,
{
    tokio::spawn(async move {
        info!("Starting stale sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let evicted = cache.purge_stale().await;
            if evicted == 0 {
                debug!("Stale sweep: nothing to evict");
            }
        }
    })
}
