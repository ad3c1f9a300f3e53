//! Periodic Purge Task
//!
//! Background task that periodically evicts cache entries violating the
//! configured bounds. Purging is deliberately kept out of the cache's own
//! operations; this task is the external collaborator that owns the
//! scheduling policy.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{MemoCache, PurgeOptions};

/// Spawns a background task that periodically purges the cache.
///
/// The task runs in an infinite loop, sleeping for `interval` between
/// runs. Each run acquires a write lock on the cache and applies
/// `options`.
///
/// Returns a JoinHandle for the spawned task, which can be used to abort
/// the task during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(MemoCache::new()));
/// let config = Config::from_env();
/// let handle = spawn_purge_task(
///     cache.clone(),
///     Duration::from_secs(config.purge_interval),
///     config.purge_options(),
/// );
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_purge_task<K, V>(
    cache: Arc<RwLock<MemoCache<K, V>>>,
    interval: Duration,
    options: PurgeOptions,
) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(?interval, "starting purge task");

        loop {
            tokio::time::sleep(interval).await;

            let evicted = {
                let mut cache_guard = cache.write().await;
                cache_guard.purge(options)
            };

            if evicted > 0 {
                info!(evicted, "purge task evicted entries");
            } else {
                debug!("purge task found nothing to evict");
            }
        }
    })
}
