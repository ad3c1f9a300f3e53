//! Memo Cache Module
//!
//! Main cache engine combining a key-to-slot HashMap with the arena-backed
//! recency list. Lookups promote the entry to the fresh end of the list;
//! purging walks from the stale end, bounded by entry count, entry age, or
//! both.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tracing::debug;

use crate::cache::entry::Entry;
use crate::cache::list::{Iter, RecencyList};
use crate::cache::CacheStats;
use crate::error::Result;

// == Purge Options ==
/// Bounds applied by [`MemoCache::purge`].
///
/// Each bound is optional; supplying both applies them independently, so
/// the purge removes the union of what either bound would evict on its own.
/// Supplying neither makes the purge a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurgeOptions {
    /// Upper bound on entry count after the purge
    pub max_size: Option<usize>,
    /// Upper bound on time since last touch after the purge
    pub max_age: Option<Duration>,
}

impl PurgeOptions {
    /// Bound by entry count only.
    pub fn by_size(max_size: usize) -> Self {
        Self {
            max_size: Some(max_size),
            max_age: None,
        }
    }

    /// Bound by entry age only.
    pub fn by_age(max_age: Duration) -> Self {
        Self {
            max_size: None,
            max_age: Some(max_age),
        }
    }
}

// == Memo Cache ==
/// Memoizing key-value cache with recency ordering.
///
/// `fetch_with` wraps the compute-if-absent pattern: the first call for a
/// key pays the computation cost, later calls return the cached value and
/// promote the entry to the fresh end of the recency order. The cache is
/// unbounded until [`purge`](MemoCache::purge) applies a bound, which an
/// embedding owner is expected to do periodically (see
/// [`spawn_purge_task`](crate::tasks::spawn_purge_task)).
///
/// Every mutating operation takes `&mut self`, so a single logical owner
/// serializes all access. Embedders that share the cache wrap it in
/// `Arc<RwLock<_>>`.
#[derive(Debug)]
pub struct MemoCache<K, V> {
    /// Key to arena-slot mapping
    index: HashMap<K, usize>,
    /// Entries in recency order, stalest at the head
    list: RecencyList<K, V>,
    /// Performance counters
    stats: CacheStats,
}

impl<K: Hash + Eq + Clone, V> MemoCache<K, V> {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            list: RecencyList::new(),
            stats: CacheStats::new(),
        }
    }

    /// Returns the current number of entries. O(1).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Fetch ==
    /// Looks up `key`, promoting its entry to the freshest position and
    /// refreshing its timestamp. Returns `None` on a miss; no entry is
    /// created.
    pub fn fetch(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key).copied() {
            Some(slot) => {
                self.promote(slot);
                self.stats.record_hit();
                self.list.entry(slot).value()
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Fetch Or Compute ==
    /// Looks up `key`, invoking `compute` to fill the entry on a miss.
    ///
    /// On a hit, `compute` is not invoked and the entry is promoted as in
    /// [`fetch`](MemoCache::fetch). On a miss, a successful computation is
    /// cached and returned; a failed one is logged and swallowed, nothing
    /// is cached, and the call returns `None`. Failures must never poison
    /// the cache with a non-result.
    ///
    /// A panic inside `compute` propagates to the caller; the cache is
    /// left unmodified because no entry exists until `compute` returns.
    pub fn fetch_with<F>(&mut self, key: K, compute: F) -> Option<&V>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(slot) = self.index.get(&key).copied() {
            self.promote(slot);
            self.stats.record_hit();
            return self.list.entry(slot).value();
        }

        self.stats.record_miss();
        match compute() {
            Ok(value) => {
                let slot = self.list.push_back(Entry::with_value(key.clone(), value));
                self.index.insert(key, slot);
                self.stats.set_total_entries(self.index.len());
                self.list.entry(slot).value()
            }
            Err(err) => {
                self.stats.record_compute_failure();
                debug!(error = %err, "compute failed, caching nothing");
                None
            }
        }
    }

    // == Store ==
    /// Unconditionally upserts `key`, promoting it to the freshest
    /// position. Returns a reference to the stored value.
    pub fn store(&mut self, key: K, value: V) -> &V {
        let slot = match self.index.get(&key).copied() {
            Some(slot) => {
                self.list.entry_mut(slot).replace_value(value);
                self.promote(slot);
                slot
            }
            None => {
                let slot = self.list.push_back(Entry::with_value(key.clone(), value));
                self.index.insert(key, slot);
                slot
            }
        };

        self.stats.set_total_entries(self.index.len());
        self.list
            .entry(slot)
            .value()
            .expect("a stored entry always holds a value")
    }

    // == Delete ==
    /// Removes `key`, returning its value. Deleting an absent key is a
    /// no-op returning `None`.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(key)?;
        let value = self.list.remove(slot);
        self.stats.set_total_entries(self.index.len());
        value
    }

    // == Purge ==
    /// Evicts entries violating the supplied bounds, stalest first.
    /// Returns the number of entries evicted.
    ///
    /// The age scan stops at the first entry inside the bound: everything
    /// toward the fresh end was touched later, so the cost is proportional
    /// to the evicted count, not the cache size.
    pub fn purge(&mut self, options: PurgeOptions) -> usize {
        let mut evicted = 0;

        if let Some(max_size) = options.max_size {
            while self.index.len() > max_size {
                match self.list.head() {
                    Some(slot) => {
                        self.evict(slot);
                        evicted += 1;
                    }
                    None => break,
                }
            }
        }

        if let Some(max_age) = options.max_age {
            let max_age_ms = max_age.as_millis() as u64;
            while let Some(slot) = self.list.head() {
                if self.list.entry(slot).age_ms() <= max_age_ms {
                    break;
                }
                self.evict(slot);
                evicted += 1;
            }
        }

        if evicted > 0 {
            self.stats.set_total_entries(self.index.len());
            debug!(evicted, remaining = self.index.len(), "purged entries");
        }
        evicted
    }

    // == Iterate ==
    /// Iterates `(key, value)` pairs from stalest to freshest.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.list.iter()
    }

    // == Stats ==
    /// Returns a point-in-time copy of the performance counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Internal helpers ==
    /// Moves `slot` to the fresh end and refreshes its timestamp.
    fn promote(&mut self, slot: usize) {
        self.list.move_to_back(slot);
        self.list.entry_mut(slot).touch();
    }

    /// Removes `slot` from both index and list, counting an eviction.
    fn evict(&mut self, slot: usize) {
        let key = self.list.entry(slot).key().clone();
        self.index.remove(&key);
        self.list.remove(slot);
        self.stats.record_eviction();
    }
}

impl<K: Hash + Eq + Clone, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
