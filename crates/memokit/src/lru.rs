//! LRU (Least Recently Used) cache implementation
//!
//! An AHash index maps each key to its node in the recency list, so get, put
//! and eviction are O(1). Caches keyed by `(L, R)` intervals can additionally
//! drop every entry covering a point with [`LruCache::invalidate_range`].

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::list::{LinkedList, NodeHandle};
use crate::stats::CacheStats;

/// Key that spans a closed interval of points
///
/// Implemented for `(L, R)` pairs, which cover every `p` with `L <= p <= R`.
pub trait RangeKey {
    /// Point type the interval is made of
    type Point;

    /// Whether `point` lies inside this interval
    fn covers(&self, point: &Self::Point) -> bool;
}

impl<T: PartialOrd> RangeKey for (T, T) {
    type Point = T;

    fn covers(&self, point: &T) -> bool {
        self.0 <= *point && *point <= self.1
    }
}

/// LRU cache with fixed capacity
pub struct LruCache<K, V> {
    map: HashMap<K, NodeHandle, RandomState>,
    list: LinkedList<K, V>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            list: LinkedList::with_capacity(capacity),
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Get a value from the cache, marking it most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let handle = match self.map.get(key) {
            Some(&handle) => handle,
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        self.list.move_to_front(handle).ok()?;
        self.stats.record_hit();
        self.list.get(handle).map(|(_, value)| value)
    }

    /// Get a value without touching recency or statistics
    pub fn peek(&self, key: &K) -> Option<&V> {
        let handle = *self.map.get(key)?;
        self.list.get(handle).map(|(_, value)| value)
    }

    /// Check whether a key is resident
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Insert a key-value pair into the cache
    ///
    /// An existing key has its value replaced and becomes most recently used.
    /// A new key evicts the least recently used entry first when the cache is
    /// full.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&handle) = self.map.get(&key) {
            if let Some(slot) = self.list.get_mut(handle) {
                *slot = value;
                let promoted = self.list.move_to_front(handle);
                debug_assert!(promoted.is_ok());
            }
            return;
        }

        if self.map.len() >= self.capacity {
            self.evict();
        }

        let handle = self.list.push(key.clone(), value);
        self.map.insert(key, handle);
        self.stats.record_insert();
    }

    /// Remove a key from the cache
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let handle = self.map.remove(key)?;
        self.list.remove(handle).ok().map(|(_, value)| value)
    }

    /// Drop every entry whose interval key covers `index`
    ///
    /// Scans all resident entries once; returns how many were removed.
    pub fn invalidate_range<P>(&mut self, index: P) -> usize
    where
        K: RangeKey<Point = P>,
    {
        let before = self.map.len();
        let list = &mut self.list;

        self.map.retain(|key, handle| {
            if key.covers(&index) {
                let removed = list.remove(*handle);
                debug_assert!(removed.is_ok());
                false
            } else {
                true
            }
        });

        let removed = before - self.map.len();
        self.stats.record_invalidations(removed as u64);
        debug!(removed, remaining = self.map.len(), "range invalidation sweep");
        removed
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of resident entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Usage counters since construction or the last reset
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zero the usage counters
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Iterate entries from most to least recently used
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.list.iter()
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    fn evict(&mut self) {
        if let Some((key, _)) = self.list.remove_last() {
            self.map.remove(&key);
            self.stats.record_eviction();
            trace!(len = self.map.len(), "evicted least recently used entry");
        }
    }
}
