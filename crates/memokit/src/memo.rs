//! Memoization drivers built on the cache and the tree
//!
//! - [`RangeSumCache`]: range-sum queries over a mutable array, memoized in an
//!   [`LruCache`] keyed by `(L, R)` and invalidated on point updates
//! - [`fibonacci_lru`], [`fibonacci_splay`], [`fibonacci_splay_keyed`]:
//!   recurrence memoization with arbitrary precision results

use std::cmp::Ordering;

use num_bigint::BigUint;
use tracing::debug;

use crate::error::{Error, Result};
use crate::lru::LruCache;
use crate::splay::SplayTree;
use crate::stats::CacheStats;

/// Array with memoized inclusive range sums
pub struct RangeSumCache {
    /// Backing array, mutated by `update`
    values: Vec<i64>,

    /// Cached sums keyed by `(left, right)`
    cache: LruCache<(usize, usize), i64>,
}

impl RangeSumCache {
    /// Wrap `values` with a range-sum cache holding at most `capacity` results
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - `capacity` is zero
    pub fn new(values: Vec<i64>, capacity: usize) -> Result<Self> {
        Ok(Self {
            values,
            cache: LruCache::new(capacity)?,
        })
    }

    /// Sum of `values[left..=right]`, served from cache when possible
    ///
    /// # Errors
    /// * `Error::InvalidRange` - `left > right` or `right` past the end
    pub fn range_sum(&mut self, left: usize, right: usize) -> Result<i64> {
        check_range(&self.values, left, right)?;

        if let Some(&sum) = self.cache.get(&(left, right)) {
            return Ok(sum);
        }

        let sum = self.values[left..=right].iter().sum();
        self.cache.put((left, right), sum);
        Ok(sum)
    }

    /// Overwrite one element and drop every cached range covering it
    ///
    /// # Errors
    /// * `Error::IndexOutOfBounds` - `index` past the end
    pub fn update(&mut self, index: usize, value: i64) -> Result<()> {
        update_uncached(&mut self.values, index, value)?;
        let dropped = self.cache.invalidate_range(index);
        debug!(index, dropped, "point update");
        Ok(())
    }

    /// Current contents of the backing array
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Number of cached range results
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        self.cache.stats()
    }
}

/// Sum of `values[left..=right]` without any caching
pub fn range_sum_uncached(values: &[i64], left: usize, right: usize) -> Result<i64> {
    check_range(values, left, right)?;
    Ok(values[left..=right].iter().sum())
}

/// Overwrite `values[index]` without any caching
pub fn update_uncached(values: &mut [i64], index: usize, value: i64) -> Result<()> {
    let len = values.len();
    let slot = values
        .get_mut(index)
        .ok_or(Error::IndexOutOfBounds { index, len })?;
    *slot = value;
    Ok(())
}

fn check_range(values: &[i64], left: usize, right: usize) -> Result<()> {
    if left > right || right >= values.len() {
        return Err(Error::InvalidRange {
            left,
            right,
            len: values.len(),
        });
    }
    Ok(())
}

/// n-th Fibonacci number memoized in an LRU cache keyed by argument
///
/// Recursion depth is `n`; a capacity below `n + 1` works but evicted
/// arguments get recomputed.
pub fn fibonacci_lru(n: u64, cache: &mut LruCache<u64, BigUint>) -> BigUint {
    if let Some(hit) = cache.get(&n) {
        return hit.clone();
    }

    let result = if n <= 1 {
        BigUint::from(n)
    } else {
        fibonacci_lru(n - 1, cache) + fibonacci_lru(n - 2, cache)
    };
    cache.put(n, result.clone());
    result
}

/// Fibonacci memoized by inserting both the argument and the result into one
/// splay tree of plain numbers
///
/// A hit returns whatever equal value the tree holds, so once a computed
/// result equals a later argument the lookup succeeds with the argument itself
/// and the returned number is wrong. Arguments and results share one ordering;
/// keeping them apart is up to the caller. [`fibonacci_splay_keyed`] does so.
pub fn fibonacci_splay(n: u64, tree: &mut SplayTree<BigUint>) -> BigUint {
    let arg = BigUint::from(n);
    if let Some(hit) = tree.find(&arg) {
        return hit.clone();
    }

    let result = if n <= 1 {
        arg.clone()
    } else {
        fibonacci_splay(n - 1, tree) + fibonacci_splay(n - 2, tree)
    };
    tree.insert(arg);
    tree.insert(result.clone());
    result
}

/// Splay tree entry ordered by argument only
#[derive(Debug, Clone)]
pub struct MemoEntry {
    /// Function argument
    pub arg: u64,
    /// Memoized result
    pub result: BigUint,
}

impl MemoEntry {
    fn lookup_key(arg: u64) -> Self {
        Self {
            arg,
            result: BigUint::default(),
        }
    }
}

impl PartialEq for MemoEntry {
    fn eq(&self, other: &Self) -> bool {
        self.arg == other.arg
    }
}

impl Eq for MemoEntry {}

impl PartialOrd for MemoEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MemoEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.arg.cmp(&other.arg)
    }
}

/// Fibonacci memoized in a splay tree of `(argument, result)` entries
pub fn fibonacci_splay_keyed(n: u64, tree: &mut SplayTree<MemoEntry>) -> BigUint {
    if let Some(hit) = tree.find(&MemoEntry::lookup_key(n)) {
        return hit.result.clone();
    }

    let result = if n <= 1 {
        BigUint::from(n)
    } else {
        fibonacci_splay_keyed(n - 1, tree) + fibonacci_splay_keyed(n - 2, tree)
    };
    tree.insert(MemoEntry {
        arg: n,
        result: result.clone(),
    });
    result
}
