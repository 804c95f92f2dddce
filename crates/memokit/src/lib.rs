//! # memokit
//!
//! Two structures for memoizing repeated computations over mutable data.
//!
//! ## Architecture
//! - **LruCache**: AHash index over an arena-backed doubly-linked list; O(1)
//!   get/put/evict plus range invalidation for `(L, R)` keys
//! - **SplayTree**: self-adjusting BST; every hit is rotated to the root for
//!   amortized O(log n) access with no capacity bound
//! - **memo**: range-sum and Fibonacci drivers built on both
//!
//! Neither structure synchronizes internally. Wrap an instance in a lock to
//! share it between threads.

#![warn(missing_docs)]

mod error;
mod list;
mod lru;
mod memo;
mod splay;
mod stats;

pub use error::{Error, Result};
pub use list::{Iter, LinkedList, NodeHandle};
pub use lru::{LruCache, RangeKey};
pub use memo::{
    fibonacci_lru, fibonacci_splay, fibonacci_splay_keyed, range_sum_uncached, update_uncached,
    MemoEntry, RangeSumCache,
};
pub use splay::{InOrder, NodeId, SplayTree};
pub use stats::CacheStats;
