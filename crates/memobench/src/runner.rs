//! Timed comparisons of the memoization strategies

use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use memokit::{
    fibonacci_lru, fibonacci_splay, fibonacci_splay_keyed, range_sum_uncached, update_uncached,
    CacheStats, LruCache, RangeSumCache, SplayTree,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::workload::{Query, Workload};

/// Cache counters as reported
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub invalidations: u64,
    pub hit_ratio: f64,
}

impl From<&CacheStats> for StatsReport {
    fn from(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits(),
            misses: stats.misses(),
            inserts: stats.inserts(),
            evictions: stats.evictions(),
            invalidations: stats.invalidations(),
            hit_ratio: stats.hit_ratio(),
        }
    }
}

/// Outcome of running one workload with and without the LRU cache
#[derive(Debug, Clone, Serialize)]
pub struct RangeReport {
    pub size: usize,
    pub queries: usize,
    pub capacity: usize,
    pub uncached_secs: f64,
    pub cached_secs: f64,
    pub cache: StatsReport,
}

impl RangeReport {
    /// Uncached time over cached time
    pub fn speedup(&self) -> f64 {
        if self.cached_secs > 0.0 {
            self.uncached_secs / self.cached_secs
        } else {
            0.0
        }
    }
}

/// Run `workload` uncached, then through a [`RangeSumCache`]
///
/// Both passes must produce the same answers; a mismatch is an error.
pub fn run_range(workload: &Workload, capacity: usize) -> Result<RangeReport> {
    let mut plain = workload.values.clone();
    let mut plain_answers = Vec::with_capacity(workload.range_count());
    let start = Instant::now();
    for query in &workload.queries {
        match *query {
            Query::Range { left, right } => {
                plain_answers.push(range_sum_uncached(&plain, left, right)?);
            }
            Query::Update { index, value } => update_uncached(&mut plain, index, value)?,
        }
    }
    let uncached = start.elapsed();
    info!("Uncached pass: {:.2?}", uncached);

    let mut cache = RangeSumCache::new(workload.values.clone(), capacity)?;
    let mut cached_answers = Vec::with_capacity(plain_answers.len());
    let start = Instant::now();
    for query in &workload.queries {
        match *query {
            Query::Range { left, right } => cached_answers.push(cache.range_sum(left, right)?),
            Query::Update { index, value } => cache.update(index, value)?,
        }
    }
    let cached = start.elapsed();
    info!("Cached pass: {:.2?}", cached);

    ensure!(
        plain_answers == cached_answers,
        "cached and uncached range sums disagree"
    );

    Ok(RangeReport {
        size: workload.values.len(),
        queries: workload.queries.len(),
        capacity,
        uncached_secs: uncached.as_secs_f64(),
        cached_secs: cached.as_secs_f64(),
        cache: cache.stats().into(),
    })
}

/// Timings for one Fibonacci argument
#[derive(Debug, Clone, Serialize)]
pub struct FibRow {
    pub n: u64,
    pub lru_secs: f64,
    pub splay_secs: f64,
    pub splay_keyed_secs: f64,
}

/// Time the Fibonacci drivers for `n` in `0..=max` stepping by `step`
///
/// Each strategy keeps one cache or tree across all arguments, so later rows
/// benefit from earlier ones.
pub fn run_fib(max: u64, step: u64) -> Result<Vec<FibRow>> {
    ensure!(step > 0, "step must be at least 1");

    let capacity = usize::try_from(max)?.saturating_add(1);
    let mut lru = LruCache::new(capacity)?;
    let mut tree = SplayTree::new();
    let mut keyed = SplayTree::new();

    let mut rows = Vec::new();
    for n in (0..=max).step_by(usize::try_from(step)?) {
        let (lru_time, expected) = timed(|| fibonacci_lru(n, &mut lru));
        let (splay_time, _) = timed(|| fibonacci_splay(n, &mut tree));
        let (keyed_time, keyed_result) = timed(|| fibonacci_splay_keyed(n, &mut keyed));

        ensure!(
            keyed_result == expected,
            "keyed splay memo disagrees with LRU at n = {}",
            n
        );
        debug!(n, tree_len = tree.len(), keyed_len = keyed.len(), "fibonacci row");

        rows.push(FibRow {
            n,
            lru_secs: lru_time.as_secs_f64(),
            splay_secs: splay_time.as_secs_f64(),
            splay_keyed_secs: keyed_time.as_secs_f64(),
        });
    }

    Ok(rows)
}

fn timed<T>(f: impl FnOnce() -> T) -> (Duration, T) {
    let start = Instant::now();
    let value = f();
    (start.elapsed(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::WorkloadConfig;

    #[test]
    fn test_run_range_small_workload() {
        let workload = Workload::generate(&WorkloadConfig {
            size: 300,
            queries: 1_000,
            range_ratio: 0.7,
            seed: Some(11),
        })
        .unwrap();

        let report = run_range(&workload, 16).unwrap();

        assert_eq!(report.queries, 1_000);
        assert_eq!(report.capacity, 16);
        assert_eq!(
            report.cache.hits + report.cache.misses,
            workload.range_count() as u64
        );
    }

    #[test]
    fn test_run_range_rejects_zero_capacity() {
        let workload = Workload {
            values: vec![1, 2, 3],
            queries: vec![Query::Range { left: 0, right: 2 }],
        };

        assert!(run_range(&workload, 0).is_err());
    }

    #[test]
    fn test_run_range_bad_query_fails() {
        let workload = Workload {
            values: vec![1, 2, 3],
            queries: vec![Query::Range { left: 2, right: 5 }],
        };

        assert!(run_range(&workload, 4).is_err());
    }

    #[test]
    fn test_run_fib_rows() {
        let rows = run_fib(100, 25).unwrap();

        let ns: Vec<u64> = rows.iter().map(|row| row.n).collect();
        assert_eq!(ns, vec![0, 25, 50, 75, 100]);
    }

    #[test]
    fn test_run_fib_zero_step() {
        assert!(run_fib(10, 0).is_err());
    }
}
