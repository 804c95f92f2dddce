//! Plain-text and JSON rendering of benchmark results

use anyhow::Result;
use serde::Serialize;

use crate::runner::{FibRow, RangeReport};

/// Render a range-sum report as text
pub fn range_table(report: &RangeReport) -> String {
    let stats = &report.cache;

    let mut out = format!(
        "Workload: {} values, {} queries, cache capacity {}\n",
        report.size, report.queries, report.capacity
    );
    out.push_str(&format!("Without cache:   {:.2} s\n", report.uncached_secs));
    out.push_str(&format!("With LRU cache:  {:.2} s\n", report.cached_secs));
    out.push_str(&format!("Speedup:         {:.2}x\n", report.speedup()));
    out.push_str(&format!(
        "Cache: {} hits, {} misses ({:.1}% hit rate), {} evictions, {} invalidated\n",
        stats.hits,
        stats.misses,
        stats.hit_ratio * 100.0,
        stats.evictions,
        stats.invalidations
    ));
    out
}

/// Render Fibonacci timings as a fixed-width table
pub fn fib_table(rows: &[FibRow]) -> String {
    let mut out = format!(
        "{:<10} {:<20} {:<20} {:<20}\n",
        "n", "LRU Cache Time (s)", "Splay Tree Time (s)", "Keyed Splay Time (s)"
    );
    out.push_str(&"-".repeat(73));
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{:<10} {:<20.9} {:<20.9} {:<20.9}\n",
            row.n, row.lru_secs, row.splay_secs, row.splay_keyed_secs
        ));
    }
    out
}

/// Pretty-printed JSON for any report
pub fn to_json<T: Serialize + ?Sized>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
