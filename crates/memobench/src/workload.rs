//! Random range-sum workloads

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One step of a range-sum workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Query {
    /// Sum of `values[left..=right]`
    Range { left: usize, right: usize },
    /// `values[index] = value`
    Update { index: usize, value: i64 },
}

/// Workload generation parameters
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Length of the backing array
    pub size: usize,
    /// Number of queries
    pub queries: usize,
    /// Probability that a query is a range sum rather than an update
    pub range_ratio: f64,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

/// Initial array plus the queries to run against it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    pub values: Vec<i64>,
    pub queries: Vec<Query>,
}

impl Workload {
    /// Generate a workload with values and update targets in `1..=100`
    pub fn generate(config: &WorkloadConfig) -> Result<Self> {
        if config.size == 0 {
            bail!("workload size must be at least 1");
        }
        if !(0.0..=1.0).contains(&config.range_ratio) {
            bail!("range ratio {} is outside [0, 1]", config.range_ratio);
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let n = config.size;
        let values = (0..n).map(|_| rng.gen_range(1..=100)).collect();
        let queries = (0..config.queries)
            .map(|_| {
                if rng.gen_bool(config.range_ratio) {
                    let left = rng.gen_range(0..n);
                    let right = rng.gen_range(left..n);
                    Query::Range { left, right }
                } else {
                    Query::Update {
                        index: rng.gen_range(0..n),
                        value: rng.gen_range(1..=100),
                    }
                }
            })
            .collect();

        Ok(Self { values, queries })
    }

    /// Load a workload previously written by [`Workload::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read workload {}", path.display()))?;
        let workload: Workload = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse workload {}", path.display()))?;
        info!(
            "Loaded workload: {} values, {} queries",
            workload.values.len(),
            workload.queries.len()
        );
        Ok(workload)
    }

    /// Write the workload as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string(self).context("Failed to serialize workload")?;
        fs::write(path, raw)
            .with_context(|| format!("Failed to write workload {}", path.display()))?;
        info!("Saved workload to {}", path.display());
        Ok(())
    }

    /// Number of range-sum queries
    pub fn range_count(&self) -> usize {
        self.queries
            .iter()
            .filter(|q| matches!(q, Query::Range { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> WorkloadConfig {
        WorkloadConfig {
            size: 500,
            queries: 2_000,
            range_ratio: 0.7,
            seed: Some(seed),
        }
    }

    #[test]
    fn test_generate_is_reproducible() {
        let a = Workload::generate(&config(7)).unwrap();
        let b = Workload::generate(&config(7)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_respects_bounds() {
        let workload = Workload::generate(&config(42)).unwrap();

        assert_eq!(workload.values.len(), 500);
        assert!(workload.values.iter().all(|v| (1..=100).contains(v)));

        for query in &workload.queries {
            match *query {
                Query::Range { left, right } => assert!(left <= right && right < 500),
                Query::Update { index, value } => {
                    assert!(index < 500);
                    assert!((1..=100).contains(&value));
                }
            }
        }
    }

    #[test]
    fn test_range_ratio_extremes() {
        let mut cfg = config(1);
        cfg.range_ratio = 1.0;
        let all_ranges = Workload::generate(&cfg).unwrap();
        assert_eq!(all_ranges.range_count(), cfg.queries);

        cfg.range_ratio = 0.0;
        let all_updates = Workload::generate(&cfg).unwrap();
        assert_eq!(all_updates.range_count(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut cfg = config(1);
        cfg.range_ratio = 1.5;
        assert!(Workload::generate(&cfg).is_err());

        let mut cfg = config(1);
        cfg.size = 0;
        assert!(Workload::generate(&cfg).is_err());
    }

    #[test]
    fn test_query_json_shape() {
        let json = serde_json::to_string(&Query::Range { left: 1, right: 4 }).unwrap();
        assert_eq!(json, r#"{"op":"range","left":1,"right":4}"#);

        let parsed: Query = serde_json::from_str(r#"{"op":"update","index":3,"value":9}"#).unwrap();
        assert_eq!(parsed, Query::Update { index: 3, value: 9 });
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("workload.json");
        let workload = Workload::generate(&config(3)).unwrap();

        workload.save(&path).unwrap();
        assert_eq!(Workload::load(&path).unwrap(), workload);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Workload::load(&dir.path().join("absent.json")).unwrap_err();

        assert!(err.to_string().contains("Failed to read workload"));
    }
}
