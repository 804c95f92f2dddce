//! memobench - timing harness for memokit's memoization strategies

mod report;
mod runner;
mod workload;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::workload::{Workload, WorkloadConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print reports as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Range-sum queries with point updates, without and with an LRU cache
    Range {
        /// Array length
        #[arg(short = 'n', long, default_value_t = 100_000)]
        size: usize,

        /// Number of queries
        #[arg(short, long, default_value_t = 50_000)]
        queries: usize,

        /// Cache capacity (number of cached ranges)
        #[arg(short, long, default_value_t = 1000)]
        capacity: usize,

        /// Fraction of queries that are range sums
        #[arg(long, default_value_t = 0.7)]
        range_ratio: f64,

        /// RNG seed for a reproducible workload
        #[arg(long)]
        seed: Option<u64>,

        /// Replay a workload saved earlier instead of generating one
        #[arg(long, conflicts_with = "seed")]
        workload: Option<PathBuf>,

        /// Write the workload as JSON before running it
        #[arg(long)]
        save_workload: Option<PathBuf>,
    },

    /// Fibonacci memoization, LRU cache against splay tree
    Fib {
        /// Largest argument
        #[arg(long, default_value_t = 950)]
        max: u64,

        /// Distance between measured arguments
        #[arg(long, default_value_t = 50)]
        step: u64,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Starting memobench v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Range {
            size,
            queries,
            capacity,
            range_ratio,
            seed,
            workload,
            save_workload,
        } => {
            let workload = match workload {
                Some(path) => Workload::load(&path)?,
                None => Workload::generate(&WorkloadConfig {
                    size,
                    queries,
                    range_ratio,
                    seed,
                })?,
            };
            if let Some(path) = save_workload {
                workload.save(&path)?;
            }

            info!(
                "Running {} queries over {} values (cache capacity {})",
                workload.queries.len(),
                workload.values.len(),
                capacity
            );
            let report = runner::run_range(&workload, capacity)?;

            if args.json {
                println!("{}", report::to_json(&report)?);
            } else {
                print!("{}", report::range_table(&report));
            }
        }
        Command::Fib { max, step } => {
            info!("Timing Fibonacci for n in 0..={} step {}", max, step);
            let rows = runner::run_fib(max, step)?;

            if args.json {
                println!("{}", report::to_json(&rows)?);
            } else {
                print!("{}", report::fib_table(&rows));
            }
        }
    }

    Ok(())
}
