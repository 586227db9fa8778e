//! # bfs-3sat
//!
//! `bfs-3sat` searches for satisfying assignments of 3-CNF formulas by walking
//! every partial assignment in breadth-first order, discarding a branch as soon
//! as one of its clauses is fully assigned and false.
//!
//! ## Input
//!
//! A text file with one clause per line, three comma separated literals each:
//!
//! ```text
//! 1,-2,3
//! +4,5,-1
//! ```
//!
//! Lines that do not hold exactly three integers are skipped.
//!
//! ## Usage
//!
//! ```sh
//! # Single-file mode, result in ./result.txt
//! bfs-3sat 3SAT_Dim=10.csv
//! bfs-3sat file --path 3SAT_Dim=10.csv --output result.txt
//!
//! # Batch mode, one <name>_result.txt per <name>.csv in the current directory
//! bfs-3sat ../data
//! bfs-3sat dir --path ../data --output-dir results
//!
//! # Cap the search and show statistics
//! bfs-3sat file --path big.csv --max-nodes 1000000 --stats
//!
//! # Generate a random instance
//! bfs-3sat generate --vars 20 --clauses 85 --seed 1 --output 3SAT_Dim=20.csv
//! ```
//!
//! ## Output
//!
//! ```text
//! Solution found. Expanded nodes: 9
//! Assignment: 0 0 1
//! ```
//!
//! or `No solution found.` when the formula is unsatisfiable.
//!
//! Diagnostics go to stderr through `tracing`; pass `--debug` or set
//! `RUST_LOG` for more detail.

use crate::command_line::cli::{Cli, run};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better performance
/// and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug() { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run(cli)
}
