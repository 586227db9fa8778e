#![deny(missing_docs)]
//! This crate explores 3-SAT formulas by exhaustive breadth-first search over
//! partial assignments, pruning any branch that already falsifies a clause.

/// Error types for file handling and instance generation.
pub mod error;

/// Single-file and batch runs over CSV clause files, and their result format.
pub mod runner;

/// The formula model, the pruning and completion checks, and the
/// breadth-first search driver.
pub mod sat;

pub use error::{Error, Result};
