//! Error types shared by the parser, the runners and the instance generator.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong outside the search itself.
///
/// Malformed clause lines are not errors; the CSV reader skips them.
#[derive(Debug, Error)]
pub enum Error {
    /// An input file could not be opened or read.
    #[error("Error opening file: {}: {source}", .path.display())]
    Input {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// A result or instance file could not be created or written.
    #[error("Error writing to file: {}: {source}", .path.display())]
    Output {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// Batch mode was pointed at something that is not a directory.
    #[error("Provided path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Listing a batch directory failed part-way.
    #[error("Failed to read directory {}: {source}", .path.display())]
    Walk {
        /// The directory being listed.
        path: PathBuf,
        /// Underlying walk failure.
        source: walkdir::Error,
    },

    /// A found assignment did not satisfy its own formula.
    #[error("Solution for {} failed verification", .0.display())]
    VerificationFailed(PathBuf),

    /// The random instance generator was asked for something impossible.
    #[error("Invalid generator parameters: {0}")]
    InvalidGeneratorParameters(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
