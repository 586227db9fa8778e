//! Reader and writer for comma separated 3-CNF clause files.
//!
//! Each line is one clause of exactly three signed integer literals:
//!
//! ```text
//! 1,-2,3
//! +4, 5 ,-1
//! ```
//!
//! Tokens are trimmed and may carry a leading `+`. Empty tokens are ignored.
//! Any line that does not yield exactly three nonzero integers is skipped
//! without an error; the number of such lines is reported in
//! [`ParsedCsv::skipped_lines`] so callers can log it.

use crate::error::{Error, Result};
use crate::sat::clause::{CLAUSE_WIDTH, Clause};
use crate::sat::cnf::Cnf;
use smallvec::SmallVec;
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Extension, without the dot, that batch mode picks up. Matched case-sensitively.
pub const CSV_EXTENSION: &str = "csv";

/// A formula read from CSV plus what the reader had to throw away.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCsv {
    /// Clauses from every well-formed line.
    pub cnf: Cnf,
    /// Non-blank lines that did not form a clause.
    pub skipped_lines: usize,
}

/// Parses one line into a clause, or `None` if the line is malformed.
#[must_use]
pub fn parse_line(line: &str) -> Option<Clause> {
    let values: SmallVec<[i32; CLAUSE_WIDTH]> = line
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_token)
        .collect::<Option<_>>()?;

    match values.as_slice() {
        &[a, b, c] => Clause::from_i32s([a, b, c]),
        _ => None,
    }
}

/// Optional `+`, optional `-`, then digits.
fn parse_token(token: &str) -> Option<i32> {
    let unsigned = token.strip_prefix('+').unwrap_or(token);
    if unsigned.starts_with('+') {
        return None;
    }
    unsigned.parse().ok()
}

/// Parses CSV clause data from any `BufRead` source.
///
/// Lines are decoded lossily, so stray non-UTF-8 bytes only make their own
/// line malformed.
///
/// # Errors
///
/// Propagates I/O errors from `reader`.
pub fn parse_csv<R: BufRead>(reader: R) -> io::Result<ParsedCsv> {
    let mut clauses = Vec::new();
    let mut skipped_lines = 0;

    for (number, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line = String::from_utf8_lossy(&raw);

        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line) {
            Some(clause) => clauses.push(clause),
            None => {
                trace!(line = number + 1, content = %line.trim_end(), "skipping malformed clause line");
                skipped_lines += 1;
            }
        }
    }

    Ok(ParsedCsv {
        cnf: Cnf::new(clauses),
        skipped_lines,
    })
}

/// Opens and parses a CSV clause file.
///
/// # Errors
///
/// [`Error::Input`] if the file cannot be opened or read.
pub fn parse_file(path: &Path) -> Result<ParsedCsv> {
    let input_error = |source| Error::Input {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::open(path).map_err(input_error)?;
    parse_csv(io::BufReader::new(file)).map_err(input_error)
}

/// Writes `cnf` to `path` in the CSV clause format.
///
/// # Errors
///
/// [`Error::Output`] if the file cannot be written.
pub fn write_file(cnf: &Cnf, path: &Path) -> Result<()> {
    fs::write(path, cnf.to_string()).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })
}

/// Lists the `.csv` files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into.
///
/// # Errors
///
/// [`Error::NotADirectory`] if `dir` is not a directory, [`Error::Walk`] if
/// listing it fails.
pub fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| Error::Walk {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == CSV_EXTENSION) {
            files.push(path.to_path_buf());
        } else {
            trace!(path = %path.display(), "skipping non-CSV entry");
        }
    }

    Ok(files)
}
