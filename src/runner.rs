//! Drives searches over CSV files and writes their result files.
//!
//! Every file is parsed and searched with its own [`BfsSolver`]; nothing is
//! shared between files of a batch.

use crate::error::{Error, Result};
use crate::sat::bfs::BfsSolver;
use crate::sat::cnf::Cnf;
use crate::sat::csv::{ParsedCsv, csv_files, parse_file};
use crate::sat::solver::{SearchConfig, SearchOutcome, SearchStats, Solver};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Input file used when single-file mode is given no path.
pub const DEFAULT_INPUT: &str = "3SAT_Dim=50.csv";
/// Result file written by single-file mode.
pub const DEFAULT_OUTPUT: &str = "result.txt";
/// Directory scanned when batch mode is given no path.
pub const DEFAULT_DATA_DIR: &str = "../data";
/// Appended to an input's file stem to name its batch result file.
pub const RESULT_SUFFIX: &str = "_result.txt";

/// Which invocation a result is rendered for; the two differ slightly in
/// their console echo and trailing blank lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// One input file, one fixed result file.
    Single,
    /// Every `.csv` file of a directory.
    Batch,
}

/// Options shared by both run modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Re-check a found assignment against the formula.
    pub verify: bool,
    /// Limits for each search.
    pub search: SearchConfig,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            verify: true,
            search: SearchConfig::unbounded(),
        }
    }
}

/// Everything known about one solved file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// The CSV file that was read.
    pub input: PathBuf,
    /// The parsed formula.
    pub cnf: Cnf,
    /// Malformed lines the reader skipped.
    pub skipped_lines: usize,
    /// How the search ended.
    pub outcome: SearchOutcome,
    /// Search counters.
    pub stats: SearchStats,
    /// Time spent reading and parsing.
    pub parse_time: Duration,
    /// Time spent searching.
    pub search_time: Duration,
}

/// Parses `path` and searches it.
///
/// # Errors
///
/// [`Error::Input`] if the file cannot be read, and
/// [`Error::VerificationFailed`] if verification is on and the found
/// assignment does not satisfy the formula.
pub fn solve_file(path: &Path, options: &RunOptions) -> Result<FileReport> {
    let start = Instant::now();
    let ParsedCsv { cnf, skipped_lines } = parse_file(path)?;
    let parse_time = start.elapsed();

    if skipped_lines > 0 {
        debug!(path = %path.display(), skipped_lines, "ignored malformed clause lines");
    }
    info!(
        path = %path.display(),
        variables = cnf.num_vars,
        clauses = cnf.len(),
        "parsed formula"
    );

    let start = Instant::now();
    let mut solver = BfsSolver::new(cnf, options.search);
    let outcome = solver.solve();
    let search_time = start.elapsed();
    let stats = solver.stats();

    if options.verify {
        if let Some(assignment) = outcome.solution() {
            let ok = solver.cnf.verify(assignment);
            debug!(path = %path.display(), ok, "verified solution");
            if !ok {
                return Err(Error::VerificationFailed(path.to_path_buf()));
            }
        }
    }

    info!(
        path = %path.display(),
        outcome = %outcome,
        expanded = stats.expanded,
        elapsed = ?search_time,
        "search finished"
    );

    Ok(FileReport {
        input: path.to_path_buf(),
        cnf: solver.cnf,
        skipped_lines,
        outcome,
        stats,
        parse_time,
        search_time,
    })
}

/// Single-file mode: solves `input`, writes the result to `output` and echoes
/// it to stdout.
///
/// # Errors
///
/// Any error from [`solve_file`], or [`Error::Output`] if `output` cannot be
/// written. Both are fatal for the run.
pub fn run_single(input: &Path, output: &Path, options: &RunOptions) -> Result<FileReport> {
    let report = solve_file(input, options)?;

    let contents = result_text(&report.outcome, &report.stats, RunMode::Single);
    fs::write(output, contents).map_err(|source| Error::Output {
        path: output.to_path_buf(),
        source,
    })?;

    print!(
        "{}",
        console_text(&report.outcome, &report.stats, RunMode::Single, input)
    );
    Ok(report)
}

/// Batch mode: solves every `.csv` file directly inside `dir`, in file name
/// order, writing `<stem>_result.txt` files into `out_dir`.
///
/// A result file that cannot be written is logged and that file is left out
/// of the returned reports; the batch carries on. `on_report` is called for
/// each file whose result was written.
///
/// # Errors
///
/// Fatal for the whole batch: `dir` is not a readable directory, or an input
/// file cannot be read or fails verification.
pub fn run_batch(
    dir: &Path,
    out_dir: &Path,
    options: &RunOptions,
    mut on_report: impl FnMut(&FileReport),
) -> Result<Vec<FileReport>> {
    let files = csv_files(dir)?;
    info!(dir = %dir.display(), files = files.len(), "starting batch");

    let mut reports = Vec::with_capacity(files.len());
    for input in files {
        println!("Processing file: {}", input.display());
        let report = solve_file(&input, options)?;

        let result_path = result_path_for(&input, out_dir);
        let contents = result_text(&report.outcome, &report.stats, RunMode::Batch);
        if let Err(source) = fs::write(&result_path, contents) {
            error!(path = %result_path.display(), %source, "Error writing to file");
            continue;
        }

        print!(
            "{}",
            console_text(&report.outcome, &report.stats, RunMode::Batch, &input)
        );
        on_report(&report);
        reports.push(report);
    }

    info!(solved = reports.len(), "batch complete");
    Ok(reports)
}

/// `<out_dir>/<stem>_result.txt` for an input `<stem>.csv`.
#[must_use]
pub fn result_path_for(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    out_dir.join(format!("{stem}{RESULT_SUFFIX}"))
}

/// Contents of a result file.
#[must_use]
pub fn result_text(outcome: &SearchOutcome, stats: &SearchStats, mode: RunMode) -> String {
    let mut text = String::new();
    match outcome {
        SearchOutcome::Satisfiable(_) => {
            write_solution(&mut text, outcome, stats);
            if mode == RunMode::Batch {
                text.push('\n');
            }
        }
        SearchOutcome::Unsatisfiable => text.push_str("No solution found.\n"),
        SearchOutcome::BudgetExceeded => write_budget_exceeded(&mut text, stats),
    }
    text
}

/// What gets echoed to stdout for one searched file.
#[must_use]
pub fn console_text(
    outcome: &SearchOutcome,
    stats: &SearchStats,
    mode: RunMode,
    input: &Path,
) -> String {
    let mut text = String::new();
    if mode == RunMode::Batch {
        let _ = writeln!(text, "File: {}", input.display());
    }

    match outcome {
        SearchOutcome::Satisfiable(_) => write_solution(&mut text, outcome, stats),
        SearchOutcome::Unsatisfiable => {
            let _ = writeln!(text, "No solution found. Expanded nodes: {}", stats.expanded);
        }
        SearchOutcome::BudgetExceeded => write_budget_exceeded(&mut text, stats),
    }

    if mode == RunMode::Batch && !outcome.is_sat() {
        text.push('\n');
    }
    text
}

fn write_solution(text: &mut String, outcome: &SearchOutcome, stats: &SearchStats) {
    let _ = writeln!(text, "Solution found. Expanded nodes: {}", stats.expanded);
    text.push_str("Assignment:");
    if let Some(assignment) = outcome.solution() {
        for value in assignment.iter() {
            let _ = write!(text, " {}", u8::from(value));
        }
    }
    text.push('\n');
}

fn write_budget_exceeded(text: &mut String, stats: &SearchStats) {
    let _ = writeln!(
        text,
        "Search budget exceeded. Expanded nodes: {}",
        stats.expanded
    );
}
