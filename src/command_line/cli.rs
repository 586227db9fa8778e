#![allow(clippy::cast_precision_loss)]

use bfs_3sat::runner::{
    DEFAULT_DATA_DIR, DEFAULT_INPUT, DEFAULT_OUTPUT, FileReport, RunMode, RunOptions,
    run_batch, run_single,
};
use bfs_3sat::sat::csv::write_file;
use bfs_3sat::sat::generator::{GeneratorConfig, generate};
use bfs_3sat::sat::solver::SearchConfig;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::info;

/// Defines the command-line interface for the 3-SAT explorer.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "bfs-3sat",
    version,
    about = "Breadth-first search for satisfying assignments of 3-CNF formulas",
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    /// A CSV clause file or a directory of them. Without a subcommand a
    /// directory runs batch mode and anything else runs single-file mode.
    /// Defaults to `3SAT_Dim=50.csv`.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `dir`, `generate`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to the bare path form.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve one CSV clause file and write its result file.
    File {
        /// Path to the CSV clause file.
        #[arg(long, default_value = DEFAULT_INPUT)]
        path: PathBuf,

        /// Where to write the result.
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.csv` file in a directory, one result file each.
    Dir {
        /// Directory holding the CSV clause files. Not searched recursively.
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        path: PathBuf,

        /// Directory the `<name>_result.txt` files are written to.
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate a random 3-SAT instance in the CSV clause format.
    Generate {
        /// Number of variables to draw from.
        #[arg(long)]
        vars: usize,

        /// Number of clauses to generate.
        #[arg(long)]
        clauses: usize,

        /// Seed for a reproducible instance.
        #[arg(long)]
        seed: Option<u64>,

        /// File to write; the instance goes to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across the solving commands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug logging on stderr. `RUST_LOG` takes precedence.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Re-check a found assignment against the formula before reporting it.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after each search.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Give up after expanding this many nodes. Unlimited when omitted.
    #[arg(long)]
    pub(crate) max_nodes: Option<usize>,
}

impl CommonOptions {
    pub(crate) const fn run_options(&self) -> RunOptions {
        RunOptions {
            verify: self.verify,
            search: SearchConfig {
                max_nodes: self.max_nodes,
            },
        }
    }
}

impl Cli {
    /// Whether debug logging was asked for, wherever the flag was given.
    pub(crate) const fn debug(&self) -> bool {
        match &self.command {
            Some(Commands::File { common, .. } | Commands::Dir { common, .. }) => common.debug,
            _ => self.common.debug,
        }
    }
}

/// Mode for a bare invocation: a directory runs a batch, anything else (or
/// nothing) a single file.
fn mode_for(path: Option<PathBuf>) -> (RunMode, PathBuf) {
    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    if path.is_dir() {
        (RunMode::Batch, path)
    } else {
        (RunMode::Single, path)
    }
}

/// Dispatches the parsed command line.
///
/// # Errors
///
/// Fatal errors of the selected mode: unreadable input, an unwritable result
/// file in single-file mode, bad generator parameters.
pub(crate) fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        None => match mode_for(cli.path) {
            (RunMode::Batch, path) => solve_dir(&path, Path::new("."), &cli.common),
            (RunMode::Single, path) => solve_file(&path, Path::new(DEFAULT_OUTPUT), &cli.common),
        },
        Some(Commands::File {
            path,
            output,
            common,
        }) => solve_file(&path, &output, &common),
        Some(Commands::Dir {
            path,
            output_dir,
            common,
        }) => solve_dir(&path, &output_dir, &common),
        Some(Commands::Generate {
            vars,
            clauses,
            seed,
            output,
        }) => generate_instance(vars, clauses, seed, output.as_deref()),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Single-file mode.
pub(crate) fn solve_file(input: &Path, output: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    let report = run_single(input, output, &common.run_options())?;
    info!(output = %output.display(), "result written");

    if common.stats {
        print_stats(&report, memory_usage_mib());
    }
    Ok(())
}

/// Batch mode.
pub(crate) fn solve_dir(dir: &Path, out_dir: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    run_batch(dir, out_dir, &common.run_options(), |report| {
        if common.stats {
            print_stats(report, memory_usage_mib());
        }
    })?;
    Ok(())
}

fn generate_instance(
    vars: usize,
    clauses: usize,
    seed: Option<u64>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let mut config = GeneratorConfig::new(vars, clauses);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let cnf = generate(&config)?;
    match output {
        Some(path) => {
            write_file(&cnf, path)?;
            info!(path = %path.display(), clauses = cnf.len(), "instance written");
            println!("Instance written to: {}", path.display());
        }
        None => print!("{cnf}"),
    }
    Ok(())
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
fn memory_usage_mib() -> Option<(f64, f64)> {
    epoch::advance().ok()?;

    let allocated_bytes = stats::allocated::mib().ok()?.read().ok()?;
    let resident_bytes = stats::resident::mib().ok()?.read().ok()?;

    Some((
        allocated_bytes as f64 / (1024.0 * 1024.0),
        resident_bytes as f64 / (1024.0 * 1024.0),
    ))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics for one file.
pub(crate) fn print_stats(report: &FileReport, memory: Option<(f64, f64)>) {
    let elapsed_secs = report.search_time.as_secs_f64();
    let stats = &report.stats;

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line(
        "Parse time (s)",
        format!("{:.3}", report.parse_time.as_secs_f64()),
    );
    stat_line("Variables", report.cnf.num_vars);
    stat_line("Clauses", report.cnf.len());
    stat_line("Literals", report.cnf.literals().count());
    stat_line("Skipped lines", report.skipped_lines);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Expanded nodes", stats.expanded, elapsed_secs);
    stat_line_with_rate("Pruned nodes", stats.pruned, elapsed_secs);
    stat_line("Max frontier", stats.max_frontier);
    stat_line("Max depth", stats.max_depth);
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    println!("\n{}", report.outcome);
}
