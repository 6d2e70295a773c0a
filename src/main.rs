//! pardu - parallel disk usage.
//!
//! Usage:
//!   pardu [PATHS]...             Summarize disk usage
//!   pardu -t [PATHS]...          Show a sorted tree of every entry
//!   pardu -v [PATHS]...          List every file with its size
//!   pardu -x '*.log' [PATHS]...  Skip entries matching a glob
//!   pardu --help                 Show help

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use pardu_core::MAX_DEPTH;
use pardu_scan::{Console, ScanConfig, ScanSummary, Scanner, format_size};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PARDU_LOG";

#[derive(Parser)]
#[command(
    name = "pardu",
    version,
    about = "Parallel disk usage summarizer",
    long_about = "pardu sums the disk usage of the given paths, scanning \
                  directories in parallel.\n\n\
                  Symbolic links are never followed. Entries that vanish or \
                  cannot be read during the scan are skipped."
)]
struct Cli {
    /// Paths to scan (defaults to current directory)
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Count apparent sizes instead of allocated blocks
    #[arg(short, long)]
    apparent_size: bool,

    /// Print every file with its size; add sizes to the tree view
    #[arg(short, long)]
    verbose: bool,

    /// Render each directory as a sorted tree
    #[arg(short, long)]
    tree: bool,

    /// Skip entries whose name or path matches this glob (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
    excludes: Vec<String>,

    /// Number of worker threads (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    threads: usize,

    /// Maximum directory depth to descend
    #[arg(long, default_value_t = MAX_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
    max_depth: u32,

    /// Print the summary as JSON
    #[arg(long, conflicts_with_all = ["verbose", "tree"])]
    json: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging();

    let config = ScanConfig::builder()
        .paths(cli.paths)
        .exclude_patterns(cli.excludes)
        .apparent_size(cli.apparent_size)
        .verbose(cli.verbose)
        .tree(cli.tree)
        .threads(cli.threads)
        .max_depth(cli.max_depth)
        .build()
        .context("Invalid configuration")?;

    let scanner = Scanner::new(config).context("Failed to prepare scan")?;
    let summary = scanner.scan(&Console::stdio());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

/// Print the trailing totals line.
fn print_summary(summary: &ScanSummary) {
    println!();
    println!(
        "Total: {} ({} files, {} directories)",
        format_size(summary.total_size),
        summary.file_count,
        summary.dir_count
    );
}

/// Log to stderr, filtered by `PARDU_LOG` (default: warnings only).
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
