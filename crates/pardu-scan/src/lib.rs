//! Parallel traversal engine for pardu.
//!
//! # Overview
//!
//! `pardu-scan` walks directory trees and sums file sizes. Every
//! subdirectory is visited as its own rayon task inside a per-directory
//! scope, so a directory's totals are settled before its visit returns.
//!
//! - **Aggregate mode** only counts: total size, files, directories.
//! - **Tree mode** also builds a [`TreeNode`] hierarchy, which is sorted
//!   (directories first, then by name) and printed with box-drawing
//!   connectors once the root has been fully scanned.
//!
//! Entries are filtered in a fixed order: exclusion patterns, then
//! symlinks (never followed), then metadata. Entries that vanish or cannot
//! be read are skipped without a report.
//!
//! # Example
//!
//! ```rust,no_run
//! use pardu_scan::{ScanConfig, scan};
//!
//! let config = ScanConfig::new(["/var/log"]);
//! let summary = scan(&config).unwrap();
//!
//! println!("{} bytes in {} files", summary.total_size, summary.file_count);
//! ```

mod builder;
mod console;
mod fs;
mod path_buf;
mod render;
mod scanner;
mod totals;
mod walker;

pub use console::{Console, SharedBuffer};
pub use path_buf::PathBuffer;
pub use render::{BRANCH, LAST, SPACE, TreeRenderer, VERT, format_size};
pub use scanner::Scanner;
pub use totals::ScanTotals;

// Re-export core types for convenience
pub use pardu_core::{
    ExclusionSet, MAX_DEPTH, NodeKind, ScanConfig, ScanConfigBuilder, ScanError, ScanSummary,
    TreeNode,
};

/// Scan `config.paths`, printing to stdout and stderr, and return the
/// combined summary.
pub fn scan(config: &ScanConfig) -> Result<ScanSummary, ScanError> {
    let scanner = Scanner::new(config.clone())?;
    Ok(scanner.scan(&Console::stdio()))
}
