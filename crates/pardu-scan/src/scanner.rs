//! Top-level dispatcher over the configured root paths.

use std::ffi::OsStr;
use std::path::Path;

use pardu_core::{ExclusionSet, ScanConfig, ScanError, ScanSummary, TreeNode};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::console::Console;
use crate::fs;
use crate::render::TreeRenderer;
use crate::totals::ScanTotals;
use crate::walker::Walker;

/// Parallel disk usage scanner.
///
/// Roots are scanned concurrently, each with its own counters, and the
/// per-root summaries are summed at the end. Failures below a root are
/// skipped silently; a root that cannot be read is reported on the error
/// stream and contributes nothing.
#[derive(Debug)]
pub struct Scanner {
    config: ScanConfig,
    excludes: ExclusionSet,
    pool: Option<ThreadPool>,
}

impl Scanner {
    /// Prepare a scanner: compiles the exclusion patterns and, when a
    /// thread count is configured, starts a dedicated pool.
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let excludes = ExclusionSet::new(&config.exclude_patterns)?;

        let pool = match config.threads {
            0 => None,
            n => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("pardu-worker-{i}"))
                    .build()
                    .map_err(|e| ScanError::ThreadPool {
                        message: e.to_string(),
                    })?;
                debug!(threads = n, "started dedicated worker pool");
                Some(pool)
            }
        };

        Ok(Self {
            config,
            excludes,
            pool,
        })
    }

    /// Scan every configured root, writing listings to `console`.
    pub fn scan(&self, console: &Console) -> ScanSummary {
        let summary = self.install(|| {
            self.config
                .paths
                .par_iter()
                .map(|path| self.scan_root(path, console))
                .sum::<ScanSummary>()
        });
        console.flush();
        summary
    }

    /// Aggregate one directory without printing anything except verbose
    /// file lines. The directory itself is not counted.
    pub fn walk(&self, dir: &Path, console: &Console) -> ScanSummary {
        let totals = ScanTotals::new();
        self.install(|| {
            Walker::new(&self.config, &self.excludes, &totals, console).walk(dir, 0)
        });
        totals.snapshot()
    }

    /// Build the hierarchy below one root without rendering it.
    pub fn build_tree(&self, root: &Path) -> (Option<TreeNode>, ScanSummary) {
        let totals = ScanTotals::new();
        let console = Console::null();
        let node = self.install(|| {
            let walker = Walker::new(&self.config, &self.excludes, &totals, &console);
            match fs::stat(root) {
                Ok(meta) if meta.is_dir => {
                    walker.build(root, root_name(root), walker.measure(&meta), 0)
                }
                Ok(meta) => {
                    let size = walker.measure(&meta);
                    totals.record_file(size);
                    Some(TreeNode::new_file(&*root_name(root).to_string_lossy(), size))
                }
                Err(_) => None,
            }
        });
        (node, totals.snapshot())
    }

    fn scan_root(&self, path: &Path, console: &Console) -> ScanSummary {
        let meta = match fs::stat(path) {
            Ok(meta) => meta,
            Err(err) => {
                let err = ScanError::io(path, err);
                console.error(format_args!("Error: {err}"));
                return ScanSummary::new();
            }
        };

        let totals = ScanTotals::new();
        let walker = Walker::new(&self.config, &self.excludes, &totals, console);
        let size = walker.measure(&meta);

        if self.config.tree {
            let root = if meta.is_dir {
                walker.build(path, root_name(path), size, 0)
            } else {
                totals.record_file(size);
                Some(TreeNode::new_file(&*root_name(path).to_string_lossy(), size))
            };

            if let Some(mut root) = root {
                let label = path.display().to_string();
                let renderer = TreeRenderer::new(self.config.verbose);
                console.with_output(|out| renderer.render(&mut root, &label, out));
            }
        } else if meta.is_dir {
            walker.walk(path, 0);
        } else {
            totals.record_file(size);
            if self.config.verbose {
                console.file_line(size, path);
            }
        }

        let summary = totals.snapshot();
        debug!(
            path = %path.display(),
            files = summary.file_count,
            dirs = summary.dir_count,
            bytes = summary.total_size,
            "root finished"
        );
        summary
    }

    fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

/// Base name of a root path, or the whole path when it has none (`/`, `.`).
fn root_name(path: &Path) -> &OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}
