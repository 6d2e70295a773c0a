//! Aggregating directory walker.

use std::ffi::OsStr;
use std::fs::DirEntry;
use std::path::Path;

use pardu_core::{ExclusionSet, ScanConfig};
use tracing::{debug, trace};

use crate::console::Console;
use crate::fs::{self, EntryMeta};
use crate::path_buf::PathBuffer;
use crate::totals::ScanTotals;

/// Per-root traversal context shared by every task of that root.
///
/// `walk` only accumulates counters; the tree builder in
/// [`crate::builder`] reuses the same context and entry filtering.
pub(crate) struct Walker<'a> {
    pub(crate) config: &'a ScanConfig,
    pub(crate) excludes: &'a ExclusionSet,
    pub(crate) totals: &'a ScanTotals,
    pub(crate) console: &'a Console,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(
        config: &'a ScanConfig,
        excludes: &'a ExclusionSet,
        totals: &'a ScanTotals,
        console: &'a Console,
    ) -> Self {
        Self {
            config,
            excludes,
            totals,
            console,
        }
    }

    /// Visit `dir` and everything below it, counting into the shared
    /// totals. Returns once every spawned sub-visit has finished.
    pub(crate) fn walk(&self, dir: &Path, depth: u32) {
        if depth > self.config.max_depth {
            debug!(path = %dir.display(), depth, "depth limit reached");
            return;
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                trace!(path = %dir.display(), error = %err, "cannot open directory");
                return;
            }
        };

        let mut buf = PathBuffer::new(dir);

        rayon::scope(|s| {
            for entry in entries {
                let name = entry.file_name();
                let path = buf.join(&name);

                let Some(meta) = self.admit(&entry, &name, path) else {
                    continue;
                };

                if meta.is_dir {
                    let child = path.to_path_buf();
                    s.spawn(move |_| self.walk(&child, depth + 1));
                    self.totals.record_dir();
                } else {
                    let size = self.measure(&meta);
                    self.totals.record_file(size);
                    if self.config.verbose {
                        self.console.file_line(size, path);
                    }
                }
            }
        });
    }

    /// Filter one entry: exclusion first, then symlinks, then metadata.
    /// `None` means the entry is skipped.
    pub(crate) fn admit(&self, entry: &DirEntry, name: &OsStr, path: &Path) -> Option<EntryMeta> {
        if self.excludes.is_excluded(name, path) || fs::entry_is_symlink(entry, path) {
            return None;
        }

        match fs::stat(path) {
            Ok(meta) => Some(meta),
            Err(err) => {
                trace!(path = %path.display(), error = %err, "skipping unreadable entry");
                None
            }
        }
    }

    pub(crate) fn measure(&self, meta: &EntryMeta) -> u64 {
        self.config.measure(meta.apparent_size, meta.allocated_size)
    }
}
