//! Shared counters for one root's task tree.

use std::sync::atomic::{AtomicU64, Ordering};

use pardu_core::ScanSummary;

/// Counters updated concurrently by every task scanning one root.
#[derive(Debug, Default)]
pub struct ScanTotals {
    size: AtomicU64,
    files: AtomicU64,
    dirs: AtomicU64,
}

impl ScanTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one file of `size` bytes.
    pub fn record_file(&self, size: u64) {
        self.size.fetch_add(size, Ordering::Relaxed);
        self.files.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one directory.
    pub fn record_dir(&self) {
        self.dirs.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the counters. Only settled once every task has joined.
    pub fn snapshot(&self) -> ScanSummary {
        ScanSummary {
            total_size: self.size.load(Ordering::Relaxed),
            file_count: self.files.load(Ordering::Relaxed),
            dir_count: self.dirs.load(Ordering::Relaxed),
        }
    }
}
