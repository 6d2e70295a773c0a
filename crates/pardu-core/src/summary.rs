//! Run-level summary counters.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Totals for a scan of one root, or of a whole run after merging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Sum of the chosen size metric over counted files.
    pub total_size: u64,
    /// Number of counted files.
    pub file_count: u64,
    /// Number of counted directories.
    pub dir_count: u64,
}

impl ScanSummary {
    /// Create new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another summary into this one.
    pub fn merge(&mut self, other: &ScanSummary) {
        self.total_size += other.total_size;
        self.file_count += other.file_count;
        self.dir_count += other.dir_count;
    }
}

impl Add for ScanSummary {
    type Output = ScanSummary;

    fn add(mut self, rhs: ScanSummary) -> ScanSummary {
        self.merge(&rhs);
        self
    }
}

impl AddAssign for ScanSummary {
    fn add_assign(&mut self, rhs: ScanSummary) {
        self.merge(&rhs);
    }
}

impl Sum for ScanSummary {
    fn sum<I: Iterator<Item = ScanSummary>>(iter: I) -> Self {
        iter.fold(ScanSummary::new(), Add::add)
    }
}
