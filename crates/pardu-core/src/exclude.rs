//! Glob-based exclusion of directory entries.

use std::ffi::OsStr;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::ScanError;

/// Compiled set of exclusion patterns.
///
/// An entry is excluded when any pattern matches either its bare name or
/// its full path. The set is immutable once built and shared by every task
/// of a scan.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    set: GlobSet,
}

impl ExclusionSet {
    /// Compile the given patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).map_err(|source| ScanError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            builder.add(glob);
            kept.push(pattern.to_string());
        }

        let set = builder.build().map_err(|source| ScanError::InvalidPattern {
            pattern: kept.join(", "),
            source,
        })?;

        Ok(Self { set })
    }

    /// A set that never excludes anything.
    pub fn empty() -> Self {
        Self {
            set: GlobSet::empty(),
        }
    }

    /// Check whether an entry should be skipped.
    pub fn is_excluded(&self, name: &OsStr, path: &Path) -> bool {
        if self.set.is_empty() {
            return false;
        }
        self.set.is_match(name) || self.set.is_match(path)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::empty()
    }
}
