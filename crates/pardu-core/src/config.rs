//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default recursion ceiling. Directories nested deeper than this are
/// treated as empty.
pub const MAX_DEPTH: u32 = 64;

/// Configuration for a scan over one or more root paths.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root paths to scan.
    #[builder(default = "default_paths()")]
    #[serde(default = "default_paths")]
    pub paths: Vec<PathBuf>,

    /// Glob patterns matched against entry names and full paths.
    #[builder(default)]
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Use apparent size instead of allocated blocks.
    #[builder(default = "false")]
    #[serde(default)]
    pub apparent_size: bool,

    /// Print every file as it is counted, and sizes in tree mode.
    #[builder(default = "false")]
    #[serde(default)]
    pub verbose: bool,

    /// Render the visited hierarchy as a tree.
    #[builder(default = "false")]
    #[serde(default)]
    pub tree: bool,

    /// Number of worker threads (0 = rayon's global pool).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,

    /// Maximum recursion depth below each root.
    #[builder(default = "MAX_DEPTH")]
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

fn default_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}

fn default_max_depth() -> u32 {
    MAX_DEPTH
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref paths) = self.paths {
            if paths.is_empty() {
                return Err("At least one path is required".to_string());
            }
            if paths.iter().any(|p| p.as_os_str().is_empty()) {
                return Err("Paths cannot be empty".to_string());
            }
        }
        if self.max_depth == Some(0) {
            return Err("Maximum depth must be at least 1".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning the given paths.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Pick the configured size metric.
    pub fn measure(&self, apparent: u64, allocated: u64) -> u64 {
        if self.apparent_size { apparent } else { allocated }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            exclude_patterns: Vec::new(),
            apparent_size: false,
            verbose: false,
            tree: false,
            threads: 0,
            max_depth: MAX_DEPTH,
        }
    }
}
