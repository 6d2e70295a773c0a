//! Error types for scanning operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up or running a scan.
///
/// Failures on individual entries during recursion are never surfaced as
/// errors; only roots and configuration produce these. The path variants
/// describe a root whose metadata could not be read.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("cannot stat '{}': permission denied", path.display())]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("cannot stat '{}': no such file or directory", path.display())]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("cannot stat '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An exclusion pattern failed to compile.
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The worker pool could not be started.
    #[error("Failed to start worker pool: {message}")]
    ThreadPool { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}
