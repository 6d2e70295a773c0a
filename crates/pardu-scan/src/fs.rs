//! Thin filesystem primitives used by the visitors.

use std::fs::{self, DirEntry, Metadata};
use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Unit reported by `st_blocks`.
#[cfg(unix)]
const BLOCK_SIZE: u64 = 512;

/// The three facts the traversal needs about an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMeta {
    pub is_dir: bool,
    /// Logical length in bytes.
    pub apparent_size: u64,
    /// Bytes of storage actually allocated.
    pub allocated_size: u64,
}

impl From<&Metadata> for EntryMeta {
    fn from(metadata: &Metadata) -> Self {
        Self {
            is_dir: metadata.is_dir(),
            apparent_size: metadata.len(),
            allocated_size: get_allocated(metadata),
        }
    }
}

/// Fetch metadata, following symlinks.
pub fn stat(path: &Path) -> io::Result<EntryMeta> {
    fs::metadata(path).map(|m| EntryMeta::from(&m))
}

/// Check whether `path` itself is a symbolic link. Errors read as `false`.
fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Symlink check for a directory entry, using the type reported by the
/// directory listing when available.
pub fn entry_is_symlink(entry: &DirEntry, path: &Path) -> bool {
    match entry.file_type() {
        Ok(file_type) => file_type.is_symlink(),
        Err(_) => is_symlink(path),
    }
}

/// Open a directory. Entries that fail to read are dropped; `.` and `..`
/// are never produced.
pub fn read_dir(path: &Path) -> io::Result<impl Iterator<Item = DirEntry> + Send + use<>> {
    Ok(fs::read_dir(path)?.filter_map(Result::ok))
}

/// Get the allocated size from metadata.
#[cfg(unix)]
fn get_allocated(metadata: &Metadata) -> u64 {
    metadata.blocks() * BLOCK_SIZE
}

#[cfg(not(unix))]
fn get_allocated(metadata: &Metadata) -> u64 {
    metadata.len()
}
