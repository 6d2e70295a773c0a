//! Reusable scratch buffer for building child paths.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Growth granularity for the buffer.
const PAGE_SIZE: usize = 4096;

/// Headroom reserved past the parent path on creation.
const NAME_HEADROOM: usize = 512;

/// Builds `parent/child` paths in one buffer.
///
/// Each directory visit owns its own `PathBuffer`, so concurrently running
/// visits never share one. Joining a new name replaces the previous child
/// component in place, and the allocation only grows, in page-sized steps.
/// The memory is released when the visit drops the buffer.
#[derive(Debug)]
pub struct PathBuffer {
    buf: PathBuf,
    has_child: bool,
}

impl PathBuffer {
    /// Start a buffer rooted at `parent`.
    pub fn new(parent: &Path) -> Self {
        let mut buffer = Self {
            buf: PathBuf::new(),
            has_child: false,
        };
        buffer.reserve(parent.as_os_str().len() + NAME_HEADROOM);
        // Normalized so that popping a child restores the same text.
        buffer.buf.extend(parent.components());
        buffer
    }

    /// Make sure the buffer can hold at least `needed` bytes.
    pub fn reserve(&mut self, needed: usize) {
        if needed > self.buf.capacity() {
            let target = page_align(needed);
            let len = self.buf.as_os_str().len();
            self.buf.reserve_exact(target - len);
        }
    }

    /// Replace the child component with `name` and return the full path.
    pub fn join(&mut self, name: &OsStr) -> &Path {
        if self.has_child {
            self.buf.pop();
        }
        let needed = self.buf.as_os_str().len() + 1 + name.len();
        self.reserve(needed);
        self.buf.push(name);
        self.has_child = true;
        &self.buf
    }

    /// Current allocation in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}

fn page_align(n: usize) -> usize {
    n.div_ceil(PAGE_SIZE) * PAGE_SIZE
}
