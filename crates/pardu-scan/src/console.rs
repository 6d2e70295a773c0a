//! Serialized access to the output and error streams.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::render::format_size;

struct Streams {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

/// Output sink shared by every task of a scan.
///
/// All writes, to either stream, go through one lock so lines from
/// concurrent tasks never interleave mid-line.
pub struct Console {
    streams: Mutex<Streams>,
}

impl Console {
    /// Create a console over arbitrary writers.
    pub fn new<O, E>(out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            streams: Mutex::new(Streams {
                out: Box::new(out),
                err: Box::new(err),
            }),
        }
    }

    /// Console over the process's stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }

    /// Console that discards everything.
    pub fn null() -> Self {
        Self::new(io::sink(), io::sink())
    }

    /// Print one line to the output stream.
    pub fn print(&self, line: fmt::Arguments<'_>) {
        let mut streams = self.lock();
        report(writeln!(streams.out, "{line}"));
    }

    /// Print one line to the error stream.
    pub fn error(&self, line: fmt::Arguments<'_>) {
        let mut streams = self.lock();
        report(writeln!(streams.err, "{line}"));
    }

    /// Verbose per-file line: size column, then the full path.
    pub fn file_line(&self, size: u64, path: &Path) {
        self.print(format_args!("{:<8} {}", format_size(size), path.display()));
    }

    /// Run `write` against the output stream while holding the lock.
    pub fn with_output<F>(&self, write: F)
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let mut streams = self.lock();
        report(write(&mut *streams.out));
    }

    /// Flush both streams.
    pub fn flush(&self) {
        let mut streams = self.lock();
        report(streams.out.flush());
        report(streams.err.flush());
    }

    fn lock(&self) -> MutexGuard<'_, Streams> {
        self.streams.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

fn report(result: io::Result<()>) {
    if let Err(err) = result {
        tracing::debug!(error = %err, "console write failed");
    }
}

/// In-memory writer that can be cloned and read back, for capturing
/// console output.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
