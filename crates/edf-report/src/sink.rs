//! Report destinations.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{ReportError, Result};

/// Receives rendered report blocks.
pub trait ReportSink: Send + Sync {
    /// Append one self-contained block.
    fn append(&self, block: &str) -> Result<()>;
}

/// Appends report blocks to a file.
///
/// Every append opens, writes and closes the file while holding the sink's
/// lock, so concurrent appends never interleave.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_block(&self, block: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(block.as_bytes())?;
        file.flush()
    }
}

impl ReportSink for FileSink {
    fn append(&self, block: &str) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| ReportError::Poisoned)?;
        self.write_block(block).map_err(|source| ReportError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = block.len(), "report block appended");
        Ok(())
    }
}

/// Writes report blocks to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn append(&self, block: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(block.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(ReportError::Stdout)
    }
}

impl<T: ReportSink + ?Sized> ReportSink for &T {
    fn append(&self, block: &str) -> Result<()> {
        (**self).append(block)
    }
}

impl<T: ReportSink + ?Sized> ReportSink for Box<T> {
    fn append(&self, block: &str) -> Result<()> {
        (**self).append(block)
    }
}
