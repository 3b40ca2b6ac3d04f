//! Report configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::path::normalize_separators;
use crate::sink::{FileSink, ReportSink, StdoutSink};

/// Rendering used for report blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Where and how the report is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Report file; reports are appended to it.
    pub path: Option<PathBuf>,
    pub format: ReportFormat,
    /// Write to stdout instead of a file.
    pub stdout: bool,
}

impl ReportOptions {
    /// Append reports to `path`.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Write reports to stdout.
    pub fn to_stdout() -> Self {
        Self {
            stdout: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Report path with its separators normalized.
    pub fn normalized_path(&self) -> Option<PathBuf> {
        self.path
            .as_ref()
            .map(|path| PathBuf::from(normalize_separators(&path.to_string_lossy())))
    }

    /// Build the configured sink.
    ///
    /// `None` when neither stdout nor a path is configured.
    pub fn sink(&self) -> Option<Box<dyn ReportSink>> {
        if self.stdout {
            return Some(Box::new(StdoutSink));
        }
        self.normalized_path()
            .map(|path| Box::new(FileSink::new(path)) as Box<dyn ReportSink>)
    }
}
