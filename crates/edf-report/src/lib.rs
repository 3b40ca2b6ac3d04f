//! Incompliance reports for EDF header validation.
//!
//! Incompliances from every validated file are grouped by source file and
//! rendered as one self-contained block, which is handed to a [`ReportSink`].
//! The aggregator performs no I/O of its own.

mod aggregate;
mod error;
mod options;
mod path;
mod render;
mod sink;

use chrono::{Local, NaiveDateTime};
use edf_model::Incompliance;
use tracing::info;

pub use aggregate::{FileGroup, IncomplianceReport, aggregate};
pub use error::{ReportError, Result};
pub use options::{ReportFormat, ReportOptions};
pub use path::normalize_separators;
pub use render::{render_json, render_text};
pub use sink::{FileSink, ReportSink, StdoutSink};

/// Groups incompliances and emits the rendered report to a sink.
#[derive(Debug)]
pub struct ReportAggregator<S> {
    sink: S,
    format: ReportFormat,
}

impl<S: ReportSink> ReportAggregator<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            format: ReportFormat::default(),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Render `all` with the current local time and append it to the sink.
    pub fn emit(&self, all: &[Incompliance]) -> Result<()> {
        self.emit_at(all, Local::now().naive_local())
    }

    /// Render `all` as started at `started_at` and append it to the sink.
    pub fn emit_at(&self, all: &[Incompliance], started_at: NaiveDateTime) -> Result<()> {
        let report = aggregate(all);
        let block = match self.format {
            ReportFormat::Text => render_text(&report, started_at),
            ReportFormat::Json => render_json(&report, started_at)?,
        };
        self.sink.append(&block)?;
        info!(
            files = report.files().len(),
            incompliances = report.total(),
            "report emitted"
        );
        Ok(())
    }
}
