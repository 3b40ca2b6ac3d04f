use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{error, info, info_span};

use edf_cli::inputs::{InputFailure, load_headers};
use edf_model::{ChannelAttribute, FileValidation, GlobalAttribute, Incompliance, Verdict};
use edf_report::{ReportAggregator, ReportFormat, ReportOptions};
use edf_validate::{HeaderValidator, TracingObserver};

use crate::cli::{ReportFormatArg, ValidateArgs};
use crate::summary::apply_table_style;

/// Outcome of one `validate` invocation.
#[derive(Debug)]
pub struct ValidateResult {
    pub files: Vec<FileValidation>,
    pub failures: Vec<InputFailure>,
    /// Report file, when the report went to a file.
    pub report: Option<PathBuf>,
    /// Whether the report could not be written.
    pub report_failed: bool,
}

impl ValidateResult {
    /// True when every input loaded, every file is compliant and the report
    /// was written.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
            && !self.report_failed
            && self
                .files
                .iter()
                .all(|file| file.verdict() == Verdict::Compliant)
    }
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateResult> {
    let span = info_span!("validate", inputs = args.inputs.len());
    let _guard = span.enter();

    let loaded = load_headers(&args.inputs);
    for failure in &loaded.failures {
        eprintln!(
            "error: skipped {}: {}",
            failure.path.display(),
            failure.error
        );
    }
    info!(
        headers = loaded.headers.len(),
        skipped = loaded.failures.len(),
        "header documents loaded"
    );

    let observer = TracingObserver::new().with_values(args.log_data);
    let files = HeaderValidator::with_observer(observer).validate_all(&loaded.headers);

    let options = report_options(args);
    let sink = options
        .sink()
        .context("no report destination configured")?;
    let aggregator = ReportAggregator::new(sink).with_format(options.format);

    let all: Vec<Incompliance> = files
        .iter()
        .flat_map(FileValidation::incompliances)
        .cloned()
        .collect();
    let report_failed = match aggregator.emit(&all) {
        Ok(()) => false,
        Err(error) => {
            error!(%error, "report not written");
            eprintln!("error: {error}");
            true
        }
    };

    Ok(ValidateResult {
        files,
        failures: loaded.failures,
        report: if options.stdout {
            None
        } else {
            options.normalized_path()
        },
        report_failed,
    })
}

fn report_options(args: &ValidateArgs) -> ReportOptions {
    let format = match args.format {
        ReportFormatArg::Text => ReportFormat::Text,
        ReportFormatArg::Json => ReportFormat::Json,
    };
    let options = if args.stdout {
        ReportOptions::to_stdout()
    } else {
        ReportOptions::to_file(&args.report)
    };
    options.with_format(format)
}

pub fn run_schema() {
    let mut global = Table::new();
    global.set_header(vec!["Column", "Global attribute", "Bytes"]);
    apply_table_style(&mut global);
    for attribute in GlobalAttribute::all() {
        let width = attribute
            .byte_width()
            .map_or_else(|| "-".to_string(), |width| width.to_string());
        global.add_row(vec![
            (attribute.column() + 1).to_string(),
            attribute.label().to_string(),
            width,
        ]);
    }
    println!("{global}");

    let mut channels = Table::new();
    channels.set_header(vec!["Column", "Channel attribute", "Bytes per channel"]);
    apply_table_style(&mut channels);
    for attribute in ChannelAttribute::all() {
        channels.add_row(vec![
            (attribute.column() + 1).to_string(),
            attribute.label().to_string(),
            attribute.byte_width().to_string(),
        ]);
    }
    println!("{channels}");
}
