//! Report rendering.
//!
//! A rendered report is one self-contained block: the run header followed by
//! one section per file. Text reports use CRLF line endings.

use chrono::NaiveDateTime;
use edf_model::Incompliance;
use serde::Serialize;

use crate::aggregate::{FileGroup, IncomplianceReport};
use crate::error::Result;

const LINE_END: &str = "\r\n";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn run_separator() -> String {
    "=".repeat(95)
}

fn file_separator() -> String {
    format!("  {}", "-".repeat(93))
}

/// Render `report` as the plain-text block appended to report logs.
pub fn render_text(report: &IncomplianceReport<'_>, started_at: NaiveDateTime) -> String {
    let mut out = String::new();
    push_line(&mut out, &run_separator());
    push_line(
        &mut out,
        &format!(
            "  >>> Validation started at: {}",
            started_at.format(TIMESTAMP_FORMAT)
        ),
    );
    push_line(
        &mut out,
        &format!("  >>> Number of incompliances: {}", report.total()),
    );
    for group in report.files() {
        render_group(&mut out, group);
    }
    out
}

fn render_group(out: &mut String, group: &FileGroup<'_>) {
    push_line(out, &file_separator());
    push_line(out, &format!("  EDF file: {}", group.source));
    push_line(out, "  Incompliances:");
    for (number, incompliance) in group.incompliances.iter().enumerate() {
        push_line(
            out,
            &format!(
                "  #{} {} [Channel: {}, Attribute: {}]",
                number + 1,
                incompliance.description(),
                incompliance.row_index() + 1,
                incompliance.column_index() + 1
            ),
        );
    }
    out.push_str(LINE_END);
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str(LINE_END);
}

#[derive(Serialize)]
struct JsonReport<'a> {
    started_at: String,
    total: usize,
    files: Vec<JsonFile<'a>>,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    source: &'a str,
    incompliances: Vec<JsonItem<'a>>,
}

#[derive(Serialize)]
struct JsonItem<'a> {
    description: String,
    #[serde(flatten)]
    incompliance: &'a Incompliance,
}

/// Render `report` as a pretty-printed JSON document.
pub fn render_json(report: &IncomplianceReport<'_>, started_at: NaiveDateTime) -> Result<String> {
    let document = JsonReport {
        started_at: started_at.format(TIMESTAMP_FORMAT).to_string(),
        total: report.total(),
        files: report
            .files()
            .iter()
            .map(|group| JsonFile {
                source: group.source,
                incompliances: group
                    .incompliances
                    .iter()
                    .map(|incompliance| JsonItem {
                        description: incompliance.description(),
                        incompliance,
                    })
                    .collect(),
            })
            .collect(),
    };
    let mut json = serde_json::to_string_pretty(&document)?;
    json.push('\n');
    Ok(json)
}
