//! EDF header compliance validation.
//!
//! This crate checks the textual header fields of EDF recordings:
//!
//! - **Global attributes**: version, identifiers, start date/time, record geometry
//! - **Channel attributes**: labels, calibration bounds, filtering, sample counts
//! - **Consistency**: physical and digital bound pairs per channel
//! - **Uniqueness**: case-insensitive duplicate channel labels
//!
//! Validators are pure functions over their input: malformed data is recorded
//! as incompliances, never returned as an error.
//!
//! # Example
//!
//! ```ignore
//! use edf_validate::{HeaderValidator, validate_headers};
//!
//! let results = validate_headers(&headers);
//! for file in &results {
//!     println!("{}: {}", file.source, file.verdict().label());
//! }
//! ```

mod channel;
mod global;
pub mod observer;
pub mod rules;

use edf_model::{
    ChannelAttributeTable, ExtractedHeader, FileValidation, GlobalAttributeRow, TableOutcome,
    ValidationOutcome, Verdict,
};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, info, info_span, warn};

pub use channel::{ChannelAttributeValidator, duplicate_label_groups};
pub use global::GlobalAttributeValidator;
pub use observer::{AttributeCheck, CheckStage, TracingObserver, ValidationObserver};

/// Validate a file's global attribute row with the default observer.
pub fn validate_global_attributes(row: &GlobalAttributeRow, source: &str) -> ValidationOutcome {
    GlobalAttributeValidator::new().validate(row, source)
}

/// Validate a file's channel attribute table with the default observer.
pub fn validate_channel_attributes(
    table: &ChannelAttributeTable,
    source: &str,
) -> ValidationOutcome {
    ChannelAttributeValidator::new().validate(table, source)
}

/// Validate one extracted header with the default observer.
pub fn validate_header(header: &ExtractedHeader) -> FileValidation {
    HeaderValidator::new().validate(header)
}

/// Validate many extracted headers in parallel, keeping input order.
pub fn validate_headers(headers: &[ExtractedHeader]) -> Vec<FileValidation> {
    HeaderValidator::new().validate_all(headers)
}

/// Runs both validators over whole files.
///
/// Validators share no mutable state, so files are validated in parallel and
/// the two tables of one file are validated concurrently.
#[derive(Debug, Clone, Default)]
pub struct HeaderValidator<O = TracingObserver> {
    global: GlobalAttributeValidator<O>,
    channels: ChannelAttributeValidator<O>,
}

impl HeaderValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: ValidationObserver + Clone> HeaderValidator<O> {
    pub fn with_observer(observer: O) -> Self {
        Self {
            global: GlobalAttributeValidator::with_observer(observer.clone()),
            channels: ChannelAttributeValidator::with_observer(observer),
        }
    }
}

impl<O: ValidationObserver> HeaderValidator<O> {
    pub fn validate(&self, header: &ExtractedHeader) -> FileValidation {
        let span = info_span!("file", source = %header.source);

        // Either half may be stolen by another worker, so each enters the span itself.
        let source = header.source.as_str();
        let (global, channels) = rayon::join(
            || {
                span.in_scope(|| match &header.global {
                    Some(row) => TableOutcome::Validated(self.global.validate(row, source)),
                    None => TableOutcome::NotAvailable,
                })
            },
            || {
                span.in_scope(|| match &header.channels {
                    Some(table) => TableOutcome::Validated(self.channels.validate(table, source)),
                    None => TableOutcome::NotAvailable,
                })
            },
        );

        let _guard = span.enter();

        if !global.is_available() {
            warn!(source, "global attribute row not available");
        }
        if !channels.is_available() {
            warn!(source, "channel attribute table not available");
        }

        let validation = FileValidation {
            source: header.source.clone(),
            global,
            channels,
        };
        debug!(
            global = ?validation.global.count(),
            channels = ?validation.channels.count(),
            "header validated"
        );
        validation
    }

    pub fn validate_all(&self, headers: &[ExtractedHeader]) -> Vec<FileValidation> {
        let results: Vec<FileValidation> = headers
            .par_iter()
            .map(|header| self.validate(header))
            .collect();

        let non_compliant = results
            .iter()
            .filter(|file| file.verdict() == Verdict::NonCompliant)
            .count();
        info!(
            files = results.len(),
            non_compliant, "header validation complete"
        );
        results
    }
}
