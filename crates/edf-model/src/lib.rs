//! EDF header data model.
//!
//! Attribute schemas, the extracted header rows the validators consume, and
//! the incompliance records they produce.

pub mod attribute;
pub mod error;
pub mod header;
pub mod incompliance;
pub mod outcome;

pub use attribute::{ChannelAttribute, GlobalAttribute};
pub use error::{ModelError, Result};
pub use header::{ChannelAttributeTable, ChannelRow, ExtractedHeader, GlobalAttributeRow};
pub use incompliance::{Category, Incompliance, IncomplianceKind, Violation};
pub use outcome::{FileValidation, TableOutcome, ValidationOutcome, Verdict};
