//! Extracted header rows.
//!
//! Plain containers of named string slots as produced by the header
//! extractor. Values are kept verbatim: no trimming, no normalization.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attribute::{ChannelAttribute, GlobalAttribute};
use crate::error::Result;

/// The single file-level attribute row of an EDF header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalAttributeRow {
    pub file_name: Option<String>,
    pub version: Option<String>,
    pub local_patient_id: Option<String>,
    pub local_recording_id: Option<String>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub header_bytes: Option<String>,
    pub reserved: Option<String>,
    pub data_record_count: Option<String>,
    pub record_duration: Option<String>,
    pub signal_count: Option<String>,
}

impl GlobalAttributeRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of an attribute slot, `None` when absent.
    pub fn get(&self, attribute: GlobalAttribute) -> Option<&str> {
        self.slot(attribute).as_deref()
    }

    /// Set an attribute slot.
    pub fn set(&mut self, attribute: GlobalAttribute, value: impl Into<String>) {
        *self.slot_mut(attribute) = Some(value.into());
    }

    /// Builder variant of [`GlobalAttributeRow::set`].
    #[must_use]
    pub fn with(mut self, attribute: GlobalAttribute, value: impl Into<String>) -> Self {
        self.set(attribute, value);
        self
    }

    /// Builder that leaves an attribute slot absent.
    #[must_use]
    pub fn without(mut self, attribute: GlobalAttribute) -> Self {
        *self.slot_mut(attribute) = None;
        self
    }

    fn slot(&self, attribute: GlobalAttribute) -> &Option<String> {
        match attribute {
            GlobalAttribute::FileName => &self.file_name,
            GlobalAttribute::Version => &self.version,
            GlobalAttribute::LocalPatientId => &self.local_patient_id,
            GlobalAttribute::LocalRecordingId => &self.local_recording_id,
            GlobalAttribute::StartDate => &self.start_date,
            GlobalAttribute::StartTime => &self.start_time,
            GlobalAttribute::HeaderBytes => &self.header_bytes,
            GlobalAttribute::Reserved => &self.reserved,
            GlobalAttribute::DataRecordCount => &self.data_record_count,
            GlobalAttribute::RecordDuration => &self.record_duration,
            GlobalAttribute::SignalCount => &self.signal_count,
        }
    }

    fn slot_mut(&mut self, attribute: GlobalAttribute) -> &mut Option<String> {
        match attribute {
            GlobalAttribute::FileName => &mut self.file_name,
            GlobalAttribute::Version => &mut self.version,
            GlobalAttribute::LocalPatientId => &mut self.local_patient_id,
            GlobalAttribute::LocalRecordingId => &mut self.local_recording_id,
            GlobalAttribute::StartDate => &mut self.start_date,
            GlobalAttribute::StartTime => &mut self.start_time,
            GlobalAttribute::HeaderBytes => &mut self.header_bytes,
            GlobalAttribute::Reserved => &mut self.reserved,
            GlobalAttribute::DataRecordCount => &mut self.data_record_count,
            GlobalAttribute::RecordDuration => &mut self.record_duration,
            GlobalAttribute::SignalCount => &mut self.signal_count,
        }
    }
}

/// One signal channel's attribute row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelRow {
    pub label: Option<String>,
    pub transducer_type: Option<String>,
    pub physical_dimension: Option<String>,
    pub physical_minimum: Option<String>,
    pub physical_maximum: Option<String>,
    pub digital_minimum: Option<String>,
    pub digital_maximum: Option<String>,
    pub prefiltering: Option<String>,
    pub samples_per_record: Option<String>,
    pub reserved: Option<String>,
}

impl ChannelRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attribute: ChannelAttribute) -> Option<&str> {
        self.slot(attribute).as_deref()
    }

    pub fn set(&mut self, attribute: ChannelAttribute, value: impl Into<String>) {
        *self.slot_mut(attribute) = Some(value.into());
    }

    #[must_use]
    pub fn with(mut self, attribute: ChannelAttribute, value: impl Into<String>) -> Self {
        self.set(attribute, value);
        self
    }

    #[must_use]
    pub fn without(mut self, attribute: ChannelAttribute) -> Self {
        *self.slot_mut(attribute) = None;
        self
    }

    fn slot(&self, attribute: ChannelAttribute) -> &Option<String> {
        match attribute {
            ChannelAttribute::Label => &self.label,
            ChannelAttribute::TransducerType => &self.transducer_type,
            ChannelAttribute::PhysicalDimension => &self.physical_dimension,
            ChannelAttribute::PhysicalMinimum => &self.physical_minimum,
            ChannelAttribute::PhysicalMaximum => &self.physical_maximum,
            ChannelAttribute::DigitalMinimum => &self.digital_minimum,
            ChannelAttribute::DigitalMaximum => &self.digital_maximum,
            ChannelAttribute::Prefiltering => &self.prefiltering,
            ChannelAttribute::SamplesPerRecord => &self.samples_per_record,
            ChannelAttribute::Reserved => &self.reserved,
        }
    }

    fn slot_mut(&mut self, attribute: ChannelAttribute) -> &mut Option<String> {
        match attribute {
            ChannelAttribute::Label => &mut self.label,
            ChannelAttribute::TransducerType => &mut self.transducer_type,
            ChannelAttribute::PhysicalDimension => &mut self.physical_dimension,
            ChannelAttribute::PhysicalMinimum => &mut self.physical_minimum,
            ChannelAttribute::PhysicalMaximum => &mut self.physical_maximum,
            ChannelAttribute::DigitalMinimum => &mut self.digital_minimum,
            ChannelAttribute::DigitalMaximum => &mut self.digital_maximum,
            ChannelAttribute::Prefiltering => &mut self.prefiltering,
            ChannelAttribute::SamplesPerRecord => &mut self.samples_per_record,
            ChannelAttribute::Reserved => &mut self.reserved,
        }
    }
}

/// Channel rows in the order the header declares them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelAttributeTable {
    rows: Vec<ChannelRow>,
}

impl ChannelAttributeTable {
    pub fn new(rows: Vec<ChannelRow>) -> Self {
        Self { rows }
    }

    pub fn push_row(&mut self, row: ChannelRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ChannelRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<ChannelRow> for ChannelAttributeTable {
    fn from_iter<I: IntoIterator<Item = ChannelRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Everything the extractor produced for one input file.
///
/// Either table may be missing when the extractor could not read it; the
/// validators treat that as "not available" rather than as an empty table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedHeader {
    /// Identifier of the source file (usually its path).
    pub source: String,
    #[serde(default)]
    pub global: Option<GlobalAttributeRow>,
    #[serde(default)]
    pub channels: Option<ChannelAttributeTable>,
}

impl ExtractedHeader {
    pub fn new(
        source: impl Into<String>,
        global: GlobalAttributeRow,
        channels: ChannelAttributeTable,
    ) -> Self {
        Self {
            source: source.into(),
            global: Some(global),
            channels: Some(channels),
        }
    }

    /// Parse one header document, or an array of them, from JSON.
    ///
    /// The shape is chosen from the first token so that serde reports the
    /// offending field and position.
    pub fn parse_json(text: &str) -> Result<Vec<Self>> {
        if text.trim_start().starts_with('[') {
            Ok(serde_json::from_str(text)?)
        } else {
            Ok(vec![serde_json::from_str(text)?])
        }
    }

    /// Read and parse a JSON header document from disk.
    pub fn load_json(path: &Path) -> Result<Vec<Self>> {
        let text = fs::read_to_string(path)?;
        Self::parse_json(&text)
    }
}
