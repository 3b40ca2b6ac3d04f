//! Attribute schemas for the EDF header.
//!
//! The position of each attribute within its schema is the contract between
//! the header extractor and the validators: incompliance column indices are
//! only meaningful under this fixed order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// File-level header attributes, in header order.
///
/// Index 0 is the file name slot supplied by the extractor. It is carried
/// along with the row but never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalAttribute {
    FileName,
    Version,
    LocalPatientId,
    LocalRecordingId,
    StartDate,
    StartTime,
    HeaderBytes,
    Reserved,
    DataRecordCount,
    RecordDuration,
    SignalCount,
}

impl GlobalAttribute {
    /// Number of slots in a global attribute row (file name included).
    pub const COUNT: usize = 11;

    /// All attributes in schema order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::FileName,
            Self::Version,
            Self::LocalPatientId,
            Self::LocalRecordingId,
            Self::StartDate,
            Self::StartTime,
            Self::HeaderBytes,
            Self::Reserved,
            Self::DataRecordCount,
            Self::RecordDuration,
            Self::SignalCount,
        ]
    }

    /// 0-based position within the row schema.
    pub const fn column(self) -> usize {
        self as usize
    }

    /// Display name as written in the EDF specification.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FileName => "file name",
            Self::Version => "version",
            Self::LocalPatientId => "local patient ID",
            Self::LocalRecordingId => "local recording ID",
            Self::StartDate => "start date of recording",
            Self::StartTime => "start time of recording",
            Self::HeaderBytes => "number of bytes in header",
            Self::Reserved => "reserved",
            Self::DataRecordCount => "number of data records",
            Self::RecordDuration => "duration of data record",
            Self::SignalCount => "number of signals",
        }
    }

    /// Width of the field in the fixed 256-byte header, or `None` for the
    /// file name slot which is not part of the header.
    pub const fn byte_width(self) -> Option<usize> {
        match self {
            Self::FileName => None,
            Self::Version => Some(8),
            Self::LocalPatientId => Some(80),
            Self::LocalRecordingId => Some(80),
            Self::StartDate => Some(8),
            Self::StartTime => Some(8),
            Self::HeaderBytes => Some(8),
            Self::Reserved => Some(44),
            Self::DataRecordCount => Some(8),
            Self::RecordDuration => Some(8),
            Self::SignalCount => Some(4),
        }
    }
}

impl fmt::Display for GlobalAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-channel header attributes, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelAttribute {
    Label,
    TransducerType,
    PhysicalDimension,
    PhysicalMinimum,
    PhysicalMaximum,
    DigitalMinimum,
    DigitalMaximum,
    Prefiltering,
    SamplesPerRecord,
    Reserved,
}

impl ChannelAttribute {
    /// Number of slots in a channel row.
    pub const COUNT: usize = 10;

    /// All attributes in schema order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Label,
            Self::TransducerType,
            Self::PhysicalDimension,
            Self::PhysicalMinimum,
            Self::PhysicalMaximum,
            Self::DigitalMinimum,
            Self::DigitalMaximum,
            Self::Prefiltering,
            Self::SamplesPerRecord,
            Self::Reserved,
        ]
    }

    /// 0-based position within the row schema.
    pub const fn column(self) -> usize {
        self as usize
    }

    /// Display name as written in the EDF specification.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::TransducerType => "transducer type",
            Self::PhysicalDimension => "physical dimension",
            Self::PhysicalMinimum => "physical minimum",
            Self::PhysicalMaximum => "physical maximum",
            Self::DigitalMinimum => "digital minimum",
            Self::DigitalMaximum => "digital maximum",
            Self::Prefiltering => "prefiltering",
            Self::SamplesPerRecord => "number of samples in each data record",
            Self::Reserved => "reserved",
        }
    }

    /// Width of the field per signal in the header.
    pub const fn byte_width(self) -> usize {
        match self {
            Self::Label => 16,
            Self::TransducerType => 80,
            Self::PhysicalDimension => 8,
            Self::PhysicalMinimum => 8,
            Self::PhysicalMaximum => 8,
            Self::DigitalMinimum => 8,
            Self::DigitalMaximum => 8,
            Self::Prefiltering => 80,
            Self::SamplesPerRecord => 8,
            Self::Reserved => 32,
        }
    }
}

impl fmt::Display for ChannelAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_schema_order() {
        for (idx, attribute) in GlobalAttribute::all().iter().enumerate() {
            assert_eq!(attribute.column(), idx);
        }
        for (idx, attribute) in ChannelAttribute::all().iter().enumerate() {
            assert_eq!(attribute.column(), idx);
        }
        assert_eq!(GlobalAttribute::all().len(), GlobalAttribute::COUNT);
        assert_eq!(ChannelAttribute::all().len(), ChannelAttribute::COUNT);
    }

    #[test]
    fn global_header_is_256_bytes() {
        let total: usize = GlobalAttribute::all()
            .iter()
            .filter_map(|attribute| attribute.byte_width())
            .sum();
        assert_eq!(total, 256);
    }

    #[test]
    fn channel_fields_are_256_bytes_per_signal() {
        let total: usize = ChannelAttribute::all()
            .iter()
            .map(|attribute| attribute.byte_width())
            .sum();
        assert_eq!(total, 256);
    }
}
