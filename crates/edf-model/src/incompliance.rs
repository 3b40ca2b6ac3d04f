//! Incompliance records.
//!
//! An [`Incompliance`] is created the moment a header rule fails and is never
//! mutated afterwards. The [`Violation`] enum carries only the data its
//! message needs; the message catalog is closed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::{ChannelAttribute, GlobalAttribute};

/// Which validator produced an incompliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    GlobalAttribute,
    ChannelAttribute,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::GlobalAttribute => "Global attribute",
            Self::ChannelAttribute => "Channel attribute",
        }
    }
}

/// Taxonomy of rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomplianceKind {
    /// Required attribute missing or empty.
    Presence,
    /// Value contains a character outside 7-bit ASCII.
    Charset,
    /// Value has the wrong shape or does not parse.
    Format,
    /// Value parses but lies outside the attribute's legal domain.
    Range,
    /// Two individually valid attributes contradict each other.
    Consistency,
    /// Uniqueness across channels is violated.
    Duplicate,
}

impl IncomplianceKind {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Presence,
            Self::Charset,
            Self::Format,
            Self::Range,
            Self::Consistency,
            Self::Duplicate,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Presence => "Presence",
            Self::Charset => "Charset",
            Self::Format => "Format",
            Self::Range => "Range",
            Self::Consistency => "Consistency",
            Self::Duplicate => "Duplicate",
        }
    }
}

/// A failed header rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    // Presence
    /// Required attribute is absent or empty.
    MissingValue { attribute: String },

    // Charset
    /// Value contains non-ASCII characters.
    NonAscii { attribute: String },

    // Format
    /// Value does not parse as an integer.
    NotInteger { attribute: String },
    /// Value does not parse as a number.
    NotNumeric { attribute: String },
    /// Start date is not three period-separated integers.
    DateFormat,
    /// Start time is not three period-separated integers.
    TimeFormat,

    // Range
    /// Version is an integer other than 0.
    VersionNotZero,
    /// Start date component out of bounds.
    DateOutOfRange,
    /// Start time component out of bounds.
    TimeOutOfRange,
    /// Count must be strictly positive.
    NotPositive { attribute: String },
    /// Data record count is neither positive nor -1.
    DataRecordCountOutOfRange,
    /// Record duration is negative.
    NegativeDuration,
    /// Digital value outside the 16-bit signed range.
    DigitalOutOfRange { attribute: String },

    // Consistency
    PhysicalBoundsEqual,
    PhysicalBoundsInverted,
    DigitalBoundsEqual,
    DigitalBoundsInverted,

    // Duplicate
    /// Channels sharing a label, as 1-based row numbers.
    DuplicateLabel { rows: Vec<usize> },
}

impl Violation {
    pub fn kind(&self) -> IncomplianceKind {
        match self {
            Violation::MissingValue { .. } => IncomplianceKind::Presence,
            Violation::NonAscii { .. } => IncomplianceKind::Charset,
            Violation::NotInteger { .. }
            | Violation::NotNumeric { .. }
            | Violation::DateFormat
            | Violation::TimeFormat => IncomplianceKind::Format,
            Violation::VersionNotZero
            | Violation::DateOutOfRange
            | Violation::TimeOutOfRange
            | Violation::NotPositive { .. }
            | Violation::DataRecordCountOutOfRange
            | Violation::NegativeDuration
            | Violation::DigitalOutOfRange { .. } => IncomplianceKind::Range,
            Violation::PhysicalBoundsEqual
            | Violation::PhysicalBoundsInverted
            | Violation::DigitalBoundsEqual
            | Violation::DigitalBoundsInverted => IncomplianceKind::Consistency,
            Violation::DuplicateLabel { .. } => IncomplianceKind::Duplicate,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Violation::MissingValue { attribute } => {
                format!("{attribute} is required and cannot be empty")
            }
            Violation::NonAscii { attribute } => {
                format!("{attribute} contains non-ASCII characters")
            }
            Violation::NotInteger { attribute } => format!("{attribute} must be an integer"),
            Violation::NotNumeric { attribute } => format!("{attribute} must be numeric"),
            Violation::DateFormat => {
                "start date of recording must be formatted as dd.mm.yy".to_string()
            }
            Violation::TimeFormat => {
                "start time of recording must be formatted as hh.mm.ss".to_string()
            }
            Violation::VersionNotZero => "version must be 0".to_string(),
            Violation::DateOutOfRange => {
                "start date of recording is out of range (dd 0-31, mm 0-12, yy 0-99)".to_string()
            }
            Violation::TimeOutOfRange => {
                "start time of recording is out of range (hh 0-23, mm 0-59, ss 0-59)".to_string()
            }
            Violation::NotPositive { attribute } => {
                format!("{attribute} must be greater than 0")
            }
            Violation::DataRecordCountOutOfRange => {
                "number of data records must be greater than 0, or -1 if unknown".to_string()
            }
            Violation::NegativeDuration => {
                "duration of data record must not be negative".to_string()
            }
            Violation::DigitalOutOfRange { attribute } => {
                format!("{attribute} must be within [-32768, 32767]")
            }
            Violation::PhysicalBoundsEqual => {
                "physical minimum and physical maximum must differ".to_string()
            }
            Violation::PhysicalBoundsInverted => {
                "physical minimum must not exceed physical maximum".to_string()
            }
            Violation::DigitalBoundsEqual => {
                "digital minimum and digital maximum must differ".to_string()
            }
            Violation::DigitalBoundsInverted => {
                "digital minimum must not exceed digital maximum".to_string()
            }
            Violation::DuplicateLabel { rows } => {
                let rows = rows
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("signal label is duplicated in channels {rows}")
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// One recorded violation, scoped to a file, channel row and attribute column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incompliance {
    category: Category,
    violation: Violation,
    source_file: String,
    row_index: usize,
    column_index: usize,
}

impl Incompliance {
    /// Incompliance against the file-level row (row index is always 0).
    pub fn global(
        source_file: impl Into<String>,
        attribute: GlobalAttribute,
        violation: Violation,
    ) -> Self {
        Self {
            category: Category::GlobalAttribute,
            violation,
            source_file: source_file.into(),
            row_index: 0,
            column_index: attribute.column(),
        }
    }

    /// Incompliance against channel `row_index` (0-based).
    pub fn channel(
        source_file: impl Into<String>,
        row_index: usize,
        attribute: ChannelAttribute,
        violation: Violation,
    ) -> Self {
        Self {
            category: Category::ChannelAttribute,
            violation,
            source_file: source_file.into(),
            row_index,
            column_index: attribute.column(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn kind(&self) -> IncomplianceKind {
        self.violation.kind()
    }

    pub fn violation(&self) -> &Violation {
        &self.violation
    }

    /// Human-readable description of the violated rule.
    pub fn description(&self) -> String {
        self.violation.message()
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn column_index(&self) -> usize {
        self.column_index
    }
}
