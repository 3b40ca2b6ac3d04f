//! Validation outcomes per table and per file.

use serde::Serialize;

use crate::incompliance::Incompliance;

/// Ordered incompliances produced by validating one table.
///
/// Compliance is derived from emptiness and cannot be set independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationOutcome {
    incompliances: Vec<Incompliance>,
}

impl ValidationOutcome {
    pub fn new(incompliances: Vec<Incompliance>) -> Self {
        Self { incompliances }
    }

    pub fn is_compliant(&self) -> bool {
        self.incompliances.is_empty()
    }

    pub fn incompliances(&self) -> &[Incompliance] {
        &self.incompliances
    }

    pub fn into_incompliances(self) -> Vec<Incompliance> {
        self.incompliances
    }

    pub fn len(&self) -> usize {
        self.incompliances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incompliances.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Incompliance> {
        self.incompliances.iter()
    }
}

impl From<Vec<Incompliance>> for ValidationOutcome {
    fn from(incompliances: Vec<Incompliance>) -> Self {
        Self::new(incompliances)
    }
}

impl<'a> IntoIterator for &'a ValidationOutcome {
    type Item = &'a Incompliance;
    type IntoIter = std::slice::Iter<'a, Incompliance>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Result of validating a table that may not have been extracted at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "incompliances", rename_all = "snake_case")]
pub enum TableOutcome {
    Validated(ValidationOutcome),
    NotAvailable,
}

impl TableOutcome {
    pub fn incompliances(&self) -> &[Incompliance] {
        match self {
            Self::Validated(outcome) => outcome.incompliances(),
            Self::NotAvailable => &[],
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Validated(_))
    }

    /// Number of incompliances, `None` when the table was not available.
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::Validated(outcome) => Some(outcome.len()),
            Self::NotAvailable => None,
        }
    }
}

/// Overall judgement for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Both tables validated without incompliances.
    Compliant,
    /// At least one incompliance was recorded.
    NonCompliant,
    /// No incompliance recorded, but a table was not available.
    Incomplete,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::NonCompliant => "Non-compliant",
            Self::Incomplete => "Incomplete",
        }
    }
}

/// Validation results of one file's global row and channel table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileValidation {
    pub source: String,
    pub global: TableOutcome,
    pub channels: TableOutcome,
}

impl FileValidation {
    pub fn verdict(&self) -> Verdict {
        if self.incompliance_count() > 0 {
            Verdict::NonCompliant
        } else if self.global.is_available() && self.channels.is_available() {
            Verdict::Compliant
        } else {
            Verdict::Incomplete
        }
    }

    pub fn incompliance_count(&self) -> usize {
        self.global.incompliances().len() + self.channels.incompliances().len()
    }

    /// Global incompliances followed by channel incompliances.
    pub fn incompliances(&self) -> impl Iterator<Item = &Incompliance> {
        self.global
            .incompliances()
            .iter()
            .chain(self.channels.incompliances())
    }
}
