//! Per-attribute tracing hook.
//!
//! Validators report every attribute they check to a [`ValidationObserver`].
//! The default [`TracingObserver`] emits `tracing` events; raw header values
//! can contain patient identifiers and are redacted unless explicitly enabled.

use edf_model::Violation;
use tracing::{debug, trace};

/// Placeholder logged instead of raw header values.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Which kind of check produced an [`AttributeCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    /// Presence, charset, parse and range of a single value.
    Chain,
    /// Minimum and maximum of a bound pair, reported on the maximum.
    Consistency,
    /// Label uniqueness, reported on the first channel of a duplicate group.
    Uniqueness,
}

impl CheckStage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Chain => "chain",
            Self::Consistency => "consistency",
            Self::Uniqueness => "uniqueness",
        }
    }
}

/// One attribute check as seen by an observer.
#[derive(Debug, Clone, Copy)]
pub struct AttributeCheck<'a> {
    pub source: &'a str,
    pub row: usize,
    pub attribute: &'static str,
    pub stage: CheckStage,
    pub value: Option<&'a str>,
    pub violation: Option<&'a Violation>,
}

impl AttributeCheck<'_> {
    pub fn passed(&self) -> bool {
        self.violation.is_none()
    }
}

/// Receives every attribute check performed by a validator.
pub trait ValidationObserver: Send + Sync {
    fn attribute_checked(&self, check: &AttributeCheck<'_>);
}

impl<T: ValidationObserver + ?Sized> ValidationObserver for &T {
    fn attribute_checked(&self, check: &AttributeCheck<'_>) {
        (**self).attribute_checked(check);
    }
}

/// Emits one `trace` event per check and a `debug` event per failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    log_values: bool,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow raw header values in log output.
    #[must_use]
    pub fn with_values(mut self, enable: bool) -> Self {
        self.log_values = enable;
        self
    }

    fn shown<'a>(&self, value: Option<&'a str>) -> &'a str {
        match value {
            Some(value) if self.log_values => value,
            Some(_) => REDACTED_VALUE,
            None => "",
        }
    }
}

impl ValidationObserver for TracingObserver {
    fn attribute_checked(&self, check: &AttributeCheck<'_>) {
        let value = self.shown(check.value);
        match check.violation {
            None => trace!(
                source = check.source,
                row = check.row,
                attribute = check.attribute,
                stage = check.stage.label(),
                value,
                "attribute passed"
            ),
            Some(violation) => debug!(
                source = check.source,
                row = check.row,
                attribute = check.attribute,
                stage = check.stage.label(),
                value,
                kind = violation.kind().label(),
                "attribute failed: {violation}"
            ),
        }
    }
}
