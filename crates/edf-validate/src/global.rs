//! File-level attribute validation.

use edf_model::{GlobalAttributeRow, Incompliance, ValidationOutcome};

use crate::observer::{AttributeCheck, CheckStage, TracingObserver, ValidationObserver};
use crate::rules::{GLOBAL_RULES, evaluate};

/// Validates the single global attribute row of a file.
#[derive(Debug, Clone, Default)]
pub struct GlobalAttributeValidator<O = TracingObserver> {
    observer: O,
}

impl GlobalAttributeValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: ValidationObserver> GlobalAttributeValidator<O> {
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// Run every global rule chain over `row`.
    ///
    /// Chains are independent: a failure in one attribute never suppresses
    /// another attribute's checks.
    pub fn validate(&self, row: &GlobalAttributeRow, source: &str) -> ValidationOutcome {
        let mut incompliances = Vec::new();

        for rule in &GLOBAL_RULES {
            let label = rule.attribute.label();
            let value = row.get(rule.attribute);
            let evaluation = evaluate(value, rule.presence, rule.value, label);

            self.observer.attribute_checked(&AttributeCheck {
                source,
                row: 0,
                attribute: label,
                stage: CheckStage::Chain,
                value,
                violation: evaluation.violation.as_ref(),
            });

            if let Some(violation) = evaluation.violation {
                incompliances.push(Incompliance::global(source, rule.attribute, violation));
            }
        }

        ValidationOutcome::new(incompliances)
    }
}
