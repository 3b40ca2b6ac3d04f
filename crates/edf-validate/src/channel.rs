//! Per-channel attribute validation.
//!
//! Each row runs the channel rule chains, then the physical and digital
//! bound pairs are cross-checked. Duplicate labels are detected across the
//! whole table once every row has been checked.

use edf_model::{
    ChannelAttribute, ChannelAttributeTable, ChannelRow, Incompliance, ValidationOutcome,
    Violation,
};

use crate::observer::{AttributeCheck, CheckStage, TracingObserver, ValidationObserver};
use crate::rules::{CHANNEL_RULES, Parsed, evaluate};

/// Validates every row of a channel attribute table.
#[derive(Debug, Clone, Default)]
pub struct ChannelAttributeValidator<O = TracingObserver> {
    observer: O,
}

impl ChannelAttributeValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: ValidationObserver> ChannelAttributeValidator<O> {
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    pub fn validate(&self, table: &ChannelAttributeTable, source: &str) -> ValidationOutcome {
        let mut incompliances = Vec::new();

        for (index, row) in table.rows().iter().enumerate() {
            self.validate_row(row, index, source, &mut incompliances);
        }

        for group in duplicate_label_groups(table) {
            let row = group[0] - 1;
            let violation = Violation::DuplicateLabel { rows: group };
            self.observer.attribute_checked(&AttributeCheck {
                source,
                row,
                attribute: ChannelAttribute::Label.label(),
                stage: CheckStage::Uniqueness,
                value: table
                    .rows()
                    .get(row)
                    .and_then(|first| first.get(ChannelAttribute::Label)),
                violation: Some(&violation),
            });
            incompliances.push(Incompliance::channel(source, row, ChannelAttribute::Label, violation));
        }

        ValidationOutcome::new(incompliances)
    }

    fn validate_row(
        &self,
        row: &ChannelRow,
        index: usize,
        source: &str,
        incompliances: &mut Vec<Incompliance>,
    ) {
        let mut bounds = Bounds::default();

        for rule in &CHANNEL_RULES {
            let label = rule.attribute.label();
            let value = row.get(rule.attribute);
            let evaluation = evaluate(value, rule.presence, rule.value, label);

            self.observer.attribute_checked(&AttributeCheck {
                source,
                row: index,
                attribute: label,
                stage: CheckStage::Chain,
                value,
                violation: evaluation.violation.as_ref(),
            });

            if let Some(violation) = evaluation.violation {
                incompliances.push(Incompliance::channel(source, index, rule.attribute, violation));
            }

            bounds.record(rule.attribute, evaluation.parsed);
            let Some(pair) = bounds.cross_check(rule.attribute) else {
                continue;
            };
            self.observer.attribute_checked(&AttributeCheck {
                source,
                row: index,
                attribute: label,
                stage: CheckStage::Consistency,
                value,
                violation: pair.as_ref().err(),
            });
            if let Err(violation) = pair {
                incompliances.push(Incompliance::channel(source, index, rule.attribute, violation));
            }
        }
    }
}

/// Parsed bound values of one channel row.
#[derive(Debug, Default)]
struct Bounds {
    physical_minimum: Option<f64>,
    physical_maximum: Option<f64>,
    digital_minimum: Option<i32>,
    digital_maximum: Option<i32>,
}

impl Bounds {
    fn record(&mut self, attribute: ChannelAttribute, parsed: Option<Parsed>) {
        match attribute {
            ChannelAttribute::PhysicalMinimum => {
                self.physical_minimum = parsed.and_then(Parsed::as_number);
            }
            ChannelAttribute::PhysicalMaximum => {
                self.physical_maximum = parsed.and_then(Parsed::as_number);
            }
            ChannelAttribute::DigitalMinimum => {
                self.digital_minimum = parsed.and_then(Parsed::as_integer);
            }
            ChannelAttribute::DigitalMaximum => {
                self.digital_maximum = parsed.and_then(Parsed::as_integer);
            }
            _ => {}
        }
    }

    /// Pairwise check, run once the maximum of a pair has been evaluated.
    /// `None` when `attribute` closes no pair or an operand did not parse.
    fn cross_check(&self, attribute: ChannelAttribute) -> Option<Result<(), Violation>> {
        match attribute {
            ChannelAttribute::PhysicalMaximum => {
                let (min, max) = (self.physical_minimum?, self.physical_maximum?);
                Some(if min == max {
                    Err(Violation::PhysicalBoundsEqual)
                } else if min > max {
                    Err(Violation::PhysicalBoundsInverted)
                } else {
                    Ok(())
                })
            }
            ChannelAttribute::DigitalMaximum => {
                let (min, max) = (self.digital_minimum?, self.digital_maximum?);
                Some(if min == max {
                    Err(Violation::DigitalBoundsEqual)
                } else if min > max {
                    Err(Violation::DigitalBoundsInverted)
                } else {
                    Ok(())
                })
            }
            _ => None,
        }
    }
}

/// Groups of channels sharing a label, compared case-insensitively.
///
/// Each group is listed once, as ascending 1-based row numbers, starting at
/// its first occurrence. Absent and empty labels never match.
pub fn duplicate_label_groups(table: &ChannelAttributeTable) -> Vec<Vec<usize>> {
    let keys: Vec<Option<String>> = table
        .rows()
        .iter()
        .map(|row| {
            row.get(ChannelAttribute::Label)
                .filter(|label| !label.is_empty())
                .map(str::to_lowercase)
        })
        .collect();

    let mut claimed = vec![false; keys.len()];
    let mut groups = Vec::new();

    for (i, key) in keys.iter().enumerate() {
        let Some(key) = key else {
            continue;
        };
        if claimed[i] {
            continue;
        }
        let mut group = vec![i + 1];
        for (j, other) in keys.iter().enumerate().skip(i + 1) {
            if other.as_ref() == Some(key) {
                claimed[j] = true;
                group.push(j + 1);
            }
        }
        if group.len() > 1 {
            groups.push(group);
        }
    }

    groups
}
