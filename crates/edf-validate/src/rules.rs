//! Declarative attribute rules.
//!
//! Every attribute is checked by the same ordered chain:
//! presence -> charset -> parse -> range. The chain stops at the first
//! failing stage, so an attribute yields at most one violation from it.

use edf_model::{ChannelAttribute, GlobalAttribute, Violation};

/// Smallest legal digital sample value (16-bit signed).
pub const DIGITAL_MIN: i32 = -32768;
/// Largest legal digital sample value (16-bit signed).
pub const DIGITAL_MAX: i32 = 32767;

/// Whether an attribute may be left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Parse and range stage of a rule chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRule {
    /// Free text, checked for charset only.
    Text,
    /// Integer equal to 0.
    Version,
    /// `dd.mm.yy`
    Date,
    /// `hh.mm.ss`
    Time,
    /// Integer greater than 0.
    PositiveInteger,
    /// Integer greater than 0, or -1 for "unknown".
    RecordCount,
    /// Number not below 0.
    NonNegativeNumber,
    /// Any number.
    Number,
    /// Integer within the 16-bit signed range.
    Digital,
}

/// One attribute's rule chain.
#[derive(Debug, Clone, Copy)]
pub struct AttributeRule<A> {
    pub attribute: A,
    pub presence: Presence,
    pub value: ValueRule,
}

const fn rule<A>(attribute: A, presence: Presence, value: ValueRule) -> AttributeRule<A> {
    AttributeRule {
        attribute,
        presence,
        value,
    }
}

/// Rules for the file-level row, in schema order. The file name slot has no rule.
pub const GLOBAL_RULES: [AttributeRule<GlobalAttribute>; 10] = [
    rule(GlobalAttribute::Version, Presence::Required, ValueRule::Version),
    rule(GlobalAttribute::LocalPatientId, Presence::Optional, ValueRule::Text),
    rule(GlobalAttribute::LocalRecordingId, Presence::Optional, ValueRule::Text),
    rule(GlobalAttribute::StartDate, Presence::Required, ValueRule::Date),
    rule(GlobalAttribute::StartTime, Presence::Required, ValueRule::Time),
    rule(GlobalAttribute::HeaderBytes, Presence::Required, ValueRule::PositiveInteger),
    rule(GlobalAttribute::Reserved, Presence::Optional, ValueRule::Text),
    rule(GlobalAttribute::DataRecordCount, Presence::Required, ValueRule::RecordCount),
    rule(GlobalAttribute::RecordDuration, Presence::Required, ValueRule::NonNegativeNumber),
    rule(GlobalAttribute::SignalCount, Presence::Required, ValueRule::PositiveInteger),
];

/// Rules for every channel row, in schema order.
pub const CHANNEL_RULES: [AttributeRule<ChannelAttribute>; 10] = [
    rule(ChannelAttribute::Label, Presence::Required, ValueRule::Text),
    rule(ChannelAttribute::TransducerType, Presence::Optional, ValueRule::Text),
    rule(ChannelAttribute::PhysicalDimension, Presence::Optional, ValueRule::Text),
    rule(ChannelAttribute::PhysicalMinimum, Presence::Required, ValueRule::Number),
    rule(ChannelAttribute::PhysicalMaximum, Presence::Required, ValueRule::Number),
    rule(ChannelAttribute::DigitalMinimum, Presence::Required, ValueRule::Digital),
    rule(ChannelAttribute::DigitalMaximum, Presence::Required, ValueRule::Digital),
    rule(ChannelAttribute::Prefiltering, Presence::Optional, ValueRule::Text),
    rule(ChannelAttribute::SamplesPerRecord, Presence::Required, ValueRule::PositiveInteger),
    rule(ChannelAttribute::Reserved, Presence::Optional, ValueRule::Text),
];

/// A successfully parsed attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed {
    Integer(i32),
    Number(f64),
}

impl Parsed {
    pub fn as_integer(self) -> Option<i32> {
        match self {
            Self::Integer(value) => Some(value),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            Self::Integer(_) => None,
        }
    }
}

/// Result of running one rule chain over one value.
///
/// `parsed` is set whenever the parse stage succeeded, even if the range
/// stage then failed; cross-field checks rely on that.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    pub parsed: Option<Parsed>,
    pub violation: Option<Violation>,
}

impl Evaluation {
    fn pass(parsed: Option<Parsed>) -> Self {
        Self {
            parsed,
            violation: None,
        }
    }

    fn fail(violation: Violation) -> Self {
        Self {
            parsed: None,
            violation: Some(violation),
        }
    }

    fn parsed_but(parsed: Parsed, violation: Option<Violation>) -> Self {
        Self {
            parsed: Some(parsed),
            violation,
        }
    }
}

/// Run a rule chain over an attribute value.
///
/// `attribute` is the display name used in messages.
pub fn evaluate(
    value: Option<&str>,
    presence: Presence,
    rule: ValueRule,
    attribute: &str,
) -> Evaluation {
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => {
            return match presence {
                Presence::Required => Evaluation::fail(Violation::MissingValue {
                    attribute: attribute.to_string(),
                }),
                Presence::Optional => Evaluation::pass(None),
            };
        }
    };

    if !is_ascii(value) {
        return Evaluation::fail(Violation::NonAscii {
            attribute: attribute.to_string(),
        });
    }

    match rule {
        ValueRule::Text => Evaluation::pass(None),
        ValueRule::Version => match parse_integer(value) {
            Some(0) => Evaluation::pass(Some(Parsed::Integer(0))),
            Some(version) => {
                Evaluation::parsed_but(Parsed::Integer(version), Some(Violation::VersionNotZero))
            }
            None => Evaluation::fail(not_integer(attribute)),
        },
        ValueRule::Date => match parse_triplet(value) {
            Some([dd, mm, yy])
                if in_range(dd, 0, 31) && in_range(mm, 0, 12) && in_range(yy, 0, 99) =>
            {
                Evaluation::pass(None)
            }
            Some(_) => Evaluation::fail(Violation::DateOutOfRange),
            None => Evaluation::fail(Violation::DateFormat),
        },
        ValueRule::Time => match parse_triplet(value) {
            Some([hh, mm, ss])
                if in_range(hh, 0, 23) && in_range(mm, 0, 59) && in_range(ss, 0, 59) =>
            {
                Evaluation::pass(None)
            }
            Some(_) => Evaluation::fail(Violation::TimeOutOfRange),
            None => Evaluation::fail(Violation::TimeFormat),
        },
        ValueRule::PositiveInteger => match parse_integer(value) {
            Some(count) if count > 0 => Evaluation::pass(Some(Parsed::Integer(count))),
            Some(count) => Evaluation::parsed_but(
                Parsed::Integer(count),
                Some(Violation::NotPositive {
                    attribute: attribute.to_string(),
                }),
            ),
            None => Evaluation::fail(not_integer(attribute)),
        },
        ValueRule::RecordCount => match parse_integer(value) {
            Some(count) if count > 0 || count == -1 => {
                Evaluation::pass(Some(Parsed::Integer(count)))
            }
            Some(count) => Evaluation::parsed_but(
                Parsed::Integer(count),
                Some(Violation::DataRecordCountOutOfRange),
            ),
            None => Evaluation::fail(not_integer(attribute)),
        },
        ValueRule::NonNegativeNumber => match parse_number(value) {
            Some(duration) if duration < 0.0 => Evaluation::parsed_but(
                Parsed::Number(duration),
                Some(Violation::NegativeDuration),
            ),
            Some(duration) => Evaluation::pass(Some(Parsed::Number(duration))),
            None => Evaluation::fail(not_numeric(attribute)),
        },
        ValueRule::Number => match parse_number(value) {
            Some(number) => Evaluation::pass(Some(Parsed::Number(number))),
            None => Evaluation::fail(not_numeric(attribute)),
        },
        ValueRule::Digital => match parse_integer(value) {
            Some(digital) if in_range(digital, DIGITAL_MIN, DIGITAL_MAX) => {
                Evaluation::pass(Some(Parsed::Integer(digital)))
            }
            Some(digital) => Evaluation::parsed_but(
                Parsed::Integer(digital),
                Some(Violation::DigitalOutOfRange {
                    attribute: attribute.to_string(),
                }),
            ),
            None => Evaluation::fail(not_integer(attribute)),
        },
    }
}

/// True when every code point is 7-bit ASCII.
pub fn is_ascii(value: &str) -> bool {
    value.is_ascii()
}

/// Integers are parsed verbatim: surrounding whitespace is a format error.
fn parse_integer(value: &str) -> Option<i32> {
    value.parse::<i32>().ok()
}

/// Numbers tolerate surrounding whitespace, as EDF fields are space padded.
/// `nan` and `inf` spellings are not numbers in a header.
fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Split strictly on `.` into exactly three integer segments.
fn parse_triplet(value: &str) -> Option<[i32; 3]> {
    let mut parts = value.split('.');
    let first = parse_integer(parts.next()?)?;
    let second = parse_integer(parts.next()?)?;
    let third = parse_integer(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some([first, second, third])
}

fn in_range(value: i32, min: i32, max: i32) -> bool {
    (min..=max).contains(&value)
}

fn not_integer(attribute: &str) -> Violation {
    Violation::NotInteger {
        attribute: attribute.to_string(),
    }
}

fn not_numeric(attribute: &str) -> Violation {
    Violation::NotNumeric {
        attribute: attribute.to_string(),
    }
}
