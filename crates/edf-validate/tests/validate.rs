//! Integration tests for global and channel attribute validation.

use std::sync::Mutex;

use edf_model::{
    ChannelAttribute, ChannelAttributeTable, ChannelRow, ExtractedHeader, GlobalAttribute,
    GlobalAttributeRow, IncomplianceKind, TableOutcome, Verdict,
};
use edf_validate::{
    AttributeCheck, ChannelAttributeValidator, CheckStage, GlobalAttributeValidator, HeaderValidator,
    ValidationObserver, validate_channel_attributes, validate_global_attributes, validate_header,
    validate_headers,
};

fn compliant_global() -> GlobalAttributeRow {
    GlobalAttributeRow::new()
        .with(GlobalAttribute::FileName, "SC4001E0-PSG.edf")
        .with(GlobalAttribute::Version, "0")
        .with(GlobalAttribute::LocalPatientId, "X F X Female_33yr")
        .with(GlobalAttribute::LocalRecordingId, "Startdate 24-APR-1989 X X X")
        .with(GlobalAttribute::StartDate, "24.04.89")
        .with(GlobalAttribute::StartTime, "16.13.00")
        .with(GlobalAttribute::HeaderBytes, "1792")
        .with(GlobalAttribute::DataRecordCount, "2650")
        .with(GlobalAttribute::RecordDuration, "30")
        .with(GlobalAttribute::SignalCount, "2")
}

fn compliant_channel(label: &str) -> ChannelRow {
    ChannelRow::new()
        .with(ChannelAttribute::Label, label)
        .with(ChannelAttribute::TransducerType, "Ag-AgCl electrodes")
        .with(ChannelAttribute::PhysicalDimension, "uV")
        .with(ChannelAttribute::PhysicalMinimum, "-192")
        .with(ChannelAttribute::PhysicalMaximum, "192")
        .with(ChannelAttribute::DigitalMinimum, "-2048")
        .with(ChannelAttribute::DigitalMaximum, "2047")
        .with(ChannelAttribute::Prefiltering, "HP:0.5Hz LP:100Hz")
        .with(ChannelAttribute::SamplesPerRecord, "3000")
}

fn compliant_channels() -> ChannelAttributeTable {
    ChannelAttributeTable::new(vec![
        compliant_channel("EEG Fpz-Cz"),
        compliant_channel("EEG Pz-Oz"),
    ])
}

fn global_kinds(row: &GlobalAttributeRow) -> Vec<IncomplianceKind> {
    validate_global_attributes(row, "a.edf")
        .iter()
        .map(|incompliance| incompliance.kind())
        .collect()
}

#[test]
fn test_required_global_attribute_empty_or_absent() {
    let required = [
        GlobalAttribute::Version,
        GlobalAttribute::StartDate,
        GlobalAttribute::StartTime,
        GlobalAttribute::HeaderBytes,
        GlobalAttribute::DataRecordCount,
        GlobalAttribute::RecordDuration,
        GlobalAttribute::SignalCount,
    ];
    for attribute in required {
        for row in [
            compliant_global().with(attribute, ""),
            compliant_global().without(attribute),
        ] {
            let outcome = validate_global_attributes(&row, "a.edf");
            assert_eq!(outcome.len(), 1, "{attribute}");
            assert_eq!(outcome.incompliances()[0].kind(), IncomplianceKind::Presence);
            assert_eq!(outcome.incompliances()[0].column_index(), attribute.column());
        }
    }
}

#[test]
fn test_required_channel_attribute_empty_or_absent() {
    let required = [
        ChannelAttribute::Label,
        ChannelAttribute::PhysicalMinimum,
        ChannelAttribute::PhysicalMaximum,
        ChannelAttribute::DigitalMinimum,
        ChannelAttribute::DigitalMaximum,
        ChannelAttribute::SamplesPerRecord,
    ];
    for attribute in required {
        for row in [
            compliant_channel("EEG Pz-Oz").with(attribute, ""),
            compliant_channel("EEG Pz-Oz").without(attribute),
        ] {
            let table = ChannelAttributeTable::new(vec![compliant_channel("EEG Fpz-Cz"), row]);
            let findings: Vec<(usize, usize, IncomplianceKind)> =
                validate_channel_attributes(&table, "a.edf")
                    .iter()
                    .map(|incompliance| {
                        (
                            incompliance.row_index(),
                            incompliance.column_index(),
                            incompliance.kind(),
                        )
                    })
                    .collect();
            assert_eq!(
                findings,
                vec![(1, attribute.column(), IncomplianceKind::Presence)],
                "{attribute}"
            );
        }
    }
}

#[test]
fn test_non_finite_physical_bounds() {
    for (min, max) in [("nan", "nan"), ("-infinity", "NaN"), ("-192", "inf")] {
        let table = ChannelAttributeTable::new(vec![
            compliant_channel("EEG")
                .with(ChannelAttribute::PhysicalMinimum, min)
                .with(ChannelAttribute::PhysicalMaximum, max),
        ]);
        let outcome = validate_channel_attributes(&table, "a.edf");
        assert!(!outcome.is_empty(), "{min}/{max}");
        assert!(
            outcome
                .iter()
                .all(|incompliance| incompliance.kind() == IncomplianceKind::Format),
            "{min}/{max}"
        );
    }

    let row = compliant_global().with(GlobalAttribute::RecordDuration, "inf");
    assert_eq!(global_kinds(&row), vec![IncomplianceKind::Format]);
}

#[test]
fn test_version_values() {
    let row = compliant_global().with(GlobalAttribute::Version, "0");
    assert!(global_kinds(&row).is_empty());
    let row = compliant_global().with(GlobalAttribute::Version, "1");
    assert_eq!(global_kinds(&row), vec![IncomplianceKind::Range]);
    let row = compliant_global().with(GlobalAttribute::Version, "x");
    assert_eq!(global_kinds(&row), vec![IncomplianceKind::Format]);
}

#[test]
fn test_start_date_values() {
    let row = compliant_global().with(GlobalAttribute::StartDate, "31.12.99");
    assert!(global_kinds(&row).is_empty());
    let row = compliant_global().with(GlobalAttribute::StartDate, "32.13.00");
    assert_eq!(global_kinds(&row), vec![IncomplianceKind::Range]);
    let row = compliant_global().with(GlobalAttribute::StartDate, "2020-01-01");
    assert_eq!(global_kinds(&row), vec![IncomplianceKind::Format]);
}

#[test]
fn test_digital_bounds() {
    let table = |min: &str, max: &str| {
        ChannelAttributeTable::new(vec![
            compliant_channel("EEG")
                .with(ChannelAttribute::DigitalMinimum, min)
                .with(ChannelAttribute::DigitalMaximum, max),
        ])
    };
    let kinds = |table: &ChannelAttributeTable| -> Vec<IncomplianceKind> {
        validate_channel_attributes(table, "a.edf")
            .iter()
            .map(|incompliance| incompliance.kind())
            .collect()
    };

    assert!(kinds(&table("-32768", "32767")).is_empty());
    assert_eq!(kinds(&table("-40000", "32767")), vec![IncomplianceKind::Range]);
    assert_eq!(kinds(&table("0", "0")), vec![IncomplianceKind::Consistency]);
    assert_eq!(kinds(&table("100", "50")), vec![IncomplianceKind::Consistency]);
}

#[test]
fn test_duplicate_labels_case_insensitive() {
    let table = ChannelAttributeTable::new(vec![
        compliant_channel("EEG Fpz-Cz"),
        compliant_channel("eeg fpz-cz"),
    ]);
    let outcome = validate_channel_attributes(&table, "a.edf");
    assert_eq!(outcome.len(), 1);
    let incompliance = &outcome.incompliances()[0];
    assert_eq!(incompliance.kind(), IncomplianceKind::Duplicate);
    assert_eq!(incompliance.row_index(), 0);
    assert!(incompliance.description().contains("1, 2"));
}

#[test]
fn test_message_catalog() {
    let row = GlobalAttributeRow::new()
        .with(GlobalAttribute::Version, "1")
        .with(GlobalAttribute::LocalPatientId, "Ærø")
        .with(GlobalAttribute::StartDate, "2020-01-01")
        .with(GlobalAttribute::StartTime, "24.00.00")
        .with(GlobalAttribute::HeaderBytes, "x")
        .with(GlobalAttribute::DataRecordCount, "0")
        .with(GlobalAttribute::RecordDuration, "-1");
    let table = ChannelAttributeTable::new(vec![
        ChannelRow::new()
            .with(ChannelAttribute::Label, "EEG")
            .with(ChannelAttribute::PhysicalMinimum, "a")
            .with(ChannelAttribute::PhysicalMaximum, "b")
            .with(ChannelAttribute::DigitalMinimum, "c")
            .with(ChannelAttribute::DigitalMaximum, "99999")
            .with(ChannelAttribute::SamplesPerRecord, "-3"),
        compliant_channel("eeg")
            .with(ChannelAttribute::PhysicalMinimum, "10")
            .with(ChannelAttribute::PhysicalMaximum, "1"),
    ]);

    let mut lines: Vec<String> = validate_global_attributes(&row, "a.edf")
        .iter()
        .map(|incompliance| incompliance.description())
        .collect();
    lines.extend(
        validate_channel_attributes(&table, "a.edf")
            .iter()
            .map(|incompliance| incompliance.description()),
    );

    insta::assert_snapshot!(lines.join("\n"), @r"
    version must be 0
    local patient ID contains non-ASCII characters
    start date of recording must be formatted as dd.mm.yy
    start time of recording is out of range (hh 0-23, mm 0-59, ss 0-59)
    number of bytes in header must be an integer
    number of data records must be greater than 0, or -1 if unknown
    duration of data record must not be negative
    number of signals is required and cannot be empty
    physical minimum must be numeric
    physical maximum must be numeric
    digital minimum must be an integer
    digital maximum must be within [-32768, 32767]
    number of samples in each data record must be greater than 0
    physical minimum must not exceed physical maximum
    signal label is duplicated in channels 1, 2
    ");
}

#[test]
fn test_header_with_missing_tables_is_incomplete() {
    let header = ExtractedHeader {
        source: "missing.edf".to_string(),
        global: Some(compliant_global()),
        channels: None,
    };
    let validation = validate_header(&header);
    assert_eq!(validation.channels, TableOutcome::NotAvailable);
    assert_eq!(validation.verdict(), Verdict::Incomplete);
}

#[test]
fn test_batch_keeps_input_order() {
    let headers: Vec<ExtractedHeader> = (0..32)
        .map(|idx| {
            let global = if idx % 3 == 0 {
                compliant_global().with(GlobalAttribute::Version, "9")
            } else {
                compliant_global()
            };
            ExtractedHeader::new(format!("file-{idx}.edf"), global, compliant_channels())
        })
        .collect();

    let results = validate_headers(&headers);
    assert_eq!(results.len(), headers.len());
    for (idx, result) in results.iter().enumerate() {
        assert_eq!(result.source, format!("file-{idx}.edf"));
        let expected = if idx % 3 == 0 {
            Verdict::NonCompliant
        } else {
            Verdict::Compliant
        };
        assert_eq!(result.verdict(), expected);
        assert!(
            result
                .incompliances()
                .all(|incompliance| incompliance.source_file() == result.source)
        );
    }
}

#[derive(Debug, Default)]
struct RecordingObserver {
    checks: Mutex<Vec<(usize, &'static str, CheckStage, bool)>>,
}

impl RecordingObserver {
    fn checks(&self) -> Vec<(usize, &'static str, CheckStage, bool)> {
        self.checks.lock().expect("observer lock").clone()
    }
}

impl ValidationObserver for RecordingObserver {
    fn attribute_checked(&self, check: &AttributeCheck<'_>) {
        self.checks.lock().expect("observer lock").push((
            check.row,
            check.attribute,
            check.stage,
            check.passed(),
        ));
    }
}

#[test]
fn test_observer_sees_every_attribute() {
    let observer = RecordingObserver::default();
    let validator = GlobalAttributeValidator::with_observer(&observer);
    let row = compliant_global().with(GlobalAttribute::SignalCount, "0");
    validator.validate(&row, "a.edf");

    let checks = observer.checks();
    assert_eq!(checks.len(), 10);
    assert_eq!(checks[9], (0, "number of signals", CheckStage::Chain, false));
    assert!(checks[..9].iter().all(|(_, _, _, passed)| *passed));

    // Ten chains plus two bound pairs per channel.
    let observer = RecordingObserver::default();
    let validator = ChannelAttributeValidator::with_observer(&observer);
    validator.validate(&compliant_channels(), "a.edf");
    let checks = observer.checks();
    assert_eq!(checks.len(), 24);
    assert_eq!(checks[5], (0, "physical maximum", CheckStage::Consistency, true));
    assert_eq!(checks[12], (1, "label", CheckStage::Chain, true));
}

#[test]
fn test_observer_sees_consistency_and_duplicates() {
    let observer = RecordingObserver::default();
    let validator = ChannelAttributeValidator::with_observer(&observer);
    let table = ChannelAttributeTable::new(vec![
        compliant_channel("EEG")
            .with(ChannelAttribute::DigitalMinimum, "100")
            .with(ChannelAttribute::DigitalMaximum, "50"),
        compliant_channel("eeg").with(ChannelAttribute::PhysicalMinimum, "low"),
    ]);
    let outcome = validator.validate(&table, "a.edf");
    assert_eq!(outcome.len(), 3);

    let failed: Vec<_> = observer
        .checks()
        .into_iter()
        .filter(|(_, _, _, passed)| !passed)
        .collect();
    assert_eq!(
        failed,
        vec![
            (0, "digital maximum", CheckStage::Consistency, false),
            (1, "physical minimum", CheckStage::Chain, false),
            (0, "label", CheckStage::Uniqueness, false),
        ]
    );
    // An unparsed operand skips the pair entirely.
    let row_one_pairs = observer
        .checks()
        .into_iter()
        .filter(|(row, _, stage, _)| *row == 1 && *stage == CheckStage::Consistency)
        .count();
    assert_eq!(row_one_pairs, 1);
}

#[test]
fn test_custom_observer_through_header_validator() {
    let observer = RecordingObserver::default();
    let validator = HeaderValidator::with_observer(&observer);
    let header = ExtractedHeader::new("a.edf", compliant_global(), compliant_channels());
    let validation = validator.validate(&header);
    assert_eq!(validation.verdict(), Verdict::Compliant);
    assert_eq!(observer.checks().len(), 34);
}
