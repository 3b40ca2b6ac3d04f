//! Integration tests for the header model.

use edf_model::{
    ChannelAttribute, ChannelAttributeTable, ChannelRow, ExtractedHeader, FileValidation,
    GlobalAttribute, GlobalAttributeRow, Incompliance, TableOutcome, ValidationOutcome, Verdict,
    Violation,
};

fn sample_header() -> ExtractedHeader {
    let global = GlobalAttributeRow::new()
        .with(GlobalAttribute::FileName, "SC4001E0-PSG.edf")
        .with(GlobalAttribute::Version, "0")
        .with(GlobalAttribute::StartDate, "24.04.89")
        .with(GlobalAttribute::StartTime, "16.13.00");
    let channels: ChannelAttributeTable = ["EEG Fpz-Cz", "EEG Pz-Oz"]
        .into_iter()
        .map(|label| ChannelRow::new().with(ChannelAttribute::Label, label))
        .collect();
    ExtractedHeader::new("data/SC4001E0-PSG.edf", global, channels)
}

#[test]
fn test_header_survives_json_round_trip() {
    let header = sample_header();
    let json = serde_json::to_string(&header).expect("serialize header");
    let parsed = ExtractedHeader::parse_json(&json).expect("parse header");
    assert_eq!(parsed, vec![header]);
}

#[test]
fn test_incompliance_serializes_with_rule_tag() {
    let incompliance = Incompliance::channel(
        "a.edf",
        1,
        ChannelAttribute::Label,
        Violation::DuplicateLabel { rows: vec![2, 5] },
    );
    let value = serde_json::to_value(&incompliance).expect("serialize incompliance");
    assert_eq!(value["category"], "channel_attribute");
    assert_eq!(value["violation"]["rule"], "duplicate_label");
    assert_eq!(value["violation"]["rows"], serde_json::json!([2, 5]));
    assert_eq!(value["row_index"], 1);
    assert_eq!(value["column_index"], 0);
}

#[test]
fn test_not_available_table_serializes_as_status() {
    let validation = FileValidation {
        source: "a.edf".to_string(),
        global: TableOutcome::Validated(ValidationOutcome::default()),
        channels: TableOutcome::NotAvailable,
    };
    let value = serde_json::to_value(&validation).expect("serialize validation");
    assert_eq!(value["channels"]["status"], "not_available");
    assert_eq!(value["global"]["status"], "validated");
    assert_eq!(validation.verdict(), Verdict::Incomplete);
}
