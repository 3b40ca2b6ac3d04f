//! Span context of attribute checks under parallel validation.
//!
//! Installs a process-wide subscriber, so this file holds a single test.

use std::collections::HashMap;
use std::sync::Mutex;

use edf_model::{
    ChannelAttribute, ChannelAttributeTable, ChannelRow, ExtractedHeader, GlobalAttribute,
    GlobalAttributeRow,
};
use edf_validate::{AttributeCheck, HeaderValidator, ValidationObserver};
use tracing::Span;

#[derive(Debug, Default)]
struct SpanRecorder {
    seen: Mutex<Vec<(String, Option<&'static str>, Option<u64>)>>,
}

impl ValidationObserver for SpanRecorder {
    fn attribute_checked(&self, check: &AttributeCheck<'_>) {
        let span = Span::current();
        self.seen.lock().expect("recorder lock").push((
            check.source.to_string(),
            span.metadata().map(|metadata| metadata.name()),
            span.id().map(|id| id.into_u64()),
        ));
    }
}

fn header(idx: usize) -> ExtractedHeader {
    let global = GlobalAttributeRow::new()
        .with(GlobalAttribute::Version, "0")
        .with(GlobalAttribute::StartDate, "24.04.89")
        .with(GlobalAttribute::StartTime, "16.13.00")
        .with(GlobalAttribute::HeaderBytes, "768")
        .with(GlobalAttribute::DataRecordCount, "2650")
        .with(GlobalAttribute::RecordDuration, "30")
        .with(GlobalAttribute::SignalCount, "2");
    let channel = |label: &str| {
        ChannelRow::new()
            .with(ChannelAttribute::Label, label)
            .with(ChannelAttribute::PhysicalMinimum, "-192")
            .with(ChannelAttribute::PhysicalMaximum, "192")
            .with(ChannelAttribute::DigitalMinimum, "-2048")
            .with(ChannelAttribute::DigitalMaximum, "2047")
            .with(ChannelAttribute::SamplesPerRecord, "3000")
    };
    let channels = ChannelAttributeTable::new(vec![channel("EEG Fpz-Cz"), channel("EEG Pz-Oz")]);
    ExtractedHeader::new(format!("file-{idx}.edf"), global, channels)
}

#[test]
fn test_checks_run_inside_their_file_span() {
    tracing::subscriber::set_global_default(tracing_subscriber::registry())
        .expect("install subscriber");

    let headers: Vec<ExtractedHeader> = (0..64).map(header).collect();
    let observer = SpanRecorder::default();
    HeaderValidator::with_observer(&observer).validate_all(&headers);

    let seen = observer.seen.lock().expect("recorder lock");
    assert_eq!(seen.len(), headers.len() * 34);

    let mut spans: HashMap<&str, Option<u64>> = HashMap::new();
    for (source, name, id) in seen.iter() {
        assert_eq!(*name, Some("file"), "{source}");
        assert!(id.is_some(), "{source}");
        let first = spans.entry(source.as_str()).or_insert(*id);
        assert_eq!(*first, *id, "{source} checked under another file's span");
    }
    assert_eq!(spans.len(), headers.len());
}
