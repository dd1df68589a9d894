//! Unit tests for decoding index windows

use std::collections::BTreeMap;

use seqlog::{
    Decipherer, DecipheringRules, EventKind, NullProgress, ScanError, ScanStatus,
};

use crate::helpers::{indexed_parser, open_fixture};

fn login_rules() -> DecipheringRules {
    let mut table = BTreeMap::new();
    table.insert(
        "Demo.Login".to_string(),
        vec!["account".to_string(), "user".to_string()],
    );
    let mut tables = BTreeMap::new();
    tables.insert("demo".to_string(), table);
    DecipheringRules {
        active: None,
        tables,
    }
}

#[test]
fn full_region_matches_the_index() {
    let (log, metadata) = open_fixture("format2_parallel.log");
    let mut parser = indexed_parser(&log, &metadata, "tc_login");
    let len = parser.index().len();
    let region = parser.parse_region(0, len - 1, None, &NullProgress).unwrap();

    assert_eq!(region.status, ScanStatus::Completed);
    assert_eq!(region.events.len(), len);
    let numbers: Vec<usize> = region.events.iter().map(|e| e.record_number).collect();
    assert_eq!(numbers.as_slice(), parser.index());
    assert!(region.events.iter().all(|e| !e.synthetic));
}

#[test]
fn every_window_is_bracketed_by_boundary_events() {
    let (log, metadata) = open_fixture("format2_parallel.log");
    let mut parser = indexed_parser(&log, &metadata, "tc_login");
    let region = parser.parse_region(3, 5, None, &NullProgress).unwrap();

    assert_eq!(region.events.len(), 3);
    let timeline: Vec<EventKind> = region.timeline().map(|e| e.kind).collect();
    assert_eq!(
        &timeline[..3],
        &[EventKind::SystemCreate, EventKind::HcCreate, EventKind::MtcCreate]
    );
    assert_eq!(
        &timeline[timeline.len() - 3..],
        &[EventKind::MtcTerminate, EventKind::HcTerminate, EventKind::SystemTerminate]
    );
}

#[test]
fn decoded_events_carry_their_fields() {
    let (log, metadata) = open_fixture("format2_parallel.log");
    let mut parser = indexed_parser(&log, &metadata, "tc_login");
    let len = parser.index().len();
    let region = parser.parse_region(0, len - 1, None, &NullProgress).unwrap();

    let created = &region.events[1];
    assert_eq!(created.kind, EventKind::PtcCreate);
    assert_eq!(created.reference, "3");
    assert_eq!(created.target.as_deref(), Some("mtc"));
    assert_eq!(created.name.as_deref(), Some("client"));

    let sent = region
        .events
        .iter()
        .find(|e| e.kind == EventKind::Send)
        .unwrap();
    assert_eq!(sent.reference, "mtc");
    assert_eq!(sent.target.as_deref(), Some("3"));
    assert_eq!(sent.port.as_deref(), Some("p1"));
    assert_eq!(sent.label, None);
    assert_eq!(sent.offset, log.span(sent.record_number).unwrap().offset);
}

#[test]
fn deciphered_labels_replace_type_names() {
    let (log, metadata) = open_fixture("format2_parallel.log");
    let mut parser = indexed_parser(&log, &metadata, "tc_login");
    let len = parser.index().len();
    let mut decipherer = Decipherer::new(login_rules());
    let region = parser
        .parse_region(0, len - 1, Some(&mut decipherer), &NullProgress)
        .unwrap();

    let labels: Vec<&str> = region
        .events
        .iter()
        .filter(|e| e.kind.carries_payload())
        .filter_map(|e| e.label.as_deref())
        .collect();
    assert_eq!(labels, vec!["alice", "alice", "alice"]);
    assert_eq!(decipherer.active_table(), Some("demo"));
}

#[test]
fn failing_verdict_is_decoded_with_its_causes() {
    let (log, metadata) = open_fixture("format2_parallel.log");
    let mut parser = indexed_parser(&log, &metadata, "tc_logout");
    let len = parser.index().len();
    let region = parser.parse_region(0, len - 1, None, &NullProgress).unwrap();

    let verdict = region
        .events
        .iter()
        .find(|e| e.kind == EventKind::Setverdict)
        .unwrap();
    let causes = verdict.connected_records.as_ref().unwrap();
    assert_eq!(causes.len(), 1);
    assert_eq!(causes[0].record_number, 18);
    assert_eq!(causes[0].offset, log.span(18).unwrap().offset);

    let living: Vec<&str> = region
        .epilogue
        .iter()
        .filter(|e| e.kind == EventKind::PtcTerminate)
        .map(|e| e.reference.as_str())
        .collect();
    assert_eq!(living, vec!["4"]);
}

#[test]
fn windows_outside_the_index_are_rejected() {
    let (log, metadata) = open_fixture("single_mode.log");
    let mut parser = indexed_parser(&log, &metadata, "tc_single");
    let len = parser.index().len();

    let past_end = parser.parse_region(0, len, None, &NullProgress).unwrap_err();
    assert!(matches!(past_end, ScanError::RegionOutOfBounds { .. }));
    let reversed = parser.parse_region(2, 1, None, &NullProgress).unwrap_err();
    assert!(matches!(reversed, ScanError::RegionOutOfBounds { .. }));
}

#[test]
fn region_before_indexing_is_an_error() {
    let (log, metadata) = open_fixture("single_mode.log");
    let test_case = seqlog::TestCase::whole_log(&log);
    let mut parser = seqlog::Parser::new(&log, &metadata, test_case);
    let error = parser.parse_region(0, 0, None, &NullProgress).unwrap_err();
    assert!(matches!(error, ScanError::NotIndexed));
}

#[test]
fn regions_serialize_to_json() {
    let (log, metadata) = open_fixture("single_mode.log");
    let mut parser = indexed_parser(&log, &metadata, "tc_single");
    let region = parser.parse_region(0, 0, None, &NullProgress).unwrap();
    let json = serde_json::to_value(&region).unwrap();
    assert_eq!(json["events"][0]["kind"], "TC_START");
    assert_eq!(json["events"][0]["reference"], "mtc");
    assert_eq!(json["prologue"][0]["synthetic"], true);
    assert_eq!(json["status"], "completed");
}
