//! Unit tests for the indexing pass

use seqlog::{
    EventKind, FilterConfiguration, LogFile, LogMetadata, NullProgress, Parser, Preferences,
    ScanError, ScanStatus, TestCase, Verdict,
};

use crate::helpers::{indexed_parser, open_fixture, temp_log, test_cases};

#[test]
fn index_of_complete_test_case() {
    let (log, metadata) = open_fixture("format2_parallel.log");
    let parser = indexed_parser(&log, &metadata, "tc_login");

    assert_eq!(parser.index(), (2..=15).collect::<Vec<_>>().as_slice());
    let counters = parser.counters().unwrap();
    assert_eq!(counters.get(EventKind::Send), 1);
    assert_eq!(counters.get(EventKind::Enqueued), 1);
    assert_eq!(counters.get(EventKind::Receive), 1);
    assert_eq!(counters.get(EventKind::SetverdictPass), 2);
    assert_eq!(counters.total(), parser.index().len());
}

#[test]
fn index_is_strictly_increasing_and_in_range() {
    for (fixture, name) in [
        ("format2_parallel.log", "tc_logout"),
        ("format1_parallel.log", "tc_echo"),
        ("single_mode.log", "tc_single"),
        ("truncated.log", "tc_cut"),
    ] {
        let (log, metadata) = open_fixture(fixture);
        let parser = indexed_parser(&log, &metadata, name);
        let test_case = parser.test_case();
        let index = parser.index();
        assert!(!index.is_empty(), "{} has an empty index", fixture);
        assert!(index.windows(2).all(|w| w[0] < w[1]), "{} is not sorted", fixture);
        assert!(index
            .iter()
            .all(|&r| r >= test_case.start_record && r <= test_case.end_record));
    }
}

#[test]
fn components_and_ports_are_tracked() {
    let (log, metadata) = open_fixture("format2_parallel.log");
    let parser = indexed_parser(&log, &metadata, "tc_login");
    let components = parser.components().unwrap();

    let client = components.get("3").unwrap();
    assert_eq!(client.alias.as_deref(), Some("client"));
    assert_eq!(client.verdict, Verdict::Pass);
    assert!(components.get("mtc").unwrap().ports.is_empty());
}

#[test]
fn format1_log_is_classified_with_its_own_wording() {
    let (log, metadata) = open_fixture("format1_parallel.log");
    let parser = indexed_parser(&log, &metadata, "tc_echo");
    let counters = parser.counters().unwrap();
    assert_eq!(counters.get(EventKind::Send), 2);
    assert_eq!(counters.get(EventKind::ConnectingPort), 1);
    assert_eq!(counters.get(EventKind::MappingPort), 1);
    assert_eq!(counters.get(EventKind::UnmappingPort), 1);
    assert_eq!(counters.get(EventKind::PtcTerminate), 1);
    assert_eq!(parser.components().unwrap().alias_of("3"), Some("echo"));
}

#[test]
fn single_mode_indexes_allowed_silent_events_only() {
    let (log, metadata) = open_fixture("single_mode.log");
    let parser = indexed_parser(&log, &metadata, "tc_single");
    assert_eq!(parser.index(), &[1, 2, 4, 5]);
    assert_eq!(parser.counters().unwrap().get(EventKind::SilentEvent), 1);
}

#[test]
fn failing_verdict_collects_preceding_errors() {
    let (log, metadata) = open_fixture("format2_parallel.log");
    let parser = indexed_parser(&log, &metadata, "tc_logout");
    let scan = parser.scan().unwrap();
    let causes: Vec<usize> = scan.connected[&19].iter().map(|c| c.record_number).collect();
    assert_eq!(causes, vec![18]);
    assert_eq!(scan.connected.len(), 1);
}

#[test]
fn truncated_test_case_closes_living_components() {
    let (log, metadata) = open_fixture("truncated.log");
    let parser = indexed_parser(&log, &metadata, "tc_cut");
    let scan = parser.scan().unwrap();

    let terminated: Vec<&str> = scan
        .epilogue
        .iter()
        .filter(|e| e.kind == EventKind::PtcTerminate)
        .map(|e| e.reference.as_str())
        .collect();
    assert_eq!(terminated, vec!["3"]);
    assert_eq!(scan.epilogue.len(), 4);
    assert!(scan.epilogue.iter().all(|e| e.record_number == 4));
}

#[test]
fn reindexing_is_idempotent() {
    let (log, metadata) = open_fixture("format2_parallel.log");
    let mut parser = indexed_parser(&log, &metadata, "tc_login");
    let first = parser.scan().unwrap().clone();
    let second = parser
        .pre_parse(
            &Preferences::default(),
            &FilterConfiguration::default(),
            &NullProgress,
        )
        .unwrap()
        .clone();
    assert_eq!(first.index, second.index);
    assert_eq!(first.counters, second.counters);
    assert_eq!(first.connected, second.connected);
}

#[test]
fn filter_change_needs_a_new_index() {
    let (log, metadata) = open_fixture("format2_parallel.log");
    let mut parser = indexed_parser(&log, &metadata, "tc_login");
    let full = parser.index().len();

    let filter = FilterConfiguration {
        ignored_components: vec!["client".to_string()],
        ..Default::default()
    };
    parser
        .pre_parse(&Preferences::default(), &filter, &NullProgress)
        .unwrap();
    assert!(parser.index().len() < full);
    assert_eq!(parser.counters().unwrap().get(EventKind::Enqueued), 0);
}

#[test]
fn malformed_record_fails_the_scan() {
    let (log, metadata) = open_fixture("malformed.log");
    let test_case = TestCase::whole_log(&log);
    let mut parser = Parser::new(&log, &metadata, test_case);
    let error = parser
        .pre_parse(
            &Preferences::default(),
            &FilterConfiguration::default(),
            &NullProgress,
        )
        .unwrap_err();

    assert!(matches!(error, ScanError::Record { record_number: 1, .. }));
    assert_eq!(error.file_offset(), Some(66));
    assert!(error.to_string().starts_with("could not parse log"));
    assert!(!parser.is_indexed());
    assert!(parser.index().is_empty());
}

#[test]
fn canceled_scan_keeps_partial_index() {
    struct CancelAfter(std::cell::Cell<usize>);
    impl seqlog::ProgressMonitor for CancelAfter {
        fn begin_task(&self, _name: &str, _total: usize) {}
        fn worked(&self, amount: usize) {
            self.0.set(self.0.get().saturating_sub(amount));
        }
        fn is_canceled(&self) -> bool {
            self.0.get() == 0
        }
        fn done(&self) {}
    }

    let (log, metadata) = open_fixture("format2_parallel.log");
    let test_case = test_cases(&log, &metadata).remove(0);
    let mut parser = Parser::new(&log, &metadata, test_case);
    let scan = parser
        .pre_parse(
            &Preferences::default(),
            &FilterConfiguration::default(),
            &CancelAfter(std::cell::Cell::new(3)),
        )
        .unwrap();
    assert_eq!(scan.status, ScanStatus::Canceled);
    assert_eq!(scan.index, vec![2, 3, 4]);
    assert_eq!(scan.prologue.len(), 3);
}

#[test]
fn test_case_beyond_the_log_is_rejected() {
    let (_dir, path) = temp_log("10:00:00.000001 mtc USER one\n");
    let log = LogFile::open(&path).unwrap();
    let metadata = LogMetadata::detect(&log).unwrap();
    let test_case = TestCase {
        name: "ghost".to_string(),
        verdict: None,
        start_record: 0,
        end_record: 5,
    };
    let mut parser = Parser::new(&log, &metadata, test_case);
    let error = parser
        .pre_parse(
            &Preferences::default(),
            &FilterConfiguration::default(),
            &NullProgress,
        )
        .unwrap_err();
    assert!(matches!(error, ScanError::RecordOutOfRange { .. }));
}
