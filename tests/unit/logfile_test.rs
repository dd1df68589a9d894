//! Unit tests for log access, metadata detection and test-case extraction

use seqlog::logfile::RecordReader;
use seqlog::record::TimestampFormat;
use seqlog::{ExecutionMode, LogFile, LogFormat, LogMetadata, Verdict};

use crate::helpers::{open_fixture, temp_log, test_cases};

#[test]
fn format2_fixture_is_detected() {
    let (_, metadata) = open_fixture("format2_parallel.log");
    assert_eq!(metadata.format, LogFormat::Format2);
    assert_eq!(metadata.mode, ExecutionMode::Parallel);
    assert_eq!(metadata.timestamp_format, Some(TimestampFormat::Time));
    assert_eq!(metadata.records, 23);
}

#[test]
fn format1_fixture_is_detected() {
    let (_, metadata) = open_fixture("format1_parallel.log");
    assert_eq!(metadata.format, LogFormat::Format1);
    assert_eq!(metadata.timestamp_format, Some(TimestampFormat::DateTime));
}

#[test]
fn single_mode_fixture_is_detected() {
    let (_, metadata) = open_fixture("single_mode.log");
    assert_eq!(metadata.mode, ExecutionMode::Single);
    assert_eq!(metadata.timestamp_format, Some(TimestampFormat::Seconds));
}

#[test]
fn overrides_replace_detection() {
    let (_, metadata) = open_fixture("format2_parallel.log");
    let forced = metadata.with_overrides(Some(LogFormat::Format1), None);
    assert_eq!(forced.format, LogFormat::Format1);
    assert_eq!(forced.mode, ExecutionMode::Parallel);
}

#[test]
fn continuation_lines_belong_to_their_record() {
    let (log, _) = open_fixture("format2_parallel.log");
    let mut reader = log.reader().unwrap();
    reader.set_current_record(18).unwrap();
    let raw = reader.next_record().unwrap();
    let text = String::from_utf8_lossy(&raw.bytes);
    assert!(text.starts_with("10:00:00.001800 mtc ERROR"));
    assert!(text.contains("in record field pin."));

    let next = reader.next_record().unwrap();
    assert_eq!(next.record_number, 19);
    assert!(String::from_utf8_lossy(&next.bytes).contains("setverdict(fail)"));
}

#[test]
fn reader_seeks_backwards() {
    let (log, _) = open_fixture("format1_parallel.log");
    let mut reader = log.reader().unwrap();
    reader.set_current_record(10).unwrap();
    let later = reader.next_record().unwrap();
    reader.set_current_record(2).unwrap();
    let earlier = reader.next_record().unwrap();
    assert_eq!(later.record_number, 10);
    assert_eq!(earlier.record_number, 2);
    assert!(earlier.offset < later.offset);
    assert_eq!(earlier.offset, log.span(2).unwrap().offset);
}

#[test]
fn test_cases_of_format2_fixture() {
    let (log, metadata) = open_fixture("format2_parallel.log");
    let test_cases = test_cases(&log, &metadata);
    assert_eq!(test_cases.len(), 2);

    assert_eq!(test_cases[0].name, "tc_login");
    assert_eq!((test_cases[0].start_record, test_cases[0].end_record), (2, 15));
    assert_eq!(test_cases[0].verdict, Some(Verdict::Pass));

    assert_eq!(test_cases[1].name, "tc_logout");
    assert_eq!((test_cases[1].start_record, test_cases[1].end_record), (16, 20));
    assert_eq!(test_cases[1].verdict, Some(Verdict::Fail));
}

#[test]
fn truncated_test_case_has_no_verdict() {
    let (log, metadata) = open_fixture("truncated.log");
    let test_cases = test_cases(&log, &metadata);
    assert_eq!(test_cases.len(), 1);
    assert_eq!(test_cases[0].end_record, 4);
    assert_eq!(test_cases[0].verdict, None);
}

#[test]
fn log_without_test_cases_is_named_after_the_file() {
    let (_dir, path) = temp_log("10:00:00.000001 mtc USER one\n10:00:00.000002 mtc USER two\n");
    let log = LogFile::open(&path).unwrap();
    let metadata = LogMetadata::detect(&log).unwrap();
    let test_cases = test_cases(&log, &metadata);
    assert_eq!(test_cases.len(), 1);
    assert_eq!(test_cases[0].name, "run");
    assert_eq!(test_cases[0].record_count(), 2);
}

#[test]
fn empty_log_has_no_test_cases() {
    let (_dir, path) = temp_log("");
    let log = LogFile::open(&path).unwrap();
    assert!(log.is_empty());
    let metadata = LogMetadata::detect(&log).unwrap();
    assert_eq!(metadata.timestamp_format, None);
    assert!(test_cases(&log, &metadata).is_empty());
}
