//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use seqlog::{
    extract_test_cases, FilterConfiguration, LogFile, LogMetadata, MessageAnalyser, NullProgress,
    Parser, Preferences, TestCase,
};

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Open a fixture log and detect its metadata
pub fn open_fixture(name: &str) -> (LogFile, LogMetadata) {
    let log = LogFile::open(fixtures_dir().join(name)).expect("Failed to open fixture");
    let metadata = LogMetadata::detect(&log).expect("Failed to detect metadata");
    (log, metadata)
}

/// Write `content` to a log file in a fresh temporary directory
pub fn temp_log(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("run.log");
    fs::write(&path, content).expect("Failed to write temp log");
    (temp_dir, path)
}

/// Test cases of an opened log
pub fn test_cases(log: &LogFile, metadata: &LogMetadata) -> Vec<TestCase> {
    let mut analyser = MessageAnalyser::new(metadata.format, metadata.mode);
    let (test_cases, _) =
        extract_test_cases(log, &mut analyser, &NullProgress).expect("Failed to extract test cases");
    test_cases
}

/// Parser of the named test case, already indexed with default settings
pub fn indexed_parser<'f>(log: &'f LogFile, metadata: &LogMetadata, name: &str) -> Parser<'f> {
    let test_case = test_cases(log, metadata)
        .into_iter()
        .find(|tc| tc.name == name)
        .unwrap_or_else(|| panic!("No test case {}", name));
    let mut parser = Parser::new(log, metadata, test_case);
    parser
        .pre_parse(
            &Preferences::default(),
            &FilterConfiguration::default(),
            &NullProgress,
        )
        .expect("Failed to index");
    parser
}
