//! CLI behavior of the info, testcases, index and config commands

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::helpers::{fixture, seqlog};

#[test]
fn help_lists_commands() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("testcases"))
        .stdout(predicate::str::contains("events"));
}

#[test]
fn info_reports_detected_metadata() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .arg("info")
        .arg(fixture("format1_parallel.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Format: format1"))
        .stdout(predicate::str::contains("Mode: parallel"))
        .stdout(predicate::str::contains("Timestamps: datetime"))
        .stdout(predicate::str::contains("Records: 15"));
}

#[test]
fn info_applies_forced_settings() {
    let config = TempDir::new().unwrap();
    fs::write(
        config.path().join("config.toml"),
        "[log]\nformat = \"format1\"\nmode = \"single\"\n",
    )
    .unwrap();
    seqlog(&config)
        .arg("info")
        .arg(fixture("format2_parallel.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Format: format1"))
        .stdout(predicate::str::contains("Mode: single"));
}

#[test]
fn info_on_missing_file_fails() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .arg("info")
        .arg(config.path().join("absent.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}

#[test]
fn testcases_lists_both_test_cases() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .arg("testcases")
        .arg(fixture("format2_parallel.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("tc_login"))
        .stdout(predicate::str::contains("records 2..=15"))
        .stdout(predicate::str::contains("tc_logout"))
        .stdout(predicate::str::contains("fail"));
}

#[test]
fn index_prints_counters_and_components() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .args(["index", "--testcase", "tc_login"])
        .arg(fixture("format2_parallel.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexed events: 14"))
        .stdout(predicate::str::contains("SEND"))
        .stdout(predicate::str::contains("3 (client)  verdict: pass"));
}

#[test]
fn index_by_number() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .args(["index", "-t", "2"])
        .arg(fixture("format2_parallel.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Test case: tc_logout"))
        .stdout(predicate::str::contains("Failing verdicts with causes: 1"));
}

#[test]
fn unknown_test_case_fails() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .args(["index", "-t", "tc_nope"])
        .arg(fixture("format2_parallel.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("tc_nope"));
}

#[test]
fn malformed_log_reports_the_offset() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .arg("testcases")
        .arg(fixture("malformed.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse log"))
        .stderr(predicate::str::contains("file offset 66"));
}

#[test]
fn invalid_config_is_reported() {
    let config = TempDir::new().unwrap();
    fs::write(
        config.path().join("config.toml"),
        "[preferences]\nsilent_events = [\"BOGUS\"]\n",
    )
    .unwrap();
    seqlog(&config)
        .arg("info")
        .arg(fixture("single_mode.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn config_show_prints_defaults() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[preferences]"))
        .stdout(predicate::str::contains("PORTEVENT_STATE"));
}

#[test]
fn config_path_prints_the_override() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"))
        .stdout(predicate::str::contains("not created"));
}

#[test]
fn completions_for_bash() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seqlog"));
}
