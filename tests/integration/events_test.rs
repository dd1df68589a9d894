//! CLI behavior of the events command

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture, seqlog};

#[test]
fn text_timeline_is_bracketed_by_boundary_events() {
    let config = TempDir::new().unwrap();
    let output = seqlog(&config)
        .arg("events")
        .arg(fixture("format2_parallel.log"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3 + 14 + 3);
    assert!(lines[0].contains("SYSTEM_CREATE"));
    assert!(lines[3].contains("TC_START"));
    assert!(lines[lines.len() - 1].contains("SYSTEM_TERMINATE"));
}

#[test]
fn window_limits_decoded_events() {
    let config = TempDir::new().unwrap();
    let output = seqlog(&config)
        .args(["events", "--from", "5", "--to", "5"])
        .arg(fixture("format2_parallel.log"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 7);
    assert!(stdout.contains("SEND"));
    assert!(stdout.contains("mtc -> 3 [p1]"));
}

#[test]
fn json_output_carries_causes() {
    let config = TempDir::new().unwrap();
    let output = seqlog(&config)
        .args(["events", "--json", "-t", "tc_logout"])
        .arg(fixture("format2_parallel.log"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let region: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let events = region["events"].as_array().unwrap();
    assert_eq!(events.len(), 5);
    let verdict = events
        .iter()
        .find(|e| e["kind"] == "SETVERDICT")
        .unwrap();
    assert_eq!(verdict["verdict"], "fail");
    assert_eq!(verdict["connected_records"][0]["record_number"], 18);

    let epilogue = region["epilogue"].as_array().unwrap();
    assert_eq!(epilogue[0]["kind"], "PTC_TERMINATE");
    assert_eq!(epilogue[0]["reference"], "4");
}

#[test]
fn deciphering_rules_from_config() {
    let config = TempDir::new().unwrap();
    std::fs::write(
        config.path().join("config.toml"),
        "[deciphering.tables.demo]\n\"Demo.Login\" = [\"pin\"]\n",
    )
    .unwrap();
    seqlog(&config)
        .args(["events", "--from", "5", "--to", "7"])
        .arg(fixture("format2_parallel.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1234"));
}

#[test]
fn window_past_the_index_fails() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .args(["events", "--from", "40"])
        .arg(fixture("single_mode.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Empty window"));
}

#[test]
fn truncated_log_closes_living_components() {
    let config = TempDir::new().unwrap();
    seqlog(&config)
        .arg("events")
        .arg(fixture("truncated.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("PTC_TERMINATE").count(2))
        .stdout(predicate::str::contains("MTC_TERMINATE"));
}
