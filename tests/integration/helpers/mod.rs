//! Helpers for driving the seqlog binary

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Path of a file under tests/fixtures
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// seqlog command isolated from the user's config and log filter
pub fn seqlog(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("seqlog").expect("seqlog binary not built");
    cmd.arg("--config")
        .arg(config_dir.path().join("config.toml"))
        .env_remove("SEQLOG_LOG")
        .env("NO_COLOR", "1");
    cmd
}
