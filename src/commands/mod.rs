//! Command handlers for the seqlog CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod events;
pub mod index;
pub mod info;
pub mod testcases;

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::atomic::Ordering;
use tracing::warn;

use seqlog::{
    extract_test_cases, Config, ConsoleProgress, LogFile, LogMetadata, MessageAnalyser,
    ScanStatus, TestCase,
};

/// Truncate a string to a maximum length, adding ellipsis if needed.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Load the config from `--config` or the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Open a log and detect its metadata, applying forced settings from config.
pub fn open_log(file: &Path, config: &Config) -> Result<(LogFile, LogMetadata)> {
    let log = LogFile::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let metadata = LogMetadata::detect(&log)
        .with_context(|| format!("Failed to read {}", file.display()))?
        .with_overrides(config.log.format.forced(), config.log.mode.forced());
    Ok((log, metadata))
}

/// Console progress whose cancel flag is raised by Ctrl-C.
pub fn interruptible_progress() -> ConsoleProgress {
    let progress = ConsoleProgress::new();
    let flag = progress.cancel_flag();
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        warn!(error = %e, "could not install Ctrl-C handler");
    }
    progress
}

/// All test cases of `log`.
pub fn find_test_cases(
    log: &LogFile,
    metadata: &LogMetadata,
    progress: &ConsoleProgress,
) -> Result<(Vec<TestCase>, ScanStatus)> {
    let mut analyser = MessageAnalyser::new(metadata.format, metadata.mode);
    Ok(extract_test_cases(log, &mut analyser, progress)?)
}

/// Pick a test case by 1-based number or by name; the first one by default.
pub fn select_test_case(test_cases: Vec<TestCase>, selector: Option<&str>) -> Result<TestCase> {
    let count = test_cases.len();
    let Some(selector) = selector else {
        return test_cases
            .into_iter()
            .next()
            .context("The log contains no records");
    };

    if let Ok(number) = selector.parse::<usize>() {
        if number == 0 || number > count {
            bail!("Test case {} out of range (1..={})", number, count);
        }
        return test_cases
            .into_iter()
            .nth(number - 1)
            .context("Test case vanished");
    }

    test_cases
        .into_iter()
        .find(|tc| tc.name == selector)
        .with_context(|| format!("No test case named '{}'", selector))
}
