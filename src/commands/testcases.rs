//! Testcases command handler

use anyhow::Result;
use std::path::Path;

use seqlog::TestCase;

use super::{find_test_cases, interruptible_progress, load_config, open_log, truncate_string};

/// List the test cases of a log with their record ranges and verdicts.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let (log, metadata) = open_log(file, &config)?;
    let progress = interruptible_progress();
    let (test_cases, status) = find_test_cases(&log, &metadata, &progress)?;

    if test_cases.is_empty() {
        println!("No test cases found.");
    }
    for (i, test_case) in test_cases.iter().enumerate() {
        println!("{}", format_row(i + 1, test_case));
    }
    if status.is_canceled() {
        println!("(canceled, list is incomplete)");
    }
    Ok(())
}

/// One line of the listing: number, name, verdict and record range.
pub fn format_row(number: usize, test_case: &TestCase) -> String {
    let verdict = test_case
        .verdict
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:>3}  {:<40} {:<7} records {}..={} ({})",
        number,
        truncate_string(&test_case.name, 40),
        verdict,
        test_case.start_record,
        test_case.end_record,
        test_case.record_count()
    )
}
