//! Info command handler

use anyhow::Result;
use std::path::Path;

use seqlog::LogMetadata;

use super::{load_config, open_log};

/// Print what was detected about a log file.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let (log, metadata) = open_log(file, &config)?;
    println!("File: {}", log.path().display());
    println!("{}", summary(&metadata));
    Ok(())
}

/// Multi-line description of `metadata`.
pub fn summary(metadata: &LogMetadata) -> String {
    let timestamps = metadata
        .timestamp_format
        .map(|t| t.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let modified = metadata
        .modified
        .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "Format: {}\nMode: {}\nTimestamps: {}\nRecords: {}\nSize: {}\nModified: {}",
        metadata.format,
        metadata.mode,
        timestamps,
        metadata.records,
        humansize::format_size(metadata.size, humansize::BINARY),
        modified
    )
}
