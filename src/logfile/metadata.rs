//! Detection of the log-text format and execution mode.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::io;
use tracing::debug;

use super::{LogFile, RecordReader};
use crate::analyser::phrases::{FORMAT1, FORMAT2, SINGLE};
use crate::analyser::{ExecutionMode, LogFormat};
use crate::record::{RecordParser, TimestampFormat};

/// Records inspected when guessing format and mode.
const SAMPLE_RECORDS: usize = 2000;

/// What is known about a log before any test case is scanned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogMetadata {
    pub format: LogFormat,
    pub mode: ExecutionMode,
    /// Timestamp layout of the first record, if it parses
    pub timestamp_format: Option<TimestampFormat>,
    pub records: usize,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
}

impl LogMetadata {
    /// Inspect the first records of `log`.
    ///
    /// The format with more hits on its distinctive wording wins, ties going
    /// to the current format. The mode is single as soon as a single-mode
    /// executor line shows up.
    pub fn detect(log: &LogFile) -> io::Result<Self> {
        let mut reader = log.reader()?;
        let parser = RecordParser::new();
        let mut timestamp_format = None;
        let mut format1_hits = 0usize;
        let mut format2_hits = 0usize;
        let mut single = false;

        while reader.has_next_record() && reader.current_record() < SAMPLE_RECORDS {
            let raw = reader.next_record()?;
            if raw.record_number == 0 {
                timestamp_format = parser
                    .parse(&raw.bytes, raw.offset, raw.record_number)
                    .ok()
                    .map(|record| record.timestamp_format);
            }

            let text = String::from_utf8_lossy(&raw.bytes);
            format1_hits += FORMAT1.distinctive.iter().filter(|p| text.contains(*p)).count();
            format2_hits += FORMAT2.distinctive.iter().filter(|p| text.contains(*p)).count();
            single |= text.contains(SINGLE.system_start) || text.contains(SINGLE.system_stop);
        }
        reader.close();

        let format = if format1_hits > format2_hits {
            LogFormat::Format1
        } else {
            LogFormat::Format2
        };
        let mode = if single {
            ExecutionMode::Single
        } else {
            ExecutionMode::Parallel
        };
        debug!(%format, %mode, format1_hits, format2_hits, "detected log metadata");

        Ok(Self {
            format,
            mode,
            timestamp_format,
            records: log.record_count(),
            size: log.size(),
            modified: log.modified().map(DateTime::<Local>::from),
        })
    }

    /// Replace detected values with configured ones.
    pub fn with_overrides(mut self, format: Option<LogFormat>, mode: Option<ExecutionMode>) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        if let Some(mode) = mode {
            self.mode = mode;
        }
        self
    }
}
