//! Scan failures and outcomes.

use crate::record::RecordParseError;

/// Error that aborts a scan.
///
/// A malformed record is never skipped: component lifecycle tracking needs
/// every record in order.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("could not parse log: record {record_number}: {source}, file offset {file_offset}")]
    Record {
        record_number: usize,
        /// Absolute byte offset of the offending token
        file_offset: u64,
        #[source]
        source: RecordParseError,
    },

    #[error("could not read log: {0}")]
    Io(#[from] std::io::Error),

    #[error("test case has not been indexed yet")]
    NotIndexed,

    #[error("region {start}..={end} is outside the index of {len} entries")]
    RegionOutOfBounds { start: usize, end: usize, len: usize },

    #[error("record {record_number} is beyond the end of the log ({records} records)")]
    RecordOutOfRange { record_number: usize, records: usize },
}

impl ScanError {
    /// Wrap a record parse failure with the record's position in the file.
    pub fn record(record_number: usize, record_offset: u64, source: RecordParseError) -> Self {
        ScanError::Record {
            record_number,
            file_offset: record_offset + source.offset() as u64,
            source,
        }
    }

    /// File offset of the offending bytes, for record failures.
    pub fn file_offset(&self) -> Option<u64> {
        match self {
            ScanError::Record { file_offset, .. } => Some(*file_offset),
            _ => None,
        }
    }
}

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    #[default]
    Completed,
    /// Stopped early on request; results are partial
    Canceled,
}

impl ScanStatus {
    pub fn is_canceled(&self) -> bool {
        matches!(self, ScanStatus::Canceled)
    }
}
