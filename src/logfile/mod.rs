//! Access to an execution log on disk.
//!
//! The file is segmented into records once, on open. Only the position of
//! each record is kept; record bytes are read back on demand through a
//! [`RecordReader`].
//!
//! # Structure
//!
//! - `reader` - the [`RecordReader`] contract and its file-backed reader
//! - `metadata` - format, mode and timestamp detection
//! - `testcase` - test-case spans

mod metadata;
mod reader;
mod testcase;

pub use metadata::LogMetadata;
pub use reader::{LogFileReader, RawRecord, RecordReader};
pub use testcase::{extract_test_cases, TestCase};

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Position of one record in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSpan {
    pub record_number: usize,
    pub offset: u64,
    /// Bytes up to the end of the record's last line, terminator excluded
    pub length: usize,
}

/// A segmented log file.
#[derive(Debug, Clone)]
pub struct LogFile {
    path: PathBuf,
    size: u64,
    modified: Option<SystemTime>,
    spans: Vec<RecordSpan>,
}

/// Length of `line` without its `\n` / `\r\n` terminator.
fn content_len(line: &[u8]) -> usize {
    let mut end = line.len();
    while end > 0 && matches!(line[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    end
}

/// Split a log into records.
///
/// A record starts at a line whose first byte is an ASCII digit (the
/// timestamp). Any other non-empty line continues the previous record.
/// Lines before the first record are skipped.
pub fn segment<R: BufRead>(mut input: R) -> io::Result<Vec<RecordSpan>> {
    let mut spans: Vec<RecordSpan> = Vec::new();
    let mut line = Vec::new();
    let mut offset = 0u64;

    loop {
        line.clear();
        let read = input.read_until(b'\n', &mut line)?;
        if read == 0 {
            break;
        }
        let len = content_len(&line);

        if line.first().is_some_and(u8::is_ascii_digit) {
            spans.push(RecordSpan {
                record_number: spans.len(),
                offset,
                length: len,
            });
        } else if len > 0 {
            if let Some(current) = spans.last_mut() {
                current.length = (offset - current.offset) as usize + len;
            }
        }
        offset += read as u64;
    }
    Ok(spans)
}

impl LogFile {
    /// Open and segment `path`.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let file_meta = file.metadata()?;
        let spans = segment(BufReader::new(file))?;
        debug!(path = %path.display(), records = spans.len(), "segmented log file");

        Ok(Self {
            path,
            size: file_meta.len(),
            modified: file_meta.modified().ok(),
            spans,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without extension, used to name a log without test cases.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "log".to_string())
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn record_count(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[RecordSpan] {
        &self.spans
    }

    pub fn span(&self, record_number: usize) -> Option<&RecordSpan> {
        self.spans.get(record_number)
    }

    /// Open a reader positioned at the first record.
    pub fn reader(&self) -> io::Result<LogFileReader<'_>> {
        LogFileReader::open(&self.path, &self.spans)
    }
}
