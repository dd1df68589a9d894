//! Record-level reading of a segmented log file.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::RecordSpan;

/// Bytes of one record together with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub record_number: usize,
    pub offset: u64,
    pub bytes: Vec<u8>,
}

/// Sequential reader over the records of a log, with seeking by record
/// number.
pub trait RecordReader {
    /// Whether [`next_record`](Self::next_record) has a record to return.
    fn has_next_record(&self) -> bool;

    /// Read the current record and advance.
    fn next_record(&mut self) -> io::Result<RawRecord>;

    /// Position the reader so the next read returns `record_number`.
    fn set_current_record(&mut self, record_number: usize) -> io::Result<()>;

    /// Total number of records.
    fn size(&self) -> usize;

    /// Release the underlying file. Reads after closing fail.
    fn close(&mut self);
}

/// [`RecordReader`] over a file on disk.
///
/// The file handle is released by [`close`](RecordReader::close) or when the
/// reader is dropped, whichever comes first.
pub struct LogFileReader<'f> {
    spans: &'f [RecordSpan],
    file: Option<BufReader<File>>,
    /// Next record to return
    current: usize,
    /// Byte position of the underlying reader
    position: u64,
}

impl<'f> LogFileReader<'f> {
    pub fn open(path: &Path, spans: &'f [RecordSpan]) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            spans,
            file: Some(BufReader::new(file)),
            current: 0,
            position: 0,
        })
    }

    /// Number of the record the next read returns.
    pub fn current_record(&self) -> usize {
        self.current
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "log reader is closed")
}

impl RecordReader for LogFileReader<'_> {
    fn has_next_record(&self) -> bool {
        self.file.is_some() && self.current < self.spans.len()
    }

    fn next_record(&mut self) -> io::Result<RawRecord> {
        let file = self.file.as_mut().ok_or_else(closed)?;
        let span = *self.spans.get(self.current).ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no record left to read")
        })?;

        if span.offset != self.position {
            // Stay inside the buffer for the short hops of a forward scan.
            let delta = span.offset as i64 - self.position as i64;
            if delta > 0 && delta < 8192 {
                file.seek_relative(delta)?;
            } else {
                file.seek(SeekFrom::Start(span.offset))?;
            }
        }

        let mut bytes = vec![0u8; span.length];
        file.read_exact(&mut bytes)?;
        self.position = span.offset + span.length as u64;
        self.current += 1;

        Ok(RawRecord {
            record_number: span.record_number,
            offset: span.offset,
            bytes,
        })
    }

    fn set_current_record(&mut self, record_number: usize) -> io::Result<()> {
        if self.file.is_none() {
            return Err(closed());
        }
        if record_number >= self.spans.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "record {} is beyond the last record {}",
                    record_number,
                    self.spans.len()
                ),
            ));
        }
        self.current = record_number;
        Ok(())
    }

    fn size(&self) -> usize {
        self.spans.len()
    }

    fn close(&mut self) {
        self.file = None;
    }
}

impl Drop for LogFileReader<'_> {
    fn drop(&mut self) {
        self.close();
    }
}
