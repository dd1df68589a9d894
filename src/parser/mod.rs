//! Two-phase parsing of one test case.
//!
//! Phase 1 ([`Parser::pre_parse`]) walks every record of the test case once
//! and keeps only the record numbers worth drawing, per-kind counters and
//! the component registry. Phase 2 ([`Parser::parse_region`]) rereads and
//! fully decodes any window of that index on demand, so a host can page
//! through an arbitrarily large log without holding every event in memory.
//!
//! ```text
//! Uninitialized --pre_parse--> Indexed --parse_region--> Indexed
//!       ^                         |
//!       +------ pre_parse error --+
//! ```
//!
//! # Structure
//!
//! - `error` - [`ScanError`] and [`ScanStatus`]
//! - `scan` - the phase 1 fold ([`ScanState`], [`index_records`])
//! - `region` - phase 2 decoding ([`Region`], [`decode_region`])

mod error;
mod region;
mod scan;

pub use error::{ScanError, ScanStatus};
pub use region::{decode_region, Region};
pub use scan::{index_records, is_causal, ScanResult, ScanState};

use crate::analyser::MessageAnalyser;
use crate::decipher::Decipherer;
use crate::logfile::{LogFile, LogMetadata, RecordReader, TestCase};
use crate::progress::ProgressMonitor;
use crate::timeline::{ComponentRegistry, Counters, FilterConfiguration, Preferences};

#[derive(Debug)]
enum ParserState {
    Uninitialized,
    Indexed(ScanResult),
}

/// Parser of one test case of one log file.
///
/// The index is rebuilt wholesale by every [`pre_parse`](Self::pre_parse);
/// call it again whenever the filter or preferences change.
pub struct Parser<'f> {
    log: &'f LogFile,
    test_case: TestCase,
    analyser: MessageAnalyser,
    state: ParserState,
}

impl<'f> Parser<'f> {
    pub fn new(log: &'f LogFile, metadata: &LogMetadata, test_case: TestCase) -> Self {
        Self {
            log,
            test_case,
            analyser: MessageAnalyser::new(metadata.format, metadata.mode),
            state: ParserState::Uninitialized,
        }
    }

    pub fn test_case(&self) -> &TestCase {
        &self.test_case
    }

    /// Phase 1: index the test case.
    ///
    /// A canceled pass still leaves the parser indexed with the partial
    /// result; check [`ScanResult::status`].
    ///
    /// # Errors
    ///
    /// Any malformed record or read failure aborts the pass and leaves the
    /// parser uninitialized.
    pub fn pre_parse(
        &mut self,
        prefs: &Preferences,
        filter: &FilterConfiguration,
        progress: &dyn ProgressMonitor,
    ) -> Result<&ScanResult, ScanError> {
        self.state = ParserState::Uninitialized;

        let log = self.log;
        let mut reader = log.reader()?;
        let result = index_records(
            &mut reader,
            self.test_case.start_record,
            self.test_case.end_record,
            &mut self.analyser,
            prefs,
            filter,
            progress,
        );
        reader.close();

        self.state = ParserState::Indexed(result?);
        self.scan().ok_or(ScanError::NotIndexed)
    }

    /// Phase 2: decode index positions `start..=end`.
    ///
    /// # Errors
    ///
    /// [`ScanError::NotIndexed`] before a successful
    /// [`pre_parse`](Self::pre_parse), [`ScanError::RegionOutOfBounds`] for
    /// a window outside the index, and record or read failures.
    pub fn parse_region(
        &mut self,
        start: usize,
        end: usize,
        decipherer: Option<&mut Decipherer>,
        progress: &dyn ProgressMonitor,
    ) -> Result<Region, ScanError> {
        let ParserState::Indexed(scan) = &self.state else {
            return Err(ScanError::NotIndexed);
        };
        let log = self.log;
        let mut reader = log.reader()?;
        let region = decode_region(
            &mut reader,
            scan,
            start,
            end,
            &mut self.analyser,
            decipherer,
            progress,
        );
        reader.close();
        region
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self.state, ParserState::Indexed(_))
    }

    pub fn scan(&self) -> Option<&ScanResult> {
        match &self.state {
            ParserState::Indexed(scan) => Some(scan),
            ParserState::Uninitialized => None,
        }
    }

    /// Indexed record numbers; empty before indexing.
    pub fn index(&self) -> &[usize] {
        self.scan().map(|s| s.index.as_slice()).unwrap_or(&[])
    }

    pub fn counters(&self) -> Option<&Counters> {
        self.scan().map(|s| &s.counters)
    }

    pub fn components(&self) -> Option<&ComponentRegistry> {
        self.scan().map(|s| &s.components)
    }
}
