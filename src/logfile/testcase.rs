//! Test-case spans of a log.

use serde::Serialize;
use tracing::{debug, warn};

use super::{LogFile, RecordReader};
use crate::analyser::{Classification, MessageAnalyser};
use crate::parser::{ScanError, ScanStatus};
use crate::progress::ProgressMonitor;
use crate::record::RecordParser;
use crate::timeline::Verdict;

/// A test case and the records it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub name: String,
    /// Final verdict, unknown for a truncated test case
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    pub start_record: usize,
    /// Last record, inclusive
    pub end_record: usize,
}

impl TestCase {
    /// A test case covering the whole log.
    pub fn whole_log(log: &LogFile) -> Self {
        Self {
            name: log.stem(),
            verdict: None,
            start_record: 0,
            end_record: log.record_count().saturating_sub(1),
        }
    }

    pub fn record_count(&self) -> usize {
        self.end_record - self.start_record + 1
    }
}

/// Find every test case in `log`.
///
/// A test case runs from its start line to its end line. One left open by
/// the next start line or by the end of the log is closed right before it.
/// A log with no test-case lines yields one test case spanning the file.
pub fn extract_test_cases(
    log: &LogFile,
    analyser: &mut MessageAnalyser,
    progress: &dyn ProgressMonitor,
) -> Result<(Vec<TestCase>, ScanStatus), ScanError> {
    let parser = RecordParser::new();
    let mut reader = log.reader()?;
    let mut test_cases = Vec::new();
    let mut open: Option<TestCase> = None;
    let mut status = ScanStatus::Completed;

    progress.begin_task("Finding test cases", reader.size());
    while reader.has_next_record() {
        if progress.is_canceled() {
            status = ScanStatus::Canceled;
            break;
        }
        let raw = reader.next_record()?;
        let record = parser
            .parse(&raw.bytes, raw.offset, raw.record_number)
            .map_err(|e| ScanError::record(raw.record_number, raw.offset, e))?;

        match analyser.classify(&record.message) {
            Classification::TestcaseStart(name) => {
                if let Some(mut unfinished) = open.take() {
                    warn!(test_case = %unfinished.name, "test case has no end line");
                    unfinished.end_record = record.record_number.saturating_sub(1);
                    test_cases.push(unfinished);
                }
                open = Some(TestCase {
                    name,
                    verdict: None,
                    start_record: record.record_number,
                    end_record: record.record_number,
                });
            }
            Classification::TestcaseEnd(result) => match open.take() {
                Some(mut test_case) => {
                    test_case.verdict = result.verdict;
                    test_case.end_record = record.record_number;
                    test_cases.push(test_case);
                }
                None => warn!(test_case = %result.name, "test case end without a start"),
            },
            _ => {}
        }
        progress.worked(1);
    }
    reader.close();
    progress.done();

    if let Some(mut unfinished) = open {
        unfinished.end_record = log.record_count().saturating_sub(1);
        test_cases.push(unfinished);
    }
    if test_cases.is_empty() && status == ScanStatus::Completed && !log.is_empty() {
        test_cases.push(TestCase::whole_log(log));
    }
    debug!(count = test_cases.len(), "extracted test cases");
    Ok((test_cases, status))
}
