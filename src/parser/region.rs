//! Phase 2: decoding a window of the index.

use serde::Serialize;
use tracing::debug;

use super::error::{ScanError, ScanStatus};
use super::scan::ScanResult;
use crate::analyser::MessageAnalyser;
use crate::decipher::Decipherer;
use crate::logfile::RecordReader;
use crate::progress::ProgressMonitor;
use crate::record::RecordParser;
use crate::timeline::{Event, EventFactory};

/// Fully decoded events of one index window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    /// Index positions `start..=end` this region covers
    pub start: usize,
    pub end: usize,
    pub prologue: Vec<Event>,
    /// One event per index entry in the window, in index order
    pub events: Vec<Event>,
    pub epilogue: Vec<Event>,
    pub status: ScanStatus,
}

impl Region {
    /// Prologue, events and epilogue in drawing order.
    pub fn timeline(&self) -> impl Iterator<Item = &Event> {
        self.prologue
            .iter()
            .chain(self.events.iter())
            .chain(self.epilogue.iter())
    }
}

/// Decode index positions `start..=end` of `scan`.
///
/// Every record is reparsed and reclassified from the file; nothing from
/// phase 1 is reused except the index, the boundary events and the causal
/// records of failing verdicts.
pub fn decode_region<R: RecordReader>(
    reader: &mut R,
    scan: &ScanResult,
    start: usize,
    end: usize,
    analyser: &mut MessageAnalyser,
    decipherer: Option<&mut Decipherer>,
    progress: &dyn ProgressMonitor,
) -> Result<Region, ScanError> {
    let len = scan.index.len();
    if start > end || end >= len {
        return Err(ScanError::RegionOutOfBounds { start, end, len });
    }

    let parser = RecordParser::new();
    let mut factory = match decipherer {
        Some(decipherer) => EventFactory::with_decipherer(decipherer),
        None => EventFactory::new(),
    };
    let mut events = Vec::with_capacity(end - start + 1);
    let mut status = ScanStatus::Completed;

    progress.begin_task("Decoding", end - start + 1);
    for &record_number in &scan.index[start..=end] {
        if progress.is_canceled() {
            status = ScanStatus::Canceled;
            break;
        }
        reader.set_current_record(record_number)?;
        let raw = reader.next_record()?;
        let record = parser
            .parse(&raw.bytes, raw.offset, raw.record_number)
            .map_err(|e| ScanError::record(raw.record_number, raw.offset, e))?;

        let classification = analyser.classify(&record.message);
        let mut event = factory.from_record(&record, &classification);
        if let Some(connected) = scan.connected.get(&record_number) {
            event.connected_records = Some(connected.clone());
        }
        events.push(event);
        progress.worked(1);
    }
    progress.done();
    debug!(start, end, decoded = events.len(), ?status, "decoded region");

    Ok(Region {
        start,
        end,
        prologue: scan.prologue.clone(),
        events,
        epilogue: scan.epilogue.clone(),
        status,
    })
}
