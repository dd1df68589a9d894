//! Phase 1: the forward indexing pass.
//!
//! All scan-local state lives in [`ScanState`], folded over the records by
//! [`index_records`]. Nothing here touches the [`Parser`](super::Parser), so
//! the pass can be driven and tested on its own.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

use super::error::{ScanError, ScanStatus};
use crate::analyser::phrases::DYNAMIC_ERROR;
use crate::analyser::{Classification, MessageAnalyser};
use crate::logfile::RecordReader;
use crate::progress::ProgressMonitor;
use crate::record::{ConnectedRecord, LogRecord, RecordParser};
use crate::timeline::component::{HC_REF, MTC_REF, SYSTEM_REF};
use crate::timeline::{
    ComponentRegistry, Counters, Event, EventFactory, EventKind, FilterConfiguration,
    Preferences,
};

/// Whether `record` may explain a later failing verdict.
pub fn is_causal(record: &LogRecord) -> bool {
    record.category() == Some("ERROR")
        || record.message.to_ascii_lowercase().contains(DYNAMIC_ERROR)
}

/// Everything phase 1 produces for one test case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    /// Record numbers of the events kept, strictly increasing
    pub index: Vec<usize>,
    pub counters: Counters,
    pub components: ComponentRegistry,
    /// Causal records of failing verdicts, keyed by the verdict's record
    pub connected: BTreeMap<usize, Vec<ConnectedRecord>>,
    /// Synthetic creates that open the timeline
    pub prologue: Vec<Event>,
    /// Synthetic terminates that close the timeline
    pub epilogue: Vec<Event>,
    pub status: ScanStatus,
}

/// Accumulator of the forward pass.
#[derive(Debug, Default)]
pub struct ScanState {
    index: Vec<usize>,
    counters: Counters,
    components: ComponentRegistry,
    /// Created and not yet terminated PTCs
    living: BTreeSet<String>,
    /// Causal records since the last verdict
    causal: Vec<ConnectedRecord>,
    connected: BTreeMap<usize, Vec<ConnectedRecord>>,
    first: Option<(usize, String)>,
    last: Option<(usize, String)>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the state.
    pub fn step(
        &mut self,
        record: &LogRecord,
        analyser: &mut MessageAnalyser,
        prefs: &Preferences,
        filter: &FilterConfiguration,
    ) {
        if self.first.is_none() {
            self.first = Some((record.record_number, record.timestamp.clone()));
        }
        self.last = Some((record.record_number, record.timestamp.clone()));

        let classification = analyser.classify(&record.message);
        let actor = record.component_ref.as_deref().unwrap_or(MTC_REF);

        match &classification {
            Classification::Setverdict(verdict) => {
                let snapshot = std::mem::take(&mut self.causal);
                if verdict.is_failure() {
                    self.connected.insert(record.record_number, snapshot);
                }
                self.components.set_verdict(actor, *verdict);
            }
            _ if is_causal(record) => self.causal.push(record.connected()),
            _ => {}
        }

        match &classification {
            Classification::ComponentCreation(created) => {
                self.components
                    .create(&created.reference, created.alias.clone());
                self.living.insert(created.reference.clone());
            }
            Classification::ComponentTermination(verdict) => {
                self.living.remove(actor);
                if let Some(verdict) = verdict {
                    self.components.set_verdict(actor, *verdict);
                }
            }
            Classification::PortMapping(link) => {
                let owner = link.local.as_deref().unwrap_or(actor);
                self.components.map_port(owner, &link.port);
            }
            Classification::PortUnmapping(link) => {
                let owner = link.local.as_deref().unwrap_or(actor);
                self.components.unmap_port(owner, &link.port);
            }
            _ => {}
        }

        if classification.is_silent()
            && (analyser.is_system_boundary() || !prefs.accepts_silent(record))
        {
            return;
        }
        let event = EventFactory::new().from_record(record, &classification);
        if filter.accepts(&event, &self.components) {
            trace!(record = record.record_number, kind = %event.kind, "indexed");
            self.index.push(record.record_number);
            self.counters.increment(event.kind);
        }
    }

    /// Close the pass and add the boundary events.
    pub fn finish(self, filter: &FilterConfiguration, status: ScanStatus) -> ScanResult {
        let (first_record, first_time) = self.first.unwrap_or_default();
        let (last_record, last_time) = self.last.unwrap_or_default();

        let prologue = [
            (EventKind::SystemCreate, SYSTEM_REF),
            (EventKind::HcCreate, HC_REF),
            (EventKind::MtcCreate, MTC_REF),
        ]
        .into_iter()
        .map(|(kind, reference)| EventFactory::synthetic(kind, reference, first_record, &first_time))
        .collect();

        let mut epilogue: Vec<Event> = self
            .living
            .iter()
            .filter(|reference| {
                !filter.is_component_ignored(reference, self.components.alias_of(reference))
            })
            .map(|reference| {
                let mut event =
                    EventFactory::synthetic(EventKind::PtcTerminate, reference.as_str(), last_record, &last_time);
                event.verdict = self.components.get(reference).map(|c| c.verdict);
                event
            })
            .collect();
        epilogue.extend(
            [
                (EventKind::MtcTerminate, MTC_REF),
                (EventKind::HcTerminate, HC_REF),
                (EventKind::SystemTerminate, SYSTEM_REF),
            ]
            .into_iter()
            .map(|(kind, reference)| {
                EventFactory::synthetic(kind, reference, last_record, &last_time)
            }),
        );

        ScanResult {
            index: self.index,
            counters: self.counters,
            components: self.components,
            connected: self.connected,
            prologue,
            epilogue,
            status,
        }
    }
}

/// Run phase 1 over `records` (inclusive) of `reader`.
///
/// Cancellation is polled before each record; a canceled pass returns what
/// it accumulated with [`ScanStatus::Canceled`].
///
/// # Errors
///
/// The first malformed record aborts the pass with [`ScanError::Record`];
/// read failures abort with [`ScanError::Io`].
pub fn index_records<R: RecordReader>(
    reader: &mut R,
    first: usize,
    last: usize,
    analyser: &mut MessageAnalyser,
    prefs: &Preferences,
    filter: &FilterConfiguration,
    progress: &dyn ProgressMonitor,
) -> Result<ScanResult, ScanError> {
    let records = reader.size();
    if last >= records {
        return Err(ScanError::RecordOutOfRange {
            record_number: last,
            records,
        });
    }

    let parser = RecordParser::new();
    let mut state = ScanState::new();
    let mut status = ScanStatus::Completed;

    progress.begin_task("Indexing", last.saturating_sub(first) + 1);
    reader.set_current_record(first)?;
    for _ in first..=last {
        if progress.is_canceled() {
            status = ScanStatus::Canceled;
            break;
        }
        let raw = reader.next_record()?;
        let record = parser
            .parse(&raw.bytes, raw.offset, raw.record_number)
            .map_err(|e| ScanError::record(raw.record_number, raw.offset, e))?;
        state.step(&record, analyser, prefs, filter);
        progress.worked(1);
    }
    progress.done();

    let result = state.finish(filter, status);
    debug!(
        first,
        last,
        indexed = result.index.len(),
        ?status,
        "indexing pass finished"
    );
    Ok(result)
}
