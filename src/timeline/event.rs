//! Display-ready events consumed by the diagram renderer.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::verdict::Verdict;
use crate::record::ConnectedRecord;

// ============================================================================
// Event kinds
// ============================================================================

/// Category tag of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    SystemCreate,
    SystemTerminate,
    HcCreate,
    HcTerminate,
    MtcCreate,
    MtcTerminate,
    MtcDone,
    PtcCreate,
    PtcDone,
    PtcTerminate,
    TcStart,
    TcEnd,
    Send,
    Receive,
    Enqueued,
    Function,
    MappingPort,
    UnmappingPort,
    ConnectingPort,
    DisconnectingPort,
    /// Fail and error verdicts
    Setverdict,
    SetverdictPass,
    SetverdictNone,
    SetverdictInconc,
    SilentEvent,
}

impl EventKind {
    /// Kind of a `setverdict` line carrying `verdict`.
    pub fn for_verdict(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass => EventKind::SetverdictPass,
            Verdict::None => EventKind::SetverdictNone,
            Verdict::Inconc => EventKind::SetverdictInconc,
            Verdict::Fail | Verdict::Error => EventKind::Setverdict,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::SystemCreate => "SYSTEM_CREATE",
            EventKind::SystemTerminate => "SYSTEM_TERMINATE",
            EventKind::HcCreate => "HC_CREATE",
            EventKind::HcTerminate => "HC_TERMINATE",
            EventKind::MtcCreate => "MTC_CREATE",
            EventKind::MtcTerminate => "MTC_TERMINATE",
            EventKind::MtcDone => "MTC_DONE",
            EventKind::PtcCreate => "PTC_CREATE",
            EventKind::PtcDone => "PTC_DONE",
            EventKind::PtcTerminate => "PTC_TERMINATE",
            EventKind::TcStart => "TC_START",
            EventKind::TcEnd => "TC_END",
            EventKind::Send => "SEND",
            EventKind::Receive => "RECEIVE",
            EventKind::Enqueued => "ENQUEUED",
            EventKind::Function => "FUNCTION",
            EventKind::MappingPort => "MAPPING_PORT",
            EventKind::UnmappingPort => "UNMAPPING_PORT",
            EventKind::ConnectingPort => "CONNECTING_PORT",
            EventKind::DisconnectingPort => "DISCONNECTING_PORT",
            EventKind::Setverdict => "SETVERDICT",
            EventKind::SetverdictPass => "SETVERDICT_PASS",
            EventKind::SetverdictNone => "SETVERDICT_NONE",
            EventKind::SetverdictInconc => "SETVERDICT_INCONC",
            EventKind::SilentEvent => "SILENT_EVENT",
        }
    }

    /// Port traffic kinds whose payload can be deciphered.
    pub fn carries_payload(&self) -> bool {
        matches!(
            self,
            EventKind::Send | EventKind::Receive | EventKind::Enqueued
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ============================================================================
// Event
// ============================================================================

/// One classified occurrence on the timeline.
///
/// Non-synthetic events map 1:1 to a log record; synthetic events are the
/// boundary creates/terminates added around a test case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub kind: EventKind,
    pub record_number: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub offset: u64,
    #[serde(skip_serializing_if = "is_zero_len")]
    pub length: usize,
    /// Timestamp text of the source record
    pub time: String,
    /// Component whose lifeline carries the event
    pub reference: String,
    /// Other party (peer of a message, created component's creator, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    /// Message type, function, test case, alias, peer port or silent text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Deciphered display label for port traffic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    /// Error lines that led up to a failing verdict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_records: Option<Vec<ConnectedRecord>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

fn is_zero_len(value: &usize) -> bool {
    *value == 0
}

impl Event {
    /// Bare event of `kind` on `reference`'s lifeline.
    pub fn new(kind: EventKind, reference: impl Into<String>) -> Self {
        Self {
            kind,
            record_number: 0,
            offset: 0,
            length: 0,
            time: String::new(),
            reference: reference.into(),
            target: None,
            port: None,
            name: None,
            label: None,
            verdict: None,
            connected_records: None,
            synthetic: false,
        }
    }

    /// Text shown on the diagram: the deciphered label, else the name.
    pub fn display_name(&self) -> Option<&str> {
        self.label.as_deref().or(self.name.as_deref())
    }
}

// ============================================================================
// Counters
// ============================================================================

/// Per-kind count of indexed events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    counts: BTreeMap<EventKind, usize>,
}

impl Counters {
    pub fn increment(&mut self, kind: EventKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    pub fn get(&self, kind: EventKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EventKind, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }
}
