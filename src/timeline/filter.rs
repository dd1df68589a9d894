//! Scan-time filtering and indexing preferences.
//!
//! Both types are plain serde snapshots: the config layer deserializes them,
//! the scan receives them by reference and never mutates them.

use serde::{Deserialize, Serialize};

use super::component::ComponentRegistry;
use super::event::{Event, EventKind};
use super::verdict::Verdict;
use crate::record::LogRecord;

fn default_true() -> bool {
    true
}

/// Which `setverdict` outcomes are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictVisibility {
    #[serde(default = "default_true")]
    pub pass: bool,
    #[serde(default = "default_true")]
    pub fail: bool,
    #[serde(default = "default_true")]
    pub inconc: bool,
    #[serde(default = "default_true")]
    pub error: bool,
    #[serde(default = "default_true")]
    pub none: bool,
}

impl Default for VerdictVisibility {
    fn default() -> Self {
        Self {
            pass: true,
            fail: true,
            inconc: true,
            error: true,
            none: true,
        }
    }
}

impl VerdictVisibility {
    pub fn shows(&self, verdict: Verdict) -> bool {
        match verdict {
            Verdict::Pass => self.pass,
            Verdict::Fail => self.fail,
            Verdict::Inconc => self.inconc,
            Verdict::Error => self.error,
            Verdict::None => self.none,
        }
    }
}

/// Which port events are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortVisibility {
    #[serde(default = "default_true")]
    pub send: bool,
    #[serde(default = "default_true")]
    pub receive: bool,
    #[serde(default = "default_true")]
    pub enqueued: bool,
    #[serde(default = "default_true")]
    pub mapping: bool,
    #[serde(default = "default_true")]
    pub unmapping: bool,
    #[serde(default = "default_true")]
    pub connecting: bool,
    #[serde(default = "default_true")]
    pub disconnecting: bool,
}

impl Default for PortVisibility {
    fn default() -> Self {
        Self {
            send: true,
            receive: true,
            enqueued: true,
            mapping: true,
            unmapping: true,
            connecting: true,
            disconnecting: true,
        }
    }
}

impl PortVisibility {
    /// Visibility of a port event kind; other kinds are always shown.
    pub fn shows(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Send => self.send,
            EventKind::Receive => self.receive,
            EventKind::Enqueued => self.enqueued,
            EventKind::MappingPort => self.mapping,
            EventKind::UnmappingPort => self.unmapping,
            EventKind::ConnectingPort => self.connecting,
            EventKind::DisconnectingPort => self.disconnecting,
            _ => true,
        }
    }
}

/// Events hidden from the diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfiguration {
    /// Component references or aliases whose events are dropped
    pub ignored_components: Vec<String>,
    /// Message types whose port traffic is dropped
    pub ignored_signals: Vec<String>,
    /// Functions whose start events are dropped
    pub ignored_functions: Vec<String>,
    pub verdicts: VerdictVisibility,
    pub ports: PortVisibility,
}

impl FilterConfiguration {
    pub fn is_component_ignored(&self, reference: &str, alias: Option<&str>) -> bool {
        self.ignored_components
            .iter()
            .any(|ignored| ignored == reference || Some(ignored.as_str()) == alias)
    }

    /// Matches the type as written and without its `@` module marker.
    pub fn is_signal_ignored(&self, message_type: &str) -> bool {
        let trimmed = message_type.trim();
        let stripped = trimmed.trim_start_matches('@');
        self.ignored_signals.iter().any(|ignored| {
            let ignored = ignored.trim();
            ignored == trimmed || ignored.trim_start_matches('@') == stripped
        })
    }

    pub fn is_function_ignored(&self, function: &str) -> bool {
        self.ignored_functions.iter().any(|ignored| ignored == function)
    }

    /// Whether `event` stays on the timeline.
    ///
    /// Synthetic boundary events are never filtered.
    pub fn accepts(&self, event: &Event, components: &ComponentRegistry) -> bool {
        if event.synthetic {
            return true;
        }
        if !self.ports.shows(event.kind) {
            return false;
        }
        if let Some(verdict) = event.verdict {
            let is_setverdict = matches!(
                event.kind,
                EventKind::Setverdict
                    | EventKind::SetverdictPass
                    | EventKind::SetverdictInconc
                    | EventKind::SetverdictNone
            );
            if is_setverdict && !self.verdicts.shows(verdict) {
                return false;
            }
        }

        let ignored = |reference: &str| {
            self.is_component_ignored(reference, components.alias_of(reference))
        };
        if ignored(&event.reference) || event.target.as_deref().is_some_and(ignored) {
            return false;
        }

        match (event.kind, event.name.as_deref()) {
            (kind, Some(message_type)) if kind.carries_payload() => {
                !self.is_signal_ignored(message_type)
            }
            (EventKind::Function, Some(function)) => !self.is_function_ignored(function),
            _ => true,
        }
    }
}

/// Indexing preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Event-type selectors (`ERROR`, `PORTEVENT_STATE`) whose unclassified
    /// records are indexed as silent events
    pub silent_events: Vec<String>,
    /// Resolve display labels for port traffic
    pub decipher: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            silent_events: ["ERROR", "WARNING", "USER", "PORTEVENT_STATE"]
                .into_iter()
                .map(String::from)
                .collect(),
            decipher: true,
        }
    }
}

impl Preferences {
    /// Whether an unclassified record is indexed; untyped records never are.
    pub fn accepts_silent(&self, record: &LogRecord) -> bool {
        record.event_type.is_some_and(|tag| {
            self.silent_events
                .iter()
                .any(|selector| tag.matches_selector(selector))
        })
    }
}
