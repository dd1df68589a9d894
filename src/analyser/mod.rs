//! Message classification for the two historic log-text formats.
//!
//! A [`MessageAnalyser`] is picked once per log file from its
//! [`LogFormat`] and [`ExecutionMode`]. Both are closed sets: the format
//! selects one of two static phrase tables, the mode one of two pairs of
//! system start/stop literals. There is no per-record dispatch beyond that.
//!
//! # Usage
//!
//! ```
//! use seqlog::analyser::{Classification, ExecutionMode, LogFormat, MessageAnalyser};
//!
//! let mut analyser = MessageAnalyser::new(LogFormat::Format1, ExecutionMode::Parallel);
//! match analyser.classify("Sent on mtc:Port1 to 3:Port2 MyType: \"abc\"") {
//!     Classification::Send(message) => {
//!         assert_eq!(message.local.as_deref(), Some("mtc"));
//!         assert_eq!(message.peer.as_deref(), Some("3"));
//!         assert_eq!(message.message_type.as_deref(), Some("MyType"));
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! # Structure
//!
//! - `phrases` - the literal anchor tables
//! - `component_ref` - normalization of `name(ref)`, `ref:port` and bare tokens
//! - `extract` - extractors slicing fields around the anchors
//! - `silent` - fallback patterns for unclassified port wording
//! - `classify` - the fixed-priority classification

mod classify;
pub mod component_ref;
mod extract;
pub mod phrases;
mod silent;

pub use classify::Classification;
pub use component_ref::get_component_ref;
pub use extract::{ComponentInfo, FunctionStart, PortLink, PortMessage, TestcaseResult};
pub use silent::SilentInfo;

use serde::{Deserialize, Serialize};
use std::fmt;

use phrases::{FormatPhrases, ModePhrases, Enclosed, PortPhrase};

// ============================================================================
// Format and mode
// ============================================================================

/// Historic log-text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Format1,
    Format2,
}

impl LogFormat {
    pub fn phrases(&self) -> &'static FormatPhrases {
        match self {
            LogFormat::Format1 => &phrases::FORMAT1,
            LogFormat::Format2 => &phrases::FORMAT2,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrases().name)
    }
}

/// How the test suite was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Host controller, MTC and PTCs in separate processes
    Parallel,
    /// Everything inside one executor process
    Single,
}

impl ExecutionMode {
    pub fn phrases(&self) -> &'static ModePhrases {
        match self {
            ExecutionMode::Parallel => &phrases::PARALLEL,
            ExecutionMode::Single => &phrases::SINGLE,
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrases().name)
    }
}

// ============================================================================
// Text slicing helpers
// ============================================================================

/// Text after the first occurrence of `anchor`.
pub(crate) fn after<'m>(text: &'m str, anchor: &str) -> Option<&'m str> {
    text.find(anchor).map(|at| &text[at + anchor.len()..])
}

/// Text between `prefix` and the next `suffix` after it.
pub(crate) fn between<'m>(text: &'m str, prefix: &str, suffix: &str) -> Option<&'m str> {
    let rest = after(text, prefix)?;
    rest.find(suffix).map(|at| &rest[..at])
}

/// `between`, restricted to a single non-empty token.
pub(crate) fn token_between<'m>(text: &'m str, prefix: &str, suffix: &str) -> Option<&'m str> {
    between(text, prefix, suffix).filter(|t| !t.is_empty() && !t.contains(char::is_whitespace))
}

// ============================================================================
// MessageAnalyser
// ============================================================================

/// Classifier for one message at a time.
///
/// Call [`set_message`](Self::set_message), then query the predicates and
/// their paired extractors; or use [`classify`](Self::classify) to run the
/// predicates in their fixed priority.
#[derive(Debug, Clone)]
pub struct MessageAnalyser {
    format: LogFormat,
    mode: ExecutionMode,
    message: String,
}

impl MessageAnalyser {
    pub fn new(format: LogFormat, mode: ExecutionMode) -> Self {
        Self {
            format,
            mode,
            message: String::new(),
        }
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn set_message(&mut self, text: &str) {
        self.message.clear();
        self.message.push_str(text);
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn phrases(&self) -> &'static FormatPhrases {
        self.format.phrases()
    }

    fn has(&self, anchor: &str) -> bool {
        self.message.contains(anchor)
    }

    fn has_any(&self, anchors: &[&str]) -> bool {
        anchors.iter().any(|a| self.has(a))
    }

    fn has_in_order(&self, first: &str, second: &str) -> bool {
        after(&self.message, first).is_some_and(|rest| rest.contains(second))
    }

    fn has_port_phrase(&self, phrase: PortPhrase) -> bool {
        token_between(&self.message, phrase.prefix, phrase.infix).is_some()
    }

    fn has_enclosed(&self, enclosed: Enclosed) -> bool {
        token_between(&self.message, enclosed.prefix, enclosed.suffix).is_some()
    }

    pub fn is_send(&self) -> bool {
        let p = self.phrases();
        self.has_in_order(p.send, p.send_to)
    }

    pub fn is_receive(&self) -> bool {
        let p = self.phrases();
        self.has_in_order(p.receive, p.receive_from)
    }

    pub fn is_enqueued(&self) -> bool {
        let p = self.phrases();
        self.has_in_order(p.enqueued, p.enqueued_from)
    }

    pub fn is_receive_operation(&self) -> bool {
        let p = self.phrases();
        p.receive_operations
            .iter()
            .any(|op| self.has_in_order(op, p.operation_succeeded))
    }

    pub fn is_start_function(&self) -> bool {
        let p = self.phrases();
        self.has_in_order(p.start_function, p.start_function_on)
    }

    pub fn is_component_creation(&self) -> bool {
        self.has(self.phrases().component_creation)
    }

    pub fn is_component_done(&self) -> bool {
        self.has_enclosed(self.phrases().component_done)
    }

    pub fn is_component_termination(&self) -> bool {
        self.has(self.phrases().component_termination)
    }

    pub fn is_port_mapping(&self) -> bool {
        self.has_port_phrase(self.phrases().port_mapping)
    }

    pub fn is_port_unmapping(&self) -> bool {
        self.has_port_phrase(self.phrases().port_unmapping)
    }

    pub fn is_port_connection(&self) -> bool {
        self.has_port_phrase(self.phrases().port_connection)
    }

    pub fn is_port_disconnection(&self) -> bool {
        self.has_port_phrase(self.phrases().port_disconnection)
    }

    pub fn is_testcase_start(&self) -> bool {
        self.has_enclosed(self.phrases().testcase_start)
    }

    pub fn is_testcase_end(&self) -> bool {
        self.has_enclosed(self.phrases().testcase_end)
    }

    pub fn is_mtc_creation(&self) -> bool {
        self.has_any(self.phrases().mtc_creation)
    }

    pub fn is_mtc_termination(&self) -> bool {
        self.has_any(self.phrases().mtc_termination)
    }

    pub fn is_mtc_done(&self) -> bool {
        self.has_any(self.phrases().mtc_done)
    }

    pub fn is_setverdict(&self) -> bool {
        self.setverdict().is_some()
    }

    /// Whether one of the silent-event patterns matches.
    pub fn is_silent_event(&self) -> bool {
        silent::match_silent(&self.message).is_some()
    }

    /// Host controller / executor start line of the current mode.
    pub fn is_system_creation(&self) -> bool {
        self.has(self.mode.phrases().system_start)
    }

    /// Host controller / executor stop line of the current mode.
    pub fn is_system_termination(&self) -> bool {
        self.has(self.mode.phrases().system_stop)
    }

    /// Start or stop line of the current mode. These are drawn by the
    /// synthetic boundary events and never indexed themselves.
    pub fn is_system_boundary(&self) -> bool {
        self.is_system_creation() || self.is_system_termination()
    }
}
