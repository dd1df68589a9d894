//! Field model of a single log record.

use serde::Serialize;
use std::fmt;

use super::event_type::EventTypeTag;

/// Timestamp layout of a record.
///
/// Selected by the character that follows the leading digit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFormat {
    /// `hh:mm:ss.ffffff`
    Time,
    /// `yyyy/Mon/dd hh:mm:ss.ffffff`
    DateTime,
    /// `sssss.ffffff` (seconds since the epoch)
    Seconds,
}

impl TimestampFormat {
    /// Pick the format from the separator after the first digit run.
    pub fn from_separator(separator: u8) -> Option<Self> {
        match separator {
            b':' => Some(TimestampFormat::Time),
            b'/' => Some(TimestampFormat::DateTime),
            b'.' => Some(TimestampFormat::Seconds),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampFormat::Time => "time",
            TimestampFormat::DateTime => "datetime",
            TimestampFormat::Seconds => "seconds",
        }
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed record of the execution log.
///
/// Records are transient: they are built for classification and dropped
/// right after. Only the record number, offset and length survive in the
/// index or in [`ConnectedRecord`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Sequential number of the record in the file (0-based)
    pub record_number: usize,
    /// Byte offset of the record in the file
    pub offset: u64,
    /// Length of the record in bytes, line terminator excluded
    pub length: usize,
    /// Timestamp text as written in the log
    pub timestamp: String,
    pub timestamp_format: TimestampFormat,
    /// Component reference (`mtc`, `hc`, `system` or a number)
    pub component_ref: Option<String>,
    pub event_type: Option<EventTypeTag>,
    /// Source location (`Module.ttcn:42(function:f)`) or `-`
    pub source_info: Option<String>,
    /// Message body, verbatim
    pub message: String,
}

impl LogRecord {
    /// Serialize the record back into its one-line form.
    ///
    /// Present fields are joined with single spaces. Reparsing the output
    /// yields the same field tuple as long as the message does not itself
    /// start with something that looks like an optional field.
    pub fn to_line(&self) -> String {
        let mut line = self.timestamp.clone();
        if let Some(ref component_ref) = self.component_ref {
            line.push(' ');
            line.push_str(component_ref);
        }
        if let Some(ref event_type) = self.event_type {
            line.push(' ');
            line.push_str(&event_type.to_string());
        }
        if let Some(ref source_info) = self.source_info {
            line.push(' ');
            line.push_str(source_info);
        }
        if !self.message.is_empty() {
            line.push(' ');
            line.push_str(&self.message);
        }
        line
    }

    /// Event-type category (`PORTEVENT` for `PORTEVENT_PMIN`), if tagged.
    pub fn category(&self) -> Option<&'static str> {
        self.event_type.map(|tag| tag.category)
    }

    /// Reference to this record for causal chains.
    pub fn connected(&self) -> ConnectedRecord {
        ConnectedRecord {
            offset: self.offset,
            length: self.length,
            record_number: self.record_number,
        }
    }
}

/// Pointer to a record that is causally related to an event.
///
/// Used for the error lines that precede a failing verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectedRecord {
    pub offset: u64,
    pub length: usize,
    pub record_number: usize,
}
