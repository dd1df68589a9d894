//! Fixed-priority classification of one message.

use super::extract::{ComponentInfo, FunctionStart, PortLink, PortMessage, TestcaseResult};
use super::silent::SilentInfo;
use super::MessageAnalyser;
use crate::timeline::{EventKind, Verdict};

/// Category of a message, with the fields its extractor recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Send(PortMessage),
    Receive(PortMessage),
    Enqueued(PortMessage),
    /// Getcall, getreply, catch, check, trigger
    ReceiveOperation(PortMessage),
    StartFunction(FunctionStart),
    ComponentCreation(ComponentInfo),
    ComponentDone(String),
    ComponentTermination(Option<Verdict>),
    PortMapping(PortLink),
    PortUnmapping(PortLink),
    PortConnection(PortLink),
    PortDisconnection(PortLink),
    TestcaseStart(String),
    TestcaseEnd(TestcaseResult),
    MtcCreation,
    MtcTermination,
    MtcDone,
    Setverdict(Verdict),
    /// Nothing structured matched; the info may be empty
    Silent(SilentInfo),
}

impl Classification {
    /// Event kind this classification indexes as.
    pub fn kind(&self) -> EventKind {
        match self {
            Classification::Send(_) => EventKind::Send,
            Classification::Receive(_) | Classification::ReceiveOperation(_) => EventKind::Receive,
            Classification::Enqueued(_) => EventKind::Enqueued,
            Classification::StartFunction(_) => EventKind::Function,
            Classification::ComponentCreation(_) => EventKind::PtcCreate,
            Classification::ComponentDone(_) => EventKind::PtcDone,
            Classification::ComponentTermination(_) => EventKind::PtcTerminate,
            Classification::PortMapping(_) => EventKind::MappingPort,
            Classification::PortUnmapping(_) => EventKind::UnmappingPort,
            Classification::PortConnection(_) => EventKind::ConnectingPort,
            Classification::PortDisconnection(_) => EventKind::DisconnectingPort,
            Classification::TestcaseStart(_) => EventKind::TcStart,
            Classification::TestcaseEnd(_) => EventKind::TcEnd,
            Classification::MtcCreation => EventKind::MtcCreate,
            Classification::MtcTermination => EventKind::MtcTerminate,
            Classification::MtcDone => EventKind::MtcDone,
            Classification::Setverdict(verdict) => EventKind::for_verdict(*verdict),
            Classification::Silent(_) => EventKind::SilentEvent,
        }
    }

    /// Port traffic fields, for the kinds that carry a payload.
    pub fn port_message(&self) -> Option<&PortMessage> {
        match self {
            Classification::Send(m)
            | Classification::Receive(m)
            | Classification::Enqueued(m)
            | Classification::ReceiveOperation(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, Classification::Silent(_))
    }
}

impl MessageAnalyser {
    /// Classify `message`, trying the predicates from most to least specific.
    ///
    /// A predicate whose extractor cannot recover its fields falls through
    /// to the next one, so the result is always consistent.
    pub fn classify(&mut self, message: &str) -> Classification {
        self.set_message(message);

        if let Some(m) = self.send_message() {
            return Classification::Send(m);
        }
        if let Some(m) = self.receive_message() {
            return Classification::Receive(m);
        }
        if let Some(m) = self.enqueued_message() {
            return Classification::Enqueued(m);
        }
        if let Some(m) = self.receive_operation() {
            return Classification::ReceiveOperation(m);
        }
        if let Some(start) = self.started_function() {
            return Classification::StartFunction(start);
        }
        if let Some(created) = self.created_component() {
            return Classification::ComponentCreation(created);
        }
        if let Some(reference) = self.done_component() {
            return Classification::ComponentDone(reference);
        }
        if self.is_component_termination() {
            return Classification::ComponentTermination(self.termination_verdict());
        }
        if let Some(link) = self.port_mapping() {
            return Classification::PortMapping(link);
        }
        if let Some(link) = self.port_unmapping() {
            return Classification::PortUnmapping(link);
        }
        if let Some(link) = self.port_connection() {
            return Classification::PortConnection(link);
        }
        if let Some(link) = self.port_disconnection() {
            return Classification::PortDisconnection(link);
        }
        if let Some(name) = self.testcase_name() {
            return Classification::TestcaseStart(name);
        }
        if let Some(result) = self.testcase_result() {
            return Classification::TestcaseEnd(result);
        }
        if self.is_mtc_creation() {
            return Classification::MtcCreation;
        }
        if self.is_mtc_termination() {
            return Classification::MtcTermination;
        }
        if self.is_mtc_done() {
            return Classification::MtcDone;
        }
        if let Some(verdict) = self.setverdict() {
            return Classification::Setverdict(verdict);
        }
        Classification::Silent(self.silent_event().unwrap_or_default())
    }
}
