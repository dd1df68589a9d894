//! Builds display-ready [`Event`]s from classified records.

use super::component::MTC_REF;
use super::event::{Event, EventKind};
use crate::analyser::Classification;
use crate::decipher::Decipherer;
use crate::record::LogRecord;

/// Turns a record and its classification into an [`Event`].
///
/// With a [`Decipherer`] attached, port traffic gets a display label
/// resolved from its payload.
#[derive(Default)]
pub struct EventFactory<'d> {
    decipherer: Option<&'d mut Decipherer>,
}

impl<'d> EventFactory<'d> {
    pub fn new() -> Self {
        Self { decipherer: None }
    }

    pub fn with_decipherer(decipherer: &'d mut Decipherer) -> Self {
        Self {
            decipherer: Some(decipherer),
        }
    }

    /// Event for a record; a record without a component reference belongs
    /// to the MTC.
    pub fn from_record(&mut self, record: &LogRecord, classification: &Classification) -> Event {
        let actor = record.component_ref.as_deref().unwrap_or(MTC_REF);
        let mut event = Event::new(classification.kind(), actor);
        event.record_number = record.record_number;
        event.offset = record.offset;
        event.length = record.length;
        event.time = record.timestamp.clone();

        match classification {
            Classification::Send(m)
            | Classification::Receive(m)
            | Classification::Enqueued(m)
            | Classification::ReceiveOperation(m) => {
                if let Some(local) = &m.local {
                    event.reference = local.clone();
                }
                event.target = m.peer.clone();
                event.port = Some(m.port.clone());
                event.name = m.message_type.clone();
                if let (Some(decipherer), Some(message_type), Some(payload)) = (
                    self.decipherer.as_deref_mut(),
                    m.message_type.as_deref(),
                    m.payload.as_deref(),
                ) {
                    event.label = decipherer.decipher(message_type, payload);
                }
            }
            Classification::StartFunction(start) => {
                event.target = start.target.clone();
                event.name = Some(start.function.clone());
            }
            Classification::ComponentCreation(created) => {
                event.reference = created.reference.clone();
                event.target = Some(actor.to_string());
                event.name = created.alias.clone();
            }
            Classification::ComponentDone(reference) => {
                event.reference = reference.clone();
                event.target = Some(actor.to_string());
            }
            Classification::ComponentTermination(verdict) => {
                event.verdict = *verdict;
            }
            Classification::PortMapping(link)
            | Classification::PortUnmapping(link)
            | Classification::PortConnection(link)
            | Classification::PortDisconnection(link) => {
                if let Some(local) = &link.local {
                    event.reference = local.clone();
                }
                event.port = Some(link.port.clone());
                event.target = Some(link.peer.clone());
                event.name = link.peer_port.clone();
            }
            Classification::TestcaseStart(name) => {
                event.name = Some(name.clone());
            }
            Classification::TestcaseEnd(result) => {
                event.name = Some(result.name.clone());
                event.verdict = result.verdict;
            }
            Classification::MtcCreation | Classification::MtcTermination | Classification::MtcDone => {
                event.reference = MTC_REF.to_string();
            }
            Classification::Setverdict(verdict) => {
                event.verdict = Some(*verdict);
            }
            Classification::Silent(info) => {
                if let Some(local) = &info.local {
                    event.reference = local.clone();
                }
                event.target = info.peer.clone();
                event.port = info.port.clone();
                event.name = Some(record.message.clone());
            }
        }
        event
    }

    /// Boundary event that maps to no record.
    pub fn synthetic(
        kind: EventKind,
        reference: impl Into<String>,
        record_number: usize,
        time: &str,
    ) -> Event {
        let mut event = Event::new(kind, reference);
        event.record_number = record_number;
        event.time = time.to_string();
        event.synthetic = true;
        event
    }
}
