//! Extractors paired with the classification predicates.
//!
//! Each extractor slices the current message around the anchors of its
//! predicate and routes every component fragment through
//! [`get_component_ref`]. They return `None` when the wording does not match,
//! so calling one without its predicate is safe.

use super::component_ref::{get_component_ref, get_port, split_port_fragment};
use super::silent::{match_silent, SilentInfo};
use super::{after, token_between, MessageAnalyser};
use crate::timeline::Verdict;

/// A message travelling through a port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortMessage {
    /// Owner of the local port when written as `ref:port`
    pub local: Option<String>,
    pub port: String,
    /// Other party, normalized
    pub peer: Option<String>,
    pub peer_port: Option<String>,
    pub message_type: Option<String>,
    pub payload: Option<String>,
}

/// Map / unmap / connect / disconnect operands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortLink {
    pub local: Option<String>,
    pub port: String,
    pub peer: String,
    pub peer_port: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionStart {
    pub function: String,
    /// Component the function was started on
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    pub reference: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestcaseResult {
    pub name: String,
    pub verdict: Option<Verdict>,
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// First whitespace-delimited token and the remainder.
fn split_token(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(at) => (&text[..at], &text[at..]),
        None => (text, ""),
    }
}

/// Drop a trailing ` id <n>` queue identifier.
fn strip_message_id(payload: &str) -> &str {
    match payload.rfind(" id ") {
        Some(at) => {
            let id = payload[at + 4..].trim();
            if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
                payload[..at].trim_end()
            } else {
                payload
            }
        }
        None => payload,
    }
}

/// Split `Type : payload` at the first colon.
fn type_and_payload(tail: &str) -> (Option<String>, Option<String>) {
    let tail = tail.trim();
    match tail.find(':') {
        Some(colon) => (
            non_empty(&tail[..colon]),
            non_empty(strip_message_id(tail[colon + 1..].trim())),
        ),
        None => (non_empty(strip_message_id(tail)), None),
    }
}

/// Peer token followed by the `Type : payload` tail.
fn port_message(local_fragment: &str, rest: &str) -> Option<PortMessage> {
    let (local, port) = split_port_fragment(local_fragment);
    if port.is_empty() {
        return None;
    }
    let (peer_token, tail) = split_token(rest);
    let (message_type, payload) = type_and_payload(tail);
    Some(PortMessage {
        local,
        port,
        peer: non_empty(peer_token).map(|t| get_component_ref(&t)),
        peer_port: get_port(peer_token),
        message_type,
        payload,
    })
}

impl MessageAnalyser {
    /// `Sent on <port> to <peer> <type> : <payload>`
    pub fn send_message(&self) -> Option<PortMessage> {
        let p = self.phrases();
        let (local, rest) = after(self.message(), p.send)?.split_once(p.send_to)?;
        port_message(local, rest)
    }

    /// `Receive operation on port <port> succeeded, message from <peer> ...`
    pub fn receive_message(&self) -> Option<PortMessage> {
        let p = self.phrases();
        let (local, rest) = after(self.message(), p.receive)?.split_once(p.receive_from)?;
        port_message(local, rest)
    }

    /// `Message enqueued on <port> from <peer> <type> : <payload>`
    pub fn enqueued_message(&self) -> Option<PortMessage> {
        let p = self.phrases();
        let (local, rest) = after(self.message(), p.enqueued)?.split_once(p.enqueued_from)?;
        port_message(local, rest)
    }

    /// Getcall, getreply, catch, check (and trigger) on a port.
    pub fn receive_operation(&self) -> Option<PortMessage> {
        let p = self.phrases();
        let rest = p
            .receive_operations
            .iter()
            .find_map(|op| after(self.message(), op))?;
        let (local, rest) = rest.split_once(p.operation_succeeded)?;
        match after(rest, p.operation_from) {
            Some(sender) => port_message(local, sender),
            None => port_message(local, ""),
        }
    }

    pub fn started_function(&self) -> Option<FunctionStart> {
        let p = self.phrases();
        let (head, target) = after(self.message(), p.start_function)?.split_once(p.start_function_on)?;
        let function = head.split('(').next().unwrap_or(head).trim();
        if function.is_empty() {
            return None;
        }
        let (target, _) = split_token(target);
        Some(FunctionStart {
            function: function.to_string(),
            target: non_empty(target).map(|t| get_component_ref(&t)),
        })
    }

    pub fn created_component(&self) -> Option<ComponentInfo> {
        let p = self.phrases();
        let rest = after(self.message(), p.component_creation)?;
        let reference: &str = rest
            .split(|c: char| c == ',' || c.is_whitespace())
            .next()
            .unwrap_or("");
        let reference = get_component_ref(reference);
        if reference.is_empty() {
            return None;
        }
        let alias = after(rest, p.component_alias).and_then(|alias| {
            let alias = alias.split(',').next().unwrap_or(alias);
            non_empty(alias.trim().trim_end_matches('.'))
        });
        Some(ComponentInfo { reference, alias })
    }

    pub fn done_component(&self) -> Option<String> {
        let done = self.phrases().component_done;
        token_between(self.message(), done.prefix, done.suffix).map(get_component_ref)
    }

    /// Verdict a terminating PTC reported about itself.
    pub fn termination_verdict(&self) -> Option<Verdict> {
        after(self.message(), self.phrases().component_termination).and_then(Verdict::parse_leading)
    }

    pub fn port_mapping(&self) -> Option<PortLink> {
        self.port_link(self.phrases().port_mapping)
    }

    pub fn port_unmapping(&self) -> Option<PortLink> {
        self.port_link(self.phrases().port_unmapping)
    }

    pub fn port_connection(&self) -> Option<PortLink> {
        self.port_link(self.phrases().port_connection)
    }

    pub fn port_disconnection(&self) -> Option<PortLink> {
        self.port_link(self.phrases().port_disconnection)
    }

    fn port_link(&self, phrase: super::phrases::PortPhrase) -> Option<PortLink> {
        let fragment = token_between(self.message(), phrase.prefix, phrase.infix)?;
        let rest = after(self.message(), phrase.prefix)?;
        let rest = after(rest, phrase.infix)?;
        let (local, port) = split_port_fragment(fragment);
        let (peer_token, _) = split_token(rest);
        let peer = get_component_ref(peer_token);
        if port.is_empty() || peer.is_empty() {
            return None;
        }
        Some(PortLink {
            local,
            port,
            peer,
            peer_port: get_port(peer_token),
        })
    }

    pub fn testcase_name(&self) -> Option<String> {
        let start = self.phrases().testcase_start;
        token_between(self.message(), start.prefix, start.suffix).map(str::to_string)
    }

    pub fn testcase_result(&self) -> Option<TestcaseResult> {
        let end = self.phrases().testcase_end;
        let name = token_between(self.message(), end.prefix, end.suffix)?;
        let verdict = after(self.message(), end.suffix).and_then(Verdict::parse_leading);
        Some(TestcaseResult {
            name: name.to_string(),
            verdict,
        })
    }

    /// Verdict named in `setverdict(<verdict>)`.
    pub fn setverdict(&self) -> Option<Verdict> {
        let rest = after(self.message(), self.phrases().setverdict)?;
        let (inner, _) = rest.split_once(')')?;
        Verdict::parse(inner)
    }

    pub fn silent_event(&self) -> Option<SilentInfo> {
        match_silent(self.message())
    }
}
