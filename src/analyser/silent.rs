//! Port-lifecycle wording for records that match no structured category.
//!
//! A silent event still belongs on a lifeline. These patterns recover the
//! port and, where the wording names one, the peer component so the renderer
//! can place the event. The table is kept literal: each entry reproduces one
//! historic message shape.

use super::component_ref::{get_component_ref, split_port_fragment};

/// Where the interesting fragments sit relative to the anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `<prefix><port><infix>` and nothing of interest after
    PortOnly,
    /// `<prefix><port><infix><peer>`
    PortThenPeer,
    /// `<prefix>...<infix><port>`
    PortAfter,
}

#[derive(Debug, Clone, Copy)]
struct SilentPattern {
    prefix: &'static str,
    infix: &'static str,
    shape: Shape,
}

const fn pattern(prefix: &'static str, infix: &'static str, shape: Shape) -> SilentPattern {
    SilentPattern {
        prefix,
        infix,
        shape,
    }
}

const PATTERNS: &[SilentPattern] = &[
    pattern("Port ", " was started.", Shape::PortOnly),
    pattern("Port ", " was stopped.", Shape::PortOnly),
    pattern("Port ", " was halted.", Shape::PortOnly),
    pattern("Port ", " was cleared.", Shape::PortOnly),
    pattern("Port ", " is waiting for connection from ", Shape::PortThenPeer),
    pattern("Port ", " is connecting to ", Shape::PortThenPeer),
    pattern("Port ", " has accepted the connection from ", Shape::PortThenPeer),
    pattern("Port ", " was unmapped automatically from ", Shape::PortThenPeer),
    pattern("Connection of port ", " to ", Shape::PortThenPeer),
    pattern("Connection of port ", " with ", Shape::PortThenPeer),
    pattern(
        "Removing unterminated connection between port ",
        " and ",
        Shape::PortThenPeer,
    ),
    pattern(
        "Removing unterminated mapping between port ",
        " and ",
        Shape::PortThenPeer,
    ),
    pattern("Message with id ", " was extracted from the queue of ", Shape::PortAfter),
    pattern("Call with id ", " was extracted from the queue of ", Shape::PortAfter),
    pattern("Reply with id ", " was extracted from the queue of ", Shape::PortAfter),
    pattern("Exception with id ", " was extracted from the queue of ", Shape::PortAfter),
    pattern("Matching on port ", " succeeded", Shape::PortOnly),
    pattern("Matching on port ", " failed", Shape::PortOnly),
];

/// What a silent-event pattern recovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SilentInfo {
    /// Component owning the port, if the fragment was qualified
    pub local: Option<String>,
    pub port: Option<String>,
    pub peer: Option<String>,
}

impl SilentInfo {
    pub fn is_empty(&self) -> bool {
        self.local.is_none() && self.port.is_none() && self.peer.is_none()
    }
}

/// First token of `text`, trimmed of sentence punctuation.
fn first_token(text: &str) -> &str {
    text.split_whitespace()
        .next()
        .unwrap_or("")
        .trim_end_matches(['.', ',', ':'])
}

/// Try every pattern against `message`.
pub fn match_silent(message: &str) -> Option<SilentInfo> {
    PATTERNS.iter().find_map(|p| match_pattern(p, message))
}

fn match_pattern(pattern: &SilentPattern, message: &str) -> Option<SilentInfo> {
    let start = message.find(pattern.prefix)? + pattern.prefix.len();
    let rest = &message[start..];
    let infix_at = rest.find(pattern.infix)?;
    let before = &rest[..infix_at];
    let after = &rest[infix_at + pattern.infix.len()..];

    let mut info = SilentInfo::default();
    match pattern.shape {
        Shape::PortOnly | Shape::PortThenPeer => {
            let (local, port) = split_port_fragment(before);
            if port.is_empty() || port.contains(' ') {
                return None;
            }
            info.local = local;
            info.port = Some(port);
            if pattern.shape == Shape::PortThenPeer {
                let peer = first_token(after);
                if !peer.is_empty() {
                    info.peer = Some(get_component_ref(peer));
                }
            }
        }
        Shape::PortAfter => {
            let (local, port) = split_port_fragment(first_token(after));
            if port.is_empty() {
                return None;
            }
            info.local = local;
            info.port = Some(port);
        }
    }
    Some(info)
}
