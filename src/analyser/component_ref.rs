//! Normalization of the textual encodings of a component reference.
//!
//! The log writes a component in three ways:
//!
//! - `name(ref)` - a named component, e.g. `ptc1(3)`
//! - `ref:port` - a port of a component, e.g. `mtc:p1` or `3:PCO`
//! - a bare token, e.g. `3` or `system`
//!
//! Every extractor routes raw fragments through [`get_component_ref`] so the
//! three forms land on the same lifeline.

use crate::record::normalize_component_ref;

/// Characters trimmed from the end of a fragment cut out of a sentence.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';'];

fn clean(text: &str) -> &str {
    text.trim().trim_end_matches(TRAILING_PUNCTUATION).trim_end()
}

/// Reference named by `text`, in any of the three encodings.
pub fn get_component_ref(text: &str) -> String {
    let text = clean(text);
    let owner = match text.split_once(':') {
        Some((owner, _port)) => owner.trim(),
        None => text,
    };

    if let Some(inner) = owner
        .strip_suffix(')')
        .and_then(|rest| rest.rfind('(').map(|open| &rest[open + 1..]))
    {
        if !inner.trim().is_empty() {
            return normalize_component_ref(inner.trim());
        }
    }

    normalize_component_ref(owner)
}

/// Port half of a `ref:port` fragment.
pub fn get_port(text: &str) -> Option<String> {
    let text = clean(text);
    text.split_once(':')
        .map(|(_, port)| port.trim().to_string())
        .filter(|port| !port.is_empty())
}

/// Split a local port fragment into an optional owner and the port name.
///
/// `mtc:p1` yields `(Some("mtc"), "p1")`, `p1` yields `(None, "p1")`.
pub fn split_port_fragment(text: &str) -> (Option<String>, String) {
    let text = clean(text);
    match text.split_once(':') {
        Some(_) => (
            Some(get_component_ref(text)),
            get_port(text).unwrap_or_default(),
        ),
        None => (None, text.to_string()),
    }
}
