//! Deciphering rules: payload to display label.
//!
//! A rule table maps a message type to an ordered list of dotted field
//! paths. The first path that resolves in the payload becomes the label
//! shown on the message arrow instead of the bare type name.
//!
//! ```toml
//! [deciphering]
//! active = "signalling"
//!
//! [deciphering.tables.signalling]
//! "M.Request" = ["header.kind", "id"]
//! ```

mod value;

pub use value::Value;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Message type to ordered field paths.
pub type RuleTable = BTreeMap<String, Vec<String>>;

/// Named rule tables and the one in use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecipheringRules {
    /// Active table; the first table is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    pub tables: BTreeMap<String, RuleTable>,
}

/// Resolves display labels against a snapshot of [`DecipheringRules`].
#[derive(Debug, Clone)]
pub struct Decipherer {
    rules: DecipheringRules,
}

impl Decipherer {
    pub fn new(rules: DecipheringRules) -> Self {
        Self { rules }
    }

    /// Name of the table in use, if any was configured or activated.
    pub fn active_table(&self) -> Option<&str> {
        self.rules.active.as_deref()
    }

    /// Make sure a table is active, picking the first one if none is.
    fn activate(&mut self) -> Option<&RuleTable> {
        if self.rules.active.is_none() {
            let first = self.rules.tables.keys().next()?.clone();
            debug!(table = %first, "activating first deciphering table");
            self.rules.active = Some(first);
        }
        let active = self.rules.active.as_deref()?;
        self.rules.tables.get(active)
    }

    /// Label for a payload of `message_type`, or `None` when no rule
    /// resolves.
    pub fn decipher(&mut self, message_type: &str, payload: &str) -> Option<String> {
        let table = self.activate()?;
        let message_type = message_type.trim();
        let paths = table
            .get(message_type)
            .or_else(|| table.get(message_type.trim_start_matches('@')))?;
        if paths.is_empty() {
            return None;
        }

        let value = Value::parse(payload);
        paths
            .iter()
            .find_map(|path| value.resolve(path))
            .map(Value::render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(active: Option<&str>) -> DecipheringRules {
        let mut first = RuleTable::new();
        first.insert(
            "M.Request".to_string(),
            vec!["header.kind".to_string(), "id".to_string()],
        );
        let mut second = RuleTable::new();
        second.insert("M.Request".to_string(), vec!["id".to_string()]);

        let mut rules = DecipheringRules {
            active: active.map(String::from),
            ..Default::default()
        };
        rules.tables.insert("a_first".to_string(), first);
        rules.tables.insert("b_second".to_string(), second);
        rules
    }

    #[test]
    fn first_table_is_activated_lazily() {
        let mut decipherer = Decipherer::new(rules(None));
        assert_eq!(decipherer.active_table(), None);

        let label = decipherer.decipher("@M.Request", "{ header := { kind := REQ }, id := 2 }");
        assert_eq!(label.as_deref(), Some("REQ"));
        assert_eq!(decipherer.active_table(), Some("a_first"));
    }

    #[test]
    fn configured_table_wins() {
        let mut decipherer = Decipherer::new(rules(Some("b_second")));
        let label = decipherer.decipher("M.Request", "{ header := { kind := REQ }, id := 2 }");
        assert_eq!(label.as_deref(), Some("2"));
    }

    #[test]
    fn falls_through_to_next_path() {
        let mut decipherer = Decipherer::new(rules(None));
        let label = decipherer.decipher(" M.Request ", "{ id := 9 }");
        assert_eq!(label.as_deref(), Some("9"));
    }

    #[test]
    fn unresolved_is_none() {
        let mut decipherer = Decipherer::new(rules(None));
        assert_eq!(decipherer.decipher("M.Other", "{ id := 9 }"), None);
        assert_eq!(decipherer.decipher("M.Request", "{ other := 1 }"), None);
    }

    #[test]
    fn no_tables_no_label() {
        let mut decipherer = Decipherer::new(DecipheringRules::default());
        assert_eq!(decipherer.decipher("M.Request", "{ id := 9 }"), None);
        assert_eq!(decipherer.active_table(), None);
    }

    #[test]
    fn unknown_active_table_resolves_nothing() {
        let mut decipherer = Decipherer::new(rules(Some("missing")));
        assert_eq!(decipherer.decipher("M.Request", "{ id := 9 }"), None);
    }
}
