//! Known event-type tokens.
//!
//! An event-type token is either a legacy single category (`PORTEVENT`) or
//! `CATEGORY_SUBCATEGORY` (`PORTEVENT_PMIN`). Both halves must be listed in
//! [`CATEGORIES`]; anything else is not an event type and ends up in the
//! message.

use std::fmt;

/// Category table: category name and its subcategories.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("ACTION", &["UNQUALIFIED"]),
    (
        "DEBUG",
        &["ENCDEC", "TESTPORT", "USER", "FRAMEWORK", "UNQUALIFIED"],
    ),
    (
        "DEFAULTOP",
        &["ACTIVATE", "DEACTIVATE", "EXIT", "UNQUALIFIED"],
    ),
    ("ERROR", &["UNQUALIFIED"]),
    (
        "EXECUTOR",
        &[
            "RUNTIME",
            "CONFIGDATA",
            "EXTCOMMAND",
            "COMPONENT",
            "LOGOPTIONS",
            "UNQUALIFIED",
        ],
    ),
    ("FUNCTION", &["RND", "UNQUALIFIED"]),
    (
        "MATCHING",
        &[
            "DONE",
            "TIMEOUT",
            "PCSUCCESS",
            "PCUNSUCC",
            "PMSUCCESS",
            "PMUNSUCC",
            "MCSUCCESS",
            "MCUNSUCC",
            "MMSUCCESS",
            "MMUNSUCC",
            "PROBLEM",
            "UNQUALIFIED",
        ],
    ),
    ("PARALLEL", &["PTC", "PORTCONN", "PORTMAP", "UNQUALIFIED"]),
    (
        "PORTEVENT",
        &[
            "PQUEUE",
            "MQUEUE",
            "STATE",
            "PMIN",
            "PMOUT",
            "PCIN",
            "PCOUT",
            "MMRECV",
            "MMSEND",
            "MCRECV",
            "MCSEND",
            "MPRECV",
            "MPSEND",
            "DUALRECV",
            "DUALSEND",
            "SETSTATE",
            "UNQUALIFIED",
        ],
    ),
    ("STATISTICS", &["VERDICT", "UNQUALIFIED"]),
    ("TESTCASE", &["START", "FINISH", "UNQUALIFIED"]),
    (
        "TIMEROP",
        &["READ", "START", "GUARD", "STOP", "TIMEOUT", "UNQUALIFIED"],
    ),
    ("USER", &["UNQUALIFIED"]),
    (
        "VERDICTOP",
        &["GETVERDICT", "SETVERDICT", "FINAL", "UNQUALIFIED"],
    ),
    ("WARNING", &["UNQUALIFIED"]),
];

/// A recognized event-type token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventTypeTag {
    pub category: &'static str,
    pub subcategory: Option<&'static str>,
}

impl EventTypeTag {
    /// Look a token up in the category table.
    pub fn lookup(token: &str) -> Option<Self> {
        let (category_name, subcategory_name) = match token.split_once('_') {
            Some((category, subcategory)) => (category, Some(subcategory)),
            None => (token, None),
        };

        let &(category, subcategories) = CATEGORIES
            .iter()
            .find(|(name, _)| *name == category_name)?;

        let subcategory = match subcategory_name {
            Some(name) => Some(*subcategories.iter().find(|s| **s == name)?),
            None => None,
        };

        Some(EventTypeTag {
            category,
            subcategory,
        })
    }

    /// Whether a selector (`ERROR` or `PORTEVENT_STATE`) covers this tag.
    ///
    /// A bare category selects every subcategory of it.
    pub fn matches_selector(&self, selector: &str) -> bool {
        match selector.split_once('_') {
            Some((category, subcategory)) => {
                self.category == category && self.subcategory == Some(subcategory)
            }
            None => self.category == selector,
        }
    }
}

/// Whether `selector` names a known category or `CATEGORY_SUBCATEGORY`.
pub fn is_known_selector(selector: &str) -> bool {
    EventTypeTag::lookup(selector).is_some()
}

impl fmt::Display for EventTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subcategory {
            Some(subcategory) => write!(f, "{}_{}", self.category, subcategory),
            None => f.write_str(self.category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_token_is_recognized() {
        let tag = EventTypeTag::lookup("PORTEVENT_PMIN").unwrap();
        assert_eq!(tag.category, "PORTEVENT");
        assert_eq!(tag.subcategory, Some("PMIN"));
    }

    #[test]
    fn legacy_single_token_is_recognized() {
        let tag = EventTypeTag::lookup("PARALLEL").unwrap();
        assert_eq!(tag.category, "PARALLEL");
        assert_eq!(tag.subcategory, None);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert_eq!(EventTypeTag::lookup("GARBAGE_X"), None);
        assert_eq!(EventTypeTag::lookup("GARBAGE"), None);
    }

    #[test]
    fn unknown_subcategory_is_rejected() {
        assert_eq!(EventTypeTag::lookup("PORTEVENT_X"), None);
        assert_eq!(EventTypeTag::lookup("PORTEVENT_"), None);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(EventTypeTag::lookup("portevent_pmin"), None);
    }

    #[test]
    fn display_round_trips() {
        for token in ["USER", "TIMEROP_TIMEOUT", "EXECUTOR_LOGOPTIONS"] {
            assert_eq!(EventTypeTag::lookup(token).unwrap().to_string(), token);
        }
    }

    #[test]
    fn selector_matching() {
        let tag = EventTypeTag::lookup("PORTEVENT_STATE").unwrap();
        assert!(tag.matches_selector("PORTEVENT"));
        assert!(tag.matches_selector("PORTEVENT_STATE"));
        assert!(!tag.matches_selector("PORTEVENT_PMIN"));
        assert!(!tag.matches_selector("ERROR"));
    }

    #[test]
    fn known_selectors() {
        assert!(is_known_selector("ERROR"));
        assert!(is_known_selector("PORTEVENT_STATE"));
        assert!(!is_known_selector("NOPE"));
    }
}
