//! Test verdicts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome tag of a component or test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    #[default]
    None,
    Pass,
    Inconc,
    Fail,
    Error,
}

impl Verdict {
    /// Parse a verdict word as it appears in the log.
    ///
    /// Accepts `inconclusive` as a spelling of `inconc`; case-insensitive.
    pub fn parse(word: &str) -> Option<Self> {
        match word.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Verdict::None),
            "pass" => Some(Verdict::Pass),
            "inconc" | "inconclusive" => Some(Verdict::Inconc),
            "fail" => Some(Verdict::Fail),
            "error" => Some(Verdict::Error),
            _ => None,
        }
    }

    /// Parse the leading verdict word of `text` (`pass.`, `fail, reason: x`).
    pub fn parse_leading(text: &str) -> Option<Self> {
        let word: String = text
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        Self::parse(&word)
    }

    /// Verdicts that pull the preceding error lines into the event.
    pub fn is_failure(&self) -> bool {
        matches!(self, Verdict::Fail | Verdict::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::None => "none",
            Verdict::Pass => "pass",
            Verdict::Inconc => "inconc",
            Verdict::Fail => "fail",
            Verdict::Error => "error",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
