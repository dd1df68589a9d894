//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::analyser::{ExecutionMode, LogFormat};
use crate::decipher::DecipheringRules;
use crate::record::event_type::is_known_selector;
use crate::timeline::{FilterConfiguration, Preferences};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub filter: FilterConfiguration,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub deciphering: DecipheringRules,
}

/// Format selection: detected from the log, or forced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatSetting {
    #[default]
    Auto,
    Format1,
    Format2,
}

impl FormatSetting {
    /// Forced format, `None` for auto-detection.
    pub fn forced(&self) -> Option<LogFormat> {
        match self {
            FormatSetting::Auto => None,
            FormatSetting::Format1 => Some(LogFormat::Format1),
            FormatSetting::Format2 => Some(LogFormat::Format2),
        }
    }
}

/// Execution mode selection: detected from the log, or forced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    #[default]
    Auto,
    Parallel,
    Single,
}

impl ModeSetting {
    /// Forced mode, `None` for auto-detection.
    pub fn forced(&self) -> Option<ExecutionMode> {
        match self {
            ModeSetting::Auto => None,
            ModeSetting::Parallel => Some(ExecutionMode::Parallel),
            ModeSetting::Single => Some(ExecutionMode::Single),
        }
    }
}

/// How the log itself is read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub format: FormatSetting,
    #[serde(default)]
    pub mode: ModeSetting,
}

impl Config {
    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(unknown) = self
            .preferences
            .silent_events
            .iter()
            .find(|selector| !is_known_selector(selector))
        {
            return Err(format!(
                "preferences.silent_events: unknown event type '{}'",
                unknown
            ));
        }
        if let Some(ref active) = self.deciphering.active {
            if !self.deciphering.tables.contains_key(active) {
                return Err(format!(
                    "deciphering.active '{}' names no table in deciphering.tables",
                    active
                ));
            }
        }
        Ok(())
    }
}
