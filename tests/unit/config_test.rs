//! Unit tests for configuration loading

use std::fs;
use tempfile::TempDir;

use seqlog::config::{FormatSetting, ModeSetting};
use seqlog::{Config, ExecutionMode, LogFormat};

#[test]
fn partial_file_keeps_other_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[log]\nformat = \"format1\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.log.format, FormatSetting::Format1);
    assert_eq!(config.log.format.forced(), Some(LogFormat::Format1));
    assert_eq!(config.log.mode, ModeSetting::Auto);
    assert_eq!(config.log.mode.forced(), None::<ExecutionMode>);
    assert_eq!(config.preferences, Config::default().preferences);
}

#[test]
fn unknown_silent_event_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[preferences]\nsilent_events = [\"NOPE\"]\n").unwrap();

    let error = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", error).contains("NOPE"));
}

#[test]
fn missing_active_table_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[deciphering]\nactive = \"absent\"\n").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn broken_toml_names_the_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[log\n").unwrap();

    let error = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", error).contains("config.toml"));
}

#[test]
fn saved_config_loads_back() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.filter.ignored_components.push("noisy".to_string());
    config.log.mode = ModeSetting::Single;

    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), config);
}
