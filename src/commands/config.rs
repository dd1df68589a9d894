//! Config subcommands handler

use anyhow::Result;
use std::path::{Path, PathBuf};

use seqlog::Config;

use super::load_config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print the configuration file path and whether it exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(config_path: Option<&Path>) -> Result<()> {
    let path = resolve_path(config_path)?;
    let note = if path.exists() { "" } else { " (not created, defaults apply)" };
    println!("{}{}", path.display(), note);
    Ok(())
}

fn resolve_path(config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}
