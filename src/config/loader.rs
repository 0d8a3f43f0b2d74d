//! Configuration loading from file system

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument};

use super::types::Config;
use crate::error::ResultExt;

/// Location of the config file (~/.config/inform-ide/config.json)
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("inform-ide"))
        .unwrap_or_else(|| std::env::temp_dir().join("inform-ide"))
        .join("config.json")
}

/// Load configuration from the default location.
///
/// Returns Config::default() if the file is missing or invalid.
pub fn load_config() -> Config {
    load_config_from(&config_path())
}

#[instrument(name = "load_config")]
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        info!(path = %path.display(), "Config file not found, using defaults");
        return Config::default();
    }

    match read_config(path).warn_on_err() {
        Some(config) => {
            info!(path = %path.display(), "Successfully loaded config");
            config
        }
        None => Config::default(),
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).context("Failed to parse config JSON")
}

/// Write `config` as pretty JSON, creating parent directories
pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Config saved");
    Ok(())
}
