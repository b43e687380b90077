use std::path::PathBuf;

use anyhow::{Context, Result};

/// Directory name used under the platform config, data and cache directories
pub const APP_NAME: &str = "history-omnibox";

/// Get the default config file path (`<config_dir>/history-omnibox/config.toml`)
pub fn get_config_file() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(APP_NAME).join("config.toml"))
}

/// Get the log file path used by the interactive popup
pub fn get_log_file() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir().context("Could not determine cache directory")?;
    Ok(cache_dir.join(APP_NAME).join(format!("{}.log", APP_NAME)))
}
