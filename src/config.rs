use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::omnibox::{DEFAULT_ITEM_MAX_LENGTH, SearchEngine, SessionOptions};
use crate::sources::{DEFAULT_LOAD_TIMEOUT, DEFAULT_MAX_HISTORY_RESULTS, LoadOptions};
use crate::utils::{default_bookmarks_path, default_history_path, get_config_file};

/// Everything configurable, as read from `config.toml`.
///
/// Unset keys keep their defaults, and a missing file is the same as an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// History export (JSON array or JSONL)
    pub history_file: Option<PathBuf>,
    /// Chromium `Bookmarks` file or a JSON array of bookmark nodes
    pub bookmarks_file: Option<PathBuf>,
    pub max_history_results: usize,
    /// Number of suggestion rows, search row included
    pub item_max_length: usize,
    pub load_timeout_ms: u64,
    pub search: SearchEngine,
    pub browser: BrowserConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_file: None,
            bookmarks_file: None,
            max_history_results: DEFAULT_MAX_HISTORY_RESULTS,
            item_max_length: DEFAULT_ITEM_MAX_LENGTH,
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT.as_millis() as u64,
            search: SearchEngine::default(),
            browser: BrowserConfig::default(),
        }
    }
}

/// The command that opens urls. Without a `command`, the platform opener is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub command: Option<String>,
    /// Arguments placed before the url when navigating the current tab
    pub current_tab_args: Vec<String>,
    /// Arguments placed before the url when opening a new tab
    pub new_tab_args: Vec<String>,
}

/// Values given on the command line; they win over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub history_file: Option<PathBuf>,
    pub bookmarks_file: Option<PathBuf>,
}

impl Config {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// An explicit path must exist; the default one may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = get_config_file()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    debug!("No config file at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.item_max_length == 0 {
            bail!("item_max_length must be at least 1");
        }
        if self.search.url_prefix.trim().is_empty() {
            bail!("search.url_prefix must not be empty");
        }
        if let Some(command) = &self.browser.command
            && command.trim().is_empty()
        {
            bail!("browser.command must not be empty when set");
        }
        Ok(())
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides.history_file {
            self.history_file = Some(path);
        }
        if let Some(path) = overrides.bookmarks_file {
            self.bookmarks_file = Some(path);
        }
    }

    /// Configured history file, else the per-user default
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file.clone().or_else(default_history_path)
    }

    /// Configured bookmarks file, else the browser's default profile
    pub fn bookmarks_path(&self) -> Option<PathBuf> {
        self.bookmarks_file.clone().or_else(default_bookmarks_path)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            max_history_results: self.max_history_results,
            timeout: Duration::from_millis(self.load_timeout_ms),
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions { item_max_length: self.item_max_length, engine: self.search.clone() }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_history_results, 6000);
        assert_eq!(config.item_max_length, 15);
        assert_eq!(config.load_timeout_ms, 3000);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            r#"
item_max_length = 8
history_file = "/tmp/history.json"

[search]
label = "DuckDuckGo"

[browser]
command = "firefox"
new_tab_args = ["--new-tab"]
"#,
        )
        .unwrap();

        assert_eq!(config.item_max_length, 8);
        assert_eq!(config.history_file, Some(PathBuf::from("/tmp/history.json")));
        assert_eq!(config.search.label, "DuckDuckGo");
        assert_eq!(config.search.url_prefix, "https://www.google.com/search?q=");
        assert_eq!(config.browser.command.as_deref(), Some("firefox"));
        assert_eq!(config.browser.new_tab_args, vec!["--new-tab"]);
        assert!(config.browser.current_tab_args.is_empty());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_toml("item_max_length = 0").is_err());
        assert!(Config::from_toml("[search]\nurl_prefix = \"  \"").is_err());
        assert!(Config::from_toml("[browser]\ncommand = \"\"").is_err());
        assert!(Config::from_toml("item_max_length = \"many\"").is_err());
    }

    #[test]
    fn test_from_file_and_missing_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_history_results = 10").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.max_history_results, 10);
        assert_eq!(config.load_options().max_history_results, 10);

        let missing = file.path().with_extension("missing");
        let err = Config::load(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::from_toml("bookmarks_file = \"/a/Bookmarks\"").unwrap();
        config.apply(ConfigOverrides {
            history_file: Some(PathBuf::from("/b/history.jsonl")),
            bookmarks_file: Some(PathBuf::from("/c/Bookmarks")),
        });
        assert_eq!(config.history_path(), Some(PathBuf::from("/b/history.jsonl")));
        assert_eq!(config.bookmarks_path(), Some(PathBuf::from("/c/Bookmarks")));
    }

    #[test]
    fn test_session_and_load_options() {
        let config = Config::from_toml("item_max_length = 4\nload_timeout_ms = 250").unwrap();
        assert_eq!(config.session_options().item_max_length, 4);
        assert_eq!(config.load_options().timeout, Duration::from_millis(250));
    }
}
