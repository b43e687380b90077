//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a temp directory holding browser exports and a config file
pub struct BrowserDataBuilder {
    temp_dir: TempDir,
}

impl BrowserDataBuilder {
    /// Create a new builder with an empty directory and an empty config file
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("config.toml"), "").expect("Failed to write config.toml");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `history.json` with the given raw content
    pub fn with_history(self, content: &str) -> Self {
        fs::write(self.history_path(), content).expect("Failed to write history.json");
        self
    }

    /// Write `history.json` as a JSON array of records
    pub fn with_history_records(self, records: &[HistoryRecordBuilder]) -> Self {
        let values: Vec<Value> = records.iter().map(HistoryRecordBuilder::to_value).collect();
        let content = serde_json::to_string_pretty(&values).expect("Failed to encode history");
        self.with_history(&content)
    }

    /// Write `Bookmarks` with the given raw content
    pub fn with_bookmarks(self, content: &str) -> Self {
        fs::write(self.bookmarks_path(), content).expect("Failed to write Bookmarks");
        self
    }

    /// Write a Chromium profile `Bookmarks` file
    pub fn with_chromium_bookmarks(self, bookmark_bar: Vec<Value>, other: Vec<Value>) -> Self {
        let content = json!({
            "checksum": "0",
            "roots": {
                "bookmark_bar": { "name": "Bookmarks bar", "type": "folder", "children": bookmark_bar },
                "other": { "name": "Other bookmarks", "type": "folder", "children": other },
                "synced": { "name": "Mobile bookmarks", "type": "folder", "children": [] }
            },
            "version": 1
        });
        self.with_bookmarks(&content.to_string())
    }

    pub fn with_config(self, content: &str) -> Self {
        fs::write(self.config_path(), content).expect("Failed to write config.toml");
        self
    }

    pub fn history_path(&self) -> PathBuf {
        self.temp_dir.path().join("history.json")
    }

    pub fn bookmarks_path(&self) -> PathBuf {
        self.temp_dir.path().join("Bookmarks")
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.toml")
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for BrowserDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one history record as the history API reports it
pub struct HistoryRecordBuilder {
    title: Option<String>,
    url: String,
    last_visit_time: Option<f64>,
    visit_count: u64,
}

impl HistoryRecordBuilder {
    pub fn new(url: &str) -> Self {
        Self {
            title: None,
            url: url.to_string(),
            last_visit_time: Some(1_700_000_000_000.0),
            visit_count: 1,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Milliseconds since the Unix epoch
    pub fn visited_at(mut self, millis: f64) -> Self {
        self.last_visit_time = Some(millis);
        self
    }

    pub fn visit_count(mut self, count: u64) -> Self {
        self.visit_count = count;
        self
    }

    pub fn to_value(&self) -> Value {
        json!({
            "id": "1",
            "title": self.title,
            "url": self.url,
            "lastVisitTime": self.last_visit_time,
            "visitCount": self.visit_count,
            "typedCount": 0
        })
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

/// Chromium leaf bookmark
pub fn bookmark(name: &str, url: &str) -> Value {
    json!({ "name": name, "type": "url", "url": url })
}

/// Chromium bookmark folder
pub fn folder(name: &str, children: Vec<Value>) -> Value {
    json!({ "name": name, "type": "folder", "children": children })
}

/// A small but realistic profile: a few visits and nested bookmarks
pub fn realistic_browser_data() -> TempDir {
    BrowserDataBuilder::new()
        .with_history_records(&[
            HistoryRecordBuilder::new("https://www.rust-lang.org/")
                .title("Rust Programming Language")
                .visited_at(1_700_000_300_000.0),
            HistoryRecordBuilder::new("https://docs.rs/serde/latest/serde/")
                .title("serde - Rust")
                .visited_at(1_700_000_200_000.0),
            HistoryRecordBuilder::new("https://news.ycombinator.com/")
                .title("Hacker News")
                .visited_at(1_700_000_100_000.0),
            // Same title as the newest visit: dropped by dedup
            HistoryRecordBuilder::new("https://rust-lang.org/")
                .title("Rust Programming Language")
                .visited_at(1_600_000_000_000.0),
        ])
        .with_chromium_bookmarks(
            vec![
                bookmark("GitHub", "https://github.com/"),
                folder("Rust", vec![bookmark("The Book", "https://doc.rust-lang.org/book/")]),
            ],
            vec![bookmark("Crates", "https://crates.io/")],
        )
        .build()
}
