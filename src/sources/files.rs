use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use super::store::{BookmarkStore, HistoryQuery, HistoryStore};
use crate::models::{BookmarkNode, HistoryRecord};
use crate::parsers::{parse_bookmarks_file, parse_history_file};

/// History backed by an exported history file (JSON array or JSON Lines)
#[derive(Debug, Clone)]
pub struct HistoryFileStore {
    path: PathBuf,
}

impl HistoryFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for HistoryFileStore {
    /// Records visited at or after `start_time` whose title or url contains `text`,
    /// most recent first, capped at `max_results`.
    ///
    /// A missing export is an empty history, not an error.
    fn search(&self, query: &HistoryQuery) -> Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            warn!("History file not found at {}", self.path.display());
            return Ok(Vec::new());
        }

        let needle = query.text.to_lowercase();
        let mut records: Vec<HistoryRecord> = parse_history_file(&self.path)?
            .into_iter()
            .filter(|record| match record.last_visit_time {
                Some(visited) => visited >= query.start_time,
                None => true,
            })
            .filter(|record| {
                needle.is_empty()
                    || record.url.to_lowercase().contains(&needle)
                    || record.title.as_deref().is_some_and(|t| t.to_lowercase().contains(&needle))
            })
            .collect();

        // Stable sort keeps file order among records without a visit time
        records.sort_by_key(|record| Reverse(record.last_visit_time));
        records.truncate(query.max_results);
        Ok(records)
    }
}

/// Bookmarks backed by a Chromium `Bookmarks` file or a `getTree` export
#[derive(Debug, Clone)]
pub struct BookmarkFileStore {
    path: PathBuf,
}

impl BookmarkFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BookmarkStore for BookmarkFileStore {
    fn get_tree(&self) -> Result<Vec<BookmarkNode>> {
        if !self.path.exists() {
            warn!("Bookmarks file not found at {}", self.path.display());
            return Ok(Vec::new());
        }
        parse_bookmarks_file(&self.path)
    }
}
