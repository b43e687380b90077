use std::fmt;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::models::{BookmarkNode, HistoryRecord, Item};

/// Arguments of a history search, mirroring the browser history API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Free-text filter; empty matches everything
    pub text: String,
    pub max_results: usize,
    /// Only visits at or after this instant; the Unix epoch means "all time"
    pub start_time: DateTime<Utc>,
}

impl HistoryQuery {
    /// Everything, newest first, capped at `max_results`
    pub fn all_time(max_results: usize) -> Self {
        Self { text: String::new(), max_results, start_time: DateTime::<Utc>::UNIX_EPOCH }
    }
}

/// Where browsing history comes from
pub trait HistoryStore: Send {
    fn search(&self, query: &HistoryQuery) -> Result<Vec<HistoryRecord>>;
}

/// Where the bookmark tree comes from
pub trait BookmarkStore: Send {
    fn get_tree(&self) -> Result<Vec<BookmarkNode>>;
}

/// The three candidate sources, in pool order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Domains,
    History,
    Bookmarks,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Domains, SourceKind::History, SourceKind::Bookmarks];
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Domains => "domains",
            SourceKind::History => "history",
            SourceKind::Bookmarks => "bookmarks",
        };
        f.write_str(name)
    }
}

/// The cached candidate lists for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLists {
    pub domains: Vec<Item>,
    pub history: Vec<Item>,
    pub bookmarks: Vec<Item>,
}

impl SourceLists {
    /// Candidate pool: domains, then history, then bookmarks
    pub fn pool(&self) -> impl Iterator<Item = &Item> {
        self.domains.iter().chain(&self.history).chain(&self.bookmarks)
    }

    pub fn len(&self) -> usize {
        self.domains.len() + self.history.len() + self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, kind: SourceKind) -> &[Item] {
        match kind {
            SourceKind::Domains => &self.domains,
            SourceKind::History => &self.history,
            SourceKind::Bookmarks => &self.bookmarks,
        }
    }

    pub(crate) fn set(&mut self, kind: SourceKind, items: Vec<Item>) {
        match kind {
            SourceKind::Domains => self.domains = items,
            SourceKind::History => self.history = items,
            SourceKind::Bookmarks => self.bookmarks = items,
        }
    }
}
