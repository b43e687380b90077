//! Concurrent one-shot loading of the three candidate lists.
//!
//! Each store runs on its own short-lived thread and reports through a single
//! channel. [`SourceLoader`] joins the reports into one ready signal: either all
//! three lists arrived, or the deadline passed and the session continues with
//! whatever did arrive. Late reports are discarded once the loader is dropped.

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use tracing::{info, warn};

use super::builder::{derive_domains, load_bookmarks, load_history};
use super::store::{BookmarkStore, HistoryStore, SourceKind, SourceLists};
use crate::models::Item;

/// Default bound on how long the popup waits for its sources
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub max_history_results: usize,
    pub timeout: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_history_results: super::builder::DEFAULT_MAX_HISTORY_RESULTS,
            timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }
}

/// The joined result of a load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSources {
    pub lists: SourceLists,
    /// Sources that failed or did not answer before the deadline, in pool order
    pub missing: Vec<SourceKind>,
}

impl LoadedSources {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

type SourceReport = (SourceKind, Result<Vec<Item>, String>);

/// Handle on the in-flight loader threads
pub struct SourceLoader {
    rx: Receiver<SourceReport>,
    deadline: Instant,
    lists: SourceLists,
    received: Vec<SourceKind>,
    failed: Vec<SourceKind>,
    delivered: bool,
}

impl SourceLoader {
    /// Start loading history, bookmarks and domains concurrently.
    ///
    /// The deadline starts now; each store is queried exactly once.
    pub fn spawn(
        history: Box<dyn HistoryStore>,
        bookmarks: Box<dyn BookmarkStore>,
        options: LoadOptions,
    ) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();

        let history_tx = tx.clone();
        let max_results = options.max_history_results;
        spawn_source(&tx, "history-loader", &[SourceKind::History], move || {
            let result = load_history(history.as_ref(), max_results).map_err(|e| format!("{:#}", e));
            let _ = history_tx.send((SourceKind::History, result));
        });

        let bookmark_tx = tx.clone();
        spawn_source(
            &tx,
            "bookmark-loader",
            &[SourceKind::Bookmarks, SourceKind::Domains],
            move || match load_bookmarks(bookmarks.as_ref()) {
                Ok(items) => {
                    let domains = derive_domains(&items);
                    let _ = bookmark_tx.send((SourceKind::Bookmarks, Ok(items)));
                    let _ = bookmark_tx.send((SourceKind::Domains, Ok(domains)));
                }
                Err(e) => {
                    let reason = format!("{:#}", e);
                    let _ = bookmark_tx.send((SourceKind::Bookmarks, Err(reason.clone())));
                    let _ = bookmark_tx.send((SourceKind::Domains, Err(reason)));
                }
            },
        );

        Self {
            rx,
            deadline: Instant::now() + options.timeout,
            lists: SourceLists::default(),
            received: Vec::new(),
            failed: Vec::new(),
            delivered: false,
        }
    }

    /// Non-blocking poll. Returns the joined sources exactly once: when every
    /// source has reported, or on the first poll after the deadline.
    pub fn try_collect(&mut self) -> Option<LoadedSources> {
        if self.delivered {
            return None;
        }
        loop {
            match self.rx.try_recv() {
                Ok(report) => self.record(report),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if self.all_reported() || Instant::now() >= self.deadline {
            return Some(self.finish());
        }
        None
    }

    /// Block until every source reported or the deadline passed
    pub fn wait(mut self) -> LoadedSources {
        while !self.all_reported() {
            match self.rx.recv_deadline(self.deadline) {
                Ok(report) => self.record(report),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.finish()
    }

    fn record(&mut self, (kind, result): SourceReport) {
        if self.received.contains(&kind) {
            return;
        }
        self.received.push(kind);
        match result {
            Ok(items) => self.lists.set(kind, items),
            Err(reason) => {
                warn!("Failed to load {}: {}", kind, reason);
                self.failed.push(kind);
            }
        }
    }

    fn all_reported(&self) -> bool {
        SourceKind::ALL.iter().all(|kind| self.received.contains(kind))
    }

    fn finish(&mut self) -> LoadedSources {
        self.delivered = true;
        let missing: Vec<SourceKind> = SourceKind::ALL
            .into_iter()
            .filter(|kind| self.failed.contains(kind) || !self.received.contains(kind))
            .collect();

        for kind in &missing {
            if !self.received.contains(kind) {
                warn!("Gave up waiting for {}; continuing without it", kind);
            }
        }
        info!(
            "Sources ready: {} domains, {} history, {} bookmarks",
            self.lists.domains.len(),
            self.lists.history.len(),
            self.lists.bookmarks.len()
        );

        LoadedSources { lists: std::mem::take(&mut self.lists), missing }
    }
}

/// Spawn a named loader thread; if the OS refuses, report its sources as failed
fn spawn_source<F>(tx: &Sender<SourceReport>, name: &str, kinds: &[SourceKind], job: F)
where
    F: FnOnce() + Send + 'static,
{
    if let Err(e) = thread::Builder::new().name(name.to_string()).spawn(job) {
        for kind in kinds {
            let _ = tx.send((*kind, Err(format!("could not start {}: {}", name, e))));
        }
    }
}
