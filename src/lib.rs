//! History Omnibox - a popup that searches browser history and bookmarks
//!
//! This library provides the core of a browser-style omnibox. It supports:
//!
//! - Loading history, bookmarks and the domains of bookmarked sites concurrently,
//!   with a bounded wait and partial results when a source fails
//! - Case-insensitive substring matching with a synthetic web search suggestion
//! - A bounded selection over a fixed pool of suggestion rows
//! - Resolving Enter to a typed url, the active suggestion, or a web search,
//!   in the current tab or a new one
//!
//! # Example
//!
//! ```
//! use history_omnibox::{Item, Outcome, PopupEvent, Session, SessionOptions, SourceLists};
//!
//! let mut session = Session::new(SessionOptions::default());
//! session.handle(PopupEvent::SourcesLoaded(SourceLists {
//!     history: vec![Item::new("The Rust Book", "https://doc.rust-lang.org/book/")],
//!     ..Default::default()
//! }));
//! session.handle(PopupEvent::Input("rust".to_string()));
//! session.handle(PopupEvent::ArrowDown);
//! session.handle(PopupEvent::ArrowDown);
//!
//! match session.handle(PopupEvent::Enter) {
//!     Outcome::Commit(navigation) => {
//!         assert_eq!(navigation.url, "https://doc.rust-lang.org/book/");
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod omnibox;
pub mod parsers;
pub mod platform;
pub mod sources;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use models::{Item, remove_duplicate};
pub use omnibox::{Navigation, Outcome, PopupEvent, SearchEngine, Session, SessionOptions, resolve};
pub use sources::{SourceLists, SourceLoader, flatten_tree_node};
pub use utils::paths::format_path_with_tilde;
