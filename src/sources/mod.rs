pub mod builder;
pub mod files;
pub mod loader;
pub mod store;

pub use builder::{
    DEFAULT_MAX_HISTORY_RESULTS, bookmark_items, derive_domains, flatten_tree_node, load_bookmarks,
    load_history,
};
pub use files::{BookmarkFileStore, HistoryFileStore};
pub use loader::{DEFAULT_LOAD_TIMEOUT, LoadOptions, LoadedSources, SourceLoader};
pub use store::{BookmarkStore, HistoryQuery, HistoryStore, SourceKind, SourceLists};
