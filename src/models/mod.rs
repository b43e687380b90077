//! Data models for omnibox suggestions and the browser data they come from.
//!
//! - [`Item`] - A navigable title/url pair, the unit every source produces
//! - [`HistoryRecord`] - One entry of a browser history export
//! - [`BookmarkNode`] - One node of a bookmark tree (folder or leaf)
//!
//! The wire models use serde with custom deserializers for visit timestamps in
//! the `parsers::deserializers` module.

pub mod bookmark;
pub mod history;
pub mod item;

pub use bookmark::BookmarkNode;
pub use history::HistoryRecord;
pub use item::{DEFAULT_FAVICON_URL, Item, favicon_url, remove_duplicate};
