//! JSON parsers for exported browser history and bookmark files
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **Individual record failures**: Malformed history records (array elements or JSONL
//!   lines) and malformed bookmark roots are logged and skipped, so one bad entry does
//!   not hide the rest of the user's data.
//!
//! - **Catastrophic failure detection**: If >50% of history records fail to parse, or if
//!   >100 consecutive errors occur, the parser returns an error instead of a misleadingly
//!   small history.
//!
//! - **Size limits**: Files over 10MB are rejected before reading.
//!
//! - **Error propagation**: Uses `anyhow::Result` with context; callers (the file-backed
//!   stores) decide whether a failure degrades to an empty source.

pub mod bookmarks;
pub mod deserializers;
pub mod history;

pub use bookmarks::{parse_bookmarks_file, parse_bookmarks_str};
pub use history::{parse_history_file, parse_history_str};
