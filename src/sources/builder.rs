//! One-shot builders for the three candidate lists.
//!
//! # Error Handling Strategy
//!
//! - **Store failures** propagate as `anyhow` errors; the concurrent loader turns them
//!   into a missing source instead of aborting the session.
//! - **Per-item failures** (unparsable bookmark urls, history records without a url,
//!   url-less bookmark leaves) drop only that item and are logged.

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::store::{BookmarkStore, HistoryQuery, HistoryStore};
use crate::models::{BookmarkNode, Item, remove_duplicate};

/// Default cap on history entries requested from the store
pub const DEFAULT_MAX_HISTORY_RESULTS: usize = 6000;

/// Build the history list: all-time search capped at `max_results`, deduped by title
pub fn load_history(store: &dyn HistoryStore, max_results: usize) -> Result<Vec<Item>> {
    let records = store
        .search(&HistoryQuery::all_time(max_results))
        .context("History search failed")?;
    let fetched = records.len();

    let items: Vec<Item> = records.into_iter().filter_map(|record| record.into_item()).collect();
    let history = remove_duplicate(items);

    info!("Loaded {} history items ({} records fetched)", history.len(), fetched);
    Ok(history)
}

/// Collect the leaves of a bookmark tree, depth-first, children in order.
///
/// A node without `children` is a leaf; folders (including empty ones) are never
/// returned themselves.
pub fn flatten_tree_node(node: &BookmarkNode) -> Vec<&BookmarkNode> {
    let mut leaves = Vec::new();
    collect_leaves(node, &mut leaves);
    leaves
}

fn collect_leaves<'a>(node: &'a BookmarkNode, leaves: &mut Vec<&'a BookmarkNode>) {
    match &node.children {
        Some(children) => {
            for child in children {
                collect_leaves(child, leaves);
            }
        }
        None => leaves.push(node),
    }
}

/// Flatten bookmark roots into items, in tree order. Bookmarks are not deduped.
pub fn bookmark_items(roots: &[BookmarkNode]) -> Vec<Item> {
    let mut items = Vec::new();
    for root in roots {
        for leaf in flatten_tree_node(root) {
            match leaf.to_item() {
                Some(item) => items.push(item),
                None => debug!("Skipping bookmark without url: {:?}", leaf.title),
            }
        }
    }
    items
}

/// Build the bookmark list from the store's tree
pub fn load_bookmarks(store: &dyn BookmarkStore) -> Result<Vec<Item>> {
    let roots = store.get_tree().context("Bookmark tree request failed")?;
    let bookmarks = bookmark_items(&roots);
    info!("Loaded {} bookmarks", bookmarks.len());
    Ok(bookmarks)
}

/// Map every bookmark to its site, dropping unparsable urls, deduped by title
pub fn derive_domains(bookmarks: &[Item]) -> Vec<Item> {
    let domains: Vec<Item> =
        bookmarks.iter().filter_map(|bookmark| Item::domain_of(&bookmark.url)).collect();
    remove_duplicate(domains)
}
