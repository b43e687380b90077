use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::models::BookmarkNode;
use crate::utils::validate_file_size;

/// Root folders of a Chromium `Bookmarks` file, in the order the browser lists them
const CHROMIUM_ROOTS: [&str; 3] = ["bookmark_bar", "other", "synced"];

/// Parse a bookmark file into its root nodes.
///
/// Accepted layouts:
/// - Chromium profile `Bookmarks` file (`{"roots": {"bookmark_bar": ..., ...}}`),
///   returned as a single synthetic root folder holding the browser roots
/// - `chrome.bookmarks.getTree` export (a JSON array of root nodes)
/// - A single bookmark node object
pub fn parse_bookmarks_file(path: &Path) -> Result<Vec<BookmarkNode>> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open bookmarks file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .with_context(|| format!("Failed to read bookmarks file: {}", path.display()))?;

    parse_bookmarks_str(&content)
        .with_context(|| format!("Failed to parse bookmarks file: {}", path.display()))
}

/// Parse bookmark content (see [`parse_bookmarks_file`])
pub fn parse_bookmarks_str(content: &str) -> Result<Vec<BookmarkNode>> {
    let value: Value = serde_json::from_str(content).context("Bookmarks are not valid JSON")?;

    match value {
        Value::Array(nodes) => {
            let mut roots = Vec::with_capacity(nodes.len());
            for (idx, node) in nodes.into_iter().enumerate() {
                match serde_json::from_value::<BookmarkNode>(node) {
                    Ok(node) => roots.push(node),
                    Err(e) => warn!("Skipping malformed bookmark root {}: {}", idx + 1, e),
                }
            }
            Ok(roots)
        }
        Value::Object(object) => match object.get("roots") {
            Some(Value::Object(roots)) => Ok(vec![chromium_root(roots)]),
            Some(_) => bail!("Bookmarks \"roots\" must be an object"),
            None => {
                let node: BookmarkNode = serde_json::from_value(Value::Object(object))
                    .context("Bookmarks object is neither a profile file nor a node")?;
                Ok(vec![node])
            }
        },
        _ => bail!("Bookmarks must be a JSON object or array"),
    }
}

fn chromium_root(roots: &Map<String, Value>) -> BookmarkNode {
    let mut children = Vec::new();
    for name in CHROMIUM_ROOTS {
        let Some(root) = roots.get(name) else {
            debug!("Bookmarks file has no \"{}\" root", name);
            continue;
        };
        match serde_json::from_value::<BookmarkNode>(root.clone()) {
            Ok(node) => children.push(node),
            Err(e) => warn!("Skipping malformed bookmark root \"{}\": {}", name, e),
        }
    }
    BookmarkNode::folder("", children)
}
