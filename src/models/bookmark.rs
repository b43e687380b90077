use serde::{Deserialize, Serialize};

use super::Item;

/// A node of a bookmark tree.
///
/// Folders carry `children` (possibly empty); a node without `children` is a
/// leaf bookmark. Chromium's on-disk format names the title `name`, the
/// extension API names it `title`; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookmarkNode {
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
}

impl BookmarkNode {
    pub fn leaf(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: Some(url.into()), children: None }
    }

    pub fn folder(title: impl Into<String>, children: Vec<BookmarkNode>) -> Self {
        Self { title: title.into(), url: None, children: Some(children) }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Leaf bookmarks with a url become items; anything else yields nothing.
    pub fn to_item(&self) -> Option<Item> {
        match &self.url {
            Some(url) if self.is_leaf() && !url.is_empty() => {
                let title = if self.title.is_empty() { url.clone() } else { self.title.clone() };
                Some(Item { title, url: url.clone() })
            }
            _ => None,
        }
    }
}
