use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Item;

/// One entry of a browser history export, shaped like `chrome.history.search` results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_visit_time"
    )]
    pub last_visit_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visit_count: Option<u64>,
}

impl HistoryRecord {
    /// Convert to a suggestion item.
    ///
    /// Untitled pages use their url as title; records without a url yield nothing.
    pub fn into_item(self) -> Option<Item> {
        if self.url.trim().is_empty() {
            return None;
        }
        let title = match self.title {
            Some(title) if !title.is_empty() => title,
            _ => self.url.clone(),
        };
        Some(Item { title, url: self.url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_item_with_title() {
        let record = HistoryRecord {
            title: Some("Rust".to_string()),
            url: "https://rust-lang.org".to_string(),
            last_visit_time: None,
            visit_count: None,
        };
        assert_eq!(record.into_item(), Some(Item::new("Rust", "https://rust-lang.org")));
    }

    #[test]
    fn test_into_item_untitled_uses_url() {
        let record = HistoryRecord {
            title: Some(String::new()),
            url: "https://example.com/a".to_string(),
            last_visit_time: None,
            visit_count: None,
        };
        let item = record.into_item().unwrap();
        assert_eq!(item.title, "https://example.com/a");
    }

    #[test]
    fn test_into_item_without_url() {
        let record = HistoryRecord {
            title: Some("Orphan".to_string()),
            url: "  ".to_string(),
            last_visit_time: None,
            visit_count: None,
        };
        assert!(record.into_item().is_none());
    }
}
