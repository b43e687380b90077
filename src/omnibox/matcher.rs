use serde::{Deserialize, Serialize};

use crate::models::Item;

pub const DEFAULT_SEARCH_URL_PREFIX: &str = "https://www.google.com/search?q=";
pub const DEFAULT_SEARCH_LABEL: &str = "Google Search";

/// Web search used for the synthetic first suggestion and for the Enter fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchEngine {
    /// Query text is appended to this prefix verbatim (spaces become `+`)
    pub url_prefix: String,
    /// Suffix of the search suggestion title: `"<query> - <label>"`
    pub label: String,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self {
            url_prefix: DEFAULT_SEARCH_URL_PREFIX.to_string(),
            label: DEFAULT_SEARCH_LABEL.to_string(),
        }
    }
}

impl SearchEngine {
    /// Search url for `query`. Only spaces are rewritten; nothing else is escaped.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}{}", self.url_prefix, query.replace(' ', "+"))
    }

    /// The synthetic "search the web for <query>" suggestion
    pub fn search_item(&self, query: &str) -> Item {
        Item { title: self.search_title(query), url: self.search_url(query) }
    }

    pub fn search_title(&self, query: &str) -> String {
        format!("{} - {}", query, self.label)
    }

    /// Recover the raw query from a search suggestion title
    pub fn query_from_title<'a>(&self, title: &'a str) -> &'a str {
        title.strip_suffix(&format!(" - {}", self.label)).unwrap_or(title)
    }
}

/// Items of `pool` whose title or url contains `query`, case-insensitively.
///
/// Pool order is preserved and the result is capped at `limit - 1`, leaving one
/// slot for the search suggestion the caller puts in front. A blank query
/// matches nothing.
pub fn match_items<'a, I>(query: &str, pool: I, limit: usize) -> Vec<Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    pool.into_iter()
        .filter(|item| {
            item.title.to_lowercase().contains(&needle) || item.url.to_lowercase().contains(&needle)
        })
        .take(limit.saturating_sub(1))
        .cloned()
        .collect()
}

/// Everything rendered for `query`: the search suggestion, then the matches.
///
/// An empty input renders nothing at all.
pub fn suggestions<'a, I>(query: &str, pool: I, limit: usize, engine: &SearchEngine) -> Vec<Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut rendered = Vec::with_capacity(limit);
    rendered.push(engine.search_item(query));
    rendered.extend(match_items(query, pool, limit));
    rendered
}
