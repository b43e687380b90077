use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

/// Icon shown for the search suggestion and for urls without a usable host
pub const DEFAULT_FAVICON_URL: &str = "https://www.google.com/favicon.ico";

/// A navigable suggestion: one title/url pair.
///
/// Two items are considered the same for deduplication when their titles are
/// equal (ordinal, case-sensitive), regardless of their urls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub url: String,
}

impl Item {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into() }
    }

    /// Reduce a url to its site: `{ title: hostname, url: origin }`.
    ///
    /// Opaque origins fall back to the hostname as url. Returns `None` (and logs)
    /// when the url does not parse or carries no host.
    pub fn domain_of(url: &str) -> Option<Self> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(url, error = %e, "Skipping domain for unparsable url");
                return None;
            }
        };

        let hostname = match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => {
                debug!(url, "Skipping domain for url without host");
                return None;
            }
        };

        let origin = parsed.origin();
        let url = if origin.is_tuple() { origin.ascii_serialization() } else { hostname.clone() };

        Some(Self { title: hostname, url })
    }
}

/// Drop every item whose title was already seen, keeping first-seen order.
///
/// Titles are compared verbatim: no trimming, no case folding.
pub fn remove_duplicate(items: Vec<Item>) -> Vec<Item> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(item.title.clone())).collect()
}

/// Icon url for a suggestion: `https://<hostname>/favicon.ico`.
pub fn favicon_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.is_empty() => format!("https://{}/favicon.ico", host),
            _ => DEFAULT_FAVICON_URL.to_string(),
        },
        Err(e) => {
            debug!(url, error = %e, "Using default favicon for unparsable url");
            DEFAULT_FAVICON_URL.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_remove_duplicate_keeps_first_seen() {
        let items = vec![
            Item::new("Rust", "https://rust-lang.org"),
            Item::new("Docs", "https://docs.rs"),
            Item::new("Rust", "https://www.rust-lang.org/learn"),
        ];

        let unique = remove_duplicate(items);

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].url, "https://rust-lang.org");
        assert_eq!(unique[1].title, "Docs");
    }

    #[test]
    fn test_remove_duplicate_is_case_sensitive() {
        // Titles differing only by case or whitespace are distinct items
        let items = vec![
            Item::new("GitHub", "https://github.com"),
            Item::new("github", "https://github.com"),
            Item::new("GitHub ", "https://github.com"),
        ];

        assert_eq!(remove_duplicate(items).len(), 3);
    }

    #[test]
    fn test_remove_duplicate_same_url_different_title() {
        let items = vec![
            Item::new("Inbox (3)", "https://mail.example.com"),
            Item::new("Inbox (4)", "https://mail.example.com"),
        ];

        assert_eq!(remove_duplicate(items).len(), 2);
    }

    #[test]
    fn test_remove_duplicate_empty() {
        assert!(remove_duplicate(Vec::new()).is_empty());
    }

    #[test]
    fn test_domain_of_uses_origin() {
        let item = Item::domain_of("https://news.ycombinator.com/item?id=1").unwrap();
        assert_eq!(item.title, "news.ycombinator.com");
        assert_eq!(item.url, "https://news.ycombinator.com");
    }

    #[test]
    fn test_domain_of_keeps_non_default_port() {
        let item = Item::domain_of("http://localhost:8080/admin").unwrap();
        assert_eq!(item.title, "localhost");
        assert_eq!(item.url, "http://localhost:8080");
    }

    #[test]
    fn test_domain_of_opaque_origin_uses_hostname() {
        let item = Item::domain_of("chrome://settings/privacy").unwrap();
        assert_eq!(item.title, "settings");
        assert_eq!(item.url, "settings");
    }

    #[test]
    fn test_domain_of_unparsable() {
        assert!(Item::domain_of("not a url").is_none());
        assert!(Item::domain_of("").is_none());
    }

    #[test]
    fn test_domain_of_without_host() {
        assert!(Item::domain_of("javascript:alert(1)").is_none());
        assert!(Item::domain_of("about:blank").is_none());
    }

    #[test]
    fn test_favicon_url() {
        assert_eq!(favicon_url("https://docs.rs/serde"), "https://docs.rs/favicon.ico");
        assert_eq!(favicon_url("garbage"), DEFAULT_FAVICON_URL);
        assert_eq!(favicon_url("data:text/plain,hi"), DEFAULT_FAVICON_URL);
    }

    fn item_strategy() -> impl Strategy<Value = Item> {
        ("[a-c]{0,2}", "[x-z]{0,2}").prop_map(|(title, url)| Item::new(title, url))
    }

    proptest! {
        #[test]
        fn proptest_remove_duplicate_unique_titles_in_first_seen_order(
            items in prop::collection::vec(item_strategy(), 0..40)
        ) {
            let unique = remove_duplicate(items.clone());

            let titles: HashSet<&str> = unique.iter().map(|i| i.title.as_str()).collect();
            prop_assert_eq!(titles.len(), unique.len());

            // Each kept item is the first occurrence of its title in the input
            for kept in &unique {
                let first = items.iter().find(|i| i.title == kept.title).unwrap();
                prop_assert_eq!(first, kept);
            }

            // Relative order is preserved
            let positions: Vec<usize> = unique
                .iter()
                .map(|kept| items.iter().position(|i| i.title == kept.title).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
