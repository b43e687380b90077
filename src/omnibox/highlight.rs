use regex::RegexBuilder;
use tracing::debug;

/// A run of display text, emphasized when it matches the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self { text: text.to_string(), emphasized: false }
    }

    fn emphasized(text: &str) -> Self {
        Self { text: text.to_string(), emphasized: true }
    }
}

/// Split `text` into segments, emphasizing every case-insensitive occurrence of
/// `query` taken literally.
///
/// Regex metacharacters in the query are escaped, so `"c++"` or `"(("` highlight
/// as plain text. If no pattern can be built the text comes back unhighlighted.
/// The segments always concatenate back to `text`.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    if query.is_empty() || text.is_empty() {
        return vec![Segment::plain(text)];
    }

    let pattern = match RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build() {
        Ok(pattern) => pattern,
        Err(e) => {
            debug!("Highlighting disabled for query {:?}: {}", query, e);
            return vec![Segment::plain(text)];
        }
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for found in pattern.find_iter(text) {
        if found.start() > last {
            segments.push(Segment::plain(&text[last..found.start()]));
        }
        segments.push(Segment::emphasized(found.as_str()));
        last = found.end();
    }
    if last < text.len() || segments.is_empty() {
        segments.push(Segment::plain(&text[last..]));
    }
    segments
}
