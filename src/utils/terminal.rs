//! Terminal output sanitization for page titles and urls
//!
//! Titles come straight from visited pages and bookmark exports, so they are
//! untrusted: a crafted `<title>` can embed ANSI escape sequences that move the
//! cursor or recolor the terminal when printed by `query` or drawn in the popup.
//! Everything shown to the user passes through [`strip_ansi_codes`] first.

/// Strips ANSI CSI escape sequences and control characters from a string
///
/// Suggestion rows are single-line, so newlines, carriage returns and tabs are
/// folded into plain spaces rather than kept.
///
/// # Examples
///
/// ```
/// use history_omnibox::utils::terminal::strip_ansi_codes;
///
/// let title = "\x1b[31mInbox\x1b[0m\n(3)";
/// assert_eq!(strip_ansi_codes(title), "Inbox (3)");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            // CSI sequence: ESC [ params... final letter
            if chars.peek() == Some(&'[') {
                chars.next();
                while let Some(next_ch) = chars.next() {
                    if next_ch.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }

        match ch {
            '\n' | '\r' | '\t' => result.push(' '),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_color_codes_from_title() {
        assert_eq!(strip_ansi_codes("\x1b[1;32mGitHub\x1b[0m - Home"), "GitHub - Home");
    }

    #[test]
    fn test_strip_cursor_movement() {
        assert_eq!(strip_ansi_codes("\x1b[2J\x1b[HPwned"), "Pwned");
    }

    #[test]
    fn test_lone_escape_is_dropped() {
        assert_eq!(strip_ansi_codes("a\x1bb"), "ab");
    }

    #[test]
    fn test_whitespace_controls_become_spaces() {
        assert_eq!(strip_ansi_codes("Line 1\nLine 2\tTabbed\r"), "Line 1 Line 2 Tabbed ");
    }

    #[test]
    fn test_bell_and_backspace_removed() {
        assert_eq!(strip_ansi_codes("Alert\x07\x08!"), "Alert!");
    }

    #[test]
    fn test_unicode_preserved() {
        assert_eq!(strip_ansi_codes("Café 🚀 \x1b[31m世界\x1b[0m"), "Café 🚀 世界");
    }

    #[test]
    fn test_plain_and_empty() {
        assert_eq!(strip_ansi_codes("https://example.com/a?b=c"), "https://example.com/a?b=c");
        assert_eq!(strip_ansi_codes(""), "");
    }
}
