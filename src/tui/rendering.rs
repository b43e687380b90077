use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use crate::omnibox::{Segment, Session, Slot};
use crate::sources::{SourceKind, SourceLists};
use crate::utils::strip_ansi_codes;

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const BAR: Color = Color::Rgb(24, 24, 27);

/// State outside the session that the UI shows
pub struct RenderState<'a> {
    pub loading: bool,
    /// Sources that did not arrive in time
    pub missing: &'a [SourceKind],
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, session: &Session, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_input(frame, layout.input_area, session);
    render_results_list(frame, layout.results_area, session);
    render_preview(frame, layout.preview_area, session);
    render_status_bar(frame, layout.status_area, session.sources(), state);
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(title)
}

fn render_input(frame: &mut Frame, area: Rect, session: &Session) {
    let title = if session.control_held() { " Open in new tab " } else { " Search or type a URL " };
    let input = strip_ansi_codes(session.input());

    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(ACCENT)),
        Span::raw(input.clone()),
    ]))
    .block(bordered(title));
    frame.render_widget(paragraph, area);

    // Cursor after the text, inside the border
    let offset = u16::try_from(input.chars().count()).unwrap_or(u16::MAX).saturating_add(3);
    if offset < area.width.saturating_sub(1) {
        frame.set_cursor_position((area.x + offset, area.y + 1));
    }
}

fn segment_spans(segments: &[Segment], base: Style) -> Vec<Span<'static>> {
    segments
        .iter()
        .map(|segment| {
            let style = if segment.emphasized {
                base.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                base
            };
            Span::styled(strip_ansi_codes(&segment.text), style)
        })
        .collect()
}

fn slot_line(slot: &Slot) -> Line<'static> {
    let (title_style, url_style) = if slot.active {
        let active = Style::default().fg(BRIGHT).bg(ACCENT);
        (active.add_modifier(Modifier::BOLD), active)
    } else {
        (Style::default().fg(BRIGHT), Style::default().fg(MUTED))
    };

    let mut spans = segment_spans(&slot.title_segments, title_style);
    if let Some(url_segments) = &slot.url_segments {
        spans.push(Span::styled(" - ", url_style));
        spans.extend(segment_spans(url_segments, url_style));
    }
    Line::from(spans)
}

fn render_results_list(frame: &mut Frame, area: Rect, session: &Session) {
    let items: Vec<ListItem> = session.slots().visible().map(|slot| ListItem::new(slot_line(slot))).collect();

    let list = List::new(items).block(bordered(" Suggestions "));
    frame.render_widget(list, area);
}

fn render_preview(frame: &mut Frame, area: Rect, session: &Session) {
    let content = match session.slots().active() {
        Some((index, slot)) => {
            let target = if session.control_held() { "new tab" } else { "current tab" };
            let label = |text: &'static str| Span::styled(text, Style::default().fg(MUTED));
            Text::from(vec![
                Line::from(vec![label("Title: "), Span::raw(strip_ansi_codes(&slot.item.title))]),
                Line::from(vec![label("URL: "), Span::raw(strip_ansi_codes(&slot.item.url))]),
                Line::from(vec![label("Icon: "), Span::raw(strip_ansi_codes(&slot.icon_url))]),
                Line::from(vec![label("Row: "), Span::raw(format!("{}", index + 1))]),
                Line::from(""),
                Line::from(vec![label("Enter opens in "), Span::raw(target)]),
            ])
        }
        None if session.slots().rendered_count() > 0 => Text::from("Use ↑/↓ to select a suggestion"),
        None => Text::from("Start typing to search history and bookmarks"),
    };

    let paragraph = Paragraph::new(content).block(bordered(" Preview ")).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, sources: &SourceLists, state: &RenderState) {
    let (status_text, style) = if let Some(message) = state.status_message {
        let fg = match message.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => ERROR,
        };
        (format!(" {} ", message.text), Style::default().fg(fg).bg(BAR))
    } else if state.loading {
        (" Loading history and bookmarks... | Esc: close ".to_string(), Style::default().fg(BRIGHT).bg(BAR))
    } else {
        let mut parts = vec![format!(
            "{} candidates ({} domains, {} history, {} bookmarks)",
            sources.len(),
            sources.domains.len(),
            sources.history.len(),
            sources.bookmarks.len()
        )];

        if !state.missing.is_empty() {
            let missing: Vec<String> = state.missing.iter().map(|kind| kind.to_string()).collect();
            parts.push(format!("unavailable: {}", missing.join(", ")));
        }

        parts.push("Enter: open".to_string());
        parts.push("Ctrl+Enter: new tab".to_string());
        parts.push("Ctrl+Y: copy url".to_string());
        parts.push("Esc: close".to_string());

        (format!(" {} ", parts.join(" | ")), Style::default().fg(BRIGHT).bg(BAR))
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
