use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Popup layout
pub struct AppLayout {
    pub input_area: Rect,
    pub results_area: Rect,
    pub preview_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Input box: top, 3 rows
    /// - Suggestions: 60% width (left)
    /// - Preview pane: 40% width (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input box
                Constraint::Min(3),    // Suggestions and preview
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical_chunks[1]);

        Self {
            input_area: vertical_chunks[0],
            results_area: horizontal_chunks[0],
            preview_area: horizontal_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}

/// Suggestion row under a screen position inside the bordered results area
pub fn slot_at(results_area: Rect, column: u16, row: u16) -> Option<usize> {
    let inner_left = results_area.x.saturating_add(1);
    let inner_right = results_area.x.saturating_add(results_area.width).saturating_sub(1);
    let inner_top = results_area.y.saturating_add(1);
    let inner_bottom = results_area.y.saturating_add(results_area.height).saturating_sub(1);

    if column < inner_left || column >= inner_right || row < inner_top || row >= inner_bottom {
        return None;
    }
    Some(usize::from(row - inner_top))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_correctly() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = AppLayout::new(area);

        assert_eq!(layout.input_area.height, 3);
        assert_eq!(layout.input_area.y, 0);

        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 29);

        assert_eq!(layout.results_area.y, 3);
        assert_eq!(layout.results_area.height, 26);
        assert_eq!(layout.preview_area.height, 26);

        assert_eq!(layout.results_area.width, 60);
        assert_eq!(layout.preview_area.width, 40);
    }

    #[test]
    fn test_slot_at_maps_rows_inside_border() {
        let results = Rect::new(0, 3, 60, 20);

        assert_eq!(slot_at(results, 5, 4), Some(0));
        assert_eq!(slot_at(results, 5, 10), Some(6));

        // Borders and outside
        assert_eq!(slot_at(results, 5, 3), None);
        assert_eq!(slot_at(results, 0, 5), None);
        assert_eq!(slot_at(results, 59, 5), None);
        assert_eq!(slot_at(results, 5, 22), None);
        assert_eq!(slot_at(results, 70, 5), None);
    }
}
