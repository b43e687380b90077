/// Index meaning "nothing selected, the raw input stands"
pub const NO_SELECTION: isize = -1;

/// One transition of the active index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDelta {
    /// Arrow down: +1
    Down,
    /// Arrow up: -1
    Up,
    /// New input: jump below every valid index so the clamp lands on [`NO_SELECTION`]
    Reset,
}

impl SelectionDelta {
    fn offset(self, current: isize) -> isize {
        match self {
            SelectionDelta::Down => 1,
            SelectionDelta::Up => -1,
            // Lands strictly below -1 whatever the current index
            SelectionDelta::Reset => -(current.max(0)) - 2,
        }
    }
}

/// Bounded active index over the currently rendered suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTracker {
    index: isize,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self { index: NO_SELECTION }
    }
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> isize {
        self.index
    }

    /// The active slot, if any
    pub fn active(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }

    /// `next = clamp(prev + delta, -1, rendered_count - 1)`.
    ///
    /// `rendered_count` must be the count of the latest render; it can shrink
    /// between two arrow presses.
    pub fn apply(&mut self, delta: SelectionDelta, rendered_count: usize) -> isize {
        let upper = isize::try_from(rendered_count).unwrap_or(isize::MAX) - 1;
        let next = self.index.saturating_add(delta.offset(self.index));
        self.index = next.clamp(NO_SELECTION, upper.max(NO_SELECTION));
        self.index
    }
}
