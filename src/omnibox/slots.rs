use super::highlight::{Segment, highlight};
use crate::models::{Item, favicon_url};

/// Default number of suggestion rows: the search suggestion plus 14 matches
pub const DEFAULT_ITEM_MAX_LENGTH: usize = 15;

/// One pre-allocated suggestion row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    pub visible: bool,
    pub active: bool,
    pub item: Item,
    pub icon_url: String,
    pub title_segments: Vec<Segment>,
    /// `None` for the search suggestion, which shows no url suffix
    pub url_segments: Option<Vec<Segment>>,
}

/// Fixed pool of suggestion rows. Rows are filled and hidden, never created or
/// destroyed after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionSlots {
    slots: Vec<Slot>,
}

impl Default for SuggestionSlots {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_MAX_LENGTH)
    }
}

impl SuggestionSlots {
    pub fn new(item_max_length: usize) -> Self {
        Self { slots: vec![Slot::default(); item_max_length] }
    }

    /// How many rows exist
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Rows currently visible; always a prefix of the pool
    pub fn rendered_count(&self) -> usize {
        self.slots.iter().take_while(|slot| slot.visible).count()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index).filter(|slot| slot.visible)
    }

    pub fn visible(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().take_while(|slot| slot.visible)
    }

    /// Fill rows from `suggestions` in order and hide the rest. Anything past
    /// the capacity is dropped. When `search_first` is set, row 0 is rendered
    /// without a url suffix.
    pub fn fill(&mut self, suggestions: &[Item], query: &str, search_first: bool) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            match suggestions.get(idx) {
                Some(item) => {
                    let is_search = search_first && idx == 0;
                    *slot = Slot {
                        visible: true,
                        active: false,
                        item: item.clone(),
                        icon_url: favicon_url(&item.url),
                        title_segments: highlight(&item.title, query),
                        url_segments: (!is_search).then(|| highlight(&item.url, query)),
                    };
                }
                None => {
                    slot.visible = false;
                    slot.active = false;
                }
            }
        }
    }

    /// Mark exactly one row active, or none
    pub fn set_active(&mut self, active: Option<usize>) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            slot.active = slot.visible && Some(idx) == active;
        }
    }

    pub fn active(&self) -> Option<(usize, &Slot)> {
        self.slots.iter().enumerate().find(|(_, slot)| slot.active)
    }

    /// Hide every row
    pub fn clear(&mut self) {
        self.fill(&[], "", false);
    }
}
