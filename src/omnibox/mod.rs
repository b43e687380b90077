//! Popup core: matching, highlighting, selection, rendering slots and navigation,
//! tied together by the [`Session`] event dispatcher.

pub mod highlight;
pub mod matcher;
pub mod navigator;
pub mod selection;
pub mod session;
pub mod slots;

pub use highlight::{Segment, highlight};
pub use matcher::{SearchEngine, match_items, suggestions};
pub use navigator::{Navigation, PopupHost, TabController, commit, is_url, resolve};
pub use selection::{NO_SELECTION, SelectionDelta, SelectionTracker};
pub use session::{MAX_INPUT_LEN, Outcome, PopupEvent, Session, SessionOptions};
pub use slots::{DEFAULT_ITEM_MAX_LENGTH, Slot, SuggestionSlots};
