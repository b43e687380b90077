//! Popup session state and its event dispatcher.
//!
//! A [`Session`] owns everything one popup needs: the cached candidate lists,
//! the rendered slots, the active index, the input field and the Control
//! modifier. Hosts feed it [`PopupEvent`]s and act on the returned [`Outcome`].
//!
//! Two ordering rules hold for every event:
//! - on new input the selection resets before the new suggestions are rendered
//! - arrow keys clamp against the rendered count of the latest render

use tracing::debug;

use super::matcher::{SearchEngine, suggestions};
use super::navigator::{Navigation, resolve};
use super::selection::{SelectionDelta, SelectionTracker};
use super::slots::{DEFAULT_ITEM_MAX_LENGTH, SuggestionSlots};
use crate::models::DEFAULT_FAVICON_URL;
use crate::sources::SourceLists;

/// Longest input the popup accepts, in bytes
pub const MAX_INPUT_LEN: usize = 2048;

/// Pages that should not be prefilled into the input
const NEW_TAB_PAGES: [&str; 5] =
    ["chrome://newtab/", "chrome://newtab", "about:newtab", "about:blank", "edge://newtab/"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEvent {
    /// The input field now holds this value
    Input(String),
    ArrowDown,
    ArrowUp,
    Enter,
    /// Direct click on a rendered row
    Click(usize),
    ControlDown,
    ControlUp,
    /// The joined source lists became available
    SourcesLoaded(SourceLists),
    /// Close without navigating
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// Navigate, then close the popup
    Commit(Navigation),
    Dismiss,
    /// The session already ended; the event was ignored
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub item_max_length: usize,
    pub engine: SearchEngine,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { item_max_length: DEFAULT_ITEM_MAX_LENGTH, engine: SearchEngine::default() }
    }
}

pub struct Session {
    engine: SearchEngine,
    sources: SourceLists,
    sources_ready: bool,
    slots: SuggestionSlots,
    selection: SelectionTracker,
    /// What the input field displays; mirrors the active row while one is selected
    input: String,
    /// What the user last typed; drives matching
    typed: String,
    /// Url of the active row (the hidden field), empty when none
    active_url: String,
    input_icon: String,
    mirrored: bool,
    control_held: bool,
    closed: bool,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            engine: options.engine,
            sources: SourceLists::default(),
            sources_ready: false,
            slots: SuggestionSlots::new(options.item_max_length),
            selection: SelectionTracker::new(),
            input: String::new(),
            typed: String::new(),
            active_url: String::new(),
            input_icon: DEFAULT_FAVICON_URL.to_string(),
            mirrored: false,
            control_held: false,
            closed: false,
        }
    }

    /// Put the current tab's url into the input, unless it is a new-tab page
    /// or longer than [`MAX_INPUT_LEN`]. Does not trigger matching.
    pub fn with_prefill(mut self, current_url: Option<&str>) -> Self {
        if let Some(url) = current_url.map(str::trim).filter(|url| !url.is_empty()) {
            if NEW_TAB_PAGES.contains(&url) {
                debug!("Not prefilling new-tab page {}", url);
            } else if url.len() > MAX_INPUT_LEN {
                debug!(len = url.len(), "Not prefilling overlong url");
            } else {
                self.input = url.to_string();
            }
        }
        self
    }

    pub fn handle(&mut self, event: PopupEvent) -> Outcome {
        if self.closed {
            debug!("Ignoring {:?} after the session ended", event);
            return Outcome::Closed;
        }

        match event {
            PopupEvent::Input(value) => {
                self.input = value.clone();
                self.typed = value;
                self.active_url.clear();
                self.input_icon = DEFAULT_FAVICON_URL.to_string();
                self.mirrored = false;
                self.refresh();
                Outcome::Continue
            }
            PopupEvent::ArrowDown => self.step(SelectionDelta::Down),
            PopupEvent::ArrowUp => self.step(SelectionDelta::Up),
            PopupEvent::Enter => {
                let active_url = Some(self.active_url.as_str()).filter(|url| !url.is_empty());
                let navigation = resolve(&self.input, active_url, self.control_held, &self.engine);
                self.closed = true;
                Outcome::Commit(navigation)
            }
            PopupEvent::Click(index) => match self.slots.get(index) {
                Some(slot) => {
                    let navigation = Navigation {
                        url: slot.item.url.clone(),
                        open_in_new_tab: self.control_held,
                    };
                    self.closed = true;
                    Outcome::Commit(navigation)
                }
                None => Outcome::Continue,
            },
            PopupEvent::ControlDown => {
                self.control_held = true;
                Outcome::Continue
            }
            PopupEvent::ControlUp => {
                self.control_held = false;
                Outcome::Continue
            }
            PopupEvent::SourcesLoaded(lists) => {
                self.sources = lists;
                self.sources_ready = true;
                self.refresh();
                Outcome::Continue
            }
            PopupEvent::Dismiss => {
                self.closed = true;
                Outcome::Dismiss
            }
        }
    }

    /// Reset the selection, then re-render the typed query
    fn refresh(&mut self) {
        self.selection.apply(SelectionDelta::Reset, self.slots.rendered_count());
        let rendered = suggestions(
            &self.typed,
            self.sources.pool(),
            self.slots.capacity(),
            &self.engine,
        );
        self.slots.fill(&rendered, &self.typed, true);
        self.show_selection();
    }

    fn step(&mut self, delta: SelectionDelta) -> Outcome {
        self.selection.apply(delta, self.slots.rendered_count());
        self.show_selection();
        Outcome::Continue
    }

    /// Highlight exactly the active row and mirror it into the input fields
    fn show_selection(&mut self) {
        let active = self.selection.active();
        self.slots.set_active(active);

        match self.slots.active() {
            Some((index, slot)) => {
                self.input = if index == 0 && !self.typed.is_empty() {
                    // The search row shows the raw query, not its decorated title
                    self.typed.clone()
                } else {
                    slot.item.title.clone()
                };
                self.active_url = slot.item.url.clone();
                self.input_icon = slot.icon_url.clone();
                self.mirrored = true;
            }
            None => {
                if self.mirrored {
                    self.input = self.typed.clone();
                    self.mirrored = false;
                }
                self.active_url.clear();
                self.input_icon = DEFAULT_FAVICON_URL.to_string();
            }
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn active_url(&self) -> Option<&str> {
        Some(self.active_url.as_str()).filter(|url| !url.is_empty())
    }

    pub fn input_icon(&self) -> &str {
        &self.input_icon
    }

    pub fn selection(&self) -> isize {
        self.selection.index()
    }

    pub fn slots(&self) -> &SuggestionSlots {
        &self.slots
    }

    pub fn sources(&self) -> &SourceLists {
        &self.sources
    }

    pub fn is_ready(&self) -> bool {
        self.sources_ready
    }

    pub fn control_held(&self) -> bool {
        self.control_held
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }
}
