//! TUI application state and event handling.
//!
//! [`App`] hosts one popup [`Session`]: it feeds terminal input to the session as
//! [`PopupEvent`]s, polls the [`SourceLoader`] between key polls, and performs
//! the navigation once the session commits.
//!
//! - **Status messages**: transient feedback for clipboard and navigation errors
//! - **Dirty state tracking**: redraw only when state changes, or every 100ms

use std::time::{Duration, Instant};

use anyhow::{Error, Result};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use tracing::{error, info, warn};

use super::events::{Action, poll_event};
use super::layout::{AppLayout, slot_at};
use super::rendering::{RenderState, render_ui};
use crate::omnibox::{
    MAX_INPUT_LEN, Navigation, Outcome, PopupEvent, PopupHost, Session, TabController, commit,
    is_url,
};
use crate::platform::copy_to_clipboard;
use crate::sources::{SourceKind, SourceLoader};

const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
const STATUS_ERROR_DURATION_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// The popup window; closing it ends the event loop
#[derive(Debug, Default)]
struct PopupWindow {
    closed: bool,
}

impl PopupHost for PopupWindow {
    fn close(&mut self) {
        self.closed = true;
    }
}

pub struct App {
    session: Session,
    loader: Option<SourceLoader>,
    tabs: Box<dyn TabController>,
    window: PopupWindow,
    missing: Vec<SourceKind>,
    navigation: Option<Navigation>,
    navigation_error: Option<Error>,
    status_message: Option<StatusMessage>,
    /// Where suggestions were last drawn, for mouse hit-testing
    results_area: Rect,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(session: Session, loader: Option<SourceLoader>, tabs: Box<dyn TabController>) -> Self {
        Self {
            session,
            loader,
            tabs,
            window: PopupWindow::default(),
            missing: Vec::new(),
            navigation: None,
            navigation_error: None,
            status_message: None,
            results_area: Rect::default(),
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_closed(&self) -> bool {
        self.window.closed
    }

    /// What the popup navigated to, once it did
    pub fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    /// Run until the popup closes. Returns the navigation performed, if any.
    ///
    /// A failed navigation still closes the popup; its error is returned here.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<Option<Navigation>> {
        while !self.window.closed {
            let had_status = self.status_message.is_some();
            self.check_and_clear_expired_status();
            if had_status && self.status_message.is_none() {
                self.needs_redraw = true;
            }

            self.poll_sources();

            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100) {
                self.draw(terminal)?;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        if let Some(e) = self.navigation_error.take() {
            // Leave the failure on screen for the final frame
            self.draw(terminal)?;
            return Err(e);
        }
        Ok(self.navigation.clone())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut results_area = self.results_area;
        terminal.draw(|f| {
            results_area = AppLayout::new(f.area()).results_area;
            let state = RenderState {
                loading: self.loader.is_some(),
                missing: &self.missing,
                status_message: self.status_message.as_ref(),
            };
            render_ui(f, &self.session, &state);
        })?;
        self.results_area = results_area;
        self.needs_redraw = false;
        Ok(())
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn check_and_clear_expired_status(&mut self) {
        let should_clear =
            self.status_message.as_ref().map(|msg| Instant::now() >= msg.expires_at).unwrap_or(false);
        if should_clear {
            self.status_message = None;
        }
    }

    /// Hand the joined sources to the session once the loader delivers
    fn poll_sources(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        let Some(loaded) = loader.try_collect() else {
            return;
        };

        if !loaded.is_complete() {
            warn!(missing = ?loaded.missing, "Continuing with partial sources");
        }
        info!(candidates = loaded.lists.len(), "Sources ready");
        self.missing = loaded.missing;
        self.loader = None;
        self.dispatch(PopupEvent::SourcesLoaded(loaded.lists));
    }

    fn dispatch(&mut self, event: PopupEvent) {
        match self.session.handle(event) {
            Outcome::Continue => self.needs_redraw = true,
            Outcome::Commit(navigation) => self.navigate(navigation),
            Outcome::Dismiss => {
                info!("Popup dismissed");
                self.window.close();
            }
            Outcome::Closed => {}
        }
    }

    fn navigate(&mut self, navigation: Navigation) {
        match commit(&navigation, self.tabs.as_mut(), &mut self.window) {
            Ok(()) => self.navigation = Some(navigation),
            Err(e) => {
                error!(url = %navigation.url, error = %e, "Navigation failed");
                self.set_status(
                    format!("✗ Could not open {}: {:#}", navigation.url, e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
                self.navigation_error = Some(e);
            }
        }
    }

    /// Input may not grow past `MAX_INPUT_LEN`; shortening is always allowed so a
    /// long mirrored title can still be edited
    fn set_input(&mut self, value: String) {
        if value.len() <= MAX_INPUT_LEN || value.len() < self.session.input().len() {
            self.dispatch(PopupEvent::Input(value));
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.dispatch(PopupEvent::Dismiss),
            Action::Escape => {
                if self.session.input().is_empty() {
                    self.dispatch(PopupEvent::Dismiss);
                } else {
                    self.set_input(String::new());
                }
            }
            Action::MoveUp => self.dispatch(PopupEvent::ArrowUp),
            Action::MoveDown => self.dispatch(PopupEvent::ArrowDown),
            Action::Submit { control } => {
                if control && !self.session.control_held() {
                    self.dispatch(PopupEvent::ControlDown);
                }
                self.dispatch(PopupEvent::Enter);
            }
            Action::ControlDown => self.dispatch(PopupEvent::ControlDown),
            Action::ControlUp => self.dispatch(PopupEvent::ControlUp),
            Action::InsertChar(c) => {
                let mut value = self.session.input().to_string();
                value.push(c);
                self.set_input(value);
            }
            Action::DeleteChar => {
                let mut value = self.session.input().to_string();
                if value.pop().is_some() {
                    self.set_input(value);
                }
            }
            Action::ClearInput => self.set_input(String::new()),
            Action::CopyUrl => self.copy_url(),
            Action::Click { column, row, control } => {
                if let Some(index) = slot_at(self.results_area, column, row)
                    && self.session.slots().get(index).is_some()
                {
                    if control && !self.session.control_held() {
                        self.dispatch(PopupEvent::ControlDown);
                    }
                    self.dispatch(PopupEvent::Click(index));
                }
            }
            Action::None => {}
        }
    }

    /// The url Ctrl+Y copies: the active suggestion's, else a typed url
    fn url_to_copy(&self) -> Option<String> {
        self.session
            .active_url()
            .map(str::to_string)
            .or_else(|| is_url(self.session.input()).then(|| self.session.input().trim().to_string()))
    }

    fn copy_url(&mut self) {
        let Some(url) = self.url_to_copy() else {
            self.set_status("✗ Nothing to copy", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };
        match copy_to_clipboard(&url) {
            Ok(()) => {
                self.set_status("✓ Copied url to clipboard", MessageType::Success, STATUS_SUCCESS_DURATION_MS)
            }
            Err(e) => self.set_status(
                format!("✗ Clipboard error: {}", e),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }
}
