// TUI host for the popup
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::App;
use terminal::TerminalManager;

use crate::omnibox::{Navigation, Session, TabController};
use crate::sources::SourceLoader;

/// Run the popup in the terminal until it navigates or is dismissed
pub fn run_interactive(
    session: Session,
    loader: SourceLoader,
    tabs: Box<dyn TabController>,
) -> Result<Option<Navigation>> {
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(session, Some(loader), tabs);

    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    res
}
