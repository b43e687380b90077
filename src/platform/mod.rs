//! Integration with the host system: the browser and the clipboard.

pub mod clipboard;
pub mod opener;

pub use clipboard::{ClipboardProvider, SystemClipboard, copy_to_clipboard, copy_with};
pub use opener::{BrowserCommand, CommandRunner, ProcessCommandRunner, StdoutTabs, SystemBrowser};
