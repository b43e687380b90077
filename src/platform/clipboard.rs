use anyhow::{Context, Result, bail};
use arboard::Clipboard;

/// Largest text accepted for copying (10MB)
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Clipboard access (mocked in tests)
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard through arboard
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        bail!("Nothing to copy");
    }
    if text.len() > MAX_CLIPBOARD_SIZE {
        bail!("Text too large for clipboard ({} bytes, max {})", text.len(), MAX_CLIPBOARD_SIZE);
    }
    Ok(())
}

/// Validate, then copy through `provider`
pub fn copy_with(provider: &mut dyn ClipboardProvider, text: &str) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)
}

/// Copy `text` to the system clipboard.
///
/// Validation runs before the clipboard is opened, so empty or oversized text
/// fails the same way on headless machines.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    validate_clipboard_text(text)?;
    let mut clipboard = SystemClipboard::new()?;
    clipboard.set_text(text)
}
