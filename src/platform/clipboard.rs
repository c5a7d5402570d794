//! Clipboard write capability.

use anyhow::{Result, anyhow};

/// May fail; callers fall back to showing the value.
pub trait Clipboard: Send {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard through `arboard`.
///
/// A handle is opened per write, so the controller holding this stays `Send`
/// on every platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut cb = arboard::Clipboard::new().map_err(|e| anyhow!("clipboard unavailable: {e}"))?;
        cb.set_text(text.to_string())
            .map_err(|e| anyhow!("copy failed: {e}"))
    }
}
