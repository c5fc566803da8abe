//! システムクリップボードへのコピー

use crate::error::Result;
use arboard::Clipboard;
use carimbo_common::Error;

pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| Error::Clipboard(e.to_string()))?;
    tracing::debug!(chars = text.chars().count(), "copied to clipboard");
    Ok(())
}
