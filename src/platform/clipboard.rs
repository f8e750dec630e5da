use crate::error::CapabilityError;

const CAPABILITY: &str = "clipboard";

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), CapabilityError>;
}

/// System clipboard through arboard. A fresh handle is opened per copy so a
/// display that appears or disappears mid-session is picked up.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), CapabilityError> {
        let mut clipboard = arboard::Clipboard::new().map_err(map_err)?;
        clipboard.set_text(text.to_owned()).map_err(map_err)
    }
}

fn map_err(err: arboard::Error) -> CapabilityError {
    match err {
        arboard::Error::ClipboardNotSupported => CapabilityError::Unsupported(CAPABILITY),
        other => CapabilityError::failed(CAPABILITY, other),
    }
}

/// In-memory clipboard for tests and headless runs.
#[derive(Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<(), CapabilityError> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_supported_maps_to_unsupported() {
        assert_eq!(
            map_err(arboard::Error::ClipboardNotSupported),
            CapabilityError::Unsupported("clipboard")
        );
        assert!(matches!(
            map_err(arboard::Error::ContentNotAvailable),
            CapabilityError::Failed { .. }
        ));
    }

    #[test]
    fn test_memory_clipboard_keeps_last_copy() {
        let mut clipboard = MemoryClipboard::default();
        clipboard.copy("one").unwrap();
        clipboard.copy("two").unwrap();
        assert_eq!(clipboard.contents.as_deref(), Some("two"));
    }
}
