use anyhow::{anyhow, Result};

/// Host capability for writing text to the system clipboard. May fail, e.g.
/// when the display server denies access.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Keeps the last written text in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    writes: usize,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Clipboard that always refuses writes.
#[derive(Debug, Clone)]
pub struct DeniedClipboard {
    reason: String,
}

impl DeniedClipboard {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ClipboardSink for DeniedClipboard {
    fn write_text(&mut self, _text: &str) -> Result<()> {
        Err(anyhow!("{}", self.reason))
    }
}

#[cfg(feature = "system-clipboard")]
pub use system::SystemClipboard;

#[cfg(feature = "system-clipboard")]
mod system {
    use anyhow::{Context, Result};
    use arboard::Clipboard;

    use super::ClipboardSink;

    /// OS clipboard via `arboard`. The handle is opened lazily on first write
    /// and dropped after a failure so the next write retries the connection.
    #[derive(Default)]
    pub struct SystemClipboard {
        inner: Option<Clipboard>,
    }

    impl SystemClipboard {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl ClipboardSink for SystemClipboard {
        fn write_text(&mut self, text: &str) -> Result<()> {
            let mut clipboard = match self.inner.take() {
                Some(clipboard) => clipboard,
                None => Clipboard::new().context("failed to open system clipboard")?,
            };
            clipboard
                .set_text(text)
                .context("failed to write to system clipboard")?;
            self.inner = Some(clipboard);
            Ok(())
        }
    }
}
