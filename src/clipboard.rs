//! The kill ring's "yank" side also supports exchanging its top register
//! with the host OS clipboard, gated behind the `system_clipboard` feature
//! the same way the dependency is gated in `Cargo.toml`.

/// Minimal read/write seam so [`crate::core_editor::Editor`] never talks to
/// an OS clipboard API directly - the `system_clipboard` feature swaps in
/// [`SystemClipboard`], tests and headless builds get [`LocalClipboard`].
pub trait Clipboard: Send {
    fn get(&mut self) -> String;
    fn set(&mut self, content: String);
}

/// In-process clipboard: a single string register, no OS interaction.
/// Default when the `system_clipboard` feature is disabled.
#[derive(Debug, Default, Clone)]
pub struct LocalClipboard {
    content: String,
}

impl LocalClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for LocalClipboard {
    fn get(&mut self) -> String {
        self.content.clone()
    }

    fn set(&mut self, content: String) {
        self.content = content;
    }
}

#[cfg(feature = "system_clipboard")]
pub struct SystemClipboard {
    inner: clipboard::ClipboardContext,
}

#[cfg(feature = "system_clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        use clipboard::ClipboardProvider;
        Ok(Self {
            inner: clipboard::ClipboardContext::new()?,
        })
    }
}

#[cfg(feature = "system_clipboard")]
impl Clipboard for SystemClipboard {
    fn get(&mut self) -> String {
        use clipboard::ClipboardProvider;
        self.inner.get_contents().unwrap_or_default()
    }

    fn set(&mut self, content: String) {
        use clipboard::ClipboardProvider;
        let _ = self.inner.set_contents(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_clipboard_round_trips() {
        let mut clipboard = LocalClipboard::new();
        clipboard.set("hello".to_string());
        assert_eq!(clipboard.get(), "hello");
    }
}
