use nu_ansi_term::Style;

/// Produces the styled form of the current buffer contents for display.
/// The rendering layer (spec.md §4.6) is the only consumer; editing
/// operates on the plain-text buffer regardless of what this returns.
pub trait Highlighter: Send {
    fn highlight(&self, line: &str, cursor: usize) -> StyledText;
}

/// A sequence of `(style, text)` spans whose concatenated `text` values
/// reconstruct the original line exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    pub spans: Vec<(Style, String)>,
}

impl StyledText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            spans: vec![(Style::new(), text.into())],
        }
    }

    pub fn render_plain(&self) -> String {
        self.spans.iter().map(|(_, text)| text.as_str()).collect()
    }
}

/// Pass-through highlighter: no styling at all, the whole line in the
/// default terminal style. The spec's Non-goals exclude syntax
/// highlighting as a feature, but a highlighter seam/default impl is
/// ambient rendering plumbing the same way `reedline` ships one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHighlighter;

impl Highlighter for DefaultHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        StyledText::plain(line)
    }
}
