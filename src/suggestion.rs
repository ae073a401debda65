//! Inline ghost-text suggestions (spec.md §4.2 / C4), adapted from the
//! teacher's `hinter.rs`: case-insensitive prefix match against a list of
//! candidate full lines, rendered as greyed-out text past the cursor.

use nu_ansi_term::{Color, Style};

/// Source of candidate lines a [`DefaultHinter`] matches the current
/// buffer content against - typically recent history entries.
pub trait Hinter {
    /// Called on every edit; returns the ghost-text suffix (not including
    /// `line`) to display after the cursor, or an empty string for none.
    fn handle(&mut self, line: &str, available: &[String]) -> String;

    fn current_hint(&self) -> &str;

    fn style(&self) -> Style;
}

#[derive(Debug, Clone)]
pub struct DefaultHinter {
    current: String,
    style: Style,
    /// Set by `Ctrl-g`/explicit suppression; cleared once the user starts
    /// typing again from an empty buffer.
    suppressed: bool,
}

impl Default for DefaultHinter {
    fn default() -> Self {
        Self {
            current: String::new(),
            style: Style::new().fg(Color::DarkGray),
            suppressed: false,
        }
    }
}

impl DefaultHinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Suppresses suggestions until the buffer goes back to empty - used
    /// when the user explicitly dismisses the current hint.
    pub fn suppress_until_empty(&mut self) {
        self.suppressed = true;
        self.current.clear();
    }
}

impl Hinter for DefaultHinter {
    fn handle(&mut self, line: &str, available: &[String]) -> String {
        if line.is_empty() {
            self.suppressed = false;
        }
        if self.suppressed || line.is_empty() {
            self.current.clear();
            return String::new();
        }

        let lower = line.to_lowercase();
        let found = available
            .iter()
            .rev()
            .find(|candidate| candidate.to_lowercase().starts_with(&lower) && candidate.len() > line.len());

        self.current = match found {
            Some(candidate) => candidate[line.len()..].to_string(),
            None => String::new(),
        };
        self.current.clone()
    }

    fn current_hint(&self) -> &str {
        &self.current
    }

    fn style(&self) -> Style {
        self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_most_recent_matching_entry() {
        let mut hinter = DefaultHinter::new();
        let available = vec!["git commit".to_string(), "git push".to_string()];
        let hint = hinter.handle("git c", &available);
        assert_eq!(hint, "ommit");
    }

    #[test]
    fn case_insensitive_prefix_match() {
        let mut hinter = DefaultHinter::new();
        let available = vec!["Git Commit".to_string()];
        let hint = hinter.handle("git c", &available);
        assert_eq!(hint, "ommit");
    }

    #[test]
    fn empty_line_clears_suppression_and_hint() {
        let mut hinter = DefaultHinter::new();
        hinter.suppress_until_empty();
        assert_eq!(hinter.handle("", &[]), "");
        let hint = hinter.handle("ec", &["echo".to_string()]);
        assert_eq!(hint, "ho");
    }

    #[test]
    fn no_match_yields_empty_hint() {
        let mut hinter = DefaultHinter::new();
        let hint = hinter.handle("zzz", &["echo".to_string()]);
        assert_eq!(hint, "");
    }
}
