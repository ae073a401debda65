use std::borrow::Cow;

use crate::edit_mode::PromptEditMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptHistorySearchStatus {
    Passing,
    Failing,
}

#[derive(Debug, Clone)]
pub struct PromptHistorySearch {
    pub status: PromptHistorySearchStatus,
    pub term: String,
}

impl PromptHistorySearch {
    pub fn new(status: PromptHistorySearchStatus, term: String) -> Self {
        Self { status, term }
    }
}

/// Renders the static chrome around the editable line: a left/right
/// segment, an indicator for continuation lines, and a history-search
/// banner while `Ctrl-r` is active.
pub trait Prompt: Send {
    fn render_prompt_left(&self) -> Cow<str>;
    fn render_prompt_right(&self) -> Cow<str>;
    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<str>;
    fn render_prompt_multiline_indicator(&self) -> Cow<str>;
    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str>;
}

#[derive(Debug, Clone, Default)]
pub struct DefaultPrompt {
    left_prompt: String,
}

impl DefaultPrompt {
    pub fn new(left_prompt: impl Into<String>) -> Self {
        Self {
            left_prompt: left_prompt.into(),
        }
    }
}

impl Prompt for DefaultPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed(&self.left_prompt)
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<str> {
        match edit_mode {
            PromptEditMode::Default => Cow::Borrowed("> "),
            PromptEditMode::Emacs => Cow::Borrowed("> "),
            PromptEditMode::Vi(crate::edit_mode::PromptViMode::Normal) => Cow::Borrowed(": "),
            PromptEditMode::Vi(crate::edit_mode::PromptViMode::Insert) => Cow::Borrowed("> "),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("::: ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "reverse-i-search",
            PromptHistorySearchStatus::Failing => "failed reverse-i-search",
        };
        Cow::Owned(format!("({prefix})`{}': ", history_search.term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompt_indicator_varies_by_mode() {
        let prompt = DefaultPrompt::new("bish");
        assert_eq!(prompt.render_prompt_indicator(PromptEditMode::Emacs), "> ");
    }

    #[test]
    fn history_search_indicator_reflects_status() {
        let prompt = DefaultPrompt::new("bish");
        let rendered = prompt.render_prompt_history_search_indicator(PromptHistorySearch::new(
            PromptHistorySearchStatus::Failing,
            "git".to_string(),
        ));
        assert!(rendered.contains("failed reverse-i-search"));
        assert!(rendered.contains("git"));
    }
}
