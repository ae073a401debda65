use super::candidate::Candidate;

/// The active-completion state machine (spec.md §4.3 C5).
///
/// ```text
///           Tab (prefix has >=1 candidate)
/// Inactive ───────────────────────────────► Active[selected=0]
///    ^                                        |
///    | Escape / non-Tab-non-ShiftTab-non-Enter |  Tab            ShiftTab
///    |                                        ├────► selected=(i+1) mod n
///    |                                        ├────► selected=(i-1+n) mod n
///    |                                        |
///    | Enter (when popup visible)             |
///    └────────────────────────────────────────┘  applies suggestions[selected]
/// ```
#[derive(Debug, Default, Clone)]
pub struct CompletionState {
    active: bool,
    suggestions: Vec<Candidate>,
    selected: usize,
    prefix_start: usize,
    help_info: String,
}

impl CompletionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn suggestions(&self) -> &[Candidate] {
        &self.suggestions
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.suggestions.get(self.selected)
    }

    pub fn prefix_start(&self) -> usize {
        self.prefix_start
    }

    pub fn help_info(&self) -> &str {
        &self.help_info
    }

    pub fn set_help_info(&mut self, info: impl Into<String>) {
        self.help_info = info.into();
    }

    pub fn should_show_info_box(&self) -> bool {
        self.active && self.suggestions.len() > 1
    }

    pub fn should_show_help_box(&self) -> bool {
        self.active && !self.help_info.is_empty()
    }

    /// Starts a completion invocation (Tab with a previously-inactive
    /// popup). With zero candidates the state stays `Inactive`. With
    /// exactly one candidate, Tab accepts immediately: the state stays
    /// `Inactive` and the sole candidate is returned for the caller to
    /// splice in directly. With more than one, transitions to
    /// `Active[selected=0]` and returns `None`.
    pub fn begin(&mut self, suggestions: Vec<Candidate>, prefix_start: usize) -> Option<Candidate> {
        if suggestions.is_empty() {
            self.cancel();
            return None;
        }
        if suggestions.len() == 1 {
            self.cancel();
            return suggestions.into_iter().next();
        }
        self.prefix_start = prefix_start;
        self.suggestions = suggestions;
        self.selected = 0;
        self.active = true;
        None
    }

    pub fn next(&mut self) {
        if self.active && !self.suggestions.is_empty() {
            self.selected = (self.selected + 1) % self.suggestions.len();
        }
    }

    pub fn prev(&mut self) {
        if self.active && !self.suggestions.is_empty() {
            let n = self.suggestions.len();
            self.selected = (self.selected + n - 1) % n;
        }
    }

    /// Escape, or any keystroke that isn't Tab/Shift-Tab/Enter: leave
    /// `Active` without applying a candidate.
    pub fn cancel(&mut self) {
        self.active = false;
        self.suggestions.clear();
        self.selected = 0;
        self.help_info.clear();
    }

    /// Enter while the popup is visible: apply `suggestions[selected]` and
    /// return to `Inactive`.
    pub fn accept(&mut self) -> Option<Candidate> {
        let chosen = self.suggestions.get(self.selected).cloned();
        self.cancel();
        chosen
    }
}
