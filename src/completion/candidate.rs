/// A single completion offering. `value` is what gets spliced into the
/// buffer on accept; `display` is what the popup shows (falls back to
/// `value` when empty); `suffix` is a greyed-out trailing character shown
/// as a ghost preview only (e.g. `/` after a directory) - it is not part of
/// `value` and is never inserted by accepting the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub display: String,
    pub description: String,
    pub suffix: String,
}

impl Candidate {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            value,
            display: String::new(),
            description: String::new(),
            suffix: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// What the popup should render for this row.
    pub fn display_text(&self) -> &str {
        if self.display.is_empty() {
            &self.value
        } else {
            &self.display
        }
    }
}

/// Removes duplicate candidates by `value`, preserving first-seen order -
/// this is what lets a higher-priority source's candidate win over a
/// lower-priority source's candidate of the same value.
pub fn dedup_by_value(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.value.clone()))
        .collect()
}
