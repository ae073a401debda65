//! Reverse-incremental history search (spec.md §4.5 / C11), the
//! `Ctrl-r`-driven state machine layered on top of [`crate::history::History`].

use crate::history::History;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Substring,
    Prefix,
    Fuzzy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Recency,
    Frequency,
    Alphabetical,
}

/// True when every character of `query` appears in `candidate` in order,
/// not necessarily contiguously - the loosest of the three filter modes.
fn fuzzy_matches(candidate: &str, query: &str) -> bool {
    let mut candidate_chars = candidate.chars();
    'outer: for qc in query.chars() {
        for cc in candidate_chars.by_ref() {
            if cc.eq_ignore_ascii_case(&qc) {
                continue 'outer;
            }
        }
        return false;
    }
    true
}

fn matches(candidate: &str, query: &str, mode: FilterMode) -> bool {
    if query.is_empty() {
        return true;
    }
    let candidate_lower = candidate.to_lowercase();
    let query_lower = query.to_lowercase();
    match mode {
        FilterMode::Substring => candidate_lower.contains(&query_lower),
        FilterMode::Prefix => candidate_lower.starts_with(&query_lower),
        FilterMode::Fuzzy => fuzzy_matches(candidate, query),
    }
}

#[derive(Debug, Clone)]
pub struct HistorySearchState {
    active: bool,
    query: String,
    filtered: Vec<String>,
    selected: usize,
    filter_mode: FilterMode,
    sort_mode: SortMode,
}

impl Default for HistorySearchState {
    fn default() -> Self {
        Self {
            active: false,
            query: String::new(),
            filtered: Vec::new(),
            selected: 0,
            filter_mode: FilterMode::Substring,
            sort_mode: SortMode::Recency,
        }
    }
}

impl HistorySearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    pub fn with_sort_mode(mut self, mode: SortMode) -> Self {
        self.sort_mode = mode;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_match(&self) -> Option<&str> {
        self.filtered.get(self.selected).map(String::as_str)
    }

    pub fn match_count(&self) -> usize {
        self.filtered.len()
    }

    /// `Ctrl-r`: enters the search with an empty query.
    pub fn enter(&mut self, history: &dyn History) {
        self.active = true;
        self.query.clear();
        self.selected = 0;
        self.recompute(history);
    }

    pub fn push_char(&mut self, c: char, history: &dyn History) {
        if !self.active {
            return;
        }
        self.query.push(c);
        self.selected = 0;
        self.recompute(history);
    }

    pub fn backspace(&mut self, history: &dyn History) {
        if !self.active {
            return;
        }
        self.query.pop();
        self.selected = 0;
        self.recompute(history);
    }

    /// `Up` while searching: moves toward older matches, clamped at the
    /// last one (no wraparound).
    pub fn next_match(&mut self) {
        if self.active && !self.filtered.is_empty() {
            self.selected = (self.selected + 1).min(self.filtered.len() - 1);
        }
    }

    /// `Down` while searching: moves toward newer matches, clamped at the
    /// first one (no wraparound).
    pub fn prev_match(&mut self) {
        if self.active {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    /// Advances through the three filter modes in declaration order,
    /// re-filtering the current query under the new mode.
    pub fn cycle_filter_mode(&mut self, history: &dyn History) {
        self.filter_mode = match self.filter_mode {
            FilterMode::Substring => FilterMode::Prefix,
            FilterMode::Prefix => FilterMode::Fuzzy,
            FilterMode::Fuzzy => FilterMode::Substring,
        };
        self.selected = 0;
        self.recompute(history);
    }

    /// Advances through the three sort modes in declaration order,
    /// re-sorting the current match set under the new mode.
    pub fn cycle_sort_mode(&mut self, history: &dyn History) {
        self.sort_mode = match self.sort_mode {
            SortMode::Recency => SortMode::Frequency,
            SortMode::Frequency => SortMode::Alphabetical,
            SortMode::Alphabetical => SortMode::Recency,
        };
        self.selected = 0;
        self.recompute(history);
    }

    /// Enter/accept: returns the currently selected command, leaving the
    /// search mode.
    pub fn accept(&mut self) -> Option<String> {
        let result = self.current_match().map(str::to_string);
        self.cancel();
        result
    }

    /// `Ctrl-g`/Escape: abandons the search without returning a command.
    pub fn cancel(&mut self) {
        self.active = false;
        self.query.clear();
        self.filtered.clear();
        self.selected = 0;
    }

    fn recompute(&mut self, history: &dyn History) {
        let total = history.len();
        let mut matches: Vec<(usize, String)> = (1..=total)
            .filter_map(|n| {
                history
                    .nth_most_recent_command(n)
                    .filter(|cmd| matches(cmd, &self.query, self.filter_mode))
                    .map(|cmd| (n, cmd.to_string()))
            })
            .collect();

        match self.sort_mode {
            SortMode::Recency => {}
            SortMode::Frequency => {
                let mut counts = std::collections::HashMap::new();
                for (_, cmd) in &matches {
                    *counts.entry(cmd.clone()).or_insert(0usize) += 1;
                }
                matches.sort_by(|a, b| counts[&b.1].cmp(&counts[&a.1]));
            }
            SortMode::Alphabetical => matches.sort_by(|a, b| a.1.cmp(&b.1)),
        }

        self.filtered = matches.into_iter().map(|(_, cmd)| cmd).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{FileBackedHistory, HistoryItem};

    fn history_with(commands: &[&str]) -> FileBackedHistory {
        let mut history = FileBackedHistory::new(100);
        for cmd in commands {
            history.append(HistoryItem::new(cmd.to_string()));
        }
        history
    }

    #[test]
    fn substring_search_filters_by_query() {
        let history = history_with(&["echo one", "git commit", "git push"]);
        let mut state = HistorySearchState::new();
        state.enter(&history);
        state.push_char('g', &history);
        state.push_char('i', &history);
        state.push_char('t', &history);
        assert_eq!(state.match_count(), 2);
    }

    #[test]
    fn next_match_advances_toward_older_entries() {
        let history = history_with(&["git commit", "git push"]);
        let mut state = HistorySearchState::new();
        state.enter(&history);
        state.push_char('g', &history);
        let first = state.current_match().unwrap().to_string();
        state.next_match();
        let second = state.current_match().unwrap().to_string();
        assert_ne!(first, second);
    }

    #[test]
    fn next_match_clamps_instead_of_wrapping() {
        let history = history_with(&["git commit", "git push"]);
        let mut state = HistorySearchState::new();
        state.enter(&history);
        state.push_char('g', &history);
        state.next_match();
        let at_end = state.current_match().unwrap().to_string();
        state.next_match();
        assert_eq!(state.current_match().unwrap(), at_end);
    }

    #[test]
    fn prev_match_clamps_at_most_recent() {
        let history = history_with(&["git commit", "git push"]);
        let mut state = HistorySearchState::new();
        state.enter(&history);
        state.push_char('g', &history);
        let most_recent = state.current_match().unwrap().to_string();
        state.prev_match();
        assert_eq!(state.current_match().unwrap(), most_recent);
    }

    #[test]
    fn cycle_filter_mode_advances_through_all_three() {
        let history = history_with(&["echo one"]);
        let mut state = HistorySearchState::new();
        state.enter(&history);
        assert_eq!(state.filter_mode, FilterMode::Substring);
        state.cycle_filter_mode(&history);
        assert_eq!(state.filter_mode, FilterMode::Prefix);
        state.cycle_filter_mode(&history);
        assert_eq!(state.filter_mode, FilterMode::Fuzzy);
        state.cycle_filter_mode(&history);
        assert_eq!(state.filter_mode, FilterMode::Substring);
    }

    #[test]
    fn cancel_clears_state() {
        let history = history_with(&["echo one"]);
        let mut state = HistorySearchState::new();
        state.enter(&history);
        state.push_char('e', &history);
        state.cancel();
        assert!(!state.is_active());
        assert_eq!(state.match_count(), 0);
    }

    #[test]
    fn fuzzy_mode_matches_out_of_order_subsequence() {
        assert!(fuzzy_matches("git commit", "gcm"));
        assert!(!fuzzy_matches("git commit", "mcg"));
    }
}
