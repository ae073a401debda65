use crate::{
    history::History,
    kill_ring::{KillDirection, KillRing},
    shell_word::extract_last_word,
};

/// Controls whether the buffer's textual content is rendered verbatim,
/// masked (password fields), or hidden entirely. Word-structure-exposing
/// operations degrade to whole-buffer motions whenever this isn't `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoMode {
    Normal,
    Password { mask: char },
    None,
}

impl Default for EchoMode {
    fn default() -> Self {
        EchoMode::Normal
    }
}

fn is_space(c: char) -> bool {
    c.is_whitespace()
}

/// Rune-indexed line buffer. Never indexes by byte offset - every public
/// position is a `char` count, so multi-byte UTF-8 input can't desync the
/// cursor from the glyphs on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    runes: Vec<char>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self { runes: Vec::new() }
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            runes: s.chars().collect(),
        }
    }

    pub fn as_string(&self) -> String {
        self.runes.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.runes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }

    pub fn runes(&self) -> &[char] {
        &self.runes
    }

    fn splice(&mut self, start: usize, end: usize, replacement: &[char]) {
        self.runes.splice(start..end, replacement.iter().copied());
    }
}

/// The edit buffer and its cursor / kill-ring state machine (spec C1+C3).
///
/// `values[0]` is the live buffer; `values[1..]` are historical entries the
/// user is browsing but has not yet committed to editing. The moment any
/// mutating operation runs, `selected_value_index` collapses back to `0` -
/// history becomes read-only as soon as the user starts typing over it.
pub struct Editor {
    values: Vec<LineBuffer>,
    selected_value_index: usize,
    pos: usize,
    kill_ring: KillRing,
    validate: Option<Box<dyn Fn(&str) -> Option<String>>>,
    char_limit: Option<usize>,
    echo_mode: EchoMode,
    last_err: Option<String>,

    suppress_suggestions_until_input: bool,
    last_command_was_insert_arg: bool,
    last_inserted_arg_len: usize,
    last_insert_arg_history_index: usize,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            values: vec![LineBuffer::new()],
            selected_value_index: 0,
            pos: 0,
            kill_ring: KillRing::new(),
            validate: None,
            char_limit: None,
            echo_mode: EchoMode::Normal,
            last_err: None,
            suppress_suggestions_until_input: false,
            last_command_was_insert_arg: false,
            last_inserted_arg_len: 0,
            last_insert_arg_history_index: 0,
        }
    }

    pub fn with_validate(mut self, validate: Box<dyn Fn(&str) -> Option<String>>) -> Self {
        self.validate = Some(validate);
        self
    }

    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = Some(limit);
        self
    }

    pub fn set_echo_mode(&mut self, mode: EchoMode) {
        self.echo_mode = mode;
    }

    pub fn echo_mode(&self) -> EchoMode {
        self.echo_mode
    }

    pub fn err(&self) -> Option<&str> {
        self.last_err.as_deref()
    }

    pub fn kill_ring(&self) -> &KillRing {
        &self.kill_ring
    }

    pub fn suppress_suggestions_until_input(&self) -> bool {
        self.suppress_suggestions_until_input
    }

    pub fn last_command_was_insert_arg(&self) -> bool {
        self.last_command_was_insert_arg
    }

    fn current(&self) -> &LineBuffer {
        &self.values[self.selected_value_index]
    }

    fn current_mut(&mut self) -> &mut LineBuffer {
        &mut self.values[self.selected_value_index]
    }

    fn clamp_pos(&mut self) {
        let len = self.current().len();
        if self.pos > len {
            self.pos = len;
        }
    }

    fn run_validate(&mut self) {
        self.last_err = self
            .validate
            .as_ref()
            .and_then(|f| f(&self.value()));
    }

    /// Every mutation path runs this: collapse history browsing, clamp the
    /// cursor, and re-run the validation hook.
    fn after_mutation(&mut self) {
        self.selected_value_index = 0;
        self.clamp_pos();
        self.run_validate();
    }

    // --- basic accessors -------------------------------------------------

    pub fn value(&self) -> String {
        self.current().as_string()
    }

    pub fn set_value<S: Into<String>>(&mut self, s: S) {
        self.values[0] = LineBuffer::from_str(&s.into());
        self.selected_value_index = 0;
        self.pos = self.values[0].len();
        self.run_validate();
    }

    pub fn reset(&mut self) {
        self.values = vec![LineBuffer::new()];
        self.selected_value_index = 0;
        self.pos = 0;
        self.kill_ring = KillRing::new();
        self.last_err = None;
        self.suppress_suggestions_until_input = false;
        self.last_command_was_insert_arg = false;
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.current().len());
    }

    pub fn cursor_start(&mut self) {
        self.pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.pos = self.current().len();
    }

    pub fn move_left(&mut self) {
        self.pos = self.pos.saturating_sub(1);
        self.clear_insert_arg_state();
    }

    pub fn move_right(&mut self) {
        if self.pos < self.current().len() {
            self.pos += 1;
        }
        self.clear_insert_arg_state();
    }

    /// `EditCommand::Clear`: empties the buffer text without touching the
    /// kill ring, unlike [`Editor::reset`].
    pub fn clear_buffer(&mut self) {
        self.current_mut().splice(0, self.current().len(), &[]);
        self.pos = 0;
        self.after_mutation();
    }

    /// Replaces `start..end` with `replacement` and moves the cursor to
    /// just past it - used by completion acceptance, which replaces the
    /// partially-typed token with the chosen candidate.
    pub fn replace_range(&mut self, start: usize, end: usize, replacement: &[char]) {
        self.current_mut().splice(start, end, replacement);
        self.pos = start + replacement.len();
        self.after_mutation();
    }

    pub fn line_buffer(&self) -> &LineBuffer {
        self.current()
    }

    // --- history slot traversal (NextValue / PrevValue) ------------------

    pub fn push_history_value(&mut self, value: String) {
        self.values.insert(1, LineBuffer::from_str(&value));
    }

    pub fn next_value(&mut self) {
        if self.selected_value_index > 0 {
            self.selected_value_index -= 1;
            self.cursor_end();
        }
    }

    pub fn prev_value(&mut self) {
        if self.selected_value_index + 1 < self.values.len() {
            self.selected_value_index += 1;
            self.cursor_end();
        }
    }

    // --- insertion --------------------------------------------------------

    /// Sanitizes tabs/newlines to single spaces, enforces the char limit
    /// (truncating the incoming runes to the remaining space; a zero-space
    /// buffer makes this a no-op), splices at `pos`, advances `pos`, and
    /// clears the kill/yank/suggestion-suppression/insert-arg flags that any
    /// fresh insertion invalidates.
    pub fn insert_runes(&mut self, runes: &[char]) {
        let sanitized: Vec<char> = runes
            .iter()
            .map(|&c| if c == '\t' || c == '\n' { ' ' } else { c })
            .collect();

        let remaining = self
            .char_limit
            .map(|limit| limit.saturating_sub(self.current().len()));

        let to_insert: &[char] = match remaining {
            Some(0) => return,
            Some(n) if n < sanitized.len() => &sanitized[..n],
            _ => &sanitized,
        };

        let pos = self.pos;
        self.current_mut().splice(pos, pos, to_insert);
        self.pos += to_insert.len();

        self.kill_ring.clear_last_kill();
        self.kill_ring.clear_yank();
        self.suppress_suggestions_until_input = false;
        self.last_command_was_insert_arg = false;

        self.after_mutation();
    }

    pub fn insert_char(&mut self, c: char) {
        self.insert_runes(&[c]);
    }

    pub fn insert_str(&mut self, s: &str) {
        let runes: Vec<char> = s.chars().collect();
        self.insert_runes(&runes);
    }

    // --- single-rune deletion ----------------------------------------------

    pub fn delete_char_backward(&mut self) {
        if self.pos == 0 {
            return;
        }
        let pos = self.pos;
        self.current_mut().splice(pos - 1, pos, &[]);
        self.pos -= 1;
        self.kill_ring.clear_last_kill();
        self.after_mutation();
    }

    pub fn delete_char_forward(&mut self) {
        if self.pos >= self.current().len() {
            return;
        }
        let pos = self.pos;
        self.current_mut().splice(pos, pos + 1, &[]);
        self.kill_ring.clear_last_kill();
        self.after_mutation();
    }

    // --- word motion --------------------------------------------------------

    fn word_forward_index(&self, from: usize) -> usize {
        let runes = self.current().runes();
        let mut i = from;
        while i < runes.len() && is_space(runes[i]) {
            i += 1;
        }
        while i < runes.len() && !is_space(runes[i]) {
            i += 1;
        }
        i
    }

    fn word_backward_index(&self, from: usize) -> usize {
        let runes = self.current().runes();
        let mut i = from;
        while i > 0 && is_space(runes[i - 1]) {
            i -= 1;
        }
        while i > 0 && !is_space(runes[i - 1]) {
            i -= 1;
        }
        i
    }

    pub fn word_forward(&mut self) {
        if self.echo_mode != EchoMode::Normal {
            self.cursor_end();
            return;
        }
        self.pos = self.word_forward_index(self.pos);
    }

    pub fn word_backward(&mut self) {
        if self.echo_mode != EchoMode::Normal {
            self.cursor_start();
            return;
        }
        self.pos = self.word_backward_index(self.pos);
    }

    pub fn delete_word_forward(&mut self) {
        if self.echo_mode != EchoMode::Normal {
            self.delete_after_cursor();
            return;
        }
        let end = self.word_forward_index(self.pos);
        if end == self.pos {
            return;
        }
        let removed: Vec<char> = self.current().runes()[self.pos..end].to_vec();
        self.current_mut().splice(self.pos, end, &[]);
        self.kill_ring.record_kill(&removed, KillDirection::Forward);
        self.after_mutation();
    }

    pub fn delete_word_backward(&mut self) {
        if self.echo_mode != EchoMode::Normal {
            self.delete_before_cursor();
            return;
        }
        let start = self.word_backward_index(self.pos);
        if start == self.pos {
            return;
        }
        let removed: Vec<char> = self.current().runes()[start..self.pos].to_vec();
        self.current_mut().splice(start, self.pos, &[]);
        self.pos = start;
        self.kill_ring
            .record_kill(&removed, KillDirection::Backward);
        self.after_mutation();
    }

    // --- whole-side deletion (Ctrl-U / Ctrl-K) ------------------------------

    pub fn delete_before_cursor(&mut self) {
        let removed: Vec<char> = self.current().runes()[..self.pos].to_vec();
        self.current_mut().splice(0, self.pos, &[]);
        self.pos = 0;
        self.kill_ring
            .record_kill(&removed, KillDirection::Backward);
        self.suppress_suggestions_until_input = true;
        self.after_mutation();
    }

    pub fn delete_after_cursor(&mut self) {
        let len = self.current().len();
        let removed: Vec<char> = self.current().runes()[self.pos..].to_vec();
        self.current_mut().splice(self.pos, len, &[]);
        self.kill_ring.record_kill(&removed, KillDirection::Forward);
        self.suppress_suggestions_until_input = true;
        self.after_mutation();
    }

    // --- transpose -----------------------------------------------------------

    /// Ctrl-T. No-op if the line is shorter than two runes or the cursor is
    /// at the start. At end-of-line, swaps the last two runes in place
    /// (cursor doesn't move); otherwise swaps the rune before and under the
    /// cursor and advances by one.
    pub fn transpose_chars(&mut self) {
        let len = self.current().len();
        if len < 2 || self.pos == 0 {
            return;
        }

        if self.pos == len {
            let a = self.current().runes()[self.pos - 2];
            let b = self.current().runes()[self.pos - 1];
            self.current_mut().splice(self.pos - 2, self.pos, &[b, a]);
        } else {
            let a = self.current().runes()[self.pos - 1];
            let b = self.current().runes()[self.pos];
            self.current_mut()
                .splice(self.pos - 1, self.pos + 1, &[b, a]);
            self.pos += 1;
        }
        self.after_mutation();
    }

    /// Alt-T. Finds Word2 (the word at-or-after the cursor, or - if there is
    /// none after - the last word at-or-before end-of-line) and Word1 (the
    /// word immediately preceding Word2), then swaps them while preserving
    /// the separator between them. No-op if either word is missing.
    pub fn transpose_words(&mut self) {
        let runes = self.current().runes().to_vec();
        let len = runes.len();

        let is_word_char = |i: usize| i < len && !is_space(runes[i]);

        // Find word2 start: scan forward from pos skipping spaces; if we
        // run off the end, fall back to the last word at/before EOL.
        let mut w2_start = self.pos;
        while w2_start < len && is_space(runes[w2_start]) {
            w2_start += 1;
        }
        if w2_start >= len {
            // No word at or after pos - use the last word ending at/before EOL.
            let mut i = len;
            while i > 0 && is_space(runes[i - 1]) {
                i -= 1;
            }
            if i == 0 {
                return;
            }
            let mut start = i;
            while start > 0 && !is_space(runes[start - 1]) {
                start -= 1;
            }
            w2_start = start;
        }
        let mut w2_end = w2_start;
        while is_word_char(w2_end) {
            w2_end += 1;
        }
        if w2_end == w2_start {
            return;
        }

        // word1 is the word immediately preceding word2.
        let mut i = w2_start;
        while i > 0 && is_space(runes[i - 1]) {
            i -= 1;
        }
        let w1_end = i;
        let mut w1_start = w1_end;
        while w1_start > 0 && !is_space(runes[w1_start - 1]) {
            w1_start -= 1;
        }
        if w1_start == w1_end {
            return;
        }
        let sep_end = w2_start;
        let sep_start = w1_end;

        let word1: Vec<char> = runes[w1_start..w1_end].to_vec();
        let sep: Vec<char> = runes[sep_start..sep_end].to_vec();
        let word2: Vec<char> = runes[w2_start..w2_end].to_vec();

        let mut replacement = word2.clone();
        replacement.extend_from_slice(&sep);
        replacement.extend_from_slice(&word1);

        self.current_mut().splice(w1_start, w2_end, &replacement);
        self.pos = w1_start + replacement.len();
        self.after_mutation();
    }

    // --- insert-last-argument (Alt-.) ---------------------------------------

    /// Any non insert-last-arg keystroke clears `last_command_was_insert_arg`
    /// via the normal mutation paths (insert/delete/etc all reset it). Call
    /// this explicitly for operations that don't otherwise touch the buffer
    /// (pure cursor motions).
    pub fn clear_insert_arg_state(&mut self) {
        self.last_command_was_insert_arg = false;
    }

    pub fn insert_last_arg(
        &mut self,
        history: &dyn History,
        extractor: Option<&dyn Fn(&str) -> Option<String>>,
    ) {
        let total = history.len();
        if total == 0 {
            return;
        }

        let index = if self.last_command_was_insert_arg {
            if self.last_insert_arg_history_index >= total {
                1
            } else {
                self.last_insert_arg_history_index + 1
            }
        } else {
            1
        };

        let line = match history.nth_most_recent_command(index) {
            Some(line) => line.to_string(),
            None => return,
        };

        let arg = extractor
            .and_then(|f| f(&line))
            .unwrap_or_else(|| extract_last_word(&line));
        let arg_runes: Vec<char> = arg.chars().collect();

        if self.last_command_was_insert_arg {
            let start = self.pos.saturating_sub(self.last_inserted_arg_len);
            self.current_mut().splice(start, self.pos, &arg_runes);
            self.pos = start + arg_runes.len();
        } else {
            let pos = self.pos;
            self.current_mut().splice(pos, pos, &arg_runes);
            self.pos += arg_runes.len();
        }

        self.last_inserted_arg_len = arg_runes.len();
        self.last_insert_arg_history_index = index;
        self.last_command_was_insert_arg = true;

        // insert_last_arg itself must not clear its own flag; bypass the
        // usual insert_runes path that does.
        self.selected_value_index = 0;
        self.clamp_pos();
        self.run_validate();
    }

    // --- kill ring: yank / yank-pop ------------------------------------------

    pub fn yank(&mut self) {
        let pos = self.pos;
        if let Some(text) = self.kill_ring.yank(pos) {
            self.current_mut().splice(pos, pos, &text);
            self.pos += text.len();
            self.after_mutation();
        }
    }

    pub fn yank_pop(&mut self) {
        let (start, end) = self.kill_ring.yank_range();
        if let Some(replacement) = self.kill_ring.yank_pop() {
            self.current_mut().splice(start, end, &replacement);
            self.pos = start + replacement.len();
            self.after_mutation();
        }
    }

    pub fn record_external_kill(&mut self, text: &[char], direction: KillDirection) {
        self.kill_ring.record_kill(text, direction);
    }

    /// Overwrites the clipboard-backed yank register directly - used when
    /// an embedder wants `Ctrl-Y` to paste from the OS clipboard rather
    /// than the internal kill ring.
    pub fn insert_from_clipboard(&mut self, text: &str) {
        self.insert_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(s: &str, pos: usize) -> Editor {
        let mut e = Editor::new();
        e.set_value(s);
        e.set_cursor(pos);
        e
    }

    #[test]
    fn insert_advances_cursor_and_sanitizes() {
        let mut e = Editor::new();
        e.insert_runes(&['a', '\t', 'b', '\n']);
        assert_eq!(e.value(), "a b ");
        assert_eq!(e.offset(), 4);
    }

    #[test]
    fn char_limit_truncates_and_zero_space_is_noop() {
        let mut e = Editor::new().with_char_limit(3);
        e.insert_str("hello");
        assert_eq!(e.value(), "hel");
        e.insert_str("x");
        assert_eq!(e.value(), "hel");
    }

    #[test]
    fn word_forward_from_eol_is_noop() {
        let mut e = editor_with("one two", 7);
        e.word_forward();
        assert_eq!(e.offset(), 7);
    }

    #[test]
    fn word_backward_from_bol_is_noop() {
        let mut e = editor_with("one two", 0);
        e.word_backward();
        assert_eq!(e.offset(), 0);
    }

    #[test]
    fn transpose_chars_noop_below_two_or_at_start() {
        let mut e = editor_with("a", 1);
        e.transpose_chars();
        assert_eq!(e.value(), "a");

        let mut e = editor_with("ab", 0);
        e.transpose_chars();
        assert_eq!(e.value(), "ab");
    }

    #[test]
    fn transpose_chars_at_eol_swaps_last_two_in_place() {
        let mut e = editor_with("ab", 2);
        e.transpose_chars();
        assert_eq!(e.value(), "ba");
        assert_eq!(e.offset(), 2);
    }

    #[test]
    fn transpose_chars_midline_swaps_and_advances() {
        let mut e = editor_with("abc", 1);
        e.transpose_chars();
        assert_eq!(e.value(), "bac");
        assert_eq!(e.offset(), 2);
    }

    #[test]
    fn transpose_words_at_eol() {
        let mut e = editor_with("one two three", 13);
        e.transpose_words();
        assert_eq!(e.value(), "one three two");
    }

    #[test]
    fn kill_yank_yank_pop_scenario() {
        let mut e = editor_with("foo bar baz", 11);
        e.delete_word_backward();
        assert_eq!(e.value(), "foo bar ");
        e.delete_word_backward();
        assert_eq!(e.value(), "foo ");
        assert_eq!(e.kill_ring().len(), 1);
        e.yank();
        assert_eq!(e.value(), "foo bar baz");
        e.yank_pop();
        // only one ring entry - yank_pop is a no-op
        assert_eq!(e.value(), "foo bar baz");
    }

    #[test]
    fn history_slots_collapse_to_zero_on_edit() {
        let mut e = Editor::new();
        e.push_history_value("old line".into());
        e.next_value();
        assert_eq!(e.value(), "old line");
        e.insert_char('!');
        assert_eq!(e.value(), "old line!");
    }
}
