use std::io;
use std::time::Duration;

use crossterm::{event, event::Event, terminal};

use crate::{
    capability::{ExternalCompletionRunner, ShellCompletionRunner},
    clipboard::{Clipboard, LocalClipboard},
    completion::{self, CompletionState, DefaultCompleter, SpecRegistry, StaticCompleter},
    edit_command::EditCommand,
    edit_mode::{EditMode, Emacs},
    enums::{ReedlineEvent, Signal},
    highlighter::{DefaultHighlighter, Highlighter},
    history::{FileBackedHistory, History, HistoryItem},
    history_search::HistorySearchState,
    painter::Painter,
    prompt::{Prompt, PromptHistorySearch, PromptHistorySearchStatus},
    renderer::{self, RenderModel},
    suggestion::{DefaultHinter, Hinter},
    validator::{DefaultValidator, ValidationResult, Validator},
};
use crate::core_editor::Editor;

/// Determines how a keystroke is routed: straight into the buffer, into
/// the reverse-search query, or - while browsing Up/Down history - as a
/// fresh edit that collapses traversal back to `Regular`.
#[derive(Debug, PartialEq, Eq)]
enum InputMode {
    Regular,
    HistorySearch,
    HistoryTraversal,
}

/// The assembled line-editor: owns the buffer, history, completion
/// pipeline, and terminal painter, and drives the single-threaded
/// cooperative `Update`-style loop described in spec.md §5.
pub struct Reedline {
    editor: Editor,
    history: Box<dyn History>,
    input_mode: InputMode,

    validator: Box<dyn Validator>,
    highlighter: Box<dyn Highlighter>,
    hinter: Box<dyn Hinter>,
    edit_mode: Box<dyn EditMode>,
    clipboard: Box<dyn Clipboard>,
    external_runner: Box<dyn ExternalCompletionRunner>,

    spec_registry: SpecRegistry,
    static_completer: StaticCompleter,
    default_completer: DefaultCompleter,
    completion_state: CompletionState,
    history_search: HistorySearchState,
    history_query: String,

    painter: Painter<io::Stdout>,
    use_ansi_coloring: bool,
}

impl Drop for Reedline {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Reedline {
    /// Local, non-file-synced history; everything else at its default.
    pub fn create() -> io::Result<Self> {
        let builtin_names = crate::builtins::BUILTIN_NAMES
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut static_completer = StaticCompleter::from_map(completion::embedded::load());
        match crate::config::load() {
            Ok(Some(user_overrides)) => static_completer.merge_overriding(user_overrides),
            Ok(None) => {}
            Err(e) => log::warn!("ignoring unreadable completion config: {e}"),
        }

        Ok(Self {
            editor: Editor::default(),
            history: Box::new(FileBackedHistory::default()),
            input_mode: InputMode::Regular,
            validator: Box::new(DefaultValidator),
            highlighter: Box::new(DefaultHighlighter),
            hinter: Box::new(DefaultHinter::new()),
            edit_mode: Box::new(Emacs::default()),
            clipboard: Box::new(LocalClipboard::new()),
            external_runner: Box::new(ShellCompletionRunner),
            spec_registry: SpecRegistry::new(),
            static_completer,
            default_completer: DefaultCompleter::new(builtin_names),
            completion_state: CompletionState::new(),
            history_search: HistorySearchState::new(),
            history_query: String::new(),
            painter: Painter::new(io::stdout()),
            use_ansi_coloring: true,
        })
    }

    pub fn with_history(mut self, history: Box<dyn History>) -> Self {
        self.history = history;
        self
    }

    pub fn with_validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_highlighter(mut self, highlighter: Box<dyn Highlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    pub fn with_hinter(mut self, hinter: Box<dyn Hinter>) -> Self {
        self.hinter = hinter;
        self
    }

    pub fn with_edit_mode(mut self, edit_mode: Box<dyn EditMode>) -> Self {
        self.edit_mode = edit_mode;
        self
    }

    pub fn with_static_completer(mut self, static_completer: StaticCompleter) -> Self {
        self.static_completer = static_completer;
        self
    }

    pub fn with_ansi_colors(mut self, use_colors: bool) -> Self {
        self.use_ansi_coloring = use_colors;
        self
    }

    pub fn spec_registry_mut(&mut self) -> &mut SpecRegistry {
        &mut self.spec_registry
    }

    pub fn buffer_value(&self) -> String {
        self.editor.value()
    }

    /// Drives one [`ReedlineEvent`] through the same `Update` transition
    /// `read_line`'s terminal loop uses, without touching raw mode or the
    /// painter - the message re-entry seam spec.md §5 describes for
    /// asynchronously delivered results, and the seam a headless test
    /// harness drives the engine through instead of a real terminal.
    pub fn apply_event(&mut self, event: ReedlineEvent) -> Option<Signal> {
        self.handle_event(event)
    }

    /// Runs the interactive read loop until the user submits a line,
    /// aborts with Ctrl-C/Ctrl-D, or an I/O error interrupts raw mode.
    pub fn read_line(&mut self, prompt: &dyn Prompt) -> io::Result<Signal> {
        terminal::enable_raw_mode()?;
        self.painter.init_terminal_size()?;
        self.painter.initialize_prompt_position()?;
        self.editor.reset();
        self.input_mode = InputMode::Regular;

        let result = self.read_line_loop(prompt);
        terminal::disable_raw_mode()?;
        result
    }

    fn read_line_loop(&mut self, prompt: &dyn Prompt) -> io::Result<Signal> {
        self.repaint(prompt)?;
        loop {
            if !event::poll(Duration::from_millis(1000))? {
                continue;
            }
            let raw_event = event::read()?;
            if let Event::Resize(w, h) = raw_event {
                self.painter.handle_resize(w, h);
                self.repaint(prompt)?;
                continue;
            }

            let reedline_event = self.edit_mode.parse_event(raw_event);
            if let Some(signal) = self.handle_event(reedline_event) {
                return Ok(signal);
            }
            self.repaint(prompt)?;
        }
    }

    fn handle_event(&mut self, event: ReedlineEvent) -> Option<Signal> {
        match event {
            ReedlineEvent::None | ReedlineEvent::Mouse => None,
            ReedlineEvent::Resize(w, h) => {
                self.painter.handle_resize(w, h);
                None
            }
            ReedlineEvent::Repaint => None,
            ReedlineEvent::ClearScreen => {
                let _ = self.painter.clear_screen();
                None
            }
            ReedlineEvent::CtrlC => Some(Signal::CtrlC),
            ReedlineEvent::CtrlD => {
                if self.editor.is_empty() {
                    Some(Signal::CtrlD)
                } else {
                    self.run_edit_commands(&[EditCommand::Delete]);
                    None
                }
            }
            ReedlineEvent::Escape => {
                if self.history_search.is_active() {
                    self.history_search.cancel();
                    self.input_mode = InputMode::Regular;
                } else {
                    self.completion_state.cancel();
                }
                None
            }
            ReedlineEvent::Enter => self.handle_enter(),
            ReedlineEvent::Up | ReedlineEvent::PreviousHistory => {
                if self.history_search.is_active() {
                    self.history_search.next_match();
                } else {
                    self.history_traverse_backward();
                }
                None
            }
            ReedlineEvent::Down | ReedlineEvent::NextHistory => {
                if self.history_search.is_active() {
                    self.history_search.prev_match();
                } else {
                    self.history_traverse_forward();
                }
                None
            }
            ReedlineEvent::Left => {
                if self.history_search.is_active() {
                    self.handle_enter()
                } else {
                    self.editor.move_left();
                    None
                }
            }
            ReedlineEvent::Right => {
                if self.history_search.is_active() {
                    self.handle_enter()
                } else {
                    self.editor.move_right();
                    None
                }
            }
            ReedlineEvent::SearchHistory => {
                self.toggle_history_search();
                None
            }
            ReedlineEvent::CycleFilterMode => {
                if self.history_search.is_active() {
                    self.history_search.cycle_filter_mode(&*self.history);
                }
                None
            }
            ReedlineEvent::CycleSortMode => {
                if self.history_search.is_active() {
                    self.history_search.cycle_sort_mode(&*self.history);
                }
                None
            }
            ReedlineEvent::HandleTab => {
                self.handle_tab(true);
                None
            }
            ReedlineEvent::HandleShiftTab => {
                self.handle_tab(false);
                None
            }
            ReedlineEvent::Edit(commands) => {
                if self.history_search.is_active() {
                    self.apply_to_history_search(&commands);
                } else {
                    self.run_edit_commands(&commands);
                }
                None
            }
            ReedlineEvent::Paste(events) | ReedlineEvent::Multiple(events) => {
                for sub in events {
                    if let Some(signal) = self.handle_event(sub) {
                        return Some(signal);
                    }
                }
                None
            }
        }
    }

    fn handle_enter(&mut self) -> Option<Signal> {
        if self.history_search.is_active() {
            if let Some(command) = self.history_search.accept() {
                self.editor.set_value(command);
            }
            self.input_mode = InputMode::Regular;
            return None;
        }

        if self.completion_state.is_active() {
            let accepted = self.completion_state.accept();
            self.apply_completion(accepted);
            return None;
        }

        let line = self.editor.value();
        match self.validator.validate(&line) {
            ValidationResult::Complete => {
                self.history.append(HistoryItem::new(line.clone()));
                self.editor.reset();
                Some(Signal::Success(line))
            }
            ValidationResult::Incomplete => {
                self.run_edit_commands(&[EditCommand::InsertChar('\n')]);
                None
            }
        }
    }

    fn run_edit_commands(&mut self, commands: &[EditCommand]) {
        for command in commands {
            match command {
                EditCommand::MoveToStart => self.editor.cursor_start(),
                EditCommand::MoveToEnd => self.editor.cursor_end(),
                EditCommand::MoveLeft => self.editor.move_left(),
                EditCommand::MoveRight => self.editor.move_right(),
                EditCommand::MoveWordLeft => self.editor.word_backward(),
                EditCommand::MoveWordRight => self.editor.word_forward(),
                EditCommand::InsertChar(c) => self.editor.insert_char(*c),
                EditCommand::InsertString(s) => self.editor.insert_str(s),
                EditCommand::Backspace => self.editor.delete_char_backward(),
                EditCommand::Delete => self.editor.delete_char_forward(),
                EditCommand::BackspaceWord => self.editor.delete_word_backward(),
                EditCommand::DeleteWord => self.editor.delete_word_forward(),
                EditCommand::Clear => self.editor.clear_buffer(),
                EditCommand::CutFromStart => self.editor.delete_before_cursor(),
                EditCommand::CutToEnd => self.editor.delete_after_cursor(),
                EditCommand::CutWordLeft => self.editor.delete_word_backward(),
                EditCommand::CutWordRight => self.editor.delete_word_forward(),
                EditCommand::PasteCutBuffer => self.editor.yank(),
                EditCommand::YankPop => self.editor.yank_pop(),
                EditCommand::SwapGraphemes => self.editor.transpose_chars(),
                EditCommand::SwapWords => self.editor.transpose_words(),
                EditCommand::InsertLastArg => {
                    let history = &*self.history;
                    self.editor.insert_last_arg(history, None);
                }
            }
        }
        self.input_mode = InputMode::Regular;
        self.completion_state.cancel();
    }

    fn apply_to_history_search(&mut self, commands: &[EditCommand]) {
        for command in commands {
            match command {
                EditCommand::InsertChar(c) => self.history_search.push_char(*c, &*self.history),
                EditCommand::Backspace => self.history_search.backspace(&*self.history),
                _ => {}
            }
        }
    }

    fn toggle_history_search(&mut self) {
        if self.history_search.is_active() {
            self.history_search.cancel();
            self.input_mode = InputMode::Regular;
        } else {
            self.input_mode = InputMode::HistorySearch;
            self.completion_state.cancel();
            self.history_search.enter(&*self.history);
        }
    }

    fn history_traverse_backward(&mut self) {
        if self.input_mode != InputMode::HistoryTraversal {
            self.history_query = self.editor.value();
        }
        self.input_mode = InputMode::HistoryTraversal;
        if self.history.len() == 0 {
            return;
        }
        self.editor.push_history_value(self.history_query.clone());
        self.editor.prev_value();
    }

    fn history_traverse_forward(&mut self) {
        if self.input_mode == InputMode::HistoryTraversal {
            self.editor.next_value();
        }
    }

    fn handle_tab(&mut self, forward: bool) {
        if self.completion_state.is_active() {
            if forward {
                self.completion_state.next();
            } else {
                self.completion_state.prev();
            }
            return;
        }

        let line = self.editor.value();
        let cursor = self.editor.offset();
        let external = &mut self.external_runner;
        let (candidates, prefix_start) = completion::complete(
            &self.spec_registry,
            &self.static_completer,
            &self.default_completer,
            |cmd| external.run(cmd, Duration::from_millis(500)),
            &line,
            cursor,
        );

        let accepted = self.completion_state.begin(candidates, prefix_start);
        if accepted.is_some() {
            self.apply_completion(accepted);
        } else if !forward {
            self.completion_state.prev();
        }
    }

    fn apply_completion(&mut self, candidate: Option<completion::Candidate>) {
        let Some(candidate) = candidate else { return };
        let start = self.completion_state.prefix_start();
        let end = self.editor.offset();
        let runes: Vec<char> = candidate.value.chars().collect();
        self.editor.replace_range(start, end, &runes);
    }

    fn repaint(&mut self, prompt: &dyn Prompt) -> io::Result<()> {
        let line = self.editor.value();
        let cursor = self.editor.offset();

        let ghost = if self.history_search.is_active()
            || self.completion_state.is_active()
            || self.editor.suppress_suggestions_until_input()
        {
            String::new()
        } else {
            let available: Vec<String> = self
                .history
                .iter_chronologic()
                .map(|item| item.command.clone())
                .collect();
            self.hinter.handle(&line, &available)
        };

        let prompt_left = if self.history_search.is_active() {
            let status = if self.history_search.match_count() > 0 {
                PromptHistorySearchStatus::Passing
            } else {
                PromptHistorySearchStatus::Failing
            };
            prompt
                .render_prompt_history_search_indicator(PromptHistorySearch::new(
                    status,
                    self.history_search.query().to_string(),
                ))
                .into_owned()
        } else {
            prompt.render_prompt_left().into_owned()
        };

        let indicator = if self.history_search.is_active() {
            String::new()
        } else {
            prompt
                .render_prompt_indicator(self.edit_mode.edit_mode())
                .into_owned()
        };

        let displayed_line = if self.history_search.is_active() {
            self.history_search.current_match().unwrap_or("").to_string()
        } else {
            self.highlighter.highlight(&line, cursor).render_plain()
        };

        let model = RenderModel {
            prompt_left: &prompt_left,
            prompt_indicator: &indicator,
            line: &displayed_line,
            cursor,
            echo_mode: self.editor.echo_mode(),
            ghost_suggestion: &ghost,
            completion: &self.completion_state,
            width: self.painter.terminal_width(),
            height: self.painter.terminal_height(),
        };

        let frame = renderer::render(&model);
        self.painter.paint(&frame)
    }
}
