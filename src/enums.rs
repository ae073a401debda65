use crate::edit_command::EditCommand;

/// The result of dispatching one batch of terminal events through the
/// active [`crate::edit_mode::EditMode`] - the shared currency between the
/// keybinding layer and [`crate::engine::Reedline`]'s `Update` loop.
#[derive(Clone, Debug, PartialEq)]
pub enum ReedlineEvent {
    /// No-op - an input the current mode doesn't bind to anything.
    None,
    /// One or more buffer mutations to apply as a single step.
    Edit(Vec<EditCommand>),

    CtrlD,
    CtrlC,
    ClearScreen,
    Enter,
    Escape,

    Repaint,
    Resize(u16, u16),
    Mouse,

    Up,
    Down,
    Left,
    Right,
    PreviousHistory,
    NextHistory,

    /// Ctrl-R: toggle reverse-incremental history search.
    SearchHistory,
    /// Ctrl-F while searching: cycle [`crate::history_search::FilterMode`].
    CycleFilterMode,
    /// Ctrl-O while searching: cycle [`crate::history_search::SortMode`].
    CycleSortMode,

    /// Tab: advance the completion popup, or request one if inactive.
    HandleTab,
    /// Shift-Tab: retreat the completion popup.
    HandleShiftTab,

    Paste(Vec<ReedlineEvent>),
    Multiple(Vec<ReedlineEvent>),
}

/// What `read_line` returns once the user finishes (or aborts) a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The user accepted a line; here's its content.
    Success(String),
    CtrlD,
    CtrlC,
    CtrlL,
}
