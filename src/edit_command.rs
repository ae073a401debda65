/// A single edit-buffer mutation. `EditCommand`s are produced by
/// [`crate::edit_mode::EditMode::parse_event`] from raw terminal events and
/// consumed by the engine's `run_edit_commands` dispatch - never executed
/// directly by a keybinding table, so new input backends (a GUI, a test
/// harness replaying a script) only need to produce this enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditCommand {
    MoveToStart,
    MoveToEnd,
    MoveLeft,
    MoveRight,
    MoveWordLeft,
    MoveWordRight,

    InsertChar(char),
    InsertString(String),

    Backspace,
    Delete,
    BackspaceWord,
    DeleteWord,
    Clear,

    /// Ctrl-U: kill from line start to cursor.
    CutFromStart,
    /// Ctrl-K: kill from cursor to line end.
    CutToEnd,
    CutWordLeft,
    CutWordRight,

    PasteCutBuffer,
    YankPop,

    /// Ctrl-T.
    SwapGraphemes,
    /// Alt-T.
    SwapWords,
    /// Alt-.
    InsertLastArg,
}

/// How an [`EditCommand`] should be folded into undo/coalescing history by a
/// host that tracks one. This crate's own engine doesn't implement undo
/// (out of spec scope), but the classification is kept on the command
/// itself - the same seam `reedline` uses - so a host embedding this editor
/// can build one without forking the command set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UndoBehavior {
    Ignore,
    Full,
    Coalesce,
}

impl EditCommand {
    pub fn undo_behavior(&self) -> UndoBehavior {
        match self {
            EditCommand::InsertChar(_) | EditCommand::InsertString(_) => UndoBehavior::Coalesce,
            EditCommand::MoveToStart
            | EditCommand::MoveToEnd
            | EditCommand::MoveLeft
            | EditCommand::MoveRight
            | EditCommand::MoveWordLeft
            | EditCommand::MoveWordRight => UndoBehavior::Ignore,
            _ => UndoBehavior::Full,
        }
    }
}
