//! An Emacs-style, Unicode-correct line editor core for the bish shell.
//!
//! Wires together a rune-indexed edit buffer, a kill ring, a multi-source
//! completion pipeline, reverse-incremental history search, and a
//! terminal renderer behind a single `Reedline` engine - the same
//! architecture `reedline` uses, generalized to drive a shell's
//! completion and `complete`-builtin semantics instead of a generic REPL.

pub mod builtins;
pub mod capability;
pub mod clipboard;
pub mod completion;
pub mod config;
pub mod core_editor;
pub mod edit_command;
pub mod edit_mode;
pub mod engine;
pub mod enums;
pub mod error;
pub mod highlighter;
pub mod history;
pub mod history_search;
pub mod kill_ring;
pub mod painter;
pub mod prompt;
pub mod renderer;
pub mod shell_word;
pub mod suggestion;
pub mod text_manipulation;
pub mod validator;

pub use completion::Candidate;
pub use core_editor::{EchoMode, Editor};
pub use edit_command::EditCommand;
pub use edit_mode::{EditMode, Emacs, PromptEditMode, PromptViMode};
pub use engine::Reedline;
pub use enums::{ReedlineEvent, Signal};
pub use highlighter::{DefaultHighlighter, Highlighter, StyledText};
pub use history::{FileBackedHistory, History, HistoryItem, HistoryNavigationQuery};
pub use kill_ring::{KillDirection, KillRing};
pub use prompt::{DefaultPrompt, Prompt, PromptHistorySearch, PromptHistorySearchStatus};
pub use suggestion::{DefaultHinter, Hinter};
pub use validator::{DefaultValidator, ValidationResult, Validator};
