mod emacs;

pub use emacs::Emacs;

use crate::enums::ReedlineEvent;
use crossterm::event::Event;

/// What the prompt should print for the current mode - consulted by
/// [`crate::prompt::Prompt`] implementations that want to show e.g. a vi
/// `:`/`I` indicator. This crate only ships [`Emacs`], which always reports
/// [`PromptEditMode::Emacs`]; the enum still carries room for a vi mode so a
/// caller's custom `EditMode` can report something else without this crate
/// needing to change (spec.md Non-goals excludes shipping vi-mode itself,
/// not the seam for a caller to add one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEditMode {
    Default,
    Emacs,
    Vi(PromptViMode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptViMode {
    Insert,
    Normal,
}

/// Translates raw terminal events into [`ReedlineEvent`]s. Implementations
/// own the keybinding table; the engine never inspects `Event` itself.
pub trait EditMode: Send {
    fn parse_event(&mut self, event: Event) -> ReedlineEvent;

    fn edit_mode(&self) -> PromptEditMode;
}
