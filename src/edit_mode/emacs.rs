use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::edit_command::EditCommand;
use crate::enums::ReedlineEvent;

use super::{EditMode, PromptEditMode};

/// The default (and only shipped) [`EditMode`]: Emacs-style bindings, per
/// spec.md §6. Numeric arguments, macros, and vi-mode are explicitly out of
/// scope.
#[derive(Default)]
pub struct Emacs;

impl EditMode for Emacs {
    fn parse_event(&mut self, event: Event) -> ReedlineEvent {
        match event {
            Event::Key(key) => parse_key_event(&key),
            Event::Mouse(_) => ReedlineEvent::Mouse,
            Event::Resize(w, h) => ReedlineEvent::Resize(w, h),
        }
    }

    fn edit_mode(&self) -> PromptEditMode {
        PromptEditMode::Emacs
    }
}

fn edit(cmd: EditCommand) -> ReedlineEvent {
    ReedlineEvent::Edit(vec![cmd])
}

fn parse_key_event(KeyEvent { code, modifiers }: &KeyEvent) -> ReedlineEvent {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);

    match (code, ctrl, alt) {
        // --- motion ---------------------------------------------------
        (KeyCode::Left, false, false) | (KeyCode::Char('b'), true, false) => {
            edit(EditCommand::MoveLeft)
        }
        (KeyCode::Right, false, false) | (KeyCode::Char('f'), true, false) => {
            edit(EditCommand::MoveRight)
        }
        (KeyCode::Left, true, _) | (KeyCode::Left, _, true) | (KeyCode::Char('b'), _, true) => {
            edit(EditCommand::MoveWordLeft)
        }
        (KeyCode::Char('f'), true, true) => ReedlineEvent::CycleFilterMode,
        (KeyCode::Right, true, _) | (KeyCode::Right, _, true) | (KeyCode::Char('f'), _, true) => {
            edit(EditCommand::MoveWordRight)
        }
        (KeyCode::Home, false, false) | (KeyCode::Char('a'), true, false) => {
            edit(EditCommand::MoveToStart)
        }
        (KeyCode::End, false, false) | (KeyCode::Char('e'), true, false) => {
            edit(EditCommand::MoveToEnd)
        }

        // --- editing ----------------------------------------------------
        (KeyCode::Backspace, false, false) | (KeyCode::Char('h'), true, false) => {
            edit(EditCommand::Backspace)
        }
        (KeyCode::Delete, false, false) => edit(EditCommand::Delete),
        (KeyCode::Char('d'), true, false) => ReedlineEvent::CtrlD,
        (KeyCode::Backspace, _, true) | (KeyCode::Char('w'), true, false) => {
            edit(EditCommand::BackspaceWord)
        }
        (KeyCode::Delete, _, true) | (KeyCode::Char('d'), _, true) => {
            edit(EditCommand::DeleteWord)
        }
        (KeyCode::Char('k'), true, false) => edit(EditCommand::CutToEnd),
        (KeyCode::Char('u'), true, false) => edit(EditCommand::CutFromStart),
        (KeyCode::Char('t'), true, false) => edit(EditCommand::SwapGraphemes),
        (KeyCode::Char('t'), _, true) => edit(EditCommand::SwapWords),
        (KeyCode::Char('.'), _, true) => edit(EditCommand::InsertLastArg),

        // --- kill / yank --------------------------------------------------
        (KeyCode::Char('y'), true, false) => edit(EditCommand::PasteCutBuffer),
        (KeyCode::Char('y'), _, true) => edit(EditCommand::YankPop),

        // --- completion / history -----------------------------------------
        (KeyCode::Tab, false, false) => ReedlineEvent::HandleTab,
        (KeyCode::BackTab, false, false) => ReedlineEvent::HandleShiftTab,
        (KeyCode::Char('r'), true, false) => ReedlineEvent::SearchHistory,
        (KeyCode::Char('o'), true, false) => ReedlineEvent::CycleSortMode,
        (KeyCode::Up, false, false) | (KeyCode::Char('p'), true, false) => {
            ReedlineEvent::PreviousHistory
        }
        (KeyCode::Down, false, false) | (KeyCode::Char('n'), true, false) => {
            ReedlineEvent::NextHistory
        }

        // --- misc ---------------------------------------------------------
        (KeyCode::Char('l'), true, false) => ReedlineEvent::ClearScreen,
        (KeyCode::Char('c'), true, false) => ReedlineEvent::CtrlC,
        (KeyCode::Char('g'), true, false) => ReedlineEvent::Escape,
        (KeyCode::Esc, false, false) => ReedlineEvent::Escape,
        (KeyCode::Enter, false, false) => ReedlineEvent::Enter,

        (KeyCode::Char(c), false, false) => edit(EditCommand::InsertChar(*c)),
        (KeyCode::Char(c), _, false) if *modifiers == KeyModifiers::SHIFT => {
            edit(EditCommand::InsertChar(*c))
        }

        _ => ReedlineEvent::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent { code, modifiers }
    }

    #[test]
    fn plain_char_inserts() {
        let ev = parse_key_event(&key(KeyCode::Char('a'), KeyModifiers::NONE));
        assert_eq!(ev, ReedlineEvent::Edit(vec![EditCommand::InsertChar('a')]));
    }

    #[test]
    fn ctrl_a_moves_to_start() {
        let ev = parse_key_event(&key(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(ev, ReedlineEvent::Edit(vec![EditCommand::MoveToStart]));
    }

    #[test]
    fn ctrl_r_enters_history_search() {
        let ev = parse_key_event(&key(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(ev, ReedlineEvent::SearchHistory);
    }

    #[test]
    fn ctrl_d_is_contextual() {
        let ev = parse_key_event(&key(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert_eq!(ev, ReedlineEvent::CtrlD);
    }
}
