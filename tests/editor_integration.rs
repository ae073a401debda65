//! Drives `Reedline` end-to-end through `apply_event`, the same headless
//! seam the public API exposes for a caller that re-enters `Update` with an
//! asynchronously delivered message (spec.md §5) instead of a real
//! terminal - modeled on `jswans33-james-shell`'s `tests/editor_integration.rs`,
//! which drives its own editor without a pty by feeding scripted input.

use bish_line::{EditCommand, FileBackedHistory, HistoryItem, Reedline, ReedlineEvent, Signal};

fn insert(text: &str) -> ReedlineEvent {
    ReedlineEvent::Edit(text.chars().map(EditCommand::InsertChar).collect())
}

fn submit(engine: &mut Reedline) -> String {
    match engine.apply_event(ReedlineEvent::Enter) {
        Some(Signal::Success(line)) => line,
        other => panic!("expected Signal::Success, got {other:?}"),
    }
}

#[test]
fn kill_yank_yank_pop_round_trip() {
    let mut engine = Reedline::create().expect("construct engine");
    engine.apply_event(insert("foo bar baz"));
    assert_eq!(engine.buffer_value(), "foo bar baz");

    // Ctrl-W #1: kill "baz" (cursor already at EOL).
    engine.apply_event(ReedlineEvent::Edit(vec![EditCommand::CutWordLeft]));
    assert_eq!(engine.buffer_value(), "foo bar ");

    // Ctrl-W #2: kill "bar ", appended backward onto the same ring entry.
    engine.apply_event(ReedlineEvent::Edit(vec![EditCommand::CutWordLeft]));
    assert_eq!(engine.buffer_value(), "foo ");

    // Ctrl-Y restores everything killed so far.
    engine.apply_event(ReedlineEvent::Edit(vec![EditCommand::PasteCutBuffer]));
    assert_eq!(engine.buffer_value(), "foo bar baz");

    // Alt-Y with only one ring entry is a no-op (spec.md §8 scenario 1).
    engine.apply_event(ReedlineEvent::Edit(vec![EditCommand::YankPop]));
    assert_eq!(engine.buffer_value(), "foo bar baz");
}

#[test]
fn transpose_words_swaps_last_two_at_eol() {
    let mut engine = Reedline::create().expect("construct engine");
    engine.apply_event(insert("one two three"));
    engine.apply_event(ReedlineEvent::Edit(vec![EditCommand::SwapWords]));
    assert_eq!(engine.buffer_value(), "one three two");
}

#[test]
fn insert_last_arg_cycles_through_history() {
    // Appended oldest-first: "echo one" is the most recently run command,
    // so `nth_most_recent_command(1)` (what Alt-. reads first) is "echo one".
    let mut history = FileBackedHistory::new(100);
    history.append(HistoryItem::new("ls -la /tmp"));
    history.append(HistoryItem::new("echo one"));
    let mut engine = Reedline::create().expect("construct engine").with_history(Box::new(history));

    engine.apply_event(ReedlineEvent::Edit(vec![EditCommand::InsertLastArg]));
    assert_eq!(engine.buffer_value(), "/tmp");

    engine.apply_event(ReedlineEvent::Edit(vec![EditCommand::InsertLastArg]));
    assert_eq!(engine.buffer_value(), "one");

    engine.apply_event(insert(" "));
    engine.apply_event(ReedlineEvent::Edit(vec![EditCommand::InsertLastArg]));
    assert_eq!(engine.buffer_value(), "one one");
}

#[test]
fn enter_on_complete_line_appends_to_history_and_resets_buffer() {
    let mut engine = Reedline::create().expect("construct engine");
    engine.apply_event(insert("echo hi"));
    let line = submit(&mut engine);
    assert_eq!(line, "echo hi");
    assert_eq!(engine.buffer_value(), "");
}

#[test]
fn ctrl_d_on_empty_buffer_signals_exit_but_deletes_forward_otherwise() {
    let mut engine = Reedline::create().expect("construct engine");
    assert_eq!(engine.apply_event(ReedlineEvent::CtrlD), Some(Signal::CtrlD));

    let mut engine = Reedline::create().expect("construct engine");
    engine.apply_event(insert("ab"));
    engine.apply_event(ReedlineEvent::Edit(vec![EditCommand::MoveToStart]));
    assert_eq!(engine.apply_event(ReedlineEvent::CtrlD), None);
    assert_eq!(engine.buffer_value(), "b");
}

#[test]
fn history_search_accept_replaces_buffer_with_selected_command() {
    let mut history = FileBackedHistory::new(100);
    history.append(HistoryItem::new("git status"));
    history.append(HistoryItem::new("git push"));
    let mut engine = Reedline::create().expect("construct engine").with_history(Box::new(history));

    engine.apply_event(ReedlineEvent::SearchHistory);
    engine.apply_event(insert("git"));
    engine.apply_event(ReedlineEvent::Enter);
    assert_eq!(engine.buffer_value(), "git push");
}

#[test]
fn history_search_cancel_leaves_buffer_untouched() {
    let mut history = FileBackedHistory::new(100);
    history.append(HistoryItem::new("git status"));
    let mut engine = Reedline::create().expect("construct engine").with_history(Box::new(history));

    engine.apply_event(insert("untouched"));
    engine.apply_event(ReedlineEvent::SearchHistory);
    engine.apply_event(insert("git"));
    engine.apply_event(ReedlineEvent::Escape);
    assert_eq!(engine.buffer_value(), "untouched");
}
