//! Per-command built-in completion rules with no user configuration
//! required (spec.md §4.3 source 3 / C8): `cd`, `export`/`unset`,
//! `ssh`/`scp`/`sftp`, `make`, `kill`, and delegation to
//! [`super::documentation::DocumentationCompleter`] for `man`/`info`/`help`.

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::PathBuf;

use super::candidate::Candidate;
use super::documentation::DocumentationCompleter;
use super::file_completer::complete_directories;
use super::ssh_hosts;

const SIGNAL_NAMES: &[&str] = &[
    "HUP", "INT", "QUIT", "ILL", "TRAP", "ABRT", "BUS", "FPE", "KILL", "USR1", "SEGV", "USR2",
    "PIPE", "ALRM", "TERM", "STKFLT", "CHLD", "CONT", "STOP", "TSTP", "TTIN", "TTOU", "URG",
    "XCPU", "XFSZ", "VTALRM", "PROF", "WINCH", "IO", "PWR", "SYS",
];

pub struct DefaultCompleter {
    doc_completer: DocumentationCompleter,
    home: PathBuf,
}

impl DefaultCompleter {
    pub fn new(builtin_names: Vec<String>) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            doc_completer: DocumentationCompleter::new(builtin_names),
            home,
        }
    }

    /// Attempts to handle `command args`. Returns `(candidates, handled)`:
    /// `handled = true` means this source owns the completion for this
    /// command even if `candidates` ends up empty (callers must not fall
    /// through to a lower-priority source in that case).
    pub fn complete(&self, command: &str, args: &[String]) -> (Vec<Candidate>, bool) {
        match command {
            "cd" => (self.complete_cd(args), true),
            "export" | "unset" => (self.complete_env_var(args), true),
            "ssh" | "scp" | "sftp" => (self.complete_ssh_host(args), true),
            "make" => (self.complete_make_target(args), true),
            "kill" => {
                let prefix = args.last().map(String::as_str).unwrap_or("");
                let dash_prefixed = prefix.starts_with('-');
                (self.complete_kill(args), dash_prefixed)
            }
            "man" => (self.doc_completer.complete_man(args), true),
            "info" => (
                self.doc_completer
                    .complete_info(args.last().map(String::as_str).unwrap_or("")),
                true,
            ),
            "help" => (
                self.doc_completer
                    .complete_help(args.last().map(String::as_str).unwrap_or("")),
                true,
            ),
            _ => (Vec::new(), false),
        }
    }

    fn complete_cd(&self, args: &[String]) -> Vec<Candidate> {
        let prefix = args.last().map(String::as_str).unwrap_or("");
        complete_directories(prefix)
    }

    fn complete_env_var(&self, args: &[String]) -> Vec<Candidate> {
        let prefix = args.last().map(String::as_str).unwrap_or("");
        let (name_prefix, had_eq) = match prefix.split_once('=') {
            Some((name, _)) => (name, true),
            None => (prefix, false),
        };
        if had_eq {
            return Vec::new();
        }
        env::vars()
            .map(|(name, _)| name)
            .filter(|name| name.starts_with(name_prefix))
            .map(Candidate::new)
            .collect()
    }

    fn complete_ssh_host(&self, args: &[String]) -> Vec<Candidate> {
        let prefix = args.last().map(String::as_str).unwrap_or("");
        let (user_prefix, host_prefix) = match prefix.split_once('@') {
            Some((user, host)) => (Some(user), host),
            None => (None, prefix),
        };
        ssh_hosts::known_hosts(&self.home)
            .into_iter()
            .filter(|h| h.starts_with(host_prefix))
            .map(|h| match user_prefix {
                Some(user) => Candidate::new(format!("{user}@{h}")),
                None => Candidate::new(h),
            })
            .collect()
    }

    fn complete_make_target(&self, args: &[String]) -> Vec<Candidate> {
        let prefix = args.last().map(String::as_str).unwrap_or("");
        let mut targets = BTreeSet::new();
        for name in ["Makefile", "makefile", "GNUmakefile"] {
            if let Ok(contents) = fs::read_to_string(name) {
                collect_make_targets(&contents, &mut targets);
                break;
            }
        }
        targets
            .into_iter()
            .filter(|t| t.starts_with(prefix))
            .map(Candidate::new)
            .collect()
    }

    fn complete_kill(&self, args: &[String]) -> Vec<Candidate> {
        let prefix = args.last().map(String::as_str).unwrap_or("");
        let Some(dash_prefix) = prefix.strip_prefix('-') else {
            return Vec::new();
        };
        SIGNAL_NAMES
            .iter()
            .filter(|name| name.starts_with(dash_prefix))
            .map(|name| Candidate::new(format!("-{name}")))
            .collect()
    }
}

/// Extracts `target:` lines from a Makefile's text, skipping
/// tab-indented recipe lines, comments, and variable assignments
/// (`NAME = value`, `NAME := value`, `NAME += value`).
fn collect_make_targets(contents: &str, out: &mut BTreeSet<String>) {
    for line in contents.lines() {
        if line.starts_with('\t') || line.starts_with('#') {
            continue;
        }
        let Some(colon_pos) = line.find(':') else {
            continue;
        };
        let head = &line[..colon_pos];
        if head.contains('=') || head.trim().is_empty() {
            continue;
        }
        if line[colon_pos..].starts_with(":=") {
            continue;
        }
        for target in head.split_whitespace() {
            if !target.starts_with('.') {
                out.insert(target.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_targets_skip_recipes_and_variables() {
        let makefile = "CC = gcc\nbuild: main.o\n\tgcc -o build main.o\ntest clean: build\n\t./run\n";
        let mut targets = BTreeSet::new();
        collect_make_targets(makefile, &mut targets);
        assert!(targets.contains("build"));
        assert!(targets.contains("test"));
        assert!(targets.contains("clean"));
        assert!(!targets.contains("CC"));
    }

    #[test]
    fn kill_completes_signal_names_only_after_dash() {
        let completer = DefaultCompleter::new(vec![]);
        let (candidates, handled) = completer.complete("kill", &["-TE".to_string()]);
        assert!(handled);
        assert_eq!(candidates, vec![Candidate::new("-TERM")]);

        let (candidates, handled) = completer.complete("kill", &["123".to_string()]);
        assert!(candidates.is_empty());
        assert!(!handled, "kill without a dash prefix falls through to PID completion");
    }

    #[test]
    fn export_completes_env_var_names() {
        env::set_var("BISH_TEST_VAR_XYZ", "1");
        let completer = DefaultCompleter::new(vec![]);
        let (candidates, handled) = completer.complete("export", &["BISH_TEST_VAR_".to_string()]);
        assert!(handled);
        assert!(candidates.iter().any(|c| c.value == "BISH_TEST_VAR_XYZ"));
        env::remove_var("BISH_TEST_VAR_XYZ");
    }

    #[test]
    fn unhandled_command_falls_through() {
        let completer = DefaultCompleter::new(vec![]);
        let (candidates, handled) = completer.complete("git", &[]);
        assert!(!handled);
        assert!(candidates.is_empty());
    }
}
