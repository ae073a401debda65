pub mod candidate;
pub mod default_completer;
pub mod documentation;
pub mod embedded;
pub mod external;
pub mod file_completer;
pub mod spec;
pub mod ssh_hosts;
pub mod state;
pub mod static_completer;

pub use candidate::{dedup_by_value, Candidate};
pub use default_completer::DefaultCompleter;
pub use documentation::DocumentationCompleter;
pub use spec::{CompletionSpec, SpecKind, SpecRegistry};
pub use state::CompletionState;
pub use static_completer::StaticCompleter;

use external::parse_external_output;
use file_completer::complete_files;

/// Splits a line up to `cursor` into `(command, args, current_token_start)`
/// for completion purposes: tokens are separated by unquoted whitespace,
/// with `'...'`/`"..."` spans treated as a single token even if they
/// contain whitespace (spec.md §4.3, "Prefix determination").
///
/// `cursor` and the returned `current_token_start` are both rune (`char`)
/// indices, matching `Editor::offset`/`Editor::replace_range` - never byte
/// offsets, per spec.md §3's rune-indexing invariant.
pub fn tokenize_for_completion(line: &str, cursor: usize) -> (Option<String>, Vec<String>, usize) {
    let runes: Vec<char> = line.chars().collect();
    let prefix = &runes[..cursor.min(runes.len())];
    let mut tokens: Vec<(usize, String)> = Vec::new();
    let mut current = String::new();
    let mut current_start = 0;
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for (idx, &ch) in prefix.iter().enumerate() {
        match quote {
            Some(q) if ch == q => {
                quote = None;
                current.push(ch);
            }
            Some(_) => current.push(ch),
            None if ch == '\'' || ch == '"' => {
                if !in_token {
                    in_token = true;
                    current_start = idx;
                }
                quote = Some(ch);
                current.push(ch);
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push((current_start, std::mem::take(&mut current)));
                    in_token = false;
                }
            }
            None => {
                if !in_token {
                    in_token = true;
                    current_start = idx;
                }
                current.push(ch);
            }
        }
    }

    let trailing_token_start = if in_token {
        Some((current_start, current))
    } else {
        None
    };

    if let Some((start, token)) = trailing_token_start {
        if tokens.is_empty() {
            return (None, Vec::new(), start);
        }
        let command = tokens.remove(0).1;
        let args: Vec<String> = tokens.into_iter().map(|(_, t)| t).collect();
        return (Some(command), args_with_current(args, token), start);
    }

    // Cursor sits in whitespace after a complete token: starting a fresh
    // empty token at the cursor position.
    if tokens.is_empty() {
        (None, Vec::new(), prefix.len())
    } else {
        let command = tokens.remove(0).1;
        let args: Vec<String> = tokens.into_iter().map(|(_, t)| t).collect();
        (Some(command), args, prefix.len())
    }
}

fn args_with_current(mut args: Vec<String>, current: String) -> Vec<String> {
    args.push(current);
    args
}

/// Runs the full priority-ordered pipeline (spec.md §4.3): user
/// [`SpecRegistry`] entry, then [`StaticCompleter`], then
/// [`DefaultCompleter`], then file-completion fallback. A source's
/// candidates win outright once it reports `handled`/non-empty; only an
/// unhandled, empty result allows fallthrough to the next source.
pub fn complete(
    registry: &SpecRegistry,
    static_completer: &StaticCompleter,
    default_completer: &DefaultCompleter,
    run_external: impl FnOnce(&str) -> Option<String>,
    line: &str,
    cursor: usize,
) -> (Vec<Candidate>, usize) {
    let (command, args, prefix_start) = tokenize_for_completion(line, cursor);

    let Some(command) = command else {
        return (complete_files(args.first().map(String::as_str).unwrap_or("")), prefix_start);
    };

    if let Some(user_spec) = registry.get(&command) {
        let candidates = match user_spec.kind {
            SpecKind::WordList => {
                let current = args.last().map(String::as_str).unwrap_or("");
                user_spec
                    .value
                    .split_whitespace()
                    .filter(|w| w.starts_with(current))
                    .map(Candidate::new)
                    .collect()
            }
            SpecKind::Function | SpecKind::ExternalCommand => match run_external(&user_spec.value) {
                Some(output) => parse_external_output(&output),
                None => {
                    log::debug!("external completion source '{}' produced no output for '{command}'", user_spec.value);
                    Vec::new()
                }
            },
        };
        return (dedup_by_value(candidates), prefix_start);
    }

    if static_completer.contains(&command) {
        let candidates = static_completer.complete(&command, &args);
        if !candidates.is_empty() {
            return (candidates, prefix_start);
        }
    }

    let (candidates, handled) = default_completer.complete(&command, &args);
    if handled {
        return (candidates, prefix_start);
    }

    let current = args.last().map(String::as_str).unwrap_or("");
    (complete_files(current), prefix_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_command_and_trailing_arg() {
        let (command, args, start) = tokenize_for_completion("git che", 7);
        assert_eq!(command.as_deref(), Some("git"));
        assert_eq!(args, vec!["che".to_string()]);
        assert_eq!(start, 4);
    }

    #[test]
    fn tokenize_handles_quoted_token() {
        let (command, args, _) = tokenize_for_completion("grep 'hello wor", 15);
        assert_eq!(command.as_deref(), Some("grep"));
        assert_eq!(args, vec!["'hello wor".to_string()]);
    }

    #[test]
    fn tokenize_handles_multibyte_prefix_without_panicking() {
        // "café" is 4 runes but 5 bytes ('é' is 2 bytes) - cursor==4 used to
        // slice the line by byte offset and land mid-char.
        let (command, args, start) = tokenize_for_completion("café", 4);
        assert_eq!(command.as_deref(), Some("café"));
        assert!(args.is_empty());
        assert_eq!(start, 0);
    }

    #[test]
    fn tokenize_fresh_token_after_trailing_space() {
        let (command, args, start) = tokenize_for_completion("ls ", 3);
        assert_eq!(command.as_deref(), Some("ls"));
        assert!(args.is_empty());
        assert_eq!(start, 3);
    }

    #[test]
    fn pipeline_prefers_user_spec_over_static() {
        let mut registry = SpecRegistry::new();
        registry.insert(CompletionSpec::word_list("deploy", "staging production"));
        let mut statics = StaticCompleter::new();
        statics.insert("deploy", vec![Candidate::new("ignored")]);
        let defaults = DefaultCompleter::new(vec![]);

        let (candidates, _) = complete(&registry, &statics, &defaults, |_| None, "deploy st", 9);
        assert_eq!(candidates, vec![Candidate::new("staging")]);
    }

    #[test]
    fn pipeline_falls_through_to_default_completer() {
        let registry = SpecRegistry::new();
        let statics = StaticCompleter::new();
        let defaults = DefaultCompleter::new(vec![]);

        let (_, prefix_start) = complete(&registry, &statics, &defaults, |_| None, "kill -TE", 8);
        assert_eq!(prefix_start, 5);
    }
}
