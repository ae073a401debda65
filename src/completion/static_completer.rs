use std::collections::BTreeMap;

use super::candidate::Candidate;

/// In-memory `command -> candidates` map (spec.md §4.3 C7), seeded from the
/// embedded `data/*.yaml` tables and then overridden by whatever the user's
/// config file (§6) defines for the same command name.
///
/// Resolves the spec's Open Question ("YAML overrides hardcoded vs merges")
/// as "YAML overrides hardcoded": see `DESIGN.md`.
#[derive(Debug, Default, Clone)]
pub struct StaticCompleter {
    commands: BTreeMap<String, Vec<Candidate>>,
}

impl StaticCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(commands: BTreeMap<String, Vec<Candidate>>) -> Self {
        Self { commands }
    }

    /// Inserts (overwriting) the candidate list for `command`. Used both to
    /// seed the embedded/hardcoded tables and to apply a user override -
    /// callers control precedence purely by call order.
    pub fn insert(&mut self, command: impl Into<String>, candidates: Vec<Candidate>) {
        self.commands.insert(command.into(), candidates);
    }

    pub fn merge_overriding(&mut self, other: BTreeMap<String, Vec<Candidate>>) {
        for (command, candidates) in other {
            self.commands.insert(command, candidates);
        }
    }

    pub fn contains(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }

    /// Returns candidates when `args` is empty (first subcommand slot), or a
    /// prefix-filtered subset when `args` has exactly one token; an empty
    /// result otherwise (this source only completes the first argument
    /// slot).
    pub fn complete(&self, command: &str, args: &[String]) -> Vec<Candidate> {
        let Some(candidates) = self.commands.get(command) else {
            return Vec::new();
        };

        match args.len() {
            0 => candidates.clone(),
            1 => candidates
                .iter()
                .filter(|c| c.value.starts_with(args[0].as_str()))
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completer() -> StaticCompleter {
        let mut c = StaticCompleter::new();
        c.insert(
            "service",
            vec![Candidate::new("start"), Candidate::new("stop")],
        );
        c
    }

    #[test]
    fn empty_args_returns_all_candidates() {
        let completions = completer().complete("service", &[]);
        assert_eq!(completions.len(), 2);
    }

    #[test]
    fn single_arg_prefix_filters() {
        let completions = completer().complete("service", &["sto".to_string()]);
        assert_eq!(completions, vec![Candidate::new("stop")]);
    }

    #[test]
    fn two_args_yields_nothing() {
        let completions = completer().complete("service", &["a".to_string(), "b".to_string()]);
        assert!(completions.is_empty());
    }

    #[test]
    fn yaml_override_replaces_hardcoded_entry() {
        let mut c = completer();
        c.insert("service", vec![Candidate::new("restart")]);
        let completions = c.complete("service", &[]);
        assert_eq!(completions, vec![Candidate::new("restart")]);
    }
}
