//! Discovers and loads the user's static completion config (spec.md §6 /
//! C16): `$XDG_CONFIG_HOME/bish/completions.{yaml,json}`,
//! `$HOME/.config/bish/completions.{yaml,json}`, or
//! `$HOME/.bish_completions.{yaml,json}`, first match wins.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::completion::Candidate;
use crate::error::ParseError;

#[derive(Debug, Deserialize)]
struct RawCandidate {
    value: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCandidateEntry {
    Bare(String),
    Detailed(RawCandidate),
}

impl From<RawCandidateEntry> for Candidate {
    fn from(entry: RawCandidateEntry) -> Self {
        match entry {
            RawCandidateEntry::Bare(value) => Candidate::new(value),
            RawCandidateEntry::Detailed(raw) => {
                let mut c = Candidate::new(raw.value);
                if let Some(d) = raw.description {
                    c = c.with_description(d);
                }
                c
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    commands: BTreeMap<String, Vec<RawCandidateEntry>>,
}

/// Returns the ordered list of candidate config paths, existing or not -
/// callers try each in turn and use the first that's readable.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let base = PathBuf::from(xdg).join("bish");
        paths.push(base.join("completions.yaml"));
        paths.push(base.join("completions.json"));
    }

    if let Some(home) = dirs::home_dir() {
        let config_base = home.join(".config/bish");
        paths.push(config_base.join("completions.yaml"));
        paths.push(config_base.join("completions.json"));
        paths.push(home.join(".bish_completions.yaml"));
        paths.push(home.join(".bish_completions.json"));
    }

    paths
}

pub(crate) fn parse_config(path: &Path, contents: &str) -> Result<BTreeMap<String, Vec<Candidate>>, ParseError> {
    let raw: RawConfig = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_str(contents).map_err(|e| ParseError {
            context: path.display().to_string(),
            message: e.to_string(),
        })?
    } else {
        serde_yaml::from_str(contents).map_err(|e| ParseError {
            context: path.display().to_string(),
            message: e.to_string(),
        })?
    };

    Ok(raw
        .commands
        .into_iter()
        .map(|(command, entries)| {
            (command, entries.into_iter().map(Candidate::from).collect())
        })
        .collect())
}

/// Loads the first readable config from [`candidate_paths`]. `Ok(None)`
/// when none of the candidate paths exist - not an error, since a user
/// with no static completions configured is the common case.
pub fn load() -> Result<Option<BTreeMap<String, Vec<Candidate>>>, ParseError> {
    for path in candidate_paths() {
        if let Ok(contents) = fs::read_to_string(&path) {
            return parse_config(&path, &contents).map(Some).map_err(|e| {
                log::warn!("failed to parse completion config {}: {e}", path.display());
                e
            });
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_with_bare_and_detailed_entries() {
        let yaml = "commands:\n  service:\n    - start\n    - value: stop\n      description: Stop the service\n";
        let parsed = parse_config(Path::new("completions.yaml"), yaml).unwrap();
        let candidates = &parsed["service"];
        assert_eq!(candidates[0], Candidate::new("start"));
        assert_eq!(candidates[1].description, "Stop the service");
    }

    #[test]
    fn parses_json_equivalently() {
        let json = r#"{"commands": {"service": ["start", {"value": "stop", "description": "Stop"}]}}"#;
        let parsed = parse_config(Path::new("completions.json"), json).unwrap();
        assert_eq!(parsed["service"].len(), 2);
    }

    #[test]
    fn invalid_yaml_yields_parse_error() {
        let result = parse_config(Path::new("completions.yaml"), "not: valid: yaml: [");
        assert!(result.is_err());
    }
}
