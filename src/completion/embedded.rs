//! Built-in completion tables shipped with the crate (spec.md §4.3 source
//! 3 / §6), embedded at compile time with `include_str!` the way a crate
//! with no separate asset-bundling dependency folds data into the binary.
//!
//! Each embedded file uses the same `commands:` root shape documented for
//! user config in [`crate::config`], so both paths share
//! [`crate::config::parse_config`].

use std::collections::BTreeMap;
use std::path::Path;

use super::candidate::Candidate;

const CD_YAML: &str = include_str!("../../data/cd.yaml");
const CARGO_YAML: &str = include_str!("../../data/cargo.yaml");
const DOCKER_YAML: &str = include_str!("../../data/docker.yaml");

/// Parses every embedded data file and merges them into one
/// command -> candidates table. Panics only on a malformed embedded file,
/// which is a build-time defect, not a runtime/user-facing error.
pub fn load() -> BTreeMap<String, Vec<Candidate>> {
    let mut out = BTreeMap::new();
    for (name, contents) in [
        ("cd.yaml", CD_YAML),
        ("cargo.yaml", CARGO_YAML),
        ("docker.yaml", DOCKER_YAML),
    ] {
        let parsed = crate::config::parse_config(Path::new(name), contents)
            .unwrap_or_else(|e| panic!("embedded completion data {name} is malformed: {e}"));
        out.extend(parsed);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_git_subcommands_load() {
        let table = load();
        let git = &table["git"];
        assert!(git.iter().any(|c| c.value == "status"));
    }
}
