//! `man`/`info`/`help` completion (spec.md §4.3 source 4 / C9).
//!
//! Scanning `MANPATH`/`INFOPATH` is the one genuinely expensive directory
//! walk in the whole pipeline, so the result is cached behind a `OnceLock`
//! and computed at most once per process - same latch pattern the teacher
//! uses for its lazily-initialized syntax tables.

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use super::candidate::Candidate;

fn man_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+?)\.([A-Za-z0-9]+)(\.gz)?$").unwrap())
}

fn info_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+)\.info(-[0-9]+)?(\.gz)?$").unwrap())
}

/// Splits a `MANPATH`/`INFOPATH`-style value on the path-list separator.
/// An empty segment (leading/trailing/doubled `:`) means "insert the
/// default directories here", per spec.md §4.3; an unset or empty
/// variable falls back to `default_dirs` outright.
fn search_path_from_env(var: &str, default_dirs: &[PathBuf]) -> Vec<PathBuf> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => value
            .split(':')
            .flat_map(|segment| {
                if segment.is_empty() {
                    default_dirs.to_vec()
                } else {
                    vec![PathBuf::from(segment)]
                }
            })
            .collect(),
        _ => default_dirs.to_vec(),
    }
}

fn default_man_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/man"),
        PathBuf::from("/usr/local/share/man"),
    ];
    if let Some(home) = dirs::home_dir() {
        dirs.push(home.join(".local/share/man"));
    }
    dirs
}

fn default_info_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("/usr/share/info")]
}

/// Manual page name -> every section it was found under (`1`, `3`, `n`,
/// ...), collected across all scanned `MANPATH` directories. A name with no
/// section-encoding directory (e.g. a flat `man/` with no `manN`
/// subdirectories) maps to an empty set.
fn scan_man_pages(dirs: &[PathBuf]) -> BTreeMap<String, BTreeSet<String>> {
    let mut out: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for base in dirs {
        let Ok(section_dirs) = fs::read_dir(base) else {
            continue;
        };
        for section_entry in section_dirs.flatten() {
            let section_path = section_entry.path();
            if !section_path.is_dir() {
                continue;
            }
            let section = section_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .filter(|n| n.starts_with("man"))
                .map(|n| n.trim_start_matches("man").to_string());

            let Ok(pages) = fs::read_dir(&section_path) else {
                continue;
            };
            for page in pages.flatten() {
                let file_name = page.file_name().to_string_lossy().to_string();
                if let Some(caps) = man_name_regex().captures(&file_name) {
                    let entry = out.entry(caps[1].to_string()).or_default();
                    if let Some(section) = &section {
                        entry.insert(section.clone());
                    }
                }
            }
        }
    }
    out
}

fn scan_info_pages(dirs: &[PathBuf]) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for dir in dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(caps) = info_name_regex().captures(&file_name) {
                out.insert(caps[1].to_string());
            }
        }
    }
    out
}

struct DocIndex {
    man_pages: BTreeMap<String, BTreeSet<String>>,
    info_pages: BTreeSet<String>,
    known_sections: BTreeSet<String>,
}

fn doc_index() -> &'static DocIndex {
    static INDEX: OnceLock<DocIndex> = OnceLock::new();
    INDEX.get_or_init(|| {
        let man_dirs = search_path_from_env("MANPATH", &default_man_dirs());
        let info_dirs = search_path_from_env("INFOPATH", &default_info_dirs());
        let man_pages = scan_man_pages(&man_dirs);
        let known_sections = man_pages
            .values()
            .flat_map(|sections| sections.iter().cloned())
            .collect();
        DocIndex {
            man_pages,
            info_pages: scan_info_pages(&info_dirs),
            known_sections,
        }
    })
}

/// `help` builtin names merged into `help` completion - the documentation
/// completer has no way to discover these from disk, so the caller
/// supplies them explicitly (see `crate::builtins`).
pub struct DocumentationCompleter {
    builtin_names: Vec<String>,
}

impl DocumentationCompleter {
    pub fn new(builtin_names: Vec<String>) -> Self {
        Self { builtin_names }
    }

    /// `man [section] <prefix>`: when `args` has at least two tokens AND the
    /// first token is a known section (one actually present across the
    /// scanned man directories), it's treated as an explicit section filter
    /// and the last token is the prefix. Otherwise there's no section
    /// filter and the last token is the prefix - covers both the
    /// single-token case and the "first token isn't a real section" case,
    /// which must fall back to plain prefix matching rather than filtering
    /// on a section that doesn't exist (spec.md §4.3).
    pub fn complete_man(&self, args: &[String]) -> Vec<Candidate> {
        let (section_filter, prefix) = match args {
            [] => (None, ""),
            [only] => (None, only.as_str()),
            [first, rest @ ..] if doc_index().known_sections.contains(first.as_str()) => {
                (Some(first.as_str()), rest.last().unwrap().as_str())
            }
            rest => (None, rest.last().unwrap().as_str()),
        };

        doc_index()
            .man_pages
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .filter(|(_, sections)| match section_filter {
                Some(wanted) => sections.contains(wanted),
                None => true,
            })
            .map(|(name, sections)| {
                let mut c = Candidate::new(name.clone());
                if !sections.is_empty() {
                    let joined = sections.iter().cloned().collect::<Vec<_>>().join(", ");
                    c = c.with_description(format!("Manual page ({joined})"));
                }
                c
            })
            .collect()
    }

    pub fn complete_info(&self, prefix: &str) -> Vec<Candidate> {
        doc_index()
            .info_pages
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Candidate::new(name.clone()))
            .collect()
    }

    /// `help` completes over the shell's builtin names plus anything with a
    /// man page, since `help` commonly falls back to `man` for externals.
    pub fn complete_help(&self, prefix: &str) -> Vec<Candidate> {
        let mut out: Vec<Candidate> = self
            .builtin_names
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Candidate::new(name.clone()).with_description("builtin"))
            .collect();
        out.extend(self.complete_man(&[prefix.to_string()]));
        super::dedup_by_value(out)
    }
}

#[allow(dead_code)]
fn is_gzipped(path: &Path) -> bool {
    path.extension().map(|e| e == "gz").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn man_name_regex_strips_section_and_gz() {
        let re = man_name_regex();
        let caps = re.captures("grep.1.gz").unwrap();
        assert_eq!(&caps[1], "grep");
        assert_eq!(&caps[2], "1");
    }

    #[test]
    fn info_name_regex_strips_suffix() {
        let re = info_name_regex();
        let caps = re.captures("gcc.info-3.gz").unwrap();
        assert_eq!(&caps[1], "gcc");
    }

    #[test]
    fn help_completer_merges_builtins_and_dedupes() {
        let completer = DocumentationCompleter::new(vec!["cd".to_string(), "export".to_string()]);
        let results = completer.complete_help("c");
        assert!(results.iter().any(|c| c.value == "cd"));
    }
}
