use std::fs;

use super::candidate::Candidate;

/// Splits `partial` into its directory component (including any trailing
/// `/`, verbatim as typed) and the file-name prefix still being typed.
fn split_dir_and_prefix(partial: &str) -> (String, String) {
    match partial.rfind('/') {
        Some(idx) => (partial[..=idx].to_string(), partial[idx + 1..].to_string()),
        None => (String::new(), partial.to_string()),
    }
}

fn complete_path(partial: &str, dirs_only: bool) -> Vec<Candidate> {
    let (dir_part, prefix) = split_dir_and_prefix(partial);
    let scan_dir = if dir_part.is_empty() {
        ".".to_string()
    } else {
        dir_part.clone()
    };

    let mut out = Vec::new();
    let Ok(entries) = fs::read_dir(&scan_dir) else {
        return out;
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with(&prefix) {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if dirs_only && !is_dir {
            continue;
        }

        let value = format!("{dir_part}{name}");
        let mut candidate = Candidate::new(value);
        if is_dir {
            candidate = candidate.with_suffix("/").with_description("Directory");
        }
        out.push(candidate);
    }

    out.sort_by(|a, b| a.value.cmp(&b.value));
    out
}

/// File completion fallback (spec.md §4.3 source 5): walks the directory
/// implied by `partial` (or CWD when there's no directory component) and
/// emits its entries, directories tagged with a `/` suffix.
pub fn complete_files(partial: &str) -> Vec<Candidate> {
    complete_path(partial, false)
}

/// `cd` rule: directories only, each tagged `suffix = "/"`,
/// `description = "Directory"`.
pub fn complete_directories(partial: &str) -> Vec<Candidate> {
    complete_path(partial, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self as stdfs, File};

    #[test]
    fn completes_files_and_dirs_in_cwd() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("alpha.txt")).unwrap();
        stdfs::create_dir(dir.path().join("albert")).unwrap();

        let prefix = dir.path().join("al").to_string_lossy().to_string();
        let results = complete_files(&prefix);
        let values: Vec<_> = results.iter().map(|c| c.value.clone()).collect();
        assert!(values.iter().any(|v| v.ends_with("alpha.txt")));
        assert!(values.iter().any(|v| v.ends_with("albert")));

        let dir_only = complete_directories(&prefix);
        assert_eq!(dir_only.len(), 1);
        assert!(dir_only[0].value.ends_with("albert"));
        assert_eq!(dir_only[0].suffix, "/");
        assert_eq!(dir_only[0].description, "Directory");
    }
}
