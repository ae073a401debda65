//! Host-name discovery for the `ssh`/`scp`/`sftp` completion rule
//! (spec.md §4.3 source 3). Nothing in the retrieval pack parses
//! `~/.ssh/config` or `known_hosts`, so this module is grounded only in the
//! general config-line-parsing idiom the pack's shells use elsewhere for
//! `PATH`/builtin lookups (see `DESIGN.md`), not in a specific file.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Parses `Host` and `Include` directives out of an OpenSSH client config,
/// following `Include` (relative to `base_dir`) up to `depth_remaining`
/// times and skipping wildcard/negated patterns (`*`, `?`, `!`) and
/// anything already visited, to guard against include cycles.
fn parse_ssh_config(path: &Path, depth_remaining: u8, seen: &mut BTreeSet<PathBuf>, out: &mut BTreeSet<String>) {
    if depth_remaining == 0 {
        return;
    }
    let Ok(canonical) = fs::canonicalize(path) else {
        return;
    };
    if !seen.insert(canonical) {
        return;
    }
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.splitn(2, char::is_whitespace);
        let keyword = parts.next().unwrap_or("").to_ascii_lowercase();
        let rest = parts.next().unwrap_or("").trim();

        match keyword.as_str() {
            "host" => {
                for alias in rest.split_whitespace() {
                    if !alias.contains('*') && !alias.contains('?') && !alias.contains('!') {
                        out.insert(alias.to_string());
                    }
                }
            }
            "include" => {
                for pattern in rest.split_whitespace() {
                    let included = if Path::new(pattern).is_absolute() {
                        PathBuf::from(pattern)
                    } else {
                        base_dir.join(pattern)
                    };
                    parse_ssh_config(&included, depth_remaining - 1, seen, out);
                }
            }
            _ => {}
        }
    }
}

/// Strips `@cert-authority`/`@revoked` markers, hashed-host lines
/// (`HashKnownHosts yes` produces `|1|...` entries we can't reverse), and
/// splits comma-separated aliases and `[host]:port` bracket notation.
fn parse_known_hosts(path: &Path, out: &mut BTreeSet<String>) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };
    for line in contents.lines() {
        let mut line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("@cert-authority ") {
            line = rest;
        } else if let Some(rest) = line.strip_prefix("@revoked ") {
            line = rest;
        }

        let Some(hosts_field) = line.split_whitespace().next() else {
            continue;
        };
        if hosts_field.starts_with('|') {
            continue;
        }

        for host in hosts_field.split(',') {
            let host = host
                .strip_prefix('[')
                .and_then(|h| h.rsplit_once(']'))
                .map(|(h, _)| h)
                .unwrap_or(host);
            if host.is_empty() || host.contains('*') || host.contains('?') {
                continue;
            }
            if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
                continue;
            }
            out.insert(host.to_string());
        }
    }
}

/// Union of hosts found in `~/.ssh/config` (following `Include`) and
/// `~/.ssh/known_hosts`. Returns an empty set (never an error) when either
/// file is missing or unreadable.
pub fn known_hosts(home: &Path) -> Vec<String> {
    let mut out = BTreeSet::new();
    let mut seen = BTreeSet::new();
    parse_ssh_config(&home.join(".ssh/config"), 8, &mut seen, &mut out);
    parse_known_hosts(&home.join(".ssh/known_hosts"), &mut out);
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn config_host_directive_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".ssh")).unwrap();
        let mut f = File::create(dir.path().join(".ssh/config")).unwrap();
        writeln!(f, "Host build-box\n  HostName 10.0.0.5\nHost *.internal\n  User deploy").unwrap();

        let hosts = known_hosts(dir.path());
        assert!(hosts.contains(&"build-box".to_string()));
        assert!(!hosts.iter().any(|h| h.contains('*')));
    }

    #[test]
    fn known_hosts_skips_hashed_and_ip_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".ssh")).unwrap();
        let mut f = File::create(dir.path().join(".ssh/known_hosts")).unwrap();
        writeln!(
            f,
            "|1|abc123|def456 ssh-rsa AAAA...\n192.168.1.1 ssh-rsa AAAA...\n[gitlab.example.com]:2222 ssh-ed25519 AAAA...\nalpha.example.com,10.1.1.1 ssh-rsa AAAA..."
        )
        .unwrap();

        let hosts = known_hosts(dir.path());
        assert!(hosts.contains(&"gitlab.example.com".to_string()));
        assert!(hosts.contains(&"alpha.example.com".to_string()));
        assert!(!hosts.iter().any(|h| h == "192.168.1.1"));
        assert!(!hosts.iter().any(|h| h == "10.1.1.1"));
    }

    #[test]
    fn wildcard_and_negated_hosts_are_never_emitted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".ssh")).unwrap();
        let mut main = File::create(dir.path().join(".ssh/config")).unwrap();
        writeln!(main, "Host *\nHost prod\nHost !stg\nInclude extra.conf").unwrap();
        let mut extra = File::create(dir.path().join(".ssh/extra.conf")).unwrap();
        writeln!(extra, "Host build").unwrap();

        let hosts = known_hosts(dir.path());
        assert_eq!(hosts, vec!["build".to_string(), "prod".to_string()]);
    }

    #[test]
    fn include_directive_is_followed() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".ssh")).unwrap();
        fs::create_dir(dir.path().join(".ssh/config.d")).unwrap();
        let mut main = File::create(dir.path().join(".ssh/config")).unwrap();
        writeln!(main, "Include config.d/*.conf\nInclude extra").unwrap();
        let mut extra = File::create(dir.path().join(".ssh/extra")).unwrap();
        writeln!(extra, "Host archive-host").unwrap();

        let hosts = known_hosts(dir.path());
        assert!(hosts.contains(&"archive-host".to_string()));
    }
}
