//! Parses captured stdout from a `-F`/`-C` completion provider (spec.md
//! §4.4). Pure - no I/O happens here; the capability that actually spawns
//! the subshell/function lives in [`crate::capability`].

use serde::Deserialize;

use super::candidate::Candidate;

#[derive(Debug, Deserialize)]
struct ExternalCandidateJson {
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "Display", default)]
    display: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
}

impl From<ExternalCandidateJson> for Candidate {
    fn from(j: ExternalCandidateJson) -> Self {
        let mut c = Candidate::new(j.value);
        if let Some(d) = j.display {
            c = c.with_display(d);
        }
        if let Some(d) = j.description {
            c = c.with_description(d);
        }
        c
    }
}

/// True when `line` looks like a colon-bearing token that should NOT be
/// split on its first colon: a URL (`http(s)://`, `ssh://`), a Windows
/// drive path (`X:\` / `X:/`), or an IPv6-like address (more than one colon
/// before the first whitespace).
fn looks_like_colon_value(line: &str) -> bool {
    if line.starts_with("http://") || line.starts_with("https://") || line.starts_with("ssh://") {
        return true;
    }

    let chars: Vec<char> = line.chars().collect();
    if chars.len() >= 3
        && chars[0].is_ascii_alphabetic()
        && chars[1] == ':'
        && (chars[2] == '\\' || chars[2] == '/')
    {
        return true;
    }

    let first_token = line.split_whitespace().next().unwrap_or(line);
    if first_token.matches(':').count() > 1 {
        return true;
    }

    false
}

fn parse_json_array_of_strings(input: &str) -> Option<Vec<Candidate>> {
    let values: Vec<String> = serde_json::from_str(input).ok()?;
    Some(values.into_iter().map(Candidate::new).collect())
}

fn parse_json_array_of_objects(input: &str) -> Option<Vec<Candidate>> {
    let objs: Vec<ExternalCandidateJson> = serde_json::from_str(input).ok()?;
    Some(objs.into_iter().map(Candidate::from).collect())
}

fn parse_json_object(input: &str) -> Option<Vec<Candidate>> {
    let obj: ExternalCandidateJson = serde_json::from_str(input).ok()?;
    Some(vec![obj.into()])
}

fn parse_line(line: &str) -> Candidate {
    if line.starts_with('{') {
        if let Some(mut candidates) = parse_json_object(line) {
            if candidates.len() == 1 {
                return candidates.remove(0);
            }
        }
    } else if line.starts_with('[') {
        if let Some(mut candidates) = parse_json_array_of_objects(line) {
            if candidates.len() == 1 {
                return candidates.remove(0);
            }
        }
        if let Some(mut candidates) = parse_json_array_of_strings(line) {
            if candidates.len() == 1 {
                return candidates.remove(0);
            }
        }
    }

    if let Some(tab_pos) = line.find('\t') {
        let (value, description) = line.split_at(tab_pos);
        return Candidate::new(value).with_description(description[1..].to_string());
    }

    if line.contains(':') && !looks_like_colon_value(line) {
        if let Some(colon_pos) = line.find(':') {
            let (value, description) = line.split_at(colon_pos);
            return Candidate::new(value).with_description(description[1..].to_string());
        }
    }

    Candidate::new(line)
}

/// Parses the full captured stdout of an external completion provider into
/// candidates, per the algorithm in spec.md §4.4.
pub fn parse_external_output(input: &str) -> Vec<Candidate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.starts_with('[') {
        if let Some(candidates) = parse_json_array_of_strings(trimmed) {
            return candidates;
        }
        if let Some(candidates) = parse_json_array_of_objects(trimmed) {
            return candidates;
        }
        log::debug!("external completion output looks like JSON but failed to parse; falling back to line-splitting");
    } else if trimmed.starts_with('{') {
        if let Some(candidates) = parse_json_object(trimmed) {
            return candidates;
        }
        log::debug!("external completion output looks like JSON but failed to parse; falling back to line-splitting");
    }

    trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_line_forms() {
        let input = "alpha\nvalue:desc\nitem\tinfo";
        let result = parse_external_output(input);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0], Candidate::new("alpha"));
        assert_eq!(result[1], Candidate::new("value").with_description("desc"));
        assert_eq!(result[2], Candidate::new("item").with_description("info"));
    }

    #[test]
    fn url_is_not_split_on_colon() {
        let result = parse_external_output("https://example.com");
        assert_eq!(result, vec![Candidate::new("https://example.com")]);
    }

    #[test]
    fn windows_path_is_not_split() {
        let result = parse_external_output("C:\\Users\\me");
        assert_eq!(result, vec![Candidate::new("C:\\Users\\me")]);
    }

    #[test]
    fn ipv6_like_is_not_split() {
        let result = parse_external_output("fe80::1:2:3");
        assert_eq!(result, vec![Candidate::new("fe80::1:2:3")]);
    }

    #[test]
    fn json_array_of_strings() {
        let result = parse_external_output("[\"a\", \"b\"]");
        assert_eq!(result, vec![Candidate::new("a"), Candidate::new("b")]);
    }

    #[test]
    fn json_array_of_objects() {
        let input = r#"[{"Value": "a", "Description": "first"}]"#;
        let result = parse_external_output(input);
        assert_eq!(result, vec![Candidate::new("a").with_description("first")]);
    }

    #[test]
    fn single_json_object() {
        let input = r#"{"Value": "a", "Display": "A"}"#;
        let result = parse_external_output(input);
        assert_eq!(result, vec![Candidate::new("a").with_display("A")]);
    }

    #[test]
    fn empty_input_yields_no_candidates() {
        assert!(parse_external_output("   ").is_empty());
    }
}
