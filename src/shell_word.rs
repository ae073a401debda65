//! Last-argument extraction for Alt-. (`InsertLastArg`).
//!
//! The real implementation belongs to the host shell's parser (quoting,
//! escapes, substitutions all apply) - this crate only owns the fallback:
//! a plain split on ASCII whitespace. Callers that have a real parser wire
//! it in through [`crate::core_editor::Editor::insert_last_arg`]'s
//! `extractor` argument; when that returns `None` (or isn't provided at
//! all) this fallback runs instead.

/// Splits `line` on whitespace and returns its last token, if any.
pub fn extract_last_word(line: &str) -> String {
    line.split_whitespace().last().unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_last_token() {
        assert_eq!(extract_last_word("ls -la /tmp"), "/tmp");
        assert_eq!(extract_last_word("echo one"), "one");
    }

    #[test]
    fn empty_line_yields_empty_string() {
        assert_eq!(extract_last_word(""), "");
        assert_eq!(extract_last_word("   "), "");
    }
}
