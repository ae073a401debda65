//! Grapheme/display-width helpers shared by the renderer and completion
//! popup layout - kept separate from `core_editor.rs` because editing
//! itself only ever needs rune (char) counts, never display width.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal column width of `text`, accounting for wide (CJK) and
/// zero-width (combining) graphemes. ANSI escapes (e.g. highlighter
/// styling) are stripped first so they never count toward the width.
pub fn display_width(text: &str) -> usize {
    let plain = strip_ansi(text);
    plain.graphemes(true).map(UnicodeWidthStr::width).sum()
}

fn strip_ansi(text: &str) -> String {
    match strip_ansi_escapes::strip(text.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Splits `text` into user-perceived characters (grapheme clusters) rather
/// than `char`s, so combining sequences move and measure as one unit.
pub fn graphemes(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Truncates `text` to at most `max_width` terminal columns, without
/// splitting a grapheme cluster in half.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let plain = strip_ansi(text);
    let mut width = 0;
    let mut out = String::new();
    for g in plain.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if width + w > max_width {
            break;
        }
        width += w;
        out.push_str(g);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_counts_wide_chars_double() {
        assert_eq!(display_width("a"), 1);
        assert_eq!(display_width("\u{4E2D}"), 2);
    }

    #[test]
    fn truncate_stops_before_splitting_wide_char() {
        let truncated = truncate_to_width("a\u{4E2D}b", 2);
        assert_eq!(truncated, "a");
    }

    #[test]
    fn graphemes_keeps_combining_sequences_together() {
        let g = graphemes("e\u{0301}");
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn display_width_excludes_ansi_escapes() {
        let styled = "\u{1b}[31mred\u{1b}[0m";
        assert_eq!(display_width(styled), 3);
    }
}
