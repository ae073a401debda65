//! Pure `Model -> styled string` projection (spec.md §4.7 / C13). Nothing
//! here touches a terminal; [`crate::painter`] is the thin layer that
//! actually writes `Renderer` output to the screen.

use nu_ansi_term::Style;

use crate::completion::{Candidate, CompletionState};
use crate::core_editor::EchoMode;
use crate::text_manipulation::display_width;

#[derive(Debug, Clone)]
pub struct RenderModel<'a> {
    pub prompt_left: &'a str,
    pub prompt_indicator: &'a str,
    pub line: &'a str,
    pub cursor: usize,
    pub echo_mode: EchoMode,
    pub ghost_suggestion: &'a str,
    pub completion: &'a CompletionState,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFrame {
    pub line: String,
    pub completion_box: Option<String>,
    pub help_box: Option<String>,
}

fn render_echo(line: &str, cursor: usize, mode: EchoMode) -> (String, String) {
    match mode {
        EchoMode::Normal => {
            let runes: Vec<char> = line.chars().collect();
            let before: String = runes[..cursor.min(runes.len())].iter().collect();
            let after: String = runes.get(cursor.min(runes.len())..).unwrap_or(&[]).iter().collect();
            (before, after)
        }
        EchoMode::Password { mask } => {
            let len = line.chars().count();
            let masked: String = std::iter::repeat(mask).take(len).collect();
            let before: String = masked.chars().take(cursor.min(len)).collect();
            let after: String = masked.chars().skip(cursor.min(len)).collect();
            (before, after)
        }
        EchoMode::None => (String::new(), String::new()),
    }
}

/// Lays out a [`CompletionState`]'s candidates per spec.md §4.7's popup
/// rules: forced single column with `value | description` once any
/// candidate carries a description, otherwise a `numCols`-wide grid
/// collapsed to one column when every candidate already fits within
/// `height` rows.
pub fn render_completion_box(candidates: &[Candidate], selected: usize, width: usize, height: usize) -> String {
    if candidates.is_empty() {
        return String::new();
    }

    let has_description = candidates.iter().any(|c| !c.description.is_empty());
    let max_item_width = candidates
        .iter()
        .map(|c| display_width(c.display_text()))
        .max()
        .unwrap_or(1)
        .max(1);

    let num_cols = if has_description {
        1
    } else if candidates.len() <= height {
        1
    } else {
        (width / max_item_width).max(1)
    };

    let mut rows = Vec::new();
    if num_cols == 1 {
        for (i, c) in candidates.iter().enumerate() {
            let marker = if i == selected { "> " } else { "  " };
            let row = if has_description {
                format!("{marker}{} | {}", c.display_text(), c.description)
            } else {
                format!("{marker}{}", c.display_text())
            };
            rows.push(pad_or_wrap(&row, width));
        }
    } else {
        for chunk_start in (0..candidates.len()).step_by(num_cols) {
            let mut row = String::new();
            for col in 0..num_cols {
                let idx = chunk_start + col;
                let Some(c) = candidates.get(idx) else {
                    break;
                };
                let marker = if idx == selected { "> " } else { "  " };
                let cell = format!("{marker}{}", c.display_text());
                row.push_str(&pad_or_wrap(&cell, max_item_width + 2));
            }
            rows.push(pad_or_wrap(&row, width));
        }
    }

    rows.join("\n")
}

fn pad_or_wrap(text: &str, width: usize) -> String {
    let w = display_width(text);
    if w < width {
        format!("{text}{}", " ".repeat(width - w))
    } else {
        crate::text_manipulation::truncate_to_width(text, width)
    }
}

/// Projects the full [`RenderModel`] into a [`RenderedFrame`]. The cursor
/// glyph itself (highlighting the in-line character, or rendering a bare
/// space past EOL) is the caller's responsibility via terminal cursor
/// positioning - this returns plain text plus styling spans conceptually,
/// simplified here to plain strings since no terminal is attached yet.
pub fn render(model: &RenderModel) -> RenderedFrame {
    let (before, after) = render_echo(model.line, model.cursor, model.echo_mode);
    let mut line = format!("{}{}{}{}", model.prompt_left, model.prompt_indicator, before, after);

    if !model.ghost_suggestion.is_empty() && model.echo_mode == EchoMode::Normal {
        line.push_str(model.ghost_suggestion);
    }

    let completion_box = if model.completion.should_show_info_box() {
        Some(render_completion_box(
            model.completion.suggestions(),
            model.completion.selected_index(),
            model.width,
            model.height,
        ))
    } else {
        None
    };

    let help_box = if model.completion.should_show_help_box() {
        Some(model.completion.help_info().to_string())
    } else {
        None
    };

    RenderedFrame {
        line,
        completion_box,
        help_box,
    }
}

/// Default ghost-suggestion text style: dim/grey, matching
/// [`crate::suggestion::DefaultHinter`]'s default style.
pub fn default_ghost_style() -> Style {
    Style::new().dimmed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_mode_masks_every_rune() {
        let (before, after) = render_echo("hunter2", 3, EchoMode::Password { mask: '*' });
        assert_eq!(before, "***");
        assert_eq!(after, "****");
    }

    #[test]
    fn none_mode_renders_nothing() {
        let (before, after) = render_echo("secret", 2, EchoMode::None);
        assert_eq!(before, "");
        assert_eq!(after, "");
    }

    #[test]
    fn popup_forces_single_column_when_any_description_present() {
        let candidates = vec![
            Candidate::new("a"),
            Candidate::new("b").with_description("desc"),
        ];
        let rendered = render_completion_box(&candidates, 0, 40, 10);
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.contains('|'));
    }

    #[test]
    fn popup_multi_column_when_no_descriptions_and_overflowing_height() {
        let candidates: Vec<Candidate> = (0..20).map(|i| Candidate::new(format!("item{i}"))).collect();
        let rendered = render_completion_box(&candidates, 0, 40, 5);
        assert!(rendered.lines().count() < 20);
    }
}
