#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    /// The line is a syntactically complete command; Enter should submit.
    Complete,
    /// The line is incomplete (e.g. an unclosed quote); Enter should insert
    /// a newline and continue editing instead of submitting.
    Incomplete,
}

/// Decides whether Enter submits the current buffer or inserts a newline
/// for continuation - consulted by [`crate::core_editor::Editor::run_validate`].
pub trait Validator: Send {
    fn validate(&self, line: &str) -> ValidationResult;
}

/// Every line is complete: Enter always submits. The spec's Non-goals
/// exclude shell-grammar-aware multi-line continuation as a feature, but
/// the validator seam/default impl is ambient editing plumbing the same
/// way `reedline` ships one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidator;

impl Validator for DefaultValidator {
    fn validate(&self, _line: &str) -> ValidationResult {
        ValidationResult::Complete
    }
}

/// Treats a line with an odd number of unescaped `'`/`"` quote characters
/// as incomplete - enough to support a shell that wants literal multi-line
/// quoted strings without pulling in a real shell-grammar parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteAwareValidator;

impl Validator for QuoteAwareValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        let mut single = 0usize;
        let mut double = 0usize;
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '\'' if double % 2 == 0 => single += 1,
                '"' if single % 2 == 0 => double += 1,
                _ => {}
            }
        }
        if single % 2 == 0 && double % 2 == 0 {
            ValidationResult::Complete
        } else {
            ValidationResult::Incomplete
        }
    }
}
