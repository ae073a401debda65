pub mod complete;

pub use complete::{apply, format_usage_error, parse_complete_args, CompleteArgs, CompleteSource};

/// Names the shell's own builtins, independent of any one `complete`
/// invocation - consulted by `help` completion (spec.md §4.3 source 4).
pub const BUILTIN_NAMES: &[&str] = &["cd", "export", "unset", "complete", "help", "history"];
