//! The `complete` builtin (spec.md §4.7 / C12):
//!
//! ```text
//! complete [-pr] [-W wordlist] [-F function] [-C command] name
//! complete -p [name]
//! complete -r [name]
//! ```

use crate::completion::{CompletionSpec, SpecKind, SpecRegistry};
use crate::error::UsageError;

const USAGE_HINT: &str = "Run 'complete -h' for usage information.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompleteSource {
    WordList(String),
    Function(String),
    ExternalCommand(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompleteArgs {
    Help,
    Register {
        source: CompleteSource,
        name: String,
    },
    Print {
        name: Option<String>,
    },
    Remove {
        name: Option<String>,
    },
}

/// Parses a `complete` invocation's arguments (not including the `complete`
/// token itself) per spec.md §4.7. Every error message carries
/// [`USAGE_HINT`].
pub fn parse_complete_args(args: &[String]) -> Result<CompleteArgs, UsageError> {
    let mut print_mode = false;
    let mut remove_mode = false;
    let mut source: Option<CompleteSource> = None;
    let mut name: Option<String> = None;
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => return Ok(CompleteArgs::Help),
            "-p" => print_mode = true,
            "-r" => remove_mode = true,
            "-W" | "-F" | "-C" => {
                let Some(value) = args.get(i + 1) else {
                    return Err(UsageError::MissingValue(arg.to_string()));
                };
                source = Some(match arg {
                    "-W" => CompleteSource::WordList(value.clone()),
                    "-F" => CompleteSource::Function(value.clone()),
                    _ => CompleteSource::ExternalCommand(value.clone()),
                });
                i += 1;
            }
            other if other.starts_with('-') => {
                return Err(UsageError::UnknownFlag(other.to_string()))
            }
            other => {
                name = Some(other.to_string());
                break;
            }
        }
        i += 1;
    }

    if print_mode && remove_mode {
        return Err(UsageError::ConflictingFlags(
            "-p".to_string(),
            "-r".to_string(),
        ));
    }

    if print_mode {
        return Ok(CompleteArgs::Print { name });
    }
    if remove_mode {
        return Ok(CompleteArgs::Remove { name });
    }

    let Some(source) = source else {
        return Err(UsageError::MissingCommandName);
    };
    let Some(name) = name else {
        return Err(UsageError::MissingCommandName);
    };
    Ok(CompleteArgs::Register { source, name })
}

/// Formats a [`UsageError`] the way the shell should print it - message
/// plus the standard hint.
pub fn format_usage_error(err: &UsageError) -> String {
    format!("{err}\n{USAGE_HINT}")
}

/// Applies a parsed [`CompleteArgs::Register`]/[`CompleteArgs::Remove`] to
/// `registry`, or renders [`CompleteArgs::Print`] back out in
/// registration-command form (the round-trip spec.md §4.7 scenario 6
/// exercises).
pub fn apply(registry: &mut SpecRegistry, parsed: &CompleteArgs) -> Option<String> {
    match parsed {
        CompleteArgs::Help => Some(format!(
            "complete [-pr] [-W wordlist] [-F function] [-C command] name\n{USAGE_HINT}"
        )),
        CompleteArgs::Register { source, name } => {
            let spec = match source {
                CompleteSource::WordList(v) => CompletionSpec::word_list(name.clone(), v.clone()),
                CompleteSource::Function(v) => CompletionSpec::function(name.clone(), v.clone()),
                CompleteSource::ExternalCommand(v) => {
                    CompletionSpec::external_command(name.clone(), v.clone())
                }
            };
            registry.insert(spec);
            None
        }
        CompleteArgs::Remove { name } => {
            match name {
                Some(n) => {
                    registry.remove(n);
                }
                None => {
                    for spec in registry.iter().map(|s| s.command.clone()).collect::<Vec<_>>() {
                        registry.remove(&spec);
                    }
                }
            }
            None
        }
        CompleteArgs::Print { name } => {
            let lines: Vec<String> = match name {
                Some(n) => registry.get(n).map(render_spec).into_iter().collect(),
                None => registry.iter().map(render_spec).collect(),
            };
            if lines.is_empty() {
                None
            } else {
                Some(lines.join("\n") + "\n")
            }
        }
    }
}

fn render_spec(spec: &CompletionSpec) -> String {
    match spec.kind {
        SpecKind::WordList => format!("complete -W \"{}\" {}", spec.value, spec.command),
        SpecKind::Function => format!("complete -F {} {}", spec.value, spec.command),
        SpecKind::ExternalCommand => {
            format!("complete -C \"{}\" {}", spec.value, spec.command)
        }
    }
}
