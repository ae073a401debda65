use bish_line::builtins::{apply, format_usage_error, parse_complete_args};
use bish_line::{DefaultPrompt, Reedline, Signal};

/// Demonstration shell loop: everything but `complete` is echoed back,
/// since parsing/executing arbitrary command lines is outside this
/// crate's scope (spec.md §1) - `complete` itself is handled here to
/// show the builtin driving the same `SpecRegistry` the editor's Tab
/// completion reads from.
fn main() -> std::io::Result<()> {
    let mut line_editor = Reedline::create()?;
    let prompt = DefaultPrompt::new("bish");

    loop {
        match line_editor.read_line(&prompt)? {
            Signal::Success(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "complete" || trimmed.starts_with("complete ") {
                    let rest = trimmed.strip_prefix("complete").unwrap_or("");
                    let args: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
                    match parse_complete_args(&args) {
                        Ok(parsed) => {
                            if let Some(output) = apply(line_editor.spec_registry_mut(), &parsed) {
                                print!("{output}");
                            }
                        }
                        Err(e) => println!("{}", format_usage_error(&e)),
                    }
                    continue;
                }
                println!("{line}");
            }
            Signal::CtrlC => continue,
            Signal::CtrlD => break,
        }
    }

    Ok(())
}
