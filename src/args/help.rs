//! Post-processing for rendered `--help` output.

use clap::Command;

/// Normalise whitespace in rendered help.
///
/// Trailing spaces are dropped from every line, a blank line directly before
/// an option (`"\n\n  --"`) is removed, and the result ends with exactly one
/// newline.
pub fn tidy_help(text: &str) -> String {
    let trimmed: Vec<&str> = text.lines().map(str::trim_end).collect();
    let joined = trimmed.join("\n");
    let collapsed = joined.trim_end_matches('\n').replace("\n\n  --", "\n  --");
    format!("{collapsed}\n")
}

/// Render a command's long help as plain text and tidy it.
pub fn render_help(cmd: &mut Command) -> String {
    tidy_help(&cmd.render_long_help().to_string())
}
