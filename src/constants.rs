//! Crate-wide constants.
//!
//! Centralises environment variable names, help-text glyphs, and
//! placeholder strings so the wording lives in one place.

/// Display name of the demo tool.
pub const APP_NAME: &str = "cmdkit-demo";

/// Filename that stands for stdin (reading) or stdout (writing).
pub const STDIO_NAME: &str = "-";

/// Shown in hints for variables that are not set.
pub const NOT_SET: &str = "(not set)";

/// Shown in hints instead of values that look like secrets.
pub const REDACTED: &str = "*** REDACTED ***";

/// Values accepted as `true` by [`crate::args::guess_boolean`].
pub const TRUTHY_VALUES: &[&str] = &["true", "t", "y", "yes", "1"];

/// `TERM` values that disable colors by default.
pub const COLORLESS_TERMS: &[&str] = &["xterm-mono", "dumb"];

/// Exit status base for "terminated by signal N" (`128 + N`).
pub const SIGNAL_EXIT_BASE: i32 = 128;

pub const SIGINT: i32 = 2;
pub const SIGPIPE: i32 = 13;

// ── Environment variable names ──────────────────────────────────────

pub const ENV_NO_COLOR: &str = "NO_COLOR";
pub const ENV_CLICOLOR: &str = "CLICOLOR";
pub const ENV_CLICOLOR_FORCE: &str = "CLICOLOR_FORCE";
pub const ENV_TERM: &str = "TERM";

/// Locale variables consulted for the output encoding, highest priority first.
pub const ENV_LOCALE: &[&str] = &["LC_ALL", "LC_CTYPE", "LANG"];

/// Overrides the log filter chosen from `-v` / `-q`.
pub const ENV_LOG: &str = "CMDKIT_LOG";
