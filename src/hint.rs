//! One-line `NAME=value` hints for help text, with secret redaction.

use crate::constants::{NOT_SET, REDACTED};
use crate::env::EnvValue;

/// Render `"{prefix}{name}={value}"` for help output.
///
/// Names containing `password` are always redacted; names containing
/// `token` are redacted unless the value is empty, so an empty token still
/// reads as set-but-blank.
pub fn env_hint(name: &str, value: &EnvValue, prefix: &str) -> String {
    let lowered = name.to_lowercase();
    let shown = match value {
        EnvValue::Absent => NOT_SET,
        _ if lowered.contains("password") => REDACTED,
        EnvValue::Present(_) if lowered.contains("token") => REDACTED,
        EnvValue::Empty => "",
        EnvValue::Present(v) => v.as_str(),
    };
    format!("{prefix}{name}={shown}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(v: &str) -> EnvValue {
        EnvValue::Present(v.into())
    }

    #[test]
    fn absent_reads_not_set() {
        assert_eq!(env_hint("FOO", &EnvValue::Absent, "$"), "$FOO=(not set)");
    }

    #[test]
    fn plain_value_is_shown() {
        assert_eq!(env_hint("FOO", &present("bar"), "  · $"), "  · $FOO=bar");
    }

    #[test]
    fn empty_value_is_shown_blank() {
        assert_eq!(env_hint("FOO", &EnvValue::Empty, ""), "FOO=");
    }

    #[test]
    fn password_is_always_redacted() {
        assert_eq!(env_hint("DB_PASSWORD", &present("hunter2"), "$"), "$DB_PASSWORD=*** REDACTED ***");
        assert_eq!(env_hint("db_password", &EnvValue::Empty, "$"), "$db_password=*** REDACTED ***");
    }

    #[test]
    fn token_redacted_only_when_non_empty() {
        assert_eq!(env_hint("GITHUB_TOKEN", &present("ghp_x"), "$"), "$GITHUB_TOKEN=*** REDACTED ***");
        assert_eq!(env_hint("GITHUB_TOKEN", &EnvValue::Empty, "$"), "$GITHUB_TOKEN=");
    }

    #[test]
    fn absent_secret_still_reads_not_set() {
        assert_eq!(env_hint("API_TOKEN", &EnvValue::Absent, "$"), "$API_TOKEN=(not set)");
        assert_eq!(env_hint("PASSWORD", &EnvValue::Absent, "$"), "$PASSWORD=(not set)");
    }
}
