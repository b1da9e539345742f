//! Tracing initialization.
//!
//! Centralizes subscriber setup so every command built on [`crate::command`]
//! logs the same way: to stderr, at a level picked by `-v` / `-q`, unless
//! `CMDKIT_LOG` supplies an explicit filter.

use tracing_subscriber::{EnvFilter, fmt};

use crate::constants::{ENV_LOG, ENV_NO_COLOR};
use crate::env::{Env, EnvValue};

/// Verbosity chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// `-q`: errors only.
    Quiet,
    #[default]
    Normal,
    /// `-v`: debug output.
    Verbose,
}

impl LogLevel {
    /// `-v` wins over `-q` when both are given.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            LogLevel::Verbose
        } else if quiet {
            LogLevel::Quiet
        } else {
            LogLevel::Normal
        }
    }

    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "info",
            LogLevel::Verbose => "debug",
        }
    }
}

/// Build the filter: `CMDKIT_LOG` if it parses, else the level's directive.
pub fn build_filter(level: LogLevel, env: &Env) -> EnvFilter {
    env.var(ENV_LOG)
        .ok()
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(level.directive()))
}

/// Whether log lines get ANSI styling: stderr must be a terminal and
/// `NO_COLOR` must not be set to a non-empty value.
pub fn use_ansi(stderr_is_tty: bool, env: &Env) -> bool {
    stderr_is_tty && !matches!(env.lookup(ENV_NO_COLOR), EnvValue::Present(_))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(level: LogLevel, ansi: bool, env: &Env) {
    let _ = fmt()
        .with_env_filter(build_filter(level, env))
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Verbose);
        assert_eq!(LogLevel::from_flags(false, true), LogLevel::Quiet);
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Normal);
    }

    #[test]
    fn filter_follows_level() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        assert_eq!(build_filter(LogLevel::Verbose, &env).to_string(), "debug");
        assert_eq!(build_filter(LogLevel::Quiet, &env).to_string(), "error");
    }

    #[test]
    fn env_filter_overrides_level() {
        let env = Env::mock([("CMDKIT_LOG", "cmdkit=trace")]);
        assert_eq!(build_filter(LogLevel::Quiet, &env).to_string(), "cmdkit=trace");
    }

    #[test]
    fn ansi_needs_a_terminal_and_no_no_color() {
        let plain = Env::mock(Vec::<(&str, &str)>::new());
        assert!(use_ansi(true, &plain));
        assert!(!use_ansi(false, &plain));
        assert!(!use_ansi(true, &Env::mock([("NO_COLOR", "1")])));
        assert!(use_ansi(true, &Env::mock([("NO_COLOR", "")])));
    }

    #[test]
    fn init_twice_is_harmless() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        init_logging(LogLevel::Normal, false, &env);
        init_logging(LogLevel::Verbose, false, &env);
    }
}
