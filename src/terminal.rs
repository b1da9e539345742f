//! Terminal capability probe: TTY detection and a Unicode guess.
//!
//! Rust strings are always UTF-8, so the "encoding" of stdout is taken from
//! the locale (`LC_ALL`, `LC_CTYPE`, `LANG`), which is what the terminal
//! will use to render the bytes we write.

use std::io::IsTerminal;

use crate::constants::{ENV_LOCALE, ENV_TERM};
use crate::env::{Env, EnvValue};

/// Snapshot of what we know about stdout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terminal {
    pub is_tty: bool,
    /// Codeset name from the locale, e.g. `UTF-8`.
    pub encoding: Option<String>,
    pub term: EnvValue,
}

/// Glyphs used to annotate environment hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marks {
    /// The variable that supplied a true (or string) default.
    pub check: &'static str,
    /// The variable that supplied a false default.
    pub cross: &'static str,
    /// Every other variable.
    pub dot: &'static str,
}

impl Marks {
    pub const UNICODE: Marks = Marks { check: "✓", cross: "✗", dot: "·" };
    pub const ASCII: Marks = Marks { check: "+", cross: "x", dot: "-" };
}

impl Terminal {
    /// Probe the real stdout and the given environment.
    pub fn detect(env: &Env) -> Self {
        Self {
            is_tty: std::io::stdout().is_terminal(),
            encoding: locale_encoding(env),
            term: env.lookup(ENV_TERM),
        }
    }

    /// Whether the reported encoding name mentions UTF.
    pub fn is_utf(&self) -> bool {
        self.encoding
            .as_deref()
            .is_some_and(|e| e.to_uppercase().contains("UTF"))
    }

    /// Best guess at whether stdout renders Unicode.
    pub fn supports_unicode(&self) -> bool {
        if self.term.as_str() == Some("dumb") {
            return false;
        }
        self.is_utf()
    }

    pub fn marks(&self) -> Marks {
        if self.is_utf() { Marks::UNICODE } else { Marks::ASCII }
    }
}

/// Codeset of the first non-empty locale variable.
///
/// `en_US.UTF-8@euro` yields `UTF-8`; a bare value such as `C` is returned
/// whole.
fn locale_encoding(env: &Env) -> Option<String> {
    let locale = ENV_LOCALE
        .iter()
        .filter_map(|name| env.lookup(name).to_option())
        .find(|v| !v.is_empty())?;
    let codeset = match locale.split_once('.') {
        Some((_, rest)) => rest.split('@').next().unwrap_or(rest),
        None => locale.as_str(),
    };
    Some(codeset.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(encoding: Option<&str>, term: EnvValue) -> Terminal {
        Terminal {
            is_tty: true,
            encoding: encoding.map(String::from),
            term,
        }
    }

    #[test]
    fn encoding_from_lang() {
        let env = Env::mock([("LANG", "en_US.UTF-8")]);
        assert_eq!(locale_encoding(&env).as_deref(), Some("UTF-8"));
    }

    #[test]
    fn lc_all_wins_over_lang() {
        let env = Env::mock([("LC_ALL", "de_DE.ISO-8859-1"), ("LANG", "en_US.UTF-8")]);
        assert_eq!(locale_encoding(&env).as_deref(), Some("ISO-8859-1"));
    }

    #[test]
    fn empty_locale_variables_are_skipped() {
        let env = Env::mock([("LC_ALL", ""), ("LANG", "C.utf8")]);
        assert_eq!(locale_encoding(&env).as_deref(), Some("utf8"));
    }

    #[test]
    fn modifier_is_stripped() {
        let env = Env::mock([("LANG", "de_DE.UTF-8@euro")]);
        assert_eq!(locale_encoding(&env).as_deref(), Some("UTF-8"));
    }

    #[test]
    fn bare_locale_is_returned_whole() {
        let env = Env::mock([("LANG", "C")]);
        assert_eq!(locale_encoding(&env).as_deref(), Some("C"));
    }

    #[test]
    fn no_locale() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        assert_eq!(locale_encoding(&env), None);
        assert!(!Terminal::detect(&env).is_utf());
    }

    #[test]
    fn utf_detection_is_case_insensitive() {
        assert!(terminal(Some("utf8"), EnvValue::Absent).is_utf());
        assert!(!terminal(Some("ANSI_X3.4-1968"), EnvValue::Absent).is_utf());
    }

    #[test]
    fn dumb_terminal_has_no_unicode() {
        let t = terminal(Some("UTF-8"), EnvValue::Present("dumb".into()));
        assert!(t.is_utf());
        assert!(!t.supports_unicode());
        let t = terminal(Some("UTF-8"), EnvValue::Present("xterm-256color".into()));
        assert!(t.supports_unicode());
    }

    #[test]
    fn marks_follow_encoding() {
        assert_eq!(terminal(Some("UTF-8"), EnvValue::Absent).marks(), Marks::UNICODE);
        assert_eq!(terminal(None, EnvValue::Absent).marks(), Marks::ASCII);
    }
}
