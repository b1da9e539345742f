//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var_os`].
//! Tests use [`Env::mock()`] backed by a `HashMap`, eliminating the need for
//! `unsafe` calls to [`std::env::set_var`] / [`std::env::remove_var`].

use std::collections::HashMap;

/// Result of looking up one environment variable.
///
/// Keeps "set to the empty string" apart from "not set at all", which
/// `std::env::var` folds together with `Option`/`Result` handling in most
/// callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvValue {
    /// The variable is not in the environment.
    Absent,
    /// The variable is set to the empty string.
    Empty,
    /// The variable is set to a non-empty value.
    Present(String),
}

impl EnvValue {
    fn from_raw(raw: Option<String>) -> Self {
        match raw {
            None => EnvValue::Absent,
            Some(v) if v.is_empty() => EnvValue::Empty,
            Some(v) => EnvValue::Present(v),
        }
    }

    /// `true` for both `Empty` and `Present`.
    pub fn is_set(&self) -> bool {
        !matches!(self, EnvValue::Absent)
    }

    /// The value as a string slice; `Empty` yields `""`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnvValue::Absent => None,
            EnvValue::Empty => Some(""),
            EnvValue::Present(v) => Some(v),
        }
    }

    /// Set to something other than whitespace.
    pub fn is_truthy(&self) -> bool {
        self.as_str().is_some_and(|v| !v.trim().is_empty())
    }

    /// Owned copy of the value, if set.
    pub fn to_option(&self) -> Option<String> {
        self.as_str().map(str::to_string)
    }
}

/// Environment variable reader.
///
/// Wraps lookups so that production code hits `std::env` while tests
/// can supply a controlled set of values.
#[derive(Clone, Debug)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    ///
    /// Anything not listed is treated as unset.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Tri-state lookup of an environment variable.
    ///
    /// Values that are not valid Unicode are converted lossily rather than
    /// reported as missing.
    pub fn lookup(&self, name: &str) -> EnvValue {
        let raw = match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var_os(name).map(|v| v.to_string_lossy().into_owned()),
        };
        EnvValue::from_raw(raw)
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Result<String, std::env::VarError> {
        match &self.overrides {
            Some(map) => map.get(name).cloned().ok_or(std::env::VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// Returns `true` if the variable is present (empty or not).
    pub fn is_set(&self, name: &str) -> bool {
        self.lookup(name).is_set()
    }

    /// Look up each name in order, keeping the caller's order.
    pub fn fallbacks<S: AsRef<str>>(&self, names: &[S]) -> Vec<(String, EnvValue)> {
        names
            .iter()
            .map(|name| (name.as_ref().to_string(), self.lookup(name.as_ref())))
            .collect()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_env_reads_cargo_manifest_dir() {
        let env = Env::real();
        assert!(env.var("CARGO_MANIFEST_DIR").is_ok());
        assert!(matches!(env.lookup("CARGO_MANIFEST_DIR"), EnvValue::Present(_)));
    }

    #[test]
    fn mock_env_returns_set_values() {
        let env = Env::mock([("FOO", "bar"), ("BAZ", "qux")]);
        assert_eq!(env.var("FOO").unwrap(), "bar");
        assert_eq!(env.lookup("BAZ"), EnvValue::Present("qux".into()));
    }

    #[test]
    fn mock_env_returns_absent_for_missing() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        assert!(env.var("NONEXISTENT").is_err());
        assert_eq!(env.lookup("NONEXISTENT"), EnvValue::Absent);
    }

    #[test]
    fn empty_value_is_not_absent() {
        let env = Env::mock([("EMPTY", "")]);
        assert_eq!(env.lookup("EMPTY"), EnvValue::Empty);
        assert!(env.is_set("EMPTY"));
        assert_eq!(env.lookup("EMPTY").as_str(), Some(""));
        assert!(!env.lookup("EMPTY").is_truthy());
    }

    #[test]
    fn is_set_checks_presence() {
        let env = Env::mock([("PRESENT", "value")]);
        assert!(env.is_set("PRESENT"));
        assert!(!env.is_set("ABSENT"));
    }

    #[test]
    fn fallbacks_keep_order() {
        let env = Env::mock([("B", "2")]);
        let found = env.fallbacks(&["A", "B", "C"]);
        let names: Vec<_> = found.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(found[0].1, EnvValue::Absent);
        assert_eq!(found[1].1, EnvValue::Present("2".into()));
    }

    #[test]
    fn whitespace_is_not_truthy() {
        assert!(!EnvValue::Present("  ".into()).is_truthy());
        assert!(EnvValue::Present("1".into()).is_truthy());
        assert!(!EnvValue::Absent.is_truthy());
    }
}
