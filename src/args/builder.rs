//! Small argument builders that derive names, defaults and docs for you.

use clap::{Arg, ArgMatches};

use super::string_value;
use crate::env::{Env, EnvValue};

/// Something that can be attached to a `clap::Command` as a `--option`.
pub trait ArgumentBuilder {
    /// Value used when the option is not given.
    fn default_value(&self) -> Option<String>;

    /// The long option, including the leading `--`.
    fn arg_name(&self) -> String;

    /// Documentation shown in `--help`.
    fn doc(&self) -> Option<String> {
        None
    }

    /// Id under which the value is stored, derived from [`arg_name`](Self::arg_name).
    fn field_name(&self) -> String {
        self.arg_name()
            .trim_start_matches("--")
            .replace('-', "_")
            .to_lowercase()
    }

    fn to_arg(&self) -> Arg {
        let long = self.arg_name().trim_start_matches("--").to_string();
        let mut arg = Arg::new(self.field_name()).long(long).required(false);
        if let Some(doc) = self.doc() {
            arg = arg.help(doc);
        }
        arg
    }

    /// Command-line value, else [`default_value`](Self::default_value).
    fn value(&self, matches: &ArgMatches) -> Option<String> {
        string_value(matches, &self.field_name()).or_else(|| self.default_value())
    }
}

/// `"Some text"` → `"Some text. "`, blank → `""`.
fn doc_prefix(doc: Option<&str>) -> String {
    match doc.map(str::trim) {
        Some(d) if d.ends_with('.') => format!("{d} "),
        Some(d) if !d.is_empty() => format!("{d}. "),
        _ => String::new(),
    }
}

/// An option with a fixed fallback value.
#[derive(Clone, Debug)]
pub struct FallbackToDefault {
    field_name: String,
    fallback: Option<String>,
    doc: Option<String>,
}

impl FallbackToDefault {
    pub fn new(field_name: impl Into<String>, fallback: Option<String>) -> Self {
        Self {
            field_name: field_name.into(),
            fallback,
            doc: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

impl ArgumentBuilder for FallbackToDefault {
    fn default_value(&self) -> Option<String> {
        self.fallback.clone()
    }

    fn arg_name(&self) -> String {
        format!("--{}", self.field_name.replace('_', "-").to_lowercase())
    }

    fn doc(&self) -> Option<String> {
        let prefix = doc_prefix(self.doc.as_deref());
        match self.fallback {
            Some(ref fallback) => Some(format!("{prefix}Defaults to '{fallback}'")),
            None => Some(prefix.trim_end().to_string()),
        }
    }
}

/// An option whose default is read from one environment variable.
///
/// The variable is read when the builder is created, so help text and
/// default agree even if the environment changes later.
#[derive(Clone, Debug)]
pub struct FallbackToEnv {
    variable: String,
    current: EnvValue,
    fallback: Option<String>,
    doc: Option<String>,
    field_name: Option<String>,
}

impl FallbackToEnv {
    pub fn new(variable: impl Into<String>, env: &Env) -> Self {
        let variable = variable.into();
        Self {
            current: env.lookup(&variable),
            variable,
            fallback: None,
            doc: None,
            field_name: None,
        }
    }

    pub fn fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Name the option after a field instead of the variable.
    pub fn field(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }
}

impl ArgumentBuilder for FallbackToEnv {
    fn default_value(&self) -> Option<String> {
        self.current.to_option().or_else(|| self.fallback.clone())
    }

    fn arg_name(&self) -> String {
        let base = self.field_name.as_deref().unwrap_or(&self.variable);
        format!("--{}", base.replace('_', "-").to_lowercase())
    }

    fn doc(&self) -> Option<String> {
        let prefix = doc_prefix(self.doc.as_deref());
        let mut variable = match self.current.as_str() {
            Some(v) => format!("${}='{v}'", self.variable),
            None => format!("${} (unset)", self.variable),
        };
        if let Some(ref fallback) = self.fallback {
            variable = format!("{variable} or {fallback}");
        }
        Some(format!("{prefix}Defaults to {variable}"))
    }
}
