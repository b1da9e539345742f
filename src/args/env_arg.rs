//! String options that default to the first set environment variable.

use clap::{Arg, ArgMatches, Command};

use super::{dest_name, string_value};
use crate::env::Env;
use crate::hint::env_hint;
use crate::terminal::Marks;

/// An `--option` whose default is looked up in one or more variables.
#[derive(Clone, Debug)]
pub struct EnvArgument {
    name: String,
    help: String,
    var_names: Vec<String>,
    fallback: Option<String>,
}

/// An [`EnvArgument`] after the environment has been consulted.
#[derive(Clone, Debug)]
pub struct ResolvedEnvArgument {
    name: String,
    id: String,
    value_name: Option<String>,
    default: Option<String>,
    help: String,
}

impl EnvArgument {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            var_names: Vec::new(),
            fallback: None,
        }
    }

    /// Variables to consult, highest priority first.
    pub fn vars<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.var_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Value used when none of the variables is set.
    pub fn fallback(mut self, value: impl Into<String>) -> Self {
        self.fallback = Some(value.into());
        self
    }

    pub fn resolve(&self, env: &Env, marks: Marks) -> ResolvedEnvArgument {
        let found = env.fallbacks(&self.var_names);
        let source = found.iter().position(|(_, v)| v.is_set());

        let default = match source {
            Some(i) => found[i].1.to_option(),
            None => self.fallback.clone(),
        };

        let hints: Vec<String> = found
            .iter()
            .enumerate()
            .map(|(i, (name, value))| {
                let mark = if Some(i) == source { marks.check } else { marks.dot };
                env_hint(name, value, &format!("{mark} $"))
            })
            .collect();

        let mut lines = vec![self.help.clone()];
        if let [only] = hints.as_slice() {
            lines.push(only.clone());
        } else if let Some((first, rest)) = hints.split_first() {
            lines.push(format!("Env: {first}"));
            lines.extend(rest.iter().map(|h| format!("     {h}")));
        }
        if let Some(ref fallback) = self.fallback {
            lines.push(format!("default: {fallback}"));
        }

        let value_name = match self.var_names.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        };

        ResolvedEnvArgument {
            name: self.name.clone(),
            id: dest_name(&self.name),
            value_name,
            default,
            help: lines.join("\n"),
        }
    }
}

impl ResolvedEnvArgument {
    /// Id under which the value is stored in `ArgMatches`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.id.clone())
            .long(self.name.clone())
            .required(false)
            .help(self.help.clone());
        if let Some(ref value_name) = self.value_name {
            arg = arg.value_name(value_name.clone());
        }
        arg
    }

    pub fn register(&self, cmd: Command) -> Command {
        cmd.arg(self.to_arg())
    }

    /// Command-line value, else the environment/fallback default.
    pub fn value(&self, matches: &ArgMatches) -> Option<String> {
        string_value(matches, &self.id).or_else(|| self.default.clone())
    }
}
