//! Clap arguments whose defaults and help text come from the environment.
//!
//! Every helper follows the same two steps: describe the argument, then
//! `resolve` it against an [`Env`](crate::env::Env) and the terminal's
//! [`Marks`](crate::terminal::Marks). The resolved form knows its default,
//! renders its help, produces the `clap::Arg`s, and reads the final value
//! back out of `ArgMatches`, falling back to the default when the flag was
//! not given.

pub mod boolean;
pub mod builder;
pub mod color;
pub mod env_arg;
pub mod help;

pub use boolean::{BooleanArgument, ResolvedBoolean};
pub use builder::{ArgumentBuilder, FallbackToDefault, FallbackToEnv};
pub use color::{ColorArguments, ColorPreference};
pub use env_arg::{EnvArgument, ResolvedEnvArgument};
pub use help::{render_help, tidy_help};

use clap::ArgMatches;

use crate::constants::TRUTHY_VALUES;
use crate::env::EnvValue;

/// Guess whether an environment value means "yes". Unset is `false`.
pub fn guess_boolean(value: &EnvValue) -> bool {
    value
        .as_str()
        .is_some_and(|v| TRUTHY_VALUES.contains(&v.to_lowercase().as_str()))
}

/// Turn `--some-name` style names into clap ids (`some_name`).
pub fn dest_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Whether a `SetTrue` flag was passed. Unknown ids read as not passed.
pub(crate) fn flag_set(matches: &ArgMatches, id: &str) -> bool {
    matches
        .try_get_one::<bool>(id)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

/// The string value given on the command line, if any.
pub(crate) fn string_value(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.try_get_one::<String>(id).ok().flatten().cloned()
}
