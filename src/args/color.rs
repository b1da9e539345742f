//! `--colors` / `--no-colors` with a default guessed from the environment.
//!
//! Follows <https://no-color.org/> and <https://bixense.com/clicolors/>:
//! `NO_COLOR` wins, then `CLICOLOR_FORCE`, then a colorless `TERM`, and
//! otherwise colors are on exactly when stdout is a terminal.

use clap::{Arg, ArgAction, ArgMatches, Command};

use super::flag_set;
use crate::constants::{COLORLESS_TERMS, ENV_CLICOLOR, ENV_CLICOLOR_FORCE, ENV_NO_COLOR, ENV_TERM};
use crate::env::{Env, EnvValue};
use crate::hint::env_hint;
use crate::terminal::Terminal;

const COLORS_ID: &str = "colors";
const NO_COLORS_ID: &str = "no_colors";

/// Inputs to the color decision, captured once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorPreference {
    pub no_color: EnvValue,
    pub cli_color: EnvValue,
    pub cli_color_force: EnvValue,
    pub term: EnvValue,
    pub is_tty: bool,
}

impl ColorPreference {
    pub fn detect(env: &Env, terminal: &Terminal) -> Self {
        Self {
            no_color: env.lookup(ENV_NO_COLOR),
            cli_color: env.lookup(ENV_CLICOLOR),
            cli_color_force: env.lookup(ENV_CLICOLOR_FORCE),
            term: env.lookup(ENV_TERM),
            is_tty: terminal.is_tty,
        }
    }

    fn term_disables_color(&self) -> bool {
        self.term
            .as_str()
            .is_some_and(|t| COLORLESS_TERMS.contains(&t))
    }

    /// Whether colors are on when neither flag is given.
    ///
    /// `NO_COLOR` and `CLICOLOR_FORCE` count when non-empty, whitespace
    /// included. `CLICOLOR` on its own leaves the decision to the TTY check.
    pub fn default_enabled(&self) -> bool {
        if matches!(self.no_color, EnvValue::Present(_)) {
            false
        } else if matches!(self.cli_color_force, EnvValue::Present(_)) {
            true
        } else if self.term_disables_color() {
            false
        } else {
            self.is_tty
        }
    }

    pub fn heading(&self) -> String {
        let state = if self.default_enabled() { "on" } else { "off" };
        format!("Enable colored highlighting? (Colors currently defaulting to {state})")
    }

    /// The `Env:` block explaining each input to the decision, followed by
    /// the lead-in to the two flags.
    pub fn env_help(&self) -> String {
        let tty = if self.is_tty { "yes" } else { "no" };
        let term_hint = env_hint(ENV_TERM, &self.term, "$");
        let term_note = if self.term_disables_color() {
            "this TERM disables colors by default"
        } else if self.term.is_truthy() {
            "this TERM probably allows colors"
        } else {
            "cannot guess this terminal's color capabilities"
        };

        [
            format!(
                "Env: {}: Set to 1 to disable colors by default",
                env_hint(ENV_NO_COLOR, &self.no_color, "$")
            ),
            format!(
                "     {}: Set to 1 to enable colors by default",
                env_hint(ENV_CLICOLOR_FORCE, &self.cli_color_force, "$")
            ),
            format!(
                "     {}: Set to 1 to enable colors if stdout is a tty ({tty})",
                env_hint(ENV_CLICOLOR, &self.cli_color, "$")
            ),
            format!("     {term_hint}: {term_note}"),
            String::new(),
            "Force the color setting:".to_string(),
        ]
        .join("\n")
    }
}

/// The resolved `--colors` / `--no-colors` pair.
#[derive(Clone, Debug)]
pub struct ColorArguments {
    preference: ColorPreference,
}

impl ColorArguments {
    pub fn new(preference: ColorPreference) -> Self {
        Self { preference }
    }

    pub fn detect(env: &Env, terminal: &Terminal) -> Self {
        Self::new(ColorPreference::detect(env, terminal))
    }

    pub fn preference(&self) -> &ColorPreference {
        &self.preference
    }

    pub fn default_enabled(&self) -> bool {
        self.preference.default_enabled()
    }

    pub fn args(&self) -> [Arg; 2] {
        let heading = self.preference.heading();
        let on = Arg::new(COLORS_ID)
            .long("colors")
            .action(ArgAction::SetTrue)
            .conflicts_with(NO_COLORS_ID)
            .help(format!("Force colors on\n{}", self.preference.env_help()))
            .help_heading(heading.clone());
        let off = Arg::new(NO_COLORS_ID)
            .long("no-colors")
            .action(ArgAction::SetTrue)
            .help("Force colors off")
            .help_heading(heading);
        [on, off]
    }

    pub fn register(&self, cmd: Command) -> Command {
        cmd.args(self.args())
    }

    pub fn value(&self, matches: &ArgMatches) -> bool {
        if flag_set(matches, COLORS_ID) {
            true
        } else if flag_set(matches, NO_COLORS_ID) {
            false
        } else {
            self.default_enabled()
        }
    }

    /// Resolve the setting and make `colored` follow it process-wide.
    pub fn apply(&self, matches: &ArgMatches) -> bool {
        let enabled = self.value(matches);
        colored::control::set_override(enabled);
        tracing::debug!(enabled, "color output");
        enabled
    }
}
