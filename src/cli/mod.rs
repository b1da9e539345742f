//! The demo command: print the lines of files that match a pattern.
//!
//! Exercises every kind of argument the library offers: an env-backed
//! string (`--pattern`), a boolean pair (`--hyperspace`), and the color
//! pair.

use anyhow::{Context as _, Result};
use clap::Command;
use colored::Colorize;
use regex::Regex;

use cmdkit::args::{BooleanArgument, ColorArguments, EnvArgument, ResolvedBoolean, ResolvedEnvArgument};
use cmdkit::command::{CommandHooks, Context, LineProcessor};
use cmdkit::constants::APP_NAME;

pub const ENV_PATTERN: &str = "DEMO_PATTERN";

/// Arguments resolved against the environment before parsing.
pub struct Demo {
    hyperspace: ResolvedBoolean,
    colors: ColorArguments,
    pattern: ResolvedEnvArgument,
    matcher: Option<Regex>,
    highlight: bool,
}

impl Demo {
    pub fn new(ctx: &Context) -> Self {
        let marks = ctx.terminal.marks();
        Self {
            hyperspace: BooleanArgument::new("hyperspace")
                .help("Enable hyperspace for fast travel.")
                .vars(["HYPERSPACE", "HYPERSPACE_ENABLED"])
                .fallback(false)
                .resolve(&ctx.env, marks),
            colors: ColorArguments::detect(&ctx.env, &ctx.terminal),
            pattern: EnvArgument::new("pattern", "Only print lines matching this regex")
                .vars([ENV_PATTERN])
                .resolve(&ctx.env, marks),
            matcher: None,
            highlight: false,
        }
    }

    /// Wrap each match in color when highlighting is on.
    fn render(&self, line: &str) -> Option<String> {
        let Some(ref matcher) = self.matcher else {
            return Some(line.to_string());
        };
        if !matcher.is_match(line) {
            return None;
        }
        if !self.highlight {
            return Some(line.to_string());
        }
        let highlighted = matcher.replace_all(line, |caps: &regex::Captures| {
            caps[0].red().bold().to_string()
        });
        Some(highlighted.into_owned())
    }
}

impl CommandHooks for Demo {
    fn name(&self) -> String {
        APP_NAME.to_string()
    }

    fn about(&self) -> Option<String> {
        Some("Print the lines of files, URLs, or stdin that match a pattern.".to_string())
    }

    fn epilog(&self) -> Option<String> {
        Some(format!("Set ${ENV_PATTERN} to change the default pattern."))
    }

    fn configure(&mut self, cmd: Command, _ctx: &Context) -> Command {
        let cmd = self.pattern.register(cmd);
        let cmd = self.hyperspace.register(cmd);
        self.colors.register(cmd)
    }

    fn setup(&mut self, ctx: &Context) -> Result<()> {
        self.highlight = self.colors.apply(&ctx.matches);
        if self.hyperspace.value(&ctx.matches).unwrap_or(false) {
            tracing::info!("Hyperspace is enabled!");
        } else {
            tracing::debug!("Hyperspace is disabled");
        }
        self.matcher = match self.pattern.value(&ctx.matches) {
            Some(p) if !p.is_empty() => {
                Some(Regex::new(&p).with_context(|| format!("invalid pattern: {p}"))?)
            }
            _ => None,
        };
        Ok(())
    }
}

impl LineProcessor for Demo {
    fn process_line(&mut self, _name: &str, line: &str, _ctx: &Context) -> Option<String> {
        self.render(line)
    }
}
