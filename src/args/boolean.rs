//! `--thing` / `--no-thing` flag pairs with environment-derived defaults.
//!
//! The pair lives under its own help heading, which spells out both
//! spellings and marks the one currently in effect with where the default
//! came from:
//!
//! ```text
//! [--foo-bar (set by $FOOBAR=true) | --no-foo-bar] Do a thing:
//!       --foo-bar     ✓ $FOOBAR=true
//!                     · $FOO_BAR=(not set)
//!       --no-foo-bar  Turn off
//! ```

use clap::{Arg, ArgAction, ArgMatches, Command};

use super::{dest_name, flag_set, guess_boolean};
use crate::env::Env;
use crate::hint::env_hint;
use crate::terminal::Marks;

/// Description of a boolean flag pair.
#[derive(Clone, Debug)]
pub struct BooleanArgument {
    name: String,
    help: Option<String>,
    var_names: Vec<String>,
    fallback: Option<bool>,
}

/// A [`BooleanArgument`] after the environment has been consulted.
#[derive(Clone, Debug)]
pub struct ResolvedBoolean {
    name: String,
    id: String,
    off_id: String,
    default: Option<bool>,
    /// `default` or `set by $VAR=value`.
    source: String,
    hints: Vec<String>,
    title: String,
}

impl BooleanArgument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: None,
            var_names: Vec::new(),
            fallback: None,
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
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

    /// Default when none of the variables is set. Without one, neither
    /// flag is marked as the default.
    pub fn fallback(mut self, value: bool) -> Self {
        self.fallback = Some(value);
        self
    }

    pub fn resolve(&self, env: &Env, marks: Marks) -> ResolvedBoolean {
        let found = env.fallbacks(&self.var_names);
        let decider = found.iter().position(|(_, v)| v.is_set());

        let (default, source) = match decider {
            Some(i) => {
                let (name, value) = &found[i];
                (Some(guess_boolean(value)), env_hint(name, value, "set by $"))
            }
            None => (self.fallback, "default".to_string()),
        };

        let hints = found
            .iter()
            .enumerate()
            .map(|(i, (name, value))| {
                let mark = match (Some(i) == decider, default) {
                    (true, Some(true)) => marks.check,
                    (true, _) => marks.cross,
                    (false, _) => marks.dot,
                };
                format!("{mark} {}", env_hint(name, value, "$"))
            })
            .collect();

        ResolvedBoolean {
            id: dest_name(&self.name),
            off_id: dest_name(&format!("no-{}", self.name)),
            name: self.name.clone(),
            default,
            source,
            hints,
            title: build_title(&self.name, self.help.as_deref()),
        }
    }
}

impl ResolvedBoolean {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn default_value(&self) -> Option<bool> {
        self.default
    }

    /// One line per variable, e.g. `✓ $FOOBAR=true`.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Both spellings, with the default one annotated by its source.
    pub fn options_hint(&self) -> String {
        let name = &self.name;
        let source = &self.source;
        match self.default {
            Some(true) => format!("[--{name} ({source}) | --no-{name}]"),
            Some(false) => format!("[--{name} | --no-{name} ({source})]"),
            None => format!("[--{name} | --no-{name}]"),
        }
    }

    /// Help heading shared by the pair.
    pub fn heading(&self) -> String {
        format!("{} {}", self.options_hint(), self.title)
    }

    pub fn args(&self) -> [Arg; 2] {
        let heading = self.heading();
        let on_help = if self.hints.is_empty() {
            "Turn on".to_string()
        } else {
            self.hints.join("\n")
        };
        let on = Arg::new(self.id.clone())
            .long(self.name.clone())
            .action(ArgAction::SetTrue)
            .conflicts_with(self.off_id.clone())
            .help(on_help)
            .help_heading(heading.clone());
        let off = Arg::new(self.off_id.clone())
            .long(format!("no-{}", self.name))
            .action(ArgAction::SetTrue)
            .help("Turn off")
            .help_heading(heading);
        [on, off]
    }

    pub fn register(&self, cmd: Command) -> Command {
        cmd.args(self.args())
    }

    /// `--thing` → true, `--no-thing` → false, otherwise the default.
    pub fn value(&self, matches: &ArgMatches) -> Option<bool> {
        if flag_set(matches, &self.id) {
            Some(true)
        } else if flag_set(matches, &self.off_id) {
            Some(false)
        } else {
            self.default
        }
    }
}

/// Heading text: the help itself, or the name in title case.
///
/// Help phrased as a question gets a `true/false` suffix.
pub fn build_title(name: &str, help: Option<&str>) -> String {
    match help.map(str::trim) {
        Some(h) if !h.is_empty() => {
            if h.ends_with('?') {
                format!("{h} true/false")
            } else {
                h.to_string()
            }
        }
        _ => title_case(&name.replace(['-', '_'], " ")),
    }
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn foo_bar(fallback: bool) -> BooleanArgument {
        BooleanArgument::new("foo-bar")
            .help("Do a thing")
            .vars(["FOOBAR", "FOO_BAR"])
            .fallback(fallback)
    }

    fn empty_env() -> Env {
        Env::mock(Vec::<(&str, &str)>::new())
    }

    #[test]
    fn fallback_true_marks_positive_flag() {
        let resolved = foo_bar(true).resolve(&empty_env(), Marks::UNICODE);
        assert_eq!(resolved.default_value(), Some(true));
        assert_eq!(resolved.options_hint(), "[--foo-bar (default) | --no-foo-bar]");
        assert_eq!(resolved.hints(), ["· $FOOBAR=(not set)", "· $FOO_BAR=(not set)"]);
    }

    #[test]
    fn fallback_false_marks_negative_flag() {
        let resolved = foo_bar(false).resolve(&empty_env(), Marks::UNICODE);
        assert_eq!(resolved.default_value(), Some(false));
        assert_eq!(resolved.options_hint(), "[--foo-bar | --no-foo-bar (default)]");
    }

    #[test]
    fn env_true_overrides_fallback() {
        let env = Env::mock([("FOOBAR", "true")]);
        let resolved = foo_bar(false).resolve(&env, Marks::UNICODE);
        assert_eq!(resolved.default_value(), Some(true));
        assert_eq!(
            resolved.heading(),
            "[--foo-bar (set by $FOOBAR=true) | --no-foo-bar] Do a thing"
        );
        assert_eq!(resolved.hints(), ["✓ $FOOBAR=true", "· $FOO_BAR=(not set)"]);
    }

    #[test]
    fn env_false_gets_cross() {
        let env = Env::mock([("FOOBAR", "false")]);
        let resolved = foo_bar(true).resolve(&env, Marks::UNICODE);
        assert_eq!(resolved.default_value(), Some(false));
        assert_eq!(
            resolved.options_hint(),
            "[--foo-bar | --no-foo-bar (set by $FOOBAR=false)]"
        );
        assert_eq!(resolved.hints(), ["✗ $FOOBAR=false", "· $FOO_BAR=(not set)"]);
    }

    #[test]
    fn second_variable_can_decide() {
        let env = Env::mock([("FOO_BAR", "yes")]);
        let resolved = foo_bar(false).resolve(&env, Marks::ASCII);
        assert_eq!(resolved.default_value(), Some(true));
        assert_eq!(resolved.hints(), ["- $FOOBAR=(not set)", "+ $FOO_BAR=yes"]);
    }

    #[test]
    fn empty_variable_decides_false() {
        let env = Env::mock([("FOOBAR", ""), ("FOO_BAR", "1")]);
        let resolved = foo_bar(true).resolve(&env, Marks::ASCII);
        assert_eq!(resolved.default_value(), Some(false));
        assert_eq!(resolved.options_hint(), "[--foo-bar | --no-foo-bar (set by $FOOBAR=)]");
    }

    #[test]
    fn no_default_at_all() {
        let resolved = BooleanArgument::new("dry-run").resolve(&empty_env(), Marks::ASCII);
        assert_eq!(resolved.default_value(), None);
        assert_eq!(resolved.options_hint(), "[--dry-run | --no-dry-run]");
        assert_eq!(resolved.title(), "Dry Run");
    }

    #[test]
    fn titles() {
        assert_eq!(build_title("x", Some("Use the cache?")), "Use the cache? true/false");
        assert_eq!(build_title("x", Some("Use the cache")), "Use the cache");
        assert_eq!(build_title("use_THE-cache", Some("   ")), "Use The Cache");
        assert_eq!(build_title("verbose", None), "Verbose");
    }

    #[test]
    fn flags_override_default() {
        let resolved = foo_bar(true).resolve(&empty_env(), Marks::ASCII);
        let cmd = resolved.register(Command::new("prog"));

        let m = cmd.clone().try_get_matches_from(["prog"]).unwrap();
        assert_eq!(resolved.value(&m), Some(true));

        let m = cmd.clone().try_get_matches_from(["prog", "--no-foo-bar"]).unwrap();
        assert_eq!(resolved.value(&m), Some(false));

        let m = cmd.clone().try_get_matches_from(["prog", "--foo-bar"]).unwrap();
        assert_eq!(resolved.value(&m), Some(true));
    }

    #[test]
    fn flags_are_mutually_exclusive() {
        let resolved = foo_bar(true).resolve(&empty_env(), Marks::ASCII);
        let cmd = resolved.register(Command::new("prog"));
        let err = cmd
            .try_get_matches_from(["prog", "--foo-bar", "--no-foo-bar"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
