//! A small framework for commands that read, transform and write files.
//!
//! Implement [`Main`] for a free-form command, or one of the processor
//! traits and wrap it in the matching adapter:
//!
//! | You implement          | Wrap with                   | Behaviour                          |
//! |------------------------|-----------------------------|------------------------------------|
//! | [`FileNameProcessor`]  | [`Files`]                   | called once per filename           |
//! | [`ContentsProcessor`]  | [`in_place`] / [`printing`] | whole text, written back or printed |
//! | [`ReaderProcessor`]    | [`reading`]                 | an open reader per file            |
//! | [`LineProcessor`]      | [`line_filter`]             | one line at a time, to stdout      |
//!
//! Filenames come from trailing positional arguments; `-` (or no names at
//! all) means stdin and `http(s)://` names are fetched. All loops stop early
//! once a Ctrl-C has been received.

use std::ffi::OsString;
use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::args::flag_set;
use crate::constants::APP_NAME;
use crate::env::Env;
use crate::error::CmdError;
use crate::files;
use crate::logging::{self, LogLevel};
use crate::signals::{self, BrokenPipe};
use crate::terminal::Terminal;

const FILENAMES_ID: &str = "filenames";
const FILENAMES_HELP: &str = "A list of files; - for stdin; separate arguments from files \
                              with an optional -- ; specifying no files means stdin";

/// What a command knows about its environment and, after parsing, its
/// arguments.
#[derive(Debug)]
pub struct Context {
    pub env: Env,
    pub terminal: Terminal,
    /// Empty until the command line has been parsed.
    pub matches: ArgMatches,
    pub verbose: bool,
    pub quiet: bool,
    pub broken_pipe: BrokenPipe,
}

impl Context {
    /// Probe the terminal through `env`.
    pub fn new(env: Env) -> Self {
        let terminal = Terminal::detect(&env);
        Self::with_terminal(env, terminal)
    }

    pub fn with_terminal(env: Env, terminal: Terminal) -> Self {
        Self {
            env,
            terminal,
            matches: ArgMatches::default(),
            verbose: false,
            quiet: false,
            broken_pipe: BrokenPipe::default(),
        }
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_flags(self.verbose, self.quiet)
    }

    fn set_matches(&mut self, matches: ArgMatches) {
        self.verbose = flag_set(&matches, "verbose");
        self.quiet = flag_set(&matches, "quiet");
        self.matches = matches;
    }
}

/// Hooks shared by every kind of command. All have defaults.
pub trait CommandHooks {
    /// Program name used in usage lines.
    fn name(&self) -> String {
        APP_NAME.to_string()
    }

    /// Description printed at the top of `--help`.
    fn about(&self) -> Option<String> {
        None
    }

    /// Text printed at the bottom of `--help`.
    fn epilog(&self) -> Option<String> {
        None
    }

    /// Add arguments. `ctx.matches` is still empty here.
    fn configure(&mut self, cmd: Command, _ctx: &Context) -> Command {
        cmd
    }

    /// Runs once after parsing, before any work.
    fn setup(&mut self, _ctx: &Context) -> Result<()> {
        Ok(())
    }
}

/// A complete command.
pub trait Main: CommandHooks {
    /// The body of the command, run after parsing.
    fn run(&mut self, ctx: &Context) -> Result<()>;
}

/// Build the clap command: `-v`, `-q`, then whatever `main` adds.
pub fn build_command<M: Main + ?Sized>(main: &mut M, ctx: &Context) -> Command {
    let mut cmd = Command::new(main.name())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("verbose is more verbose"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("do not log anything"),
        );
    if let Some(about) = main.about() {
        cmd = cmd.about(about);
    }
    if let Some(epilog) = main.epilog() {
        cmd = cmd.after_help(epilog);
    }
    main.configure(cmd, ctx)
}

/// Parse `args`, set up logging and signals, and run `main`.
///
/// Parse failures (including `--help`) come back as `clap::Error`s wrapped
/// in the returned error.
pub fn run_with<M, I, T>(main: &mut M, mut ctx: Context, args: I) -> Result<()>
where
    M: Main + ?Sized,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    signals::handle_keyboard_interrupt();
    let matches = build_command(main, &ctx).try_get_matches_from(args)?;
    ctx.set_matches(matches);
    let ansi = logging::use_ansi(io::stderr().is_terminal(), &ctx.env);
    logging::init_logging(ctx.log_level(), ansi, &ctx.env);
    main.setup(&ctx)?;
    main.run(&ctx)
}

/// Run `main` against the real process and exit on failure.
pub fn launch<M: Main>(main: M) {
    launch_with(main, Context::new(Env::real()));
}

/// Like [`launch`], with a context the caller has already built.
pub fn launch_with<M: Main>(mut main: M, ctx: Context) {
    let result = run_with(&mut main, ctx, std::env::args_os());
    if let Err(err) = result {
        if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
            clap_err.exit();
        }
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

// ── File names ──────────────────────────────────────────────────────

/// Does something with each named file.
pub trait FileNameProcessor: CommandHooks {
    fn process_filename(&mut self, name: &str, ctx: &Context) -> Result<()>;

    /// Names from the command line, or `-` when none were given.
    fn filenames(&self, ctx: &Context) -> Vec<String> {
        let names = ctx
            .matches
            .try_get_many::<String>(FILENAMES_ID)
            .ok()
            .flatten()
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        files::filenames_or_stdin(names)
    }
}

/// Turns a [`FileNameProcessor`] into a [`Main`].
#[derive(Debug)]
pub struct Files<P>(pub P);

impl<P: FileNameProcessor> CommandHooks for Files<P> {
    fn name(&self) -> String {
        self.0.name()
    }

    fn about(&self) -> Option<String> {
        self.0.about()
    }

    fn epilog(&self) -> Option<String> {
        self.0.epilog()
    }

    fn configure(&mut self, cmd: Command, ctx: &Context) -> Command {
        let cmd = cmd.arg(
            Arg::new(FILENAMES_ID)
                .num_args(0..)
                .action(ArgAction::Append)
                .help(FILENAMES_HELP),
        );
        self.0.configure(cmd, ctx)
    }

    fn setup(&mut self, ctx: &Context) -> Result<()> {
        self.0.setup(ctx)
    }
}

impl<P: FileNameProcessor> Main for Files<P> {
    fn run(&mut self, ctx: &Context) -> Result<()> {
        for name in self.0.filenames(ctx) {
            if !signals::keep_going() {
                tracing::debug!("interrupted, skipping remaining files");
                break;
            }
            self.0.process_filename(&name, ctx)?;
        }
        Ok(())
    }
}

/// Delegates the shared hooks to the wrapped processor.
macro_rules! delegate_hooks {
    ($adapter:ident, $bound:ident) => {
        impl<P: $bound> CommandHooks for $adapter<P> {
            fn name(&self) -> String {
                self.inner.name()
            }

            fn about(&self) -> Option<String> {
                self.inner.about()
            }

            fn epilog(&self) -> Option<String> {
                self.inner.epilog()
            }

            fn configure(&mut self, cmd: Command, ctx: &Context) -> Command {
                self.inner.configure(cmd, ctx)
            }

            fn setup(&mut self, ctx: &Context) -> Result<()> {
                self.inner.setup(ctx)
            }
        }
    };
}

// ── Whole contents ──────────────────────────────────────────────────

/// Transforms the full text of a file.
pub trait ContentsProcessor: CommandHooks {
    fn process_contents(&mut self, contents: &str, ctx: &Context) -> String;
}

/// Writes each transformed file back where it came from.
#[derive(Debug)]
pub struct InPlace<P> {
    inner: P,
}

delegate_hooks!(InPlace, ContentsProcessor);

impl<P: ContentsProcessor> FileNameProcessor for InPlace<P> {
    fn process_filename(&mut self, name: &str, ctx: &Context) -> Result<()> {
        let inner = &mut self.inner;
        let updated = files::update_in_place(name, |contents| inner.process_contents(contents, ctx));
        apply_pipe_policy(updated, ctx)
    }
}

/// Prints each transformed file to an output (stdout by default).
pub struct Printing<P> {
    inner: P,
    out: Box<dyn Write>,
}

delegate_hooks!(Printing, ContentsProcessor);

impl<P> Printing<P> {
    pub fn with_output(inner: P, out: Box<dyn Write>) -> Self {
        Self { inner, out }
    }
}

impl<P: ContentsProcessor> FileNameProcessor for Printing<P> {
    fn process_filename(&mut self, name: &str, ctx: &Context) -> Result<()> {
        let inner = &mut self.inner;
        let printed = files::update_and_print(
            name,
            |contents| inner.process_contents(contents, ctx),
            &mut self.out,
        );
        apply_pipe_policy(printed, ctx)
    }
}

/// Broken pipes go through the context's policy; anything else is returned
/// as is.
fn apply_pipe_policy(result: crate::error::Result<bool>, ctx: &Context) -> Result<()> {
    match result {
        Err(CmdError::Write { source, .. }) if signals::is_broken_pipe(&source) => {
            signals::check_pipe(Err(source), ctx.broken_pipe)?;
        }
        other => {
            other?;
        }
    }
    Ok(())
}

/// Process a file and write it back in place.
pub fn in_place<P: ContentsProcessor>(inner: P) -> Files<InPlace<P>> {
    Files(InPlace { inner })
}

/// Process a file and print the result, when it differs from the input.
pub fn printing<P: ContentsProcessor>(inner: P) -> Files<Printing<P>> {
    Files(Printing::with_output(inner, Box::new(io::stdout())))
}

// ── Readers ─────────────────────────────────────────────────────────

/// Works on an open reader for each file.
pub trait ReaderProcessor: CommandHooks {
    fn process_reader(&mut self, name: &str, reader: &mut dyn BufRead, ctx: &Context) -> Result<()>;
}

/// Opens each file (or stdin, or URL) and hands over the reader.
#[derive(Debug)]
pub struct Readers<P> {
    inner: P,
}

delegate_hooks!(Readers, ReaderProcessor);

impl<P: ReaderProcessor> FileNameProcessor for Readers<P> {
    fn process_filename(&mut self, name: &str, ctx: &Context) -> Result<()> {
        let mut reader = files::open_file_or_stdin(name)?;
        self.inner.process_reader(name, &mut *reader, ctx)
    }
}

pub fn reading<P: ReaderProcessor>(inner: P) -> Files<Readers<P>> {
    Files(Readers { inner })
}

// ── Lines ───────────────────────────────────────────────────────────

/// Filters or rewrites one line at a time.
pub trait LineProcessor: CommandHooks {
    /// Return the text to print for `line` (which keeps its newline), or
    /// `None` to drop it.
    fn process_line(&mut self, name: &str, line: &str, ctx: &Context) -> Option<String>;
}

/// Streams lines through a [`LineProcessor`] to an output (stdout by default).
pub struct Lines<P> {
    inner: P,
    out: Box<dyn Write>,
}

delegate_hooks!(Lines, LineProcessor);

impl<P> Lines<P> {
    pub fn with_output(inner: P, out: Box<dyn Write>) -> Self {
        Self { inner, out }
    }
}

impl<P: LineProcessor> ReaderProcessor for Lines<P> {
    fn process_reader(&mut self, name: &str, reader: &mut dyn BufRead, ctx: &Context) -> Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            if !signals::keep_going() {
                break;
            }
            if let Some(processed) = self.inner.process_line(name, &line, ctx) {
                signals::check_pipe(self.out.write_all(processed.as_bytes()), ctx.broken_pipe)?;
            }
        }
        signals::check_pipe(self.out.flush(), ctx.broken_pipe)?;
        Ok(())
    }
}

pub fn line_filter<P: LineProcessor>(inner: P) -> Files<Readers<Lines<P>>> {
    Files(Readers {
        inner: Lines::with_output(inner, Box::new(io::stdout())),
    })
}
