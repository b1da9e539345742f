//! `cmdkit-demo`: a small grep built on the cmdkit library.
//!
//! Entry point only; the command itself lives in [`cli`].

mod cli;

use cmdkit::command::{self, Context};
use cmdkit::env::Env;

fn main() {
    let ctx = Context::new(Env::real());
    let demo = cli::Demo::new(&ctx);
    command::launch_with(command::line_filter(demo), ctx);
}
