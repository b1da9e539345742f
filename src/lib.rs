//! Helpers for building command-line tools.
//!
//! Environment-derived argument defaults and help, `--x`/`--no-x` flag
//! pairs, color detection, and a small read-transform-write framework.

pub mod args;
pub mod command;
pub mod constants;
pub mod env;
pub mod error;
pub mod files;
pub mod hint;
pub mod http;
pub mod logging;
pub mod signals;
pub mod terminal;
