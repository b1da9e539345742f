//! Library error type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening, reading or writing inputs.
#[derive(Error, Debug)]
pub enum CmdError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },

    #[error("failed to write {name}: {source}")]
    Write {
        name: String,
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },
}

pub type Result<T> = std::result::Result<T, CmdError>;
