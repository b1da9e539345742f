//! Ctrl-C and broken-pipe handling for long-running filters.
//!
//! A first Ctrl-C asks processing loops to stop after the current item
//! (see [`keep_going`]); a second one exits immediately. Rust already
//! ignores `SIGPIPE`, so a closed reader shows up as an `io::Error` of kind
//! `BrokenPipe`, which [`check_pipe`] turns into either a quiet no-op or a
//! quiet exit.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use crate::constants::{SIGINT, SIGNAL_EXIT_BASE, SIGPIPE};

static GO: AtomicBool = AtomicBool::new(true);
static PIPE_OK: AtomicBool = AtomicBool::new(true);
static INSTALL: Once = Once::new();

/// What to do when stdout's reader goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrokenPipe {
    /// Record it and carry on; further writes are pointless but harmless.
    Ignore,
    /// Record it and exit with `128 + SIGPIPE`.
    #[default]
    Stop,
}

/// `false` once an interrupt has been received.
pub fn keep_going() -> bool {
    GO.load(Ordering::SeqCst)
}

/// `false` once a broken pipe has been seen.
pub fn pipe_ok() -> bool {
    PIPE_OK.load(Ordering::SeqCst)
}

/// Ask processing loops to stop, as the first Ctrl-C does.
pub fn request_stop() {
    GO.store(false, Ordering::SeqCst);
}

/// Clear both flags. Only useful between runs in tests.
pub fn reset() {
    GO.store(true, Ordering::SeqCst);
    PIPE_OK.store(true, Ordering::SeqCst);
}

/// Handle one interrupt: stop gracefully the first time, exit the second.
fn on_interrupt() {
    if GO.swap(false, Ordering::SeqCst) {
        return;
    }
    tracing::debug!("received two signals, so immediately quitting");
    std::process::exit(SIGNAL_EXIT_BASE + SIGINT);
}

/// Install the Ctrl-C handler. Calling this more than once is harmless.
pub fn handle_keyboard_interrupt() {
    INSTALL.call_once(|| {
        if let Err(e) = ctrlc::set_handler(on_interrupt) {
            tracing::warn!("could not install Ctrl-C handler: {e}");
        }
    });
}

pub fn is_broken_pipe(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}

/// Apply `policy` to the outcome of a write.
///
/// Errors other than a broken pipe are passed through untouched.
pub fn check_pipe(result: io::Result<()>, policy: BrokenPipe) -> io::Result<()> {
    match result {
        Err(e) if is_broken_pipe(&e) => {
            PIPE_OK.store(false, Ordering::SeqCst);
            match policy {
                BrokenPipe::Ignore => Ok(()),
                BrokenPipe::Stop => std::process::exit(SIGNAL_EXIT_BASE + SIGPIPE),
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn request_stop_clears_go() {
        reset();
        assert!(keep_going());
        request_stop();
        assert!(!keep_going());
        reset();
        assert!(keep_going());
    }

    #[test]
    #[serial]
    fn first_interrupt_only_stops() {
        reset();
        on_interrupt();
        assert!(!keep_going());
        reset();
    }

    #[test]
    #[serial]
    fn ignored_broken_pipe_is_recorded() {
        reset();
        let err = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        assert!(check_pipe(Err(err), BrokenPipe::Ignore).is_ok());
        assert!(!pipe_ok());
        reset();
    }

    #[test]
    #[serial]
    fn other_errors_pass_through() {
        reset();
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let result = check_pipe(Err(err), BrokenPipe::Stop);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
        assert!(pipe_ok());
        assert!(check_pipe(Ok(()), BrokenPipe::Stop).is_ok());
    }

    #[test]
    fn installing_twice_is_harmless() {
        handle_keyboard_interrupt();
        handle_keyboard_interrupt();
    }
}
