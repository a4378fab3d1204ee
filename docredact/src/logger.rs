// docredact/src/logger.rs
//! Logger setup for the command-line front-end.
//!
//! `RUST_LOG` is honoured unless an explicit level is passed, in which case
//! the explicit level wins. Output goes to stderr so stdout stays clean for
//! tables and JSON.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes `env_logger`. Calling it more than once is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);
    // A second init (tests, embedding) fails; the first logger stays active.
    let _ = builder.try_init();
}

/// Maps the global `--quiet` / `--debug` flags to a level override.
/// `--quiet` wins when both are given.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
