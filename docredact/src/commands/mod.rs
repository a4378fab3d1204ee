//! Command implementations for the docredact CLI.

pub mod classify;
pub mod redact;
