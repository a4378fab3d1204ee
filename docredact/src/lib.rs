// docredact/src/lib.rs
//! # docredact CLI Application
//!
//! Terminal front-end for `docredact-core`. The `redact` command loads a
//! document snapshot, runs change tracking, header stamping and redaction
//! against it, and reports the resulting status. The `classify` command
//! reports the category of individual tokens.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

pub use commands::classify::run_classify;
pub use commands::redact::{execute_workflow, run_redact, RedactOptions, WorkflowSteps};
