// docredact/src/cli.rs
//! Command-line interface definition for the docredact application.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "docredact",
    version = env!("CARGO_PKG_VERSION"),
    about = "Redact sensitive text from documents",
    long_about = "docredact replaces email addresses, phone numbers and US Social Security numbers in a document with fixed placeholder tokens. Before redacting it turns on change tracking when the host supports it and stamps a confidential header on the first section.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redact a document snapshot in place (or into --output).
    Redact(RedactCommand),
    /// Report which category each token belongs to.
    Classify(ClassifyCommand),
}

/// Arguments for the `redact` command.
#[derive(Parser, Debug)]
pub struct RedactCommand {
    /// Document snapshot (JSON) to redact.
    #[arg(long, short = 'i', value_name = "FILE", help = "Document snapshot (JSON) to redact.")]
    pub input: PathBuf,

    /// Where to write the redacted snapshot. Defaults to the input file.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write the redacted snapshot here instead of over the input.")]
    pub output: Option<PathBuf>,

    /// Path to a custom configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom configuration file (YAML).")]
    pub config: Option<PathBuf>,

    #[arg(long = "no-header", help = "Do not stamp the confidential header.")]
    pub no_header: bool,

    #[arg(long = "no-track-changes", help = "Do not turn on change tracking.")]
    pub no_track_changes: bool,

    /// Print the operation status as JSON on stdout.
    #[arg(
        long = "json",
        help = "Print the operation status as JSON. With --no-track-changes, trackChangesStatus reads \"not_supported\"."
    )]
    pub json: bool,
}

/// Arguments for the `classify` command.
#[derive(Parser, Debug)]
pub struct ClassifyCommand {
    /// Tokens to classify.
    #[arg(value_name = "TOKEN", required = true, num_args = 1..)]
    pub tokens: Vec<String>,

    #[arg(long = "json", help = "Print the classifications as JSON.")]
    pub json: bool,
}
