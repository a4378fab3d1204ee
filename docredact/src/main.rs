// docredact/src/main.rs
//! docredact entry point.
//!
//! Parses the command line, initializes logging and dispatches to the
//! command implementations.

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;

use docredact::cli::{Cli, Commands};
use docredact::commands::classify::run_classify;
use docredact::commands::redact::{run_redact, RedactOptions};
use docredact::logger;
use docredact::ui::theme::build_theme_map;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    logger::init_logger(logger::level_from_flags(args.quiet, args.debug));

    let theme_map = build_theme_map(args.theme.as_deref()).context("Theme error")?;

    match args.command {
        Commands::Redact(cmd) => {
            let opts = RedactOptions {
                input: cmd.input,
                output: cmd.output,
                config: cmd.config,
                insert_header: !cmd.no_header,
                track_changes: !cmd.no_track_changes,
                json: cmd.json,
            };
            let status = run_redact(&opts, &theme_map).await?;
            Ok(if status.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Classify(cmd) => {
            let enable_color = io::stdout().is_terminal();
            let mut stdout = io::stdout().lock();
            run_classify(&mut stdout, &cmd.tokens, cmd.json, &theme_map, enable_color)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
