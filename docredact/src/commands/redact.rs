//! `redact` command: run the full workflow against a document snapshot.
//!
//! Order is fixed: change tracking first, so the later edits are recorded as
//! revisions, then the header, then the three redaction passes. The first
//! failing step stops the workflow and its message lands in the status.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, error, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use docredact_core::{
    enable_track_changes, insert_confidential_header, DocRedactConfig, DocumentHost,
    MemoryDocument, OperationStatus, RedactionEngine, RedactionResults, TrackChangesStatus,
};

use crate::ui::status::{render_status, render_status_json, RenderOptions};
use crate::ui::theme::ThemeMap;

/// Options for [`run_redact`].
#[derive(Debug, Clone)]
pub struct RedactOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub insert_header: bool,
    pub track_changes: bool,
    pub json: bool,
}

/// Which steps of the workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowSteps {
    pub insert_header: bool,
    pub track_changes: bool,
}

impl Default for WorkflowSteps {
    fn default() -> Self {
        Self { insert_header: true, track_changes: true }
    }
}

/// `<config_dir>/docredact/config.yaml`, if such a file exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("docredact").join("config.yaml"))
        .filter(|path| path.is_file())
}

/// Loads the configuration from `explicit`, else the per-user file, else defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<DocRedactConfig> {
    let path = explicit.map(Path::to_path_buf).or_else(default_config_path);
    if let Some(path) = &path {
        info!("Loading configuration from {}", path.display());
    }
    DocRedactConfig::load(path.as_deref())
}

/// Runs track changes, header and redaction against `host`.
///
/// Never fails: a failing step is recorded in `OperationStatus::error` and
/// the remaining steps are not attempted.
pub async fn execute_workflow<H>(host: &H, config: &DocRedactConfig, steps: WorkflowSteps) -> OperationStatus
where
    H: DocumentHost + ?Sized,
{
    let track_changes_status = if steps.track_changes {
        enable_track_changes(host, &config.tracking).await
    } else {
        TrackChangesStatus::NotSupported
    };
    debug!("Track changes: {track_changes_status}");

    let mut status = OperationStatus::new(false, track_changes_status, RedactionResults::default());

    if steps.insert_header {
        match insert_confidential_header(host, &config.header).await {
            Ok(outcome) => status.header_inserted = outcome.was_inserted(),
            Err(e) => {
                error!("Inserting the confidential header failed: {e}");
                status.error = Some(e.to_string());
                return status;
            }
        }
    }

    match RedactionEngine::new(config.clone()).redact_document(host).await {
        Ok(results) => status.redaction_results = results,
        Err(e) => {
            error!("Redaction failed: {e}");
            status.error = Some(e.to_string());
        }
    }
    status
}

/// The `redact` command. Returns the rendered status; the caller maps
/// `is_success()` to the exit code.
pub async fn run_redact(opts: &RedactOptions, theme: &ThemeMap) -> Result<OperationStatus> {
    info!("Starting redaction of {}", opts.input.display());

    let config = resolve_config(opts.config.as_deref()).context("Failed to load configuration")?;
    let json = fs::read_to_string(&opts.input)
        .with_context(|| format!("Failed to read document {}", opts.input.display()))?;
    let document = MemoryDocument::from_json(&json)
        .with_context(|| format!("Failed to parse document {}", opts.input.display()))?;

    let steps = WorkflowSteps { insert_header: opts.insert_header, track_changes: opts.track_changes };
    let status = execute_workflow(&document, &config, steps).await;

    // Committed batches persist even when a later step failed, as in a live document.
    let output = opts.output.as_ref().unwrap_or(&opts.input);
    let snapshot = document.to_json_pretty().context("Failed to serialize document")?;
    fs::write(output, snapshot)
        .with_context(|| format!("Failed to write document {}", output.display()))?;
    debug!("Wrote document to {}", output.display());

    let mut stdout = io::stdout().lock();
    if opts.json {
        render_status_json(&mut stdout, &status)?;
    } else {
        let options = RenderOptions {
            header_requested: opts.insert_header,
            tracking_requested: opts.track_changes,
        };
        let enable_color = io::stdout().is_terminal();
        render_status(&mut stdout, &status, options, theme, enable_color)?;
    }
    Ok(status)
}
