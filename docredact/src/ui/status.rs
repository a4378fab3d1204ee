//! Rendering of an [`OperationStatus`] for the terminal.
//!
//! Rendering is stateless: every call writes the complete status, so a failed
//! run never shows counts left over from an earlier one.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use docredact_core::{Category, OperationStatus, TrackChangesStatus};
use std::io::{self, Write};

use crate::ui::theme::{paint, ThemeEntry, ThemeMap};

/// What the caller asked for, needed to tell "skipped" apart from "not needed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub header_requested: bool,
    pub tracking_requested: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { header_requested: true, tracking_requested: true }
    }
}

pub fn header_label(status: &OperationStatus, options: RenderOptions) -> &'static str {
    if !options.header_requested {
        "Skipped"
    } else if status.header_inserted {
        "Yes"
    } else {
        "Already exists"
    }
}

pub fn tracking_label(status: TrackChangesStatus, options: RenderOptions) -> &'static str {
    if !options.tracking_requested {
        return "Skipped";
    }
    match status {
        TrackChangesStatus::Enabled => "Enabled ✓",
        TrackChangesStatus::NotSupported => "Not Supported",
        TrackChangesStatus::Error => "Error",
    }
}

fn status_table(status: &OperationStatus, options: RenderOptions) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Item", "Result"]);

    for category in Category::REDACTION_ORDER {
        table.add_row(vec![
            Cell::new(format!("{} redacted", category.display_name())),
            Cell::new(status.redaction_results.count_for(category)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![Cell::new("Confidential header"), Cell::new(header_label(status, options))]);
    table.add_row(vec![
        Cell::new("Track changes"),
        Cell::new(tracking_label(status.track_changes_status, options)),
    ]);
    table
}

/// Writes the status table followed by a one-line outcome.
pub fn render_status<W: Write>(
    out: &mut W,
    status: &OperationStatus,
    options: RenderOptions,
    theme: &ThemeMap,
    enable_color: bool,
) -> io::Result<()> {
    writeln!(out, "{}", paint("Redaction Summary", ThemeEntry::Header, theme, enable_color))?;
    writeln!(out, "{}", status_table(status, options))?;

    match &status.error {
        Some(message) => {
            let line = format!("Redaction failed: {message}");
            writeln!(out, "{}", paint(&line, ThemeEntry::Error, theme, enable_color))
        }
        None => {
            let total = status.redaction_results.total();
            let line = format!("Redaction complete: {total} item(s) replaced.");
            writeln!(out, "{}", paint(&line, ThemeEntry::Success, theme, enable_color))
        }
    }
}

/// Writes the status as pretty-printed JSON.
pub fn render_status_json<W: Write>(out: &mut W, status: &OperationStatus) -> io::Result<()> {
    let json = serde_json::to_string_pretty(status).map_err(io::Error::other)?;
    writeln!(out, "{json}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use docredact_core::RedactionResults;

    fn rendered(status: &OperationStatus, options: RenderOptions) -> String {
        let mut buf = Vec::new();
        render_status(&mut buf, status, options, &ThemeStyle::default_theme_map(), false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn labels_follow_the_status() {
        let mut status = OperationStatus::new(true, TrackChangesStatus::Enabled, RedactionResults::default());
        let options = RenderOptions::default();
        assert_eq!(header_label(&status, options), "Yes");
        status.header_inserted = false;
        assert_eq!(header_label(&status, options), "Already exists");
        assert_eq!(tracking_label(TrackChangesStatus::Enabled, options), "Enabled ✓");
        assert_eq!(tracking_label(TrackChangesStatus::NotSupported, options), "Not Supported");
        assert_eq!(tracking_label(TrackChangesStatus::Error, options), "Error");
    }

    #[test]
    fn skipped_steps_are_labelled() {
        let status = OperationStatus::new(false, TrackChangesStatus::NotSupported, RedactionResults::default());
        let options = RenderOptions { header_requested: false, tracking_requested: false };
        assert_eq!(header_label(&status, options), "Skipped");
        assert_eq!(tracking_label(status.track_changes_status, options), "Skipped");
    }

    #[test]
    fn table_lists_counts_and_outcome() {
        let results = RedactionResults { emails_redacted: 2, phones_redacted: 0, ssns_redacted: 1 };
        let text = rendered(&OperationStatus::new(true, TrackChangesStatus::Enabled, results), RenderOptions::default());

        assert!(text.contains("SSN redacted"));
        assert!(text.contains("Email redacted"));
        assert!(text.contains("Phone redacted"));
        assert!(text.contains("Enabled ✓"));
        assert!(text.contains("Redaction complete: 3 item(s) replaced."));
    }

    #[test]
    fn failure_shows_the_error_message() {
        let mut status = OperationStatus::new(false, TrackChangesStatus::Error, RedactionResults::default());
        status.error = Some("No sections found in document".to_string());

        let text = rendered(&status, RenderOptions::default());

        assert!(text.contains("Redaction failed: No sections found in document"));
        assert!(!text.contains("Redaction complete"));
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let status = OperationStatus::new(true, TrackChangesStatus::NotSupported, RedactionResults::default());
        let mut buf = Vec::new();
        render_status_json(&mut buf, &status).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["headerInserted"], true);
        assert_eq!(value["trackChangesStatus"], "not_supported");
        assert_eq!(value["redactionResults"]["emailsRedacted"], 0);
        assert!(value.get("error").is_none());
    }
}
