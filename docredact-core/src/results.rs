//! Result types returned by the redaction engine and the augmentation
//! operations, plus the aggregate status a caller assembles from them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::redaction_match::Category;

/// Replacement counts for one `redact_document` call.
///
/// Each count is the number of in-place replacements actually performed for
/// that category across the whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionResults {
    pub emails_redacted: usize,
    pub phones_redacted: usize,
    pub ssns_redacted: usize,
}

impl RedactionResults {
    pub fn count_for(&self, category: Category) -> usize {
        match category {
            Category::Email => self.emails_redacted,
            Category::Phone => self.phones_redacted,
            Category::Ssn => self.ssns_redacted,
        }
    }

    pub fn total(&self) -> usize {
        self.emails_redacted + self.phones_redacted + self.ssns_redacted
    }
}

/// Outcome of enabling change tracking. Never an error value: host failures
/// are reported as `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackChangesStatus {
    Enabled,
    NotSupported,
    Error,
}

impl fmt::Display for TrackChangesStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrackChangesStatus::Enabled => "enabled",
            TrackChangesStatus::NotSupported => "not_supported",
            TrackChangesStatus::Error => "error",
        })
    }
}

/// Outcome of stamping the confidential header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderOutcome {
    Inserted,
    AlreadyPresent,
}

impl HeaderOutcome {
    pub fn was_inserted(self) -> bool {
        matches!(self, HeaderOutcome::Inserted)
    }
}

/// Everything one user-triggered operation produced. Assembled by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStatus {
    pub header_inserted: bool,
    pub track_changes_status: TrackChangesStatus,
    pub redaction_results: RedactionResults,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationStatus {
    pub fn new(
        header_inserted: bool,
        track_changes_status: TrackChangesStatus,
        redaction_results: RedactionResults,
    ) -> Self {
        Self {
            header_inserted,
            track_changes_status,
            redaction_results,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
