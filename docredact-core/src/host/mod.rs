// docredact-core/src/host/mod.rs
//! The contract between the core operations and the host document.
//!
//! The host owns the open document. The core never holds document state of
//! its own: every operation opens a [`DocumentBatch`] through
//! [`DocumentHost::begin_batch`], issues its reads and mutations against it,
//! and commits it before returning. Every batch method is a suspension point,
//! and any text read from a batch is a snapshot that must be read again after
//! a mutation to the same block.
//!
//! [`MemoryDocument`] is a complete in-memory host used by the CLI and tests.
//!
//! License: MIT OR APACHE 2.0

use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::{Alignment, HeaderConfig};
use crate::errors::{DocRedactError, HostError};

pub mod memory;

pub use memory::{DocumentSnapshot, FaultPlan, HeaderParagraph, MemoryDocument, Section};

/// Document-level change tracking mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTrackingMode {
    #[default]
    Off,
    TrackAll,
    TrackMineOnly,
}

/// Formatting applied to an inserted paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    pub alignment: Alignment,
    pub bold: bool,
    pub font_size: f32,
    /// `#RRGGBB`
    pub color: String,
    pub space_after: f32,
}

/// A paragraph of text with the formatting it should be inserted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledParagraph {
    pub text: String,
    pub style: ParagraphStyle,
}

impl From<&HeaderConfig> for StyledParagraph {
    fn from(header: &HeaderConfig) -> Self {
        Self {
            text: header.text.clone(),
            style: ParagraphStyle {
                alignment: header.alignment,
                bold: header.bold,
                font_size: header.font_size,
                color: header.color.hex_code().to_string(),
                space_after: header.space_after,
            },
        }
    }
}

/// An open document the core can run batches against.
#[async_trait]
pub trait DocumentHost: Send + Sync {
    /// Opens a new batch of reads and writes against the document.
    async fn begin_batch<'a>(&'a self) -> Result<Box<dyn DocumentBatch + 'a>, HostError>;

    /// Reports whether the host supports `set` at `min_version` or later.
    fn is_set_supported(&self, set: &str, min_version: &str) -> Result<bool, HostError>;
}

/// One open transaction against the host document.
///
/// Sections and body paragraphs are addressed by index in document order, as
/// enumerated within this batch.
#[async_trait]
pub trait DocumentBatch: Send {
    async fn section_count(&mut self) -> Result<usize, HostError>;

    /// Text of the primary header of `section`.
    async fn primary_header_text(&mut self, section: usize) -> Result<String, HostError>;

    async fn clear_primary_header(&mut self, section: usize) -> Result<(), HostError>;

    /// Inserts `paragraph` at the start of the primary header of `section`.
    async fn insert_header_paragraph(
        &mut self,
        section: usize,
        paragraph: &StyledParagraph,
    ) -> Result<(), HostError>;

    async fn paragraph_count(&mut self) -> Result<usize, HostError>;

    async fn paragraph_text(&mut self, index: usize) -> Result<String, HostError>;

    /// Replaces every case-insensitive occurrence of `find` in paragraph
    /// `index` with `replacement`, scanning left to right without overlap.
    /// Returns the number of occurrences replaced.
    async fn replace_in_paragraph(
        &mut self,
        index: usize,
        find: &str,
        replacement: &str,
    ) -> Result<usize, HostError>;

    async fn set_change_tracking_mode(&mut self, mode: ChangeTrackingMode) -> Result<(), HostError>;

    /// Commits everything issued in this batch.
    async fn commit(self: Box<Self>) -> Result<(), HostError>;
}

/// Commits `batch` regardless of `outcome`, so a batch is never left open.
///
/// The work's own error wins over a commit error; a commit error after
/// successful work fails the whole operation.
pub async fn finish_batch<T>(
    batch: Box<dyn DocumentBatch + '_>,
    outcome: Result<T, DocRedactError>,
) -> Result<T, DocRedactError> {
    let committed = batch.commit().await;
    match (outcome, committed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(commit_err)) => Err(commit_err.into()),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(commit_err)) => {
            warn!("Batch commit also failed after an earlier error: {}", commit_err);
            Err(err)
        }
    }
}

/// Parses a dotted version such as `1.5` into its numeric components.
pub fn parse_api_version(version: &str) -> Option<Vec<u32>> {
    let trimmed = version.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.split('.').map(|part| part.parse::<u32>().ok()).collect()
}

/// Compares two parsed versions, treating missing trailing components as zero.
pub fn version_at_least(available: &[u32], required: &[u32]) -> bool {
    let len = available.len().max(required.len());
    for i in 0..len {
        let a = available.get(i).copied().unwrap_or(0);
        let r = required.get(i).copied().unwrap_or(0);
        if a != r {
            return a > r;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderColor;

    #[test]
    fn parses_dotted_versions() {
        assert_eq!(parse_api_version("1.5"), Some(vec![1, 5]));
        assert_eq!(parse_api_version(" 1.10.2 "), Some(vec![1, 10, 2]));
        assert_eq!(parse_api_version("1.x"), None);
        assert_eq!(parse_api_version(""), None);
        assert_eq!(parse_api_version("1..5"), None);
    }

    #[test]
    fn compares_versions_numerically() {
        assert!(version_at_least(&[1, 10], &[1, 5]));
        assert!(version_at_least(&[1, 5], &[1, 5, 0]));
        assert!(!version_at_least(&[1, 4], &[1, 5]));
        assert!(!version_at_least(&[1], &[1, 0, 1]));
    }

    #[test]
    fn styled_paragraph_from_header_config() {
        let mut header = HeaderConfig::default();
        header.color = HeaderColor::Navy;
        let paragraph = StyledParagraph::from(&header);
        assert_eq!(paragraph.text, "CONFIDENTIAL DOCUMENT");
        assert_eq!(paragraph.style.color, "#1F3864");
        assert_eq!(paragraph.style.alignment, Alignment::Centered);
        assert!(paragraph.style.bold);
    }
}
