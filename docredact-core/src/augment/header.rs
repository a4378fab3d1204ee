// docredact-core/src/augment/header.rs
//! Stamps the confidential marker paragraph into the first section's primary header.

use log::{debug, info, warn};

use crate::config::HeaderConfig;
use crate::errors::{DocRedactError, HostError};
use crate::host::{finish_batch, DocumentBatch, DocumentHost, StyledParagraph};
use crate::results::HeaderOutcome;

/// Inserts the confidential header unless the first section's primary header
/// already carries the marker text.
///
/// The check is case-insensitive and ignores surrounding whitespace. When the
/// marker is missing, the header's existing content is cleared and replaced by
/// a single styled paragraph.
///
/// # Errors
///
/// [`DocRedactError::NoSections`] if the document has no sections, and any
/// host error raised while inserting the header or committing the batch.
pub async fn insert_confidential_header<H>(
    host: &H,
    header: &HeaderConfig,
) -> Result<HeaderOutcome, DocRedactError>
where
    H: DocumentHost + ?Sized,
{
    let mut batch = host.begin_batch().await?;
    let outcome = stamp_header(batch.as_mut(), header).await;
    finish_batch(batch, outcome).await
}

async fn stamp_header(
    batch: &mut dyn DocumentBatch,
    header: &HeaderConfig,
) -> Result<HeaderOutcome, DocRedactError> {
    if header_exists(batch, &header.text).await {
        info!("Header already exists, skipping insertion");
        return Ok(HeaderOutcome::AlreadyPresent);
    }

    if batch.section_count().await? == 0 {
        return Err(DocRedactError::NoSections);
    }

    batch.clear_primary_header(0).await?;
    batch
        .insert_header_paragraph(0, &StyledParagraph::from(header))
        .await?;
    info!("Confidential header inserted");
    Ok(HeaderOutcome::Inserted)
}

/// A failure while probing counts as "not present"; the insertion that
/// follows surfaces any real problem.
async fn header_exists(batch: &mut dyn DocumentBatch, marker: &str) -> bool {
    match probe_header(batch, marker).await {
        Ok(found) => found,
        Err(e) => {
            warn!("Error checking header existence: {}", e);
            false
        }
    }
}

async fn probe_header(batch: &mut dyn DocumentBatch, marker: &str) -> Result<bool, HostError> {
    if batch.section_count().await? == 0 {
        return Ok(false);
    }
    let text = batch.primary_header_text(0).await?;
    let found = text
        .trim()
        .to_uppercase()
        .contains(&marker.trim().to_uppercase());
    debug!("Primary header probe: marker present = {}", found);
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{DocumentSnapshot, HeaderParagraph, MemoryDocument, Section};

    fn doc_with_header(text: &str) -> MemoryDocument {
        MemoryDocument::new(DocumentSnapshot {
            sections: vec![Section {
                primary_header: vec![HeaderParagraph { text: text.to_string(), style: None }],
            }],
            ..DocumentSnapshot::default()
        })
    }

    #[tokio::test]
    async fn existing_marker_is_detected_case_insensitively() {
        let doc = doc_with_header("  Acme Corp - confidential document  ");
        let outcome = insert_confidential_header(&doc, &HeaderConfig::default()).await.unwrap();
        assert_eq!(outcome, HeaderOutcome::AlreadyPresent);
        assert_eq!(doc.mutation_count(), 0);
    }

    #[tokio::test]
    async fn existing_header_content_is_replaced() {
        let doc = doc_with_header("Draft v2");
        let outcome = insert_confidential_header(&doc, &HeaderConfig::default()).await.unwrap();
        assert_eq!(outcome, HeaderOutcome::Inserted);
        assert_eq!(doc.header_text(0).as_deref(), Some("CONFIDENTIAL DOCUMENT"));

        let snapshot = doc.snapshot().unwrap();
        let style = snapshot.sections[0].primary_header[0].style.clone().unwrap();
        assert_eq!(style.color, "#D32F2F");
        assert_eq!(style.font_size, 14.0);
        assert_eq!(style.space_after, 12.0);
        assert!(style.bold);
    }
}
