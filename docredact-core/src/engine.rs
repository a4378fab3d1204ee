// docredact-core/src/engine.rs
//! The redaction engine.
//!
//! `RedactionEngine::redact_document` opens one batch on the host and makes
//! three full passes over the body paragraphs, one per category, in the fixed
//! order SSN, email, phone. For each paragraph in a pass it re-reads the
//! current text, extracts that category's matches, and for every match asks
//! the host to replace all case-insensitive occurrences of the matched
//! literal within that paragraph with the category placeholder.
//!
//! Replacement is by literal text, not by span. When the same literal occurs
//! several times in a paragraph, the first match replaces all of them and the
//! later matches of that literal find nothing, so every occurrence is counted
//! exactly once. A host API that replaces by span would need its own handling
//! of this case.
//!
//! A host error while reading or mutating one paragraph abandons that
//! paragraph for the current pass only. Failing to open the batch, enumerate
//! the paragraphs or commit the batch fails the whole call.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info, warn};

use crate::config::DocRedactConfig;
use crate::errors::{DocRedactError, HostError};
use crate::host::{finish_batch, DocumentBatch, DocumentHost};
use crate::matcher::find_redaction_matches;
use crate::redaction_match::{log_captured_match_debug, log_redaction_action_debug, Category};
use crate::results::RedactionResults;

#[derive(Debug, Clone)]
pub struct RedactionEngine {
    config: DocRedactConfig,
}

impl RedactionEngine {
    pub fn new(config: DocRedactConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DocRedactConfig {
        &self.config
    }

    /// Redacts every email, phone number and dashed SSN in the document body.
    pub async fn redact_document<H>(&self, host: &H) -> Result<RedactionResults, DocRedactError>
    where
        H: DocumentHost + ?Sized,
    {
        info!("Starting document redaction.");
        let mut batch = host.begin_batch().await?;
        let outcome = self.run_passes(batch.as_mut()).await;
        let results = finish_batch(batch, outcome).await?;
        info!(
            "Redaction complete: {} SSN(s), {} email(s), {} phone number(s).",
            results.ssns_redacted, results.emails_redacted, results.phones_redacted
        );
        Ok(results)
    }

    async fn run_passes(&self, batch: &mut dyn DocumentBatch) -> Result<RedactionResults, DocRedactError> {
        let mut results = RedactionResults::default();
        for category in Category::REDACTION_ORDER {
            let settings = self.config.redaction.category(category);
            if !settings.enabled {
                debug!("Skipping disabled category '{}'.", category.name());
                continue;
            }
            let count = redact_category(batch, category, &settings.placeholder).await?;
            match category {
                Category::Ssn => results.ssns_redacted = count,
                Category::Email => results.emails_redacted = count,
                Category::Phone => results.phones_redacted = count,
            }
        }
        Ok(results)
    }
}

/// One full pass over every body paragraph for a single category.
async fn redact_category(
    batch: &mut dyn DocumentBatch,
    category: Category,
    placeholder: &str,
) -> Result<usize, DocRedactError> {
    let paragraph_count = batch.paragraph_count().await?;
    debug!("{} pass over {} paragraph(s).", category, paragraph_count);

    let mut total = 0;
    for index in 0..paragraph_count {
        match redact_block(batch, index, category, placeholder).await {
            Ok(count) => total += count,
            Err((count, err)) => {
                total += count;
                warn!(
                    "Abandoning {} pass for paragraph {} after host error: {}",
                    category.name(),
                    index,
                    err
                );
            }
        }
    }
    Ok(total)
}

/// Redacts one category in one paragraph. On failure, returns the number of
/// replacements already made in this paragraph together with the error.
async fn redact_block(
    batch: &mut dyn DocumentBatch,
    index: usize,
    category: Category,
    placeholder: &str,
) -> Result<usize, (usize, HostError)> {
    let text = batch.paragraph_text(index).await.map_err(|e| (0, e))?;
    let matches: Vec<_> = find_redaction_matches(category, &text).collect();
    if matches.is_empty() {
        return Ok(0);
    }

    let mut count = 0;
    for m in &matches {
        log_captured_match_debug(module_path!(), index, m);
        let replaced = batch
            .replace_in_paragraph(index, m.matched, placeholder)
            .await
            .map_err(|e| (count, e))?;
        log_redaction_action_debug(module_path!(), index, m.matched, placeholder, replaced);
        count += replaced;
    }
    Ok(count)
}
