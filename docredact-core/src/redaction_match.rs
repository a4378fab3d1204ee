// docredact-core/src/redaction_match.rs
//! Provides the core data structures for sensitive-text matches and the
//! PII-safe logging helpers used while redacting a document.

use serde::{Deserialize, Serialize};
use log::debug;
use std::fmt;

use lazy_static::lazy_static;
use sha2::{Sha256, Digest};
use hex;

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("DOCREDACT_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// One class of sensitive text, with its own grammar and placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Email,
    Phone,
    Ssn,
}

impl Category {
    /// Fixed pass order used by the redaction engine. SSN is scanned first
    /// because its dash-anchored grammar is the most specific; phone is last
    /// because its grammar is the loosest.
    pub const REDACTION_ORDER: [Category; 3] = [Category::Ssn, Category::Email, Category::Phone];

    /// Stable machine name, also the key used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Category::Email => "email",
            Category::Phone => "phone",
            Category::Ssn => "ssn",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Email => "Email",
            Category::Phone => "Phone",
            Category::Ssn => "SSN",
        }
    }

    pub fn default_placeholder(self) -> &'static str {
        match self {
            Category::Email => "[REDACTED EMAIL]",
            Category::Phone => "[REDACTED PHONE]",
            Category::Ssn => "[REDACTED SSN]",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A span of sensitive text found in a single content block.
///
/// Borrows from the block's text snapshot; it is produced and consumed within
/// one pass over one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensitiveTextMatch<'t> {
    pub matched: &'t str,
    pub category: Category,
    /// Byte offset of the match within the snapshot.
    pub start: usize,
    pub end: usize,
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

/// Stable, non-reversible fingerprint of a match, safe to log.
///
/// Matching in the document is case-insensitive, so the fingerprint is too.
pub fn match_fingerprint(category: Category, matched: &str) -> String {
    let normalized = matched.trim().to_lowercase();

    let mut hasher = Sha256::new();
    hasher.update(category.name().as_bytes());
    hasher.update(b":");
    hasher.update(normalized.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

pub fn log_captured_match_debug(module_path: &str, block_index: usize, m: &SensitiveTextMatch<'_>) {
    debug!("{} Captured {} match in block {} at {}..{}: '{}' (fingerprint {})",
        module_path,
        m.category.name(),
        block_index,
        m.start,
        m.end,
        get_loggable_content(m.matched),
        match_fingerprint(m.category, m.matched)
    );
}

pub fn log_redaction_action_debug(
    module_path: &str,
    block_index: usize,
    original_sensitive_content: &str,
    placeholder: &str,
    replaced: usize,
) {
    debug!(
        "{} Redaction action in block {}: Original='{}', Redacted='{}', occurrences={}",
        module_path,
        block_index,
        get_loggable_content(original_sensitive_content),
        placeholder,
        replaced
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn test_match_fingerprint_is_case_insensitive() {
        let h1 = match_fingerprint(Category::Email, "Test@Example.COM ");
        let h2 = match_fingerprint(Category::Email, "test@example.com");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 16);
    }

    #[test]
    fn test_match_fingerprint_depends_on_category() {
        assert_ne!(
            match_fingerprint(Category::Phone, "123456789"),
            match_fingerprint(Category::Ssn, "123456789")
        );
    }

    #[test]
    fn test_category_order_and_placeholders() {
        assert_eq!(Category::REDACTION_ORDER, [Category::Ssn, Category::Email, Category::Phone]);
        assert_eq!(Category::Ssn.default_placeholder(), "[REDACTED SSN]");
        assert_eq!(Category::Email.to_string(), "Email");
        assert_eq!(serde_json::to_string(&Category::Ssn).unwrap(), "\"ssn\"");
    }
}
