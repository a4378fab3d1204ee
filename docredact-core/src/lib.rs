// docredact-core/src/lib.rs
//! # docredact Core Library
//!
//! `docredact-core` redacts sensitive text from a word-processing document that
//! is open inside a host editor. It recognises three categories of sensitive
//! text (email addresses, phone numbers and US Social Security numbers),
//! replaces them in place with fixed placeholder tokens, and can stamp a
//! confidential header and switch on change tracking before editing.
//!
//! The library never owns the document. It talks to the host through the
//! [`DocumentHost`] and [`DocumentBatch`] traits, opening one batch per
//! operation and committing it before returning. [`MemoryDocument`] is a
//! complete in-memory host.
//!
//! ## Modules
//!
//! * `matcher`: detection grammars and match iterators.
//! * `validators`: strict whole-string validators, classification and phone normalization.
//! * `redaction_match`: the `Category` and `SensitiveTextMatch` types and PII-safe logging.
//! * `engine`: the `RedactionEngine` that rewrites the document body.
//! * `augment`: confidential header stamping and change tracking.
//! * `host`: the host document contract and the in-memory host.
//! * `config`: placeholders, header styling and tracking requirements.
//! * `results`: result and status types returned to the caller.
//! * `errors`: error types.
//!
//! ## Usage Example
//!
//! ```rust
//! use docredact_core::{DocRedactConfig, MemoryDocument, RedactionEngine};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let config = DocRedactConfig::load_default()?;
//! let document = MemoryDocument::from_paragraphs(["Reach me at jane@example.com."]);
//!
//! let results = RedactionEngine::new(config).redact_document(&document).await?;
//! assert_eq!(results.emails_redacted, 1);
//! assert_eq!(document.paragraphs()[0], "Reach me at [REDACTED EMAIL].");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`DocRedactError`]. Host failures inside a single
//! paragraph are logged and skipped by the engine; failures at the batch
//! boundary are returned to the caller. Enabling change tracking never fails
//! and reports a [`TrackChangesStatus`] instead.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod augment;
pub mod config;
pub mod engine;
pub mod errors;
pub mod host;
pub mod matcher;
pub mod redaction_match;
pub mod results;
pub mod validators;

/// Re-exports the configuration types and loaders.
pub use config::{
    merge_config,
    Alignment,
    DocRedactConfig,
    HeaderColor,
    HeaderConfig,
    PartialConfig,
    TrackingConfig,
};

/// Re-exports the error types for clear error reporting.
pub use errors::{DocRedactError, HostError};

pub use engine::RedactionEngine;

pub use augment::{enable_track_changes, insert_confidential_header, is_track_changes_supported};

/// Re-exports the host contract and the in-memory host.
pub use host::{
    ChangeTrackingMode,
    DocumentBatch,
    DocumentHost,
    DocumentSnapshot,
    FaultPlan,
    MemoryDocument,
    StyledParagraph,
};

pub use matcher::{find_matches, find_redaction_matches};
pub use redaction_match::{Category, SensitiveTextMatch};
pub use results::{HeaderOutcome, OperationStatus, RedactionResults, TrackChangesStatus};
pub use validators::{classify, is_email, is_phone, is_ssn, normalize_phone};
