//! errors.rs - Custom error types for the docredact-core library.
//!
//! Two layers of errors live here. `HostError` is what a host document
//! implementation reports when a read, mutation or commit against the live
//! document fails. `DocRedactError` is what the library's own operations return
//! to the caller.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// A failure reported by the host document while serving a batch.
///
/// The redaction engine scopes these to a single content block; the header
/// operation and the batch open/commit boundaries propagate them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HostError {
    #[error("Failed to read from the document: {0}")]
    Read(String),

    #[error("Failed to mutate the document: {0}")]
    Mutation(String),

    #[error("Failed to commit the document batch: {0}")]
    Commit(String),

    #[error("Failed to query host capabilities: {0}")]
    Capability(String),
}

/// This enum represents all possible error types in the `docredact-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DocRedactError {
    #[error("No sections found in document")]
    NoSections,

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("Configuration validation failed:\n{0}")]
    ConfigValidation(String),

    #[error("Failed to parse document snapshot: {0}")]
    SnapshotParse(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}
