//! Document augmentation: confidential header stamping and change tracking.
//!
//! Both operations are independent of each other and of redaction, and both
//! are idempotent.

pub mod header;
pub mod tracking;

pub use header::insert_confidential_header;
pub use tracking::{enable_track_changes, is_track_changes_supported};
