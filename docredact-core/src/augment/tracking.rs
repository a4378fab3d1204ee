// docredact-core/src/augment/tracking.rs
//! Turns on "track all changes" when the host supports it.

use log::{error, info};

use crate::config::TrackingConfig;
use crate::errors::DocRedactError;
use crate::host::{finish_batch, ChangeTrackingMode, DocumentHost};
use crate::results::TrackChangesStatus;

/// Checks the host capability predicate for the configured requirement set.
/// A predicate that itself fails counts as unsupported.
pub fn is_track_changes_supported<H>(host: &H, tracking: &TrackingConfig) -> bool
where
    H: DocumentHost + ?Sized,
{
    match host.is_set_supported(&tracking.requirement_set, &tracking.min_version) {
        Ok(supported) => supported,
        Err(e) => {
            error!("Error checking track changes support: {}", e);
            false
        }
    }
}

/// Enables change tracking for all edits.
///
/// Never fails: an unsupported host yields `NotSupported` without touching
/// the document, and any host error while switching the mode yields `Error`.
pub async fn enable_track_changes<H>(host: &H, tracking: &TrackingConfig) -> TrackChangesStatus
where
    H: DocumentHost + ?Sized,
{
    if !is_track_changes_supported(host, tracking) {
        info!(
            "Track changes requires {} {}; not supported by this host.",
            tracking.requirement_set, tracking.min_version
        );
        return TrackChangesStatus::NotSupported;
    }

    match set_track_all(host).await {
        Ok(()) => {
            info!("Track changes enabled");
            TrackChangesStatus::Enabled
        }
        Err(e) => {
            error!("Error enabling track changes: {}", e);
            TrackChangesStatus::Error
        }
    }
}

async fn set_track_all<H>(host: &H) -> Result<(), DocRedactError>
where
    H: DocumentHost + ?Sized,
{
    let mut batch = host.begin_batch().await?;
    let outcome = batch
        .set_change_tracking_mode(ChangeTrackingMode::TrackAll)
        .await
        .map_err(DocRedactError::from);
    finish_batch(batch, outcome).await
}
