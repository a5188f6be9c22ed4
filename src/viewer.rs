//! Viewer collaborator and the snapshot capture flow.
//!
//! The 3D viewer is opaque here. It hands back an encoded still of its
//! viewport and its camera pose; this module checks the image and turns
//! both into a `Snapshot` that can be placed on a board.

use crate::auth::{Permission, User};
use crate::error::{BacklotError, Result};
use crate::store::MoodBoardStore;
use crate::types::{CameraPosition, Snapshot, SnapshotDraft, now_millis};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info};

/// What the snapshot flow needs from a 3D viewer
pub trait Viewer {
    /// `data:image/...;base64,...` of the current frame, or `None` if the
    /// viewer has nothing rendered yet
    fn capture_viewport(&self) -> Option<String>;

    fn current_camera_position(&self) -> CameraPosition;
}

/// Reject anything that is not a base64 image data URL
pub fn validate_data_url(url: &str) -> Result<()> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| BacklotError::validation("Snapshot image is not a data URL"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| BacklotError::validation("Snapshot image has no payload"))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| BacklotError::validation("Snapshot image must be base64 encoded"))?;
    if !mime.starts_with("image/") {
        return Err(BacklotError::validation(format!(
            "Snapshot image has unsupported type {}",
            mime
        )));
    }
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| BacklotError::validation(format!("Snapshot image is corrupt: {}", e)))?;
    if bytes.is_empty() {
        return Err(BacklotError::validation("Snapshot image is empty"));
    }
    Ok(())
}

/// Grab the viewer's frame and camera into a draft for `asset_title`
pub fn capture_draft(viewer: &dyn Viewer, asset_id: &str, asset_title: &str) -> Result<SnapshotDraft> {
    let image_url = viewer
        .capture_viewport()
        .ok_or_else(|| BacklotError::validation("The viewer has not rendered anything yet"))?;
    validate_data_url(&image_url)?;

    Ok(SnapshotDraft {
        asset_id: asset_id.to_string(),
        asset_title: asset_title.to_string(),
        image_url,
        title: Some(Snapshot::default_title(asset_title)),
        camera_position: Some(viewer.current_camera_position()),
        ..Default::default()
    })
}

/// Capture a snapshot of the current view.
///
/// A signed-in user's snapshot is saved to their collection; without a user
/// the snapshot is only returned and never persisted.
pub fn capture_snapshot(
    viewer: &dyn Viewer,
    asset_id: &str,
    asset_title: &str,
    user: Option<&User>,
    store: &dyn MoodBoardStore,
) -> Result<Snapshot> {
    let mut draft = capture_draft(viewer, asset_id, asset_title)?;

    let Some(user) = user else {
        debug!(asset = asset_id, "snapshot kept locally");
        return Ok(draft.into_snapshot(now_millis()));
    };
    if !user.has_permission(Permission::Snapshot) {
        return Err(BacklotError::validation("You do not have permission to take snapshots"));
    }

    draft.created_by = Some(user.id.clone());
    let snapshot = store.save_snapshot(draft)?;
    info!(snapshot = %snapshot.id, asset = asset_id, "snapshot saved");
    Ok(snapshot)
}
