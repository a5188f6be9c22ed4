//! Core types for the mood-board canvas.
//!
//! Identifiers, 2D geometry primitives, snapshots and the placed-item
//! transform that the canvas and the document model share.

use crate::constants::{
    DEFAULT_SCALE, ITEM_ID_PREFIX, MAX_SCALE, MIN_SCALE, MOODBOARD_ID_PREFIX, SNAPSHOT_ID_PREFIX,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint a fresh `<prefix>-<uuid v4>` identifier
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::new_v4()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifies a placed item; unique within its mood board
    ItemId,
    ITEM_ID_PREFIX
);
string_id!(
    /// Identifies a persisted mood board
    MoodBoardId,
    MOODBOARD_ID_PREFIX
);
string_id!(
    /// Identifies a snapshot in a user's collection
    SnapshotId,
    SNAPSHOT_ID_PREFIX
);
string_id!(
    /// Weak reference to a user (lookup only)
    UserId,
    "user"
);

/// Milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ============================================================================
// Geometry
// ============================================================================

/// A 2D point in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset_by(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn delta_from(self, origin: Point) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Width and height in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, e.g. an element's bounding client rect
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(left, top),
            size: Size::new(width, height),
        }
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

// ============================================================================
// Snapshots
// ============================================================================

/// Camera pose a snapshot was captured from
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default)]
    pub rotation: f32,
}

/// A captured still of a 3D asset preview.
///
/// Owned by the user's snapshot collection. Placed items keep a read-only
/// copy for display and never change it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub image_url: String,
    pub title: String,
    pub asset_id: String,
    pub asset_title: String,
    pub created_at: u64,
    #[serde(default)]
    pub camera_position: CameraPosition,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_by: Option<UserId>,
}

impl Snapshot {
    /// Title used when a snapshot was saved without one
    pub fn default_title(asset_title: &str) -> String {
        format!("Snapshot of {}", asset_title)
    }

    /// Title to display, falling back to "Untitled"
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

/// Snapshot fields supplied by the capture flow before storage fills the rest
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDraft {
    #[serde(default)]
    pub id: Option<SnapshotId>,
    pub asset_id: String,
    pub asset_title: String,
    pub image_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub camera_position: Option<CameraPosition>,
    #[serde(default)]
    pub created_by: Option<UserId>,
}

impl SnapshotDraft {
    /// Fill defaults: a fresh id, "Snapshot of <asset>" title, camera at
    /// the origin and a creation time of `now`.
    pub fn into_snapshot(self, now: u64) -> Snapshot {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| Snapshot::default_title(&self.asset_title));
        Snapshot {
            id: self.id.unwrap_or_else(SnapshotId::generate),
            image_url: self.image_url,
            title,
            asset_id: self.asset_id,
            asset_title: self.asset_title,
            created_at: now,
            camera_position: self.camera_position.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            created_by: self.created_by,
        }
    }
}

// ============================================================================
// Placed items
// ============================================================================

fn default_scale() -> f32 {
    DEFAULT_SCALE
}

/// Clamp a scale into the allowed range. Non-finite input falls back to 1.0.
#[inline]
pub fn clamp_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        DEFAULT_SCALE
    }
}

/// One snapshot's transform on a single mood board
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub id: ItemId,
    pub snapshot: Snapshot,
    /// Top-left corner in canvas-local pixels; may lie outside the canvas
    pub position: Point,
    /// Degrees, unbounded
    #[serde(default)]
    pub rotation: f32,
    /// Always within `[MIN_SCALE, MAX_SCALE]`
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl PlacedItem {
    pub fn new(id: ItemId, snapshot: Snapshot, position: Point, rotation: f32, scale: f32) -> Self {
        Self {
            id,
            snapshot,
            position,
            rotation,
            scale: clamp_scale(scale),
        }
    }

    /// Merge a partial transform into this item. Returns true if anything changed.
    pub fn apply(&mut self, patch: &ItemPatch) -> bool {
        let before = (self.position, self.rotation, self.scale);
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(rotation) = patch.rotation {
            if rotation.is_finite() {
                self.rotation = rotation;
            }
        }
        if let Some(scale) = patch.scale {
            self.scale = clamp_scale(scale);
        }
        before != (self.position, self.rotation, self.scale)
    }

    /// Rotation as rendered, in `[0, 360)`
    pub fn display_rotation(&self) -> f32 {
        self.rotation.rem_euclid(360.0)
    }

    /// Centre of the item in canvas-local coordinates.
    ///
    /// Rotation and scale pivot on the centre, so this is independent of both.
    pub fn center(&self, item_size: Size) -> Point {
        self.position
            .offset_by(item_size.width / 2.0, item_size.height / 2.0)
    }

    /// Axis-aligned bounds of the rotated, scaled item in canvas-local space
    pub fn bounds(&self, item_size: Size) -> Rect {
        let center = self.center(item_size);
        let w = item_size.width * self.scale;
        let h = item_size.height * self.scale;
        let radians = self.rotation.to_radians();
        let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
        let bw = w * cos + h * sin;
        let bh = w * sin + h * cos;
        Rect::new(center.x - bw / 2.0, center.y - bh / 2.0, bw, bh)
    }

    /// Exact hit test against the rotated, scaled rectangle
    pub fn contains_point(&self, p: Point, item_size: Size) -> bool {
        let (dx, dy) = p.delta_from(self.center(item_size));
        let radians = (-self.rotation).to_radians();
        let (sin, cos) = radians.sin_cos();
        let local_x = dx * cos - dy * sin;
        let local_y = dx * sin + dy * cos;
        local_x.abs() <= item_size.width * self.scale / 2.0
            && local_y.abs() <= item_size.height * self.scale / 2.0
    }
}

/// Partial transform update for a single item
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ItemPatch {
    pub position: Option<Point>,
    pub rotation: Option<f32>,
    pub scale: Option<f32>,
}

impl ItemPatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn rotation(rotation: f32) -> Self {
        Self {
            rotation: Some(rotation),
            ..Default::default()
        }
    }

    pub fn scale(scale: f32) -> Self {
        Self {
            scale: Some(scale),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.rotation.is_none() && self.scale.is_none()
    }
}

// ============================================================================
// Drag and drop
// ============================================================================

/// What a drop on the canvas carries
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DropPayload {
    /// A snapshot dragged in from outside the canvas (e.g. the picker)
    NewSnapshot(Snapshot),
    /// An item already on this canvas being repositioned
    ExistingItem(ItemId),
}

impl DropPayload {
    pub fn is_new(&self) -> bool {
        matches!(self, Self::NewSnapshot(_))
    }
}
