//! Application-wide constants.
//!
//! Centralizes magic numbers for the canvas and gesture math so the
//! controller, canvas and placement code agree on them.

// ============================================================================
// Scale
// ============================================================================

/// Smallest scale a placed item may have
pub const MIN_SCALE: f32 = 0.2;

/// Largest scale a placed item may have
pub const MAX_SCALE: f32 = 3.0;

/// Pointer travel (in pixels) that adds or removes 1.0 from the scale factor
pub const SCALE_DISTANCE_DIVISOR: f32 = 200.0;

/// Scale of a freshly placed item
pub const DEFAULT_SCALE: f32 = 1.0;

// ============================================================================
// Rotation
// ============================================================================

/// Snap increment (degrees) while the snap modifier is held
pub const ROTATION_SNAP_DEGREES: f32 = 15.0;

/// Largest absolute rotation jitter (degrees) for freshly placed items
pub const PLACEMENT_JITTER_DEGREES: f32 = 5.0;

// ============================================================================
// Placement
// ============================================================================

/// Left edge of the padded region new items land in
pub const PLACEMENT_MIN_X: f32 = 100.0;

/// Width of the padded placement region
pub const PLACEMENT_WIDTH: f32 = 400.0;

/// Top edge of the padded region new items land in
pub const PLACEMENT_MIN_Y: f32 = 100.0;

/// Height of the padded placement region
pub const PLACEMENT_HEIGHT: f32 = 200.0;

// ============================================================================
// Layout
// ============================================================================

/// Unscaled on-canvas footprint of a snapshot thumbnail (width, height)
pub const DEFAULT_ITEM_SIZE: (f32, f32) = (320.0, 180.0);

// ============================================================================
// Documents
// ============================================================================

/// Title shown for a board that has not been named yet
pub const UNTITLED_BOARD: &str = "Untitled Mood Board";

/// Prefix of generated mood-board ids
pub const MOODBOARD_ID_PREFIX: &str = "moodboard";

/// Prefix of generated placed-item ids
pub const ITEM_ID_PREFIX: &str = "item";

/// Prefix of generated snapshot ids
pub const SNAPSHOT_ID_PREFIX: &str = "snapshot";

/// Path segment used for shared board links
pub const SHARED_PATH_SEGMENT: &str = "shared";

/// Default base for share links
pub const DEFAULT_SHARE_BASE_URL: &str = "https://virtualbacklot.example.com";

// ============================================================================
// Timing
// ============================================================================

/// Pointer-move handling slower than this (ms) is reported when profiling
pub const POINTER_MOVE_BUDGET_MS: f64 = 4.0;
