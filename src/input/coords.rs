//! Coordinate conversion and transform math for canvas interactions.
//!
//! All functions are pure. The canvas bounding rect is passed in on every
//! call because scrolling or resizing moves the canvas between events.

use crate::constants::{ROTATION_SNAP_DEGREES, SCALE_DISTANCE_DIVISOR};
use crate::types::{Point, Rect, clamp_scale};

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert a client (screen) position to canvas-local coordinates
    #[inline]
    pub fn to_canvas_local(client: Point, canvas_rect: &Rect) -> Point {
        Point::new(client.x - canvas_rect.left(), client.y - canvas_rect.top())
    }

    /// Convert a canvas-local position back to client coordinates
    #[inline]
    pub fn to_client(local: Point, canvas_rect: &Rect) -> Point {
        Point::new(local.x + canvas_rect.left(), local.y + canvas_rect.top())
    }
}

/// Round to the nearest multiple of the rotation snap step
#[inline]
pub fn snap_rotation(degrees: f32) -> f32 {
    (degrees / ROTATION_SNAP_DEGREES).round() * ROTATION_SNAP_DEGREES
}

/// New rotation after turning the pointer around `center`.
///
/// The signed angle between center->start and center->current is added to
/// `start_rotation`. If either pointer sits exactly on the centre the angle is
/// undefined and `start_rotation` is returned unchanged.
pub fn compute_rotation_delta(
    center: Point,
    start: Point,
    current: Point,
    start_rotation: f32,
    snap_to_15: bool,
) -> f32 {
    let (sx, sy) = start.delta_from(center);
    let (cx, cy) = current.delta_from(center);
    if (sx == 0.0 && sy == 0.0) || (cx == 0.0 && cy == 0.0) {
        return start_rotation;
    }

    let cross = sx * cy - sy * cx;
    let dot = sx * cx + sy * cy;
    let delta = cross.atan2(dot).to_degrees();

    let rotation = start_rotation + delta;
    if snap_to_15 { snap_rotation(rotation) } else { rotation }
}

/// New scale after dragging the scale handle from `start` to `current`.
///
/// Direction is +1 when either axis moved in the positive direction, else -1.
/// This is not the sign of a projection onto the diagonal: a drag left and
/// down still grows the item.
pub fn compute_scale_delta(start: Point, current: Point, start_scale: f32) -> f32 {
    let (dx, dy) = current.delta_from(start);
    let distance = (dx * dx + dy * dy).sqrt();
    let direction = if dx > 0.0 || dy > 0.0 { 1.0 } else { -1.0 };

    let factor = 1.0 + direction * distance / SCALE_DISTANCE_DIVISOR;
    clamp_scale(start_scale * factor)
}
