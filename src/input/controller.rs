//! Per-item interaction controller.
//!
//! The controller never writes item state. It turns pointer input into
//! `ItemEvent`s carrying already-clamped values, and the canvas applies them
//! through its single update path.

use super::coords::{compute_rotation_delta, compute_scale_delta};
use super::state::GestureState;
use super::PointerEvent;
use crate::types::{ItemId, Point};
use tracing::debug;

/// Change requested by an item's controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemEvent {
    /// New top-left position in canvas-local coordinates
    Moved(Point),
    /// New rotation in degrees
    Rotated(f32),
    /// New scale, already clamped
    Scaled(f32),
    /// Item body clicked
    Selected,
    /// Remove control pressed
    Removed,
}

/// Interaction state for one placed item
#[derive(Debug, Clone)]
pub struct SnapshotItemController {
    id: ItemId,
    gesture: GestureState,
    hovered: bool,
}

impl SnapshotItemController {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            gesture: GestureState::Idle,
            hovered: false,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Remove/rotate/scale controls show while hovered or selected
    pub fn controls_visible(&self, is_selected: bool) -> bool {
        self.hovered || is_selected
    }

    /// Host drag system picked up the item body
    pub fn begin_drag(&mut self) -> bool {
        let started = self.gesture.start_dragging();
        if started {
            debug!(item = %self.id, "drag started");
        }
        started
    }

    /// Drop delivered (or drag abandoned). Returns false if not dragging.
    pub fn end_drag(&mut self) -> bool {
        if self.gesture.is_dragging() {
            self.gesture.reset();
            debug!(item = %self.id, "drag ended");
            true
        } else {
            false
        }
    }

    /// Pointer down on the rotate handle
    pub fn begin_rotate(&mut self, pointer: Point, current_rotation: f32) -> bool {
        let started = self.gesture.start_rotating(pointer, current_rotation);
        if started {
            debug!(item = %self.id, rotation = current_rotation, "rotate started");
        }
        started
    }

    /// Pointer down on the scale handle
    pub fn begin_scale(&mut self, pointer: Point, current_scale: f32) -> bool {
        let started = self.gesture.start_scaling(pointer, current_scale);
        if started {
            debug!(item = %self.id, scale = current_scale, "scale started");
        }
        started
    }

    /// Pointer moved while this item holds the capture.
    ///
    /// `center` is the item centre in client coordinates, re-derived by the
    /// caller for every event.
    pub fn pointer_move(&self, event: &PointerEvent, center: Point) -> Option<ItemEvent> {
        match self.gesture {
            GestureState::Rotating {
                start_pointer,
                start_rotation,
            } => Some(ItemEvent::Rotated(compute_rotation_delta(
                center,
                start_pointer,
                event.position,
                start_rotation,
                event.modifiers.shift,
            ))),
            GestureState::Scaling {
                start_pointer,
                start_scale,
            } => Some(ItemEvent::Scaled(compute_scale_delta(
                start_pointer,
                event.position,
                start_scale,
            ))),
            GestureState::Idle | GestureState::Dragging => None,
        }
    }

    /// Pointer released anywhere. Ends a rotate/scale gesture; returns false
    /// when there was none, so duplicate up-events are harmless.
    pub fn pointer_up(&mut self) -> bool {
        if self.gesture.needs_capture() {
            let ended = self.gesture.reset();
            debug!(item = %self.id, gesture = ?ended, "gesture ended");
            true
        } else {
            false
        }
    }

    /// Abandon whatever gesture is active
    pub fn cancel(&mut self) -> bool {
        let was_active = !self.gesture.is_idle();
        self.gesture.reset();
        was_active
    }

    /// Click on the item body
    pub fn click(&self) -> ItemEvent {
        ItemEvent::Selected
    }

    /// Remove control pressed. Cancels any gesture in progress.
    pub fn remove(&mut self) -> ItemEvent {
        self.cancel();
        ItemEvent::Removed
    }
}
