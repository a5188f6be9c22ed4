//! Pointer input handling for placed items.
//!
//! This module implements the interaction model for snapshot items on the
//! mood-board canvas: dragging, rotate-handle and scale-handle gestures,
//! click selection and hover.
//!
//! ## Architecture
//!
//! Each item has a `SnapshotItemController` holding an explicit state machine
//! (`GestureState`). Rotate and scale gestures keep receiving pointer input
//! after the pointer leaves the item through a `PointerCapture` held by the
//! canvas, which routes every move/up to the capturing item until released.
//!
//! ## Modules
//!
//! - `coords` - pure geometry: screen to canvas, rotation and scale deltas
//! - `state` - gesture state machine enum and helper methods
//! - `capture` - gesture-scoped pointer capture
//! - `controller` - per-item controller emitting `ItemEvent`s

pub mod capture;
pub mod controller;
pub mod coords;
mod state;

pub use capture::{CaptureKind, PointerCapture, PointerRouter};
pub use controller::{ItemEvent, SnapshotItemController};
pub use state::GestureState;

use crate::types::Point;

/// Modifier keys held during a pointer event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Snaps rotation to 15 degree steps
    pub shift: bool,
}

/// A pointer event in client (screen) coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}
