//! Gesture state machine for a single placed item.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging     (host drag system starts dragging the item body)
//! Idle -> Rotating     (pointer down on the rotate handle)
//! Idle -> Scaling      (pointer down on the scale handle)
//!
//! Dragging -> Idle     (drop, or drag cancelled)
//! Rotating -> Idle     (pointer up anywhere, or cancel)
//! Scaling  -> Idle     (pointer up anywhere, or cancel)
//! ```
//!
//! Only one manipulation is active per item. Starting a gesture from any
//! state other than `Idle` is refused.

use crate::types::Point;

/// Active manipulation of an item
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No manipulation in progress
    #[default]
    Idle,

    /// Item body is being dragged by the host drag-and-drop system
    Dragging,

    /// Rotate handle held
    Rotating {
        /// Pointer position (client coordinates) at gesture start
        start_pointer: Point,
        /// Item rotation at gesture start
        start_rotation: f32,
    },

    /// Scale handle held
    Scaling {
        /// Pointer position (client coordinates) at gesture start
        start_pointer: Point,
        /// Item scale at gesture start
        start_scale: f32,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging)
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self, Self::Rotating { .. })
    }

    pub fn is_scaling(&self) -> bool {
        matches!(self, Self::Scaling { .. })
    }

    /// Returns true for gestures that hold a pointer capture
    pub fn needs_capture(&self) -> bool {
        matches!(self, Self::Rotating { .. } | Self::Scaling { .. })
    }

    /// Start dragging. Returns false if another gesture is active.
    pub fn start_dragging(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        *self = Self::Dragging;
        true
    }

    /// Start rotating. Returns false if another gesture is active.
    pub fn start_rotating(&mut self, start_pointer: Point, start_rotation: f32) -> bool {
        if !self.is_idle() {
            return false;
        }
        *self = Self::Rotating {
            start_pointer,
            start_rotation,
        };
        true
    }

    /// Start scaling. Returns false if another gesture is active.
    pub fn start_scaling(&mut self, start_pointer: Point, start_scale: f32) -> bool {
        if !self.is_idle() {
            return false;
        }
        *self = Self::Scaling {
            start_pointer,
            start_scale,
        };
        true
    }

    /// Reset to Idle, returning the state that was left
    pub fn reset(&mut self) -> GestureState {
        std::mem::take(self)
    }
}
