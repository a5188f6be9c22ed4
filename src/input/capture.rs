//! Gesture-scoped pointer capture.
//!
//! While a rotate or scale handle is held, every pointer move and pointer up
//! on the page belongs to that item, even when the pointer is far outside
//! it. The canvas owns one `PointerRouter`; starting a gesture captures the
//! pointer, and the capture is released exactly once: on pointer up, on
//! cancel, or when the capturing item is removed.

use crate::types::ItemId;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Global counter for capture ids, so stale tokens never match a new capture
static CAPTURE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Which handle holds the capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Rotate,
    Scale,
}

/// An active capture of pointer input by one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerCapture {
    id: u64,
    item_id: ItemId,
    kind: CaptureKind,
}

impl PointerCapture {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn kind(&self) -> CaptureKind {
        self.kind
    }
}

/// Routes pointer input to the item holding the capture, if any.
#[derive(Debug, Default)]
pub struct PointerRouter {
    active: Option<PointerCapture>,
    released: u64,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the pointer for `item_id`.
    ///
    /// Any capture still held by another gesture is released first and
    /// returned so the caller can cancel that gesture.
    pub fn capture(&mut self, item_id: ItemId, kind: CaptureKind) -> Option<PointerCapture> {
        let previous = self.release();
        let capture = PointerCapture {
            id: CAPTURE_COUNTER.fetch_add(1, Ordering::Relaxed),
            item_id,
            kind,
        };
        debug!(item = %capture.item_id, ?kind, "pointer captured");
        self.active = Some(capture);
        previous
    }

    /// Release the active capture. Returns `None` if nothing was held, so a
    /// duplicate pointer-up is harmless.
    pub fn release(&mut self) -> Option<PointerCapture> {
        let capture = self.active.take()?;
        self.released += 1;
        debug!(item = %capture.item_id, kind = ?capture.kind, "pointer released");
        Some(capture)
    }

    /// Release only if `item_id` holds the capture
    pub fn release_for(&mut self, item_id: &ItemId) -> Option<PointerCapture> {
        if self.active.as_ref().is_some_and(|c| &c.item_id == item_id) {
            self.release()
        } else {
            None
        }
    }

    /// Item currently receiving pointer input
    pub fn target(&self) -> Option<&ItemId> {
        self.active.as_ref().map(|c| &c.item_id)
    }

    pub fn active(&self) -> Option<&PointerCapture> {
        self.active.as_ref()
    }

    pub fn is_captured(&self) -> bool {
        self.active.is_some()
    }

    /// Number of captures torn down over the router's lifetime
    pub fn release_count(&self) -> u64 {
        self.released
    }
}
