//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestBoardBuilder` - builder for boards and canvases with items
//! - `snapshot()` and friends - common fixtures
//! - `FlakyStore` - a store that can be told to fail

#![allow(dead_code)]

use backlot::canvas::MoodBoardCanvas;
use backlot::error::{BacklotError, Result};
use backlot::moodboard::MoodBoard;
use backlot::placement::{PlacementPolicy, PlacementRegion};
use backlot::store::{MemoryStore, MoodBoardStore};
use backlot::types::{
    CameraPosition, ItemId, MoodBoardId, PlacedItem, Point, Rect, Size, Snapshot, SnapshotDraft,
    SnapshotId, UserId,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// Item footprint used by the builder's canvases
pub const ITEM_SIZE: Size = Size::new(100.0, 100.0);

// ============================================================================
// TestBoardBuilder
// ============================================================================

/// Builder for boards and canvases.
///
/// # Example
/// ```ignore
/// let canvas = TestBoardBuilder::new()
///     .with_item("a", (0.0, 0.0))
///     .with_transformed_item("b", (50.0, 50.0), 30.0, 1.5)
///     .build_canvas();
/// ```
pub struct TestBoardBuilder {
    title: String,
    items: Vec<PlacedItem>,
}

impl Default for TestBoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBoardBuilder {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            items: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add an unrotated, unscaled item whose snapshot id matches the item id.
    pub fn with_item(self, id: &str, pos: (f32, f32)) -> Self {
        self.with_transformed_item(id, pos, 0.0, 1.0)
    }

    pub fn with_transformed_item(mut self, id: &str, pos: (f32, f32), rotation: f32, scale: f32) -> Self {
        self.items.push(PlacedItem::new(
            ItemId::new(id),
            snapshot(id),
            Point::new(pos.0, pos.1),
            rotation,
            scale,
        ));
        self
    }

    /// Add N items named "item-0", "item-1", ... spaced 200px apart.
    pub fn with_n_items(mut self, count: usize) -> Self {
        for i in 0..count {
            let id = format!("item-{}", i);
            self.items.push(PlacedItem::new(
                ItemId::new(id.as_str()),
                snapshot(&id),
                Point::new(i as f32 * 200.0, 0.0),
                0.0,
                1.0,
            ));
        }
        self
    }

    pub fn build(self) -> MoodBoard {
        let mut board = MoodBoard::create(self.items);
        board.title = self.title;
        board
    }

    pub fn build_canvas(self) -> MoodBoardCanvas {
        MoodBoardCanvas::with_items(self.items, ITEM_SIZE)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn snapshot(id: &str) -> Snapshot {
    Snapshot {
        id: SnapshotId::new(id),
        image_url: format!("https://cdn.example.com/snapshots/{}.jpg", id),
        title: format!("Snapshot {}", id),
        asset_id: "vehicle-nyc-cab".into(),
        asset_title: "NYC Yellow Cab".into(),
        created_at: 1_700_000_000_000,
        camera_position: CameraPosition::default(),
        description: String::new(),
        created_by: None,
    }
}

pub fn owned_snapshot_draft(user: &str) -> SnapshotDraft {
    SnapshotDraft {
        asset_id: "env-desert".into(),
        asset_title: "Desert Canyon".into(),
        image_url: "data:image/jpeg;base64,/9j/4AAQ".into(),
        created_by: Some(UserId::new(user)),
        ..Default::default()
    }
}

pub fn seeded_policy(seed: u64) -> PlacementPolicy {
    PlacementPolicy::seeded(PlacementRegion::default(), seed)
}

/// Canvas element at (40, 60) on the page, 1200x800
pub fn canvas_rect() -> Rect {
    Rect::new(40.0, 60.0, 1200.0, 800.0)
}

pub fn assert_item_count(canvas: &MoodBoardCanvas, expected: usize) {
    assert_eq!(
        canvas.len(),
        expected,
        "expected {} items, found {}",
        expected,
        canvas.len()
    );
}

// ============================================================================
// FlakyStore
// ============================================================================

/// Memory store whose calls fail with `TransientIo` while `failing` is set.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(BacklotError::TransientIo("connection reset".into()))
        } else {
            Ok(())
        }
    }
}

impl MoodBoardStore for FlakyStore {
    fn get_moodboard(&self, id: &MoodBoardId) -> Result<MoodBoard> {
        self.check()?;
        self.inner.get_moodboard(id)
    }

    fn save_moodboard(&self, doc: &MoodBoard) -> Result<MoodBoard> {
        self.check()?;
        self.inner.save_moodboard(doc)
    }

    fn delete_moodboard(&self, id: &MoodBoardId) -> Result<()> {
        self.check()?;
        self.inner.delete_moodboard(id)
    }

    fn user_moodboards(&self, user: &UserId) -> Result<Vec<MoodBoard>> {
        self.check()?;
        self.inner.user_moodboards(user)
    }

    fn user_snapshots(&self, user: &UserId) -> Result<Vec<Snapshot>> {
        self.check()?;
        self.inner.user_snapshots(user)
    }

    fn save_snapshot(&self, draft: SnapshotDraft) -> Result<Snapshot> {
        self.check()?;
        self.inner.save_snapshot(draft)
    }

    fn delete_snapshot(&self, id: &SnapshotId) -> Result<()> {
        self.check()?;
        self.inner.delete_snapshot(id)
    }
}
