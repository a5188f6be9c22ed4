//! Spatial Index Module
//!
//! R-tree over the axis-aligned bounds of placed items, used by the canvas
//! for click and hover hit testing. Bounds are the rotated, scaled extent of
//! each item, so a query returns candidates; the exact rotated-rectangle test
//! happens in the canvas.

use crate::types::{ItemId, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// Bounding box of one placed item in canvas-local coordinates.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub item_id: ItemId,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl SpatialEntry {
    pub fn new(item_id: ItemId, bounds: Rect) -> Self {
        Self {
            item_id,
            min_x: bounds.left(),
            min_y: bounds.top(),
            max_x: bounds.right(),
            max_y: bounds.bottom(),
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.item_id == other.item_id
    }
}

/// Spatial index for placed items.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ItemId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the bounds for `item_id`.
    pub fn insert(&mut self, item_id: ItemId, bounds: Rect) {
        if let Some(old_entry) = self.entries.remove(&item_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(item_id.clone(), bounds);
        self.tree.insert(entry.clone());
        self.entries.insert(item_id, entry);
    }

    pub fn remove(&mut self, item_id: &ItemId) -> bool {
        if let Some(entry) = self.entries.remove(item_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Items whose bounds contain the point (canvas-local coordinates).
    pub fn query_point(&self, x: f32, y: f32) -> Vec<ItemId> {
        let point_envelope = AABB::from_point([x, y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(x, y))
            .map(|entry| entry.item_id.clone())
            .collect()
    }

    pub fn rebuild<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (ItemId, Rect)>,
    {
        let entries: Vec<SpatialEntry> = items
            .into_iter()
            .map(|(id, bounds)| SpatialEntry::new(id, bounds))
            .collect();

        self.entries = entries
            .iter()
            .map(|e| (e.item_id.clone(), e.clone()))
            .collect();
        self.tree = RTree::bulk_load(entries);
    }
}
