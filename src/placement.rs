//! Initial placement of newly added snapshots.
//!
//! New items land at a random position inside a padded region of the canvas
//! with a small random tilt. The random source is injectable so layouts can
//! be reproduced in tests.

use crate::constants::{
    DEFAULT_SCALE, PLACEMENT_HEIGHT, PLACEMENT_JITTER_DEGREES, PLACEMENT_MIN_X, PLACEMENT_MIN_Y,
    PLACEMENT_WIDTH,
};
use crate::types::{ItemId, PlacedItem, Point, Snapshot};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Region new items are scattered over, plus the rotation jitter range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementRegion {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
    /// New items get a rotation in `[-jitter_degrees, jitter_degrees)`
    pub jitter_degrees: f32,
}

impl Default for PlacementRegion {
    fn default() -> Self {
        Self {
            min_x: PLACEMENT_MIN_X,
            min_y: PLACEMENT_MIN_Y,
            width: PLACEMENT_WIDTH,
            height: PLACEMENT_HEIGHT,
            jitter_degrees: PLACEMENT_JITTER_DEGREES,
        }
    }
}

/// Produces positions and rotations for new items
pub struct PlacementPolicy {
    region: PlacementRegion,
    rng: Box<dyn RngCore + Send>,
}

impl std::fmt::Debug for PlacementPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacementPolicy")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self::new(PlacementRegion::default())
    }
}

impl PlacementPolicy {
    /// Policy backed by an entropy-seeded generator
    pub fn new(region: PlacementRegion) -> Self {
        Self::with_rng(region, StdRng::from_entropy())
    }

    /// Deterministic policy for reproducible layouts
    pub fn seeded(region: PlacementRegion, seed: u64) -> Self {
        Self::with_rng(region, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(region: PlacementRegion, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            region,
            rng: Box::new(rng),
        }
    }

    pub fn region(&self) -> &PlacementRegion {
        &self.region
    }

    /// Uniform position inside the region. A degenerate axis collapses to
    /// its minimum.
    pub fn next_position(&mut self) -> Point {
        let x = self.region.min_x + Self::sample(&mut self.rng, self.region.width);
        let y = self.region.min_y + Self::sample(&mut self.rng, self.region.height);
        Point::new(x, y)
    }

    pub fn next_rotation(&mut self) -> f32 {
        let jitter = self.region.jitter_degrees.abs();
        if jitter > 0.0 && jitter.is_finite() {
            self.rng.gen_range(-jitter..jitter)
        } else {
            0.0
        }
    }

    /// Wrap a snapshot in a fresh item at a random spot
    pub fn place(&mut self, snapshot: Snapshot) -> PlacedItem {
        let position = self.next_position();
        self.place_at(snapshot, position)
    }

    /// Wrap a snapshot in a fresh item at a chosen spot with random tilt
    pub fn place_at(&mut self, snapshot: Snapshot, position: Point) -> PlacedItem {
        let rotation = self.next_rotation();
        PlacedItem::new(ItemId::generate(), snapshot, position, rotation, DEFAULT_SCALE)
    }

    fn sample(rng: &mut Box<dyn RngCore + Send>, extent: f32) -> f32 {
        if extent > 0.0 && extent.is_finite() {
            rng.gen_range(0.0..extent)
        } else {
            0.0
        }
    }
}
