//! The persisted mood-board aggregate.
//!
//! A `MoodBoard` owns its placed items outright: deleting the board deletes
//! them, and no item exists outside a board. Snapshots are only referenced.

use crate::constants::{MAX_SCALE, MIN_SCALE, UNTITLED_BOARD};
use crate::error::{BacklotError, Result};
use crate::placement::PlacementPolicy;
use crate::share;
use crate::store::MoodBoardStore;
use crate::types::{ItemId, MoodBoardId, PlacedItem, Snapshot, UserId, clamp_scale};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoodBoard {
    pub id: MoodBoardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<PlacedItem>,
    /// Set by the store on first save; never changes afterwards
    #[serde(default)]
    pub created_at: Option<u64>,
    /// Refreshed by the store on every save
    #[serde(default)]
    pub updated_at: Option<u64>,
    #[serde(default)]
    pub created_by: Option<UserId>,
    #[serde(default)]
    pub creator_name: Option<String>,
}

impl MoodBoard {
    /// New unsaved board with a fresh id and an empty title
    pub fn create(initial_items: Vec<PlacedItem>) -> Self {
        let mut board = Self {
            id: MoodBoardId::generate(),
            title: String::new(),
            description: String::new(),
            items: Vec::new(),
            created_at: None,
            updated_at: None,
            created_by: None,
            creator_name: None,
        };
        board.set_items(initial_items);
        board
    }

    pub fn with_owner(mut self, user: UserId, name: impl Into<String>) -> Self {
        self.created_by = Some(user);
        self.creator_name = Some(name.into());
        self
    }

    /// True once the store has assigned timestamps
    pub fn is_persisted(&self) -> bool {
        self.created_at.is_some()
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// Append one freshly placed item per snapshot. Nothing is persisted.
    pub fn add_snapshots(&mut self, snapshots: &[Snapshot], policy: &mut PlacementPolicy) -> &[PlacedItem] {
        for snapshot in snapshots {
            let mut item = policy.place(snapshot.clone());
            while self.item(&item.id).is_some() {
                item.id = ItemId::generate();
            }
            debug!(board = %self.id, item = %item.id, snapshot = %snapshot.id, "snapshot added");
            self.items.push(item);
        }
        &self.items
    }

    /// Replace the item list, keeping the first occurrence of each id and
    /// clamping scales into range.
    pub fn set_items(&mut self, items: Vec<PlacedItem>) {
        let mut seen = HashSet::new();
        self.items = items
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .map(|mut item| {
                item.scale = clamp_scale(item.scale);
                item
            })
            .collect();
    }

    /// Remove one item; unknown ids are ignored
    pub fn remove_item(&mut self, id: &ItemId) -> Option<PlacedItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn item(&self, id: &ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(BacklotError::validation("Please enter a title for your mood board"));
        }
        let mut seen = HashSet::new();
        if let Some(item) = self.items.iter().find(|item| !seen.insert(&item.id)) {
            return Err(BacklotError::validation(format!("Duplicate item {} on the mood board", item.id)));
        }
        if let Some(item) = self.items.iter().find(|item| clamp_scale(item.scale) != item.scale) {
            return Err(BacklotError::validation(format!(
                "Item {} has scale {} outside [{}, {}]",
                item.id, item.scale, MIN_SCALE, MAX_SCALE
            )));
        }
        Ok(())
    }

    pub fn load(store: &dyn MoodBoardStore, id: &MoodBoardId) -> Result<Self> {
        let mut board = store.get_moodboard(id)?;
        let stored = std::mem::take(&mut board.items);
        board.set_items(stored);
        debug!(board = %id, items = board.items.len(), "mood board loaded");
        Ok(board)
    }

    /// Validate, then insert or update through the store. Returns the stored
    /// document with its timestamps.
    pub fn save(&self, store: &dyn MoodBoardStore) -> Result<Self> {
        self.validate()?;
        let saved = store.save_moodboard(self)?;
        info!(board = %saved.id, items = saved.items.len(), "mood board saved");
        Ok(saved)
    }

    pub fn delete(store: &dyn MoodBoardStore, id: &MoodBoardId) -> Result<()> {
        store.delete_moodboard(id)?;
        info!(board = %id, "mood board deleted");
        Ok(())
    }

    // ========================================================================
    // Display
    // ========================================================================

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_BOARD
        } else {
            &self.title
        }
    }

    pub fn item_count_label(&self) -> String {
        item_count_label(self.items.len())
    }

    /// Link for the external sharing surface
    pub fn share_url(&self, base: &str) -> String {
        share::share_url(base, &self.id)
    }
}

/// "1 item" / "N items"
pub fn item_count_label(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", count)
    }
}
