//! Record-level logic shared by the stores.

use crate::error::{BacklotError, Result};
use crate::moodboard::MoodBoard;
use crate::types::{MoodBoardId, Snapshot, SnapshotDraft, SnapshotId, UserId};
use serde::{Deserialize, Serialize};

/// Everything a store holds
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(crate) struct Records {
    #[serde(default)]
    pub moodboards: Vec<MoodBoard>,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

impl Records {
    pub fn get_moodboard(&self, id: &MoodBoardId) -> Result<MoodBoard> {
        self.moodboards
            .iter()
            .find(|board| &board.id == id)
            .cloned()
            .ok_or_else(|| BacklotError::moodboard_not_found(id.as_str()))
    }

    /// Insert or update. `now` stamps `updated_at`, never moving it
    /// backwards; `created_at` survives updates.
    pub fn upsert_moodboard(&mut self, doc: &MoodBoard, now: u64) -> MoodBoard {
        let mut saved = doc.clone();
        if saved.id.as_str().is_empty() {
            saved.id = MoodBoardId::generate();
        }

        match self.moodboards.iter_mut().find(|board| board.id == saved.id) {
            Some(existing) => {
                saved.created_at = existing.created_at.or(saved.created_at).or(Some(now));
                saved.updated_at = Some(now.max(existing.updated_at.unwrap_or(0)));
                *existing = saved.clone();
            }
            None => {
                saved.created_at = Some(now);
                saved.updated_at = Some(now);
                self.moodboards.push(saved.clone());
            }
        }
        saved
    }

    pub fn delete_moodboard(&mut self, id: &MoodBoardId) -> Result<()> {
        let index = self
            .moodboards
            .iter()
            .position(|board| &board.id == id)
            .ok_or_else(|| BacklotError::moodboard_not_found(id.as_str()))?;
        self.moodboards.remove(index);
        Ok(())
    }

    pub fn user_moodboards(&self, user: &UserId) -> Vec<MoodBoard> {
        self.moodboards
            .iter()
            .filter(|board| owned_by(board.created_by.as_ref(), user))
            .cloned()
            .collect()
    }

    pub fn user_snapshots(&self, user: &UserId) -> Vec<Snapshot> {
        self.snapshots
            .iter()
            .filter(|snapshot| owned_by(snapshot.created_by.as_ref(), user))
            .cloned()
            .collect()
    }

    pub fn insert_snapshot(&mut self, draft: SnapshotDraft, now: u64) -> Snapshot {
        let mut snapshot = draft.into_snapshot(now);
        while self.snapshots.iter().any(|s| s.id == snapshot.id) {
            snapshot.id = SnapshotId::generate();
        }
        self.snapshots.push(snapshot.clone());
        snapshot
    }

    pub fn delete_snapshot(&mut self, id: &SnapshotId) -> Result<()> {
        let index = self
            .snapshots
            .iter()
            .position(|snapshot| &snapshot.id == id)
            .ok_or_else(|| BacklotError::snapshot_not_found(id.as_str()))?;
        self.snapshots.remove(index);
        Ok(())
    }
}

fn owned_by(owner: Option<&UserId>, user: &UserId) -> bool {
    owner.is_none_or(|owner| owner == user)
}
