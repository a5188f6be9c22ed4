//! In-process store, used by tests and by hosts that persist elsewhere.

use super::MoodBoardStore;
use super::records::Records;
use crate::error::Result;
use crate::moodboard::MoodBoard;
use crate::types::{MoodBoardId, Snapshot, SnapshotDraft, SnapshotId, UserId, now_millis};
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with snapshots
    pub fn with_snapshots(snapshots: Vec<Snapshot>) -> Self {
        Self {
            records: RwLock::new(Records {
                moodboards: Vec::new(),
                snapshots,
            }),
        }
    }

    pub fn moodboard_count(&self) -> usize {
        self.records.read().moodboards.len()
    }
}

impl MoodBoardStore for MemoryStore {
    fn get_moodboard(&self, id: &MoodBoardId) -> Result<MoodBoard> {
        self.records.read().get_moodboard(id)
    }

    fn save_moodboard(&self, doc: &MoodBoard) -> Result<MoodBoard> {
        Ok(self.records.write().upsert_moodboard(doc, now_millis()))
    }

    fn delete_moodboard(&self, id: &MoodBoardId) -> Result<()> {
        self.records.write().delete_moodboard(id)
    }

    fn user_moodboards(&self, user: &UserId) -> Result<Vec<MoodBoard>> {
        Ok(self.records.read().user_moodboards(user))
    }

    fn user_snapshots(&self, user: &UserId) -> Result<Vec<Snapshot>> {
        Ok(self.records.read().user_snapshots(user))
    }

    fn save_snapshot(&self, draft: SnapshotDraft) -> Result<Snapshot> {
        Ok(self.records.write().insert_snapshot(draft, now_millis()))
    }

    fn delete_snapshot(&self, id: &SnapshotId) -> Result<()> {
        self.records.write().delete_snapshot(id)
    }
}
