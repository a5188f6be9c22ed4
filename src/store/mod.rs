//! Storage collaborator contract and implementations.
//!
//! Calls are synchronous here; a host that must not block its UI thread
//! runs them elsewhere and feeds the result back (see the editor's
//! `begin_save` / `finish_save`). Every failure is a `BacklotError` the
//! caller can recover from.

mod file;
mod memory;
mod records;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::moodboard::MoodBoard;
use crate::types::{MoodBoardId, Snapshot, SnapshotDraft, SnapshotId, UserId};

pub trait MoodBoardStore: Send + Sync {
    /// Fails with `NotFound` for an unknown id
    fn get_moodboard(&self, id: &MoodBoardId) -> Result<MoodBoard>;

    /// Update when a record with this id exists (keeping `created_at`),
    /// insert otherwise. Returns the stored document.
    fn save_moodboard(&self, doc: &MoodBoard) -> Result<MoodBoard>;

    /// Removes the board and every item on it
    fn delete_moodboard(&self, id: &MoodBoardId) -> Result<()>;

    /// Boards created by `user`, plus boards with no recorded owner
    fn user_moodboards(&self, user: &UserId) -> Result<Vec<MoodBoard>>;

    /// Snapshots created by `user`, plus snapshots with no recorded owner
    fn user_snapshots(&self, user: &UserId) -> Result<Vec<Snapshot>>;

    fn save_snapshot(&self, draft: SnapshotDraft) -> Result<Snapshot>;

    /// Placed items that reference the snapshot keep their copy
    fn delete_snapshot(&self, id: &SnapshotId) -> Result<()>;
}
