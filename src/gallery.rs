//! A user's gallery: their snapshots and mood boards.
//!
//! Lists are refreshed from the store. When a refresh fails the previous
//! lists stay on screen and a notice explains why.

use crate::auth::User;
use crate::editor::MoodBoardEditor;
use crate::error::{BacklotError, Result};
use crate::moodboard::MoodBoard;
use crate::notice::Notice;
use crate::settings::Settings;
use crate::store::MoodBoardStore;
use crate::types::{MoodBoardId, Snapshot, SnapshotId, UserId};
use tracing::{info, warn};

#[derive(Debug)]
pub struct Gallery {
    user: UserId,
    snapshots: Vec<Snapshot>,
    moodboards: Vec<MoodBoard>,
    selected: Vec<SnapshotId>,
    notice: Option<Notice>,
}

impl Gallery {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            snapshots: Vec::new(),
            moodboards: Vec::new(),
            selected: Vec::new(),
            notice: None,
        }
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn moodboards(&self) -> &[MoodBoard] {
        &self.moodboards
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Reload both lists. On failure the last good lists are kept.
    pub fn refresh(&mut self, store: &dyn MoodBoardStore) -> Result<()> {
        let loaded = store
            .user_snapshots(&self.user)
            .and_then(|snapshots| Ok((snapshots, store.user_moodboards(&self.user)?)));
        match loaded {
            Ok((snapshots, moodboards)) => {
                self.snapshots = snapshots;
                self.moodboards = moodboards;
                // selection may point at snapshots deleted elsewhere
                let snapshots = &self.snapshots;
                self.selected.retain(|id| snapshots.iter().any(|s| &s.id == id));
                self.notice = None;
                Ok(())
            }
            Err(e) => {
                warn!(user = %self.user, "Gallery refresh failed: {}", e);
                self.notice = Some(Notice::from_error(e.clone()));
                Err(e)
            }
        }
    }

    // ========================================================================
    // Snapshot selection
    // ========================================================================

    /// Returns true if the snapshot is now selected
    pub fn toggle_snapshot(&mut self, id: &SnapshotId) -> bool {
        if let Some(index) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(index);
            false
        } else if self.snapshots.iter().any(|s| &s.id == id) {
            self.selected.push(id.clone());
            true
        } else {
            false
        }
    }

    pub fn is_selected(&self, id: &SnapshotId) -> bool {
        self.selected.contains(id)
    }

    /// Selected snapshots in the order they were picked
    pub fn selected_snapshots(&self) -> Vec<Snapshot> {
        self.selected
            .iter()
            .filter_map(|id| self.snapshots.iter().find(|s| &s.id == id))
            .cloned()
            .collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Open an editor for a new board with the selected snapshots waiting in
    /// its picker.
    pub fn start_moodboard(&mut self, user: Option<User>, settings: &Settings) -> MoodBoardEditor {
        let mut editor = MoodBoardEditor::new(user, &[], settings);
        editor.queue_snapshots(&self.selected_snapshots());
        self.selected.clear();
        editor
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    pub fn delete_moodboard(&mut self, store: &dyn MoodBoardStore, id: &MoodBoardId) -> Result<()> {
        match MoodBoard::delete(store, id) {
            Ok(()) => {
                self.moodboards.retain(|board| &board.id != id);
                Ok(())
            }
            Err(e) => {
                self.notice = Some(Notice::from_error(e.clone()));
                Err(e)
            }
        }
    }

    /// Delete every selected snapshot.
    ///
    /// Each deletion is independent: successes are removed from the list even
    /// when another one fails. Returns the number deleted, or the first error.
    pub fn delete_selected_snapshots(&mut self, store: &dyn MoodBoardStore) -> Result<usize> {
        let mut deleted = 0;
        let mut first_error: Option<BacklotError> = None;

        for id in std::mem::take(&mut self.selected) {
            match store.delete_snapshot(&id) {
                Ok(()) => {
                    self.snapshots.retain(|s| s.id != id);
                    deleted += 1;
                }
                Err(e) => {
                    warn!(snapshot = %id, "Snapshot delete failed: {}", e);
                    self.selected.push(id);
                    first_error.get_or_insert(e);
                }
            }
        }
        info!(user = %self.user, deleted, "snapshots deleted");

        match first_error {
            Some(e) => {
                self.notice = Some(Notice::from_error(e.clone()));
                Err(e)
            }
            None => Ok(deleted),
        }
    }
}
