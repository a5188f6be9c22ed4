//! Mood-board editor session.
//!
//! Binds one `MoodBoard` to a `MoodBoardCanvas`, keeps the snapshot picker
//! selection, and runs the save lifecycle. Saving is split in two so a host
//! can run the store call off its UI thread:
//!
//! ```ignore
//! let doc = editor.begin_save()?;          // UI thread
//! let result = store.save_moodboard(&doc); // anywhere
//! editor.finish_save(result)?;             // back on the UI thread
//! ```
//!
//! Only one save may be in flight. A failed save leaves the layout alone and
//! raises a retryable notice.

use crate::auth::{Permission, User};
use crate::canvas::{CanvasEvent, MoodBoardCanvas};
use crate::error::{BacklotError, Result};
use crate::moodboard::MoodBoard;
use crate::notice::Notice;
use crate::placement::PlacementPolicy;
use crate::settings::Settings;
use crate::store::MoodBoardStore;
use crate::types::{ItemId, MoodBoardId, Snapshot, SnapshotId};
use tracing::{debug, error, info, warn};

const SAVE_FAILED: &str = "Failed to save mood board. Please try again.";
const LOAD_FAILED: &str = "Failed to load mood board. Please try again.";

pub struct MoodBoardEditor {
    board: MoodBoard,
    canvas: MoodBoardCanvas,
    policy: PlacementPolicy,
    user: Option<User>,
    picker: Vec<Snapshot>,
    saving: bool,
    dirty: bool,
    notice: Option<Notice>,
    share_base_url: String,
}

impl MoodBoardEditor {
    /// Editor for a new, unsaved board seeded with one item per snapshot
    pub fn new(user: Option<User>, initial_snapshots: &[Snapshot], settings: &Settings) -> Self {
        let policy = PlacementPolicy::new(settings.placement);
        Self::with_policy(user, initial_snapshots, settings, policy)
    }

    /// Like `new`, with an explicit placement policy
    pub fn with_policy(
        user: Option<User>,
        initial_snapshots: &[Snapshot],
        settings: &Settings,
        mut policy: PlacementPolicy,
    ) -> Self {
        let mut board = MoodBoard::create(Vec::new());
        if let Some(user) = &user {
            board = board.with_owner(user.id.clone(), user.name.clone());
        }
        board.add_snapshots(initial_snapshots, &mut policy);

        let canvas = MoodBoardCanvas::with_items(board.items.clone(), settings.item_size);
        Self {
            board,
            canvas,
            policy,
            user,
            picker: Vec::new(),
            saving: false,
            dirty: !initial_snapshots.is_empty(),
            notice: None,
            share_base_url: settings.share_base_url.clone(),
        }
    }

    /// Open a stored board.
    ///
    /// A failed load still yields an editor, holding an empty board and a
    /// notice: back-to-list for a missing board, retry for anything else.
    pub fn open(
        store: &dyn MoodBoardStore,
        id: &MoodBoardId,
        user: Option<User>,
        settings: &Settings,
    ) -> Self {
        let mut editor = Self::new(user, &[], settings);
        match MoodBoard::load(store, id) {
            Ok(board) => editor.replace_board(board),
            Err(e) => {
                error!(board = %id, "Failed to load mood board: {}", e);
                let notice = Notice::from_error(e);
                editor.notice = Some(if notice.is_retryable() {
                    notice.with_message(LOAD_FAILED)
                } else {
                    notice
                });
            }
        }
        editor
    }

    /// Retry a failed `open` in place
    pub fn reload(&mut self, store: &dyn MoodBoardStore, id: &MoodBoardId) -> Result<()> {
        match MoodBoard::load(store, id) {
            Ok(board) => {
                self.replace_board(board);
                self.notice = None;
                Ok(())
            }
            Err(e) => {
                warn!(board = %id, "Reload failed: {}", e);
                self.notice = Some(Notice::from_error(e.clone()));
                Err(e)
            }
        }
    }

    fn replace_board(&mut self, mut board: MoodBoard) {
        self.canvas.replace_items(std::mem::take(&mut board.items));
        board.items = self.canvas.items().to_vec();
        self.board = board;
        self.dirty = false;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn board(&self) -> &MoodBoard {
        &self.board
    }

    pub fn canvas(&self) -> &MoodBoardCanvas {
        &self.canvas
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn item_count_label(&self) -> String {
        self.board.item_count_label()
    }

    /// Pick up share URL, item size and placement changes after a settings
    /// reload
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.share_base_url = settings.share_base_url.clone();
        self.canvas.set_item_size(settings.item_size);
        if *self.policy.region() != settings.placement {
            self.policy = PlacementPolicy::new(settings.placement);
        }
    }

    // ========================================================================
    // Board fields
    // ========================================================================

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.board.title = title.into();
        self.dirty = true;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.board.description = description.into();
        self.dirty = true;
    }

    // ========================================================================
    // Snapshot picker
    // ========================================================================

    /// Toggle a snapshot in the picker. Returns true if it is now selected.
    pub fn toggle_snapshot(&mut self, snapshot: &Snapshot) -> bool {
        if let Some(index) = self.picker.iter().position(|s| s.id == snapshot.id) {
            self.picker.remove(index);
            false
        } else {
            self.picker.push(snapshot.clone());
            true
        }
    }

    pub fn is_snapshot_selected(&self, id: &SnapshotId) -> bool {
        self.picker.iter().any(|s| &s.id == id)
    }

    pub fn selected_snapshots(&self) -> &[Snapshot] {
        &self.picker
    }

    /// Merge snapshots handed over from another view into the picker
    /// selection, skipping ones already selected.
    pub fn queue_snapshots(&mut self, snapshots: &[Snapshot]) {
        for snapshot in snapshots {
            if !self.is_snapshot_selected(&snapshot.id) {
                self.picker.push(snapshot.clone());
            }
        }
    }

    /// Place every selected snapshot on the board and clear the selection.
    /// Returns the number of items added.
    pub fn add_selected_snapshots(&mut self) -> usize {
        let picked = std::mem::take(&mut self.picker);
        if picked.is_empty() {
            return 0;
        }
        self.board.add_snapshots(&picked, &mut self.policy);
        self.canvas.replace_items(self.board.items.clone());
        self.dirty = true;
        debug!(board = %self.board.id, count = picked.len(), "snapshots placed");
        picked.len()
    }

    // ========================================================================
    // Canvas binding
    // ========================================================================

    /// Run `f` against the canvas, then fold its events into the board
    pub fn interact<R>(&mut self, f: impl FnOnce(&mut MoodBoardCanvas) -> R) -> R {
        let result = f(&mut self.canvas);
        self.sync();
        result
    }

    /// Apply queued canvas events to the document
    pub fn sync(&mut self) {
        loop {
            let events = self.canvas.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                match event {
                    CanvasEvent::LayoutChanged(items) => {
                        self.board.set_items(items);
                        self.dirty = true;
                    }
                    CanvasEvent::PlacementRequested { snapshot, position } => {
                        let item = self.policy.place_at(snapshot, position);
                        if let Err(e) = self.canvas.insert_item(item) {
                            warn!("Dropped snapshot not placed: {}", e);
                        }
                    }
                    CanvasEvent::SelectionChanged(selected) => {
                        debug!(item = ?selected, "selection changed");
                    }
                }
            }
        }
    }

    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        self.interact(|canvas| canvas.remove_item(id))
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Validate and mark a save as in flight. Returns the document to hand
    /// to the store.
    pub fn begin_save(&mut self) -> Result<MoodBoard> {
        if self.saving {
            return Err(BacklotError::validation("A save is already in progress"));
        }
        if let Err(e) = self.board.validate() {
            self.notice = Some(Notice::from_error(e.clone()));
            return Err(e);
        }

        self.saving = true;
        self.notice = None;
        let mut doc = self.board.clone();
        if doc.created_by.is_none() {
            if let Some(user) = &self.user {
                doc.created_by = Some(user.id.clone());
                doc.creator_name = Some(user.name.clone());
            }
        }
        Ok(doc)
    }

    /// Complete the save started by `begin_save`.
    ///
    /// On success the board adopts the stored id, timestamps and owner; items
    /// edited while the save was in flight are kept. On failure nothing in
    /// the board changes.
    pub fn finish_save(&mut self, result: Result<MoodBoard>) -> Result<MoodBoard> {
        self.saving = false;
        match result {
            Ok(saved) => {
                let unchanged = saved.items == self.board.items
                    && saved.title == self.board.title
                    && saved.description == self.board.description;
                self.board.id = saved.id.clone();
                self.board.created_at = saved.created_at;
                self.board.updated_at = saved.updated_at;
                self.board.created_by = saved.created_by.clone();
                self.board.creator_name = saved.creator_name.clone();
                self.dirty = !unchanged;
                info!(board = %saved.id, "mood board saved");
                Ok(saved)
            }
            Err(e) => {
                error!(board = %self.board.id, "Failed to save mood board: {}", e);
                let notice = Notice::from_error(e.clone());
                self.notice = Some(if notice.is_retryable() {
                    notice.with_message(SAVE_FAILED)
                } else {
                    notice
                });
                Err(e)
            }
        }
    }

    /// Save synchronously through `store`
    pub fn save(&mut self, store: &dyn MoodBoardStore) -> Result<MoodBoard> {
        let doc = self.begin_save()?;
        let result = doc.save(store);
        self.finish_save(result)
    }

    /// Delete the stored board
    pub fn delete(&mut self, store: &dyn MoodBoardStore) -> Result<()> {
        MoodBoard::delete(store, &self.board.id).inspect_err(|e| {
            warn!(board = %self.board.id, "Delete failed: {}", e);
            self.notice = Some(Notice::from_error(e.clone()));
        })
    }

    // ========================================================================
    // Sharing
    // ========================================================================

    /// Share link, offered only to users allowed to share a saved board
    pub fn share_url(&self) -> Option<String> {
        let user = self.user.as_ref()?;
        if !user.has_permission(Permission::Share) || !self.board.is_persisted() {
            return None;
        }
        Some(self.board.share_url(&self.share_base_url))
    }
}
