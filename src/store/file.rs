//! JSON-file store.
//!
//! Keeps `moodboards.json` and `snapshots.json` in one directory. Every
//! mutation re-reads the file, applies the change and writes it back through
//! a temp file in the same directory, so a crash never leaves a torn file.

use super::MoodBoardStore;
use super::records::Records;
use crate::error::Result;
use crate::moodboard::MoodBoard;
use crate::types::{MoodBoardId, Snapshot, SnapshotDraft, SnapshotId, UserId, now_millis};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, error};

const MOODBOARDS_FILE: &str = "moodboards.json";
const SNAPSHOTS_FILE: &str = "snapshots.json";

#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load(&self) -> Result<Records> {
        Ok(Records {
            moodboards: self.read_list(MOODBOARDS_FILE)?,
            snapshots: self.read_list(SNAPSHOTS_FILE)?,
        })
    }

    fn read_list<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            error!("Failed to parse {}: {}", path.display(), e);
            e.into()
        })
    }

    fn write_list<T: Serialize>(&self, name: &str, records: &[T]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut tmp, records)?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(path = %path.display(), count = records.len(), "store file written");
        Ok(())
    }
}

impl MoodBoardStore for FileStore {
    fn get_moodboard(&self, id: &MoodBoardId) -> Result<MoodBoard> {
        let _guard = self.lock.lock();
        self.load()?.get_moodboard(id)
    }

    fn save_moodboard(&self, doc: &MoodBoard) -> Result<MoodBoard> {
        let _guard = self.lock.lock();
        let mut records = self.load()?;
        let saved = records.upsert_moodboard(doc, now_millis());
        self.write_list(MOODBOARDS_FILE, &records.moodboards)?;
        Ok(saved)
    }

    fn delete_moodboard(&self, id: &MoodBoardId) -> Result<()> {
        let _guard = self.lock.lock();
        let mut records = self.load()?;
        records.delete_moodboard(id)?;
        self.write_list(MOODBOARDS_FILE, &records.moodboards)
    }

    fn user_moodboards(&self, user: &UserId) -> Result<Vec<MoodBoard>> {
        let _guard = self.lock.lock();
        Ok(self.load()?.user_moodboards(user))
    }

    fn user_snapshots(&self, user: &UserId) -> Result<Vec<Snapshot>> {
        let _guard = self.lock.lock();
        Ok(self.load()?.user_snapshots(user))
    }

    fn save_snapshot(&self, draft: SnapshotDraft) -> Result<Snapshot> {
        let _guard = self.lock.lock();
        let mut records = self.load()?;
        let snapshot = records.insert_snapshot(draft, now_millis());
        self.write_list(SNAPSHOTS_FILE, &records.snapshots)?;
        Ok(snapshot)
    }

    fn delete_snapshot(&self, id: &SnapshotId) -> Result<()> {
        let _guard = self.lock.lock();
        let mut records = self.load()?;
        records.delete_snapshot(id)?;
        self.write_list(SNAPSHOTS_FILE, &records.snapshots)
    }
}
