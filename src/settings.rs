//! User settings, persisted as JSON in the platform config directory.
//!
//! Every field has a default, so an older or partial file still loads. A
//! missing file yields defaults; a malformed one is logged and ignored.

use crate::constants::{DEFAULT_ITEM_SIZE, DEFAULT_SHARE_BASE_URL};
use crate::placement::PlacementRegion;
use crate::types::Size;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

const APP_DIR: &str = "virtual-backlot";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base for `<base>/shared/<id>` links
    pub share_base_url: String,
    /// Where new items land and how much they tilt
    pub placement: PlacementRegion,
    /// Unscaled on-canvas footprint of a snapshot
    pub item_size: Size,
    /// Default tracing filter; `RUST_LOG` wins when set
    pub log_filter: String,
    /// Directory for the file store; platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            placement: PlacementRegion::default(),
            item_size: Size::from(DEFAULT_ITEM_SIZE),
            log_filter: "backlot=info".to_string(),
            data_dir: None,
        }
    }
}

impl Settings {
    /// Load from the default location
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                debug!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring malformed settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to the default location
    pub fn save(&self) -> Result<()> {
        let path = default_settings_path().context("no config directory on this platform")?;
        self.save_to(&path)
    }

    /// Write pretty JSON through a temp file in the same directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .with_context(|| format!("settings path {} has no parent", path.display()))?;
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let json = serde_json::to_string_pretty(self).context("failed to serialize settings")?;
        let mut tmp = NamedTempFile::new_in(dir).context("failed to create temp file")?;
        tmp.write_all(json.as_bytes())
            .context("failed to write settings")?;
        tmp.persist(path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        Ok(())
    }

    /// Directory the file store should use
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR)))
    }
}

/// `<config dir>/virtual-backlot/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(SETTINGS_FILE))
}
