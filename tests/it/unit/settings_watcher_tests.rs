//! Unit tests for settings_watcher module.

use backlot::settings_watcher::{SettingsEvent, SettingsWatcher, default_settings_path};
use std::fs;
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_watcher_creation() {
    let dir = tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");
    fs::write(&settings_path, "{}").unwrap();

    let watcher = SettingsWatcher::new(settings_path.clone()).unwrap();
    assert_eq!(watcher.path(), &settings_path);
}

#[test]
fn test_watcher_creates_missing_directory() {
    let dir = tempdir().unwrap();
    let settings_path = dir.path().join("config").join("settings.json");

    assert!(SettingsWatcher::new(settings_path).is_ok());
    assert!(dir.path().join("config").is_dir());
}

#[test]
fn test_poll_without_changes_is_empty() {
    let dir = tempdir().unwrap();
    let mut watcher = SettingsWatcher::new(dir.path().join("settings.json")).unwrap();
    assert_eq!(watcher.poll(), None);
}

#[test]
fn test_default_paths() {
    // These should return Some on most systems
    let settings = default_settings_path();
    assert!(settings.is_some() || cfg!(target_os = "unknown"));
}

/// Ignored: file system events are timing-dependent and platform-specific,
/// so delivery within the test window is not guaranteed in CI.
#[test]
#[ignore]
fn test_file_modification_detection() {
    let dir = tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");
    fs::write(&settings_path, "{}").unwrap();

    let mut watcher = SettingsWatcher::new(settings_path.clone()).unwrap();

    let mut file = fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(&settings_path)
        .unwrap();
    writeln!(file, "{{\"log_filter\": \"backlot=debug\"}}").unwrap();
    file.sync_all().unwrap();

    std::thread::sleep(std::time::Duration::from_millis(200));
    let event = watcher.poll();
    assert!(matches!(
        event,
        Some(SettingsEvent::Modified) | Some(SettingsEvent::Created)
    ));
}
