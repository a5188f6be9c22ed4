//! Unit tests for settings persistence.

use backlot::placement::PlacementRegion;
use backlot::settings::Settings;
use backlot::types::Size;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let settings = Settings {
        share_base_url: "https://boards.example.com".into(),
        placement: PlacementRegion {
            min_x: 40.0,
            min_y: 40.0,
            width: 640.0,
            height: 360.0,
            jitter_degrees: 2.5,
        },
        item_size: Size::new(240.0, 135.0),
        log_filter: "backlot=debug".into(),
        data_dir: Some(dir.path().join("data")),
    };
    settings.save_to(&path).unwrap();

    assert_eq!(Settings::load_from(&path), settings);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("absent.json"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_malformed_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_save_overwrites_previous_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    Settings::default().save_to(&path).unwrap();
    let changed = Settings {
        log_filter: "backlot=trace".into(),
        ..Default::default()
    };
    changed.save_to(&path).unwrap();

    assert_eq!(Settings::load_from(&path).log_filter, "backlot=trace");
}
