//! Document invariants on load and save.

use crate::helpers::{ITEM_SIZE, TestBoardBuilder};
use backlot::editor::MoodBoardEditor;
use backlot::error::BacklotError;
use backlot::moodboard::MoodBoard;
use backlot::settings::Settings;
use backlot::store::{MemoryStore, MoodBoardStore};
use backlot::types::ItemId;

/// Writes a board straight through the store, skipping validation, with
/// item "a" twice (the second copy at scale 50) and item "b" at scale 0.01.
fn store_corrupt_board(store: &MemoryStore) -> MoodBoard {
    let mut board = TestBoardBuilder::new()
        .with_title("Backlot")
        .with_item("a", (10.0, 10.0))
        .build();
    let mut duplicate = board.items[0].clone();
    duplicate.scale = 50.0;
    let mut tiny = board.items[0].clone();
    tiny.id = ItemId::new("b");
    tiny.scale = 0.01;
    board.items.push(duplicate);
    board.items.push(tiny);
    store.save_moodboard(&board).unwrap()
}

#[test]
fn test_load_dedups_and_clamps() {
    let store = MemoryStore::new();
    let saved = store_corrupt_board(&store);
    assert_eq!(saved.items.len(), 3);

    let loaded = MoodBoard::load(&store, &saved.id).unwrap();
    let ids: Vec<&str> = loaded.items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(loaded.items[0].scale, 1.0);
    assert_eq!(loaded.items[1].scale, 0.2);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_validate_rejects_duplicate_ids() {
    let store = MemoryStore::new();
    let mut board = TestBoardBuilder::new()
        .with_title("Backlot")
        .with_item("a", (10.0, 10.0))
        .build();
    board.items.push(board.items[0].clone());

    let err = board.save(&store).unwrap_err();
    assert!(matches!(err, BacklotError::Validation(_)));
    assert!(store.get_moodboard(&board.id).unwrap_err().is_not_found());
}

#[test]
fn test_validate_rejects_scale_out_of_range() {
    let mut board = TestBoardBuilder::new()
        .with_title("Backlot")
        .with_item("a", (10.0, 10.0))
        .build();
    board.items[0].scale = 3.5;
    assert!(matches!(board.validate(), Err(BacklotError::Validation(_))));

    board.items[0].scale = 3.0;
    assert!(board.validate().is_ok());
}

#[test]
fn test_editor_document_matches_canvas_after_open() {
    let store = MemoryStore::new();
    let saved = store_corrupt_board(&store);
    let settings = Settings {
        item_size: ITEM_SIZE,
        ..Default::default()
    };

    let mut editor = MoodBoardEditor::open(&store, &saved.id, None, &settings);
    assert!(editor.notice().is_none());
    assert_eq!(editor.board().items.as_slice(), editor.canvas().items());
    assert_eq!(editor.board().items.len(), 2);

    // an unedited save writes the repaired items back
    let resaved = editor.save(&store).unwrap();
    assert_eq!(resaved.items, editor.canvas().items());
    assert_eq!(store.get_moodboard(&saved.id).unwrap().items.len(), 2);
}
