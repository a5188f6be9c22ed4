//! Editor session workflows: picking, drops, save failures, sharing.

use crate::helpers::{FlakyStore, ITEM_SIZE, TestBoardBuilder, canvas_rect, seeded_policy, snapshot};
use backlot::auth::{Permission, User};
use backlot::canvas::DropOutcome;
use backlot::editor::MoodBoardEditor;
use backlot::error::BacklotError;
use backlot::notice::NoticeAction;
use backlot::placement::PlacementRegion;
use backlot::settings::Settings;
use backlot::store::{MemoryStore, MoodBoardStore};
use backlot::types::{DropPayload, ItemId, ItemPatch, MoodBoardId, Point, Size, Snapshot};

fn settings() -> Settings {
    Settings {
        item_size: ITEM_SIZE,
        share_base_url: "https://backlot.example.com/".into(),
        ..Default::default()
    }
}

fn editor_with(snapshots: &[Snapshot]) -> MoodBoardEditor {
    MoodBoardEditor::with_policy(None, snapshots, &settings(), seeded_policy(11))
}

#[test]
fn test_failed_save_keeps_layout_and_offers_retry() {
    let store = FlakyStore::new();
    let mut editor = editor_with(&[snapshot("s1"), snapshot("s2")]);
    editor.set_title("Alley chase");
    let layout = editor.board().items.clone();

    store.set_failing(true);
    let err = editor.save(&store).unwrap_err();
    assert!(err.is_retryable());

    let notice = editor.notice().unwrap();
    assert_eq!(notice.action, NoticeAction::Retry);
    assert_eq!(notice.message, "Failed to save mood board. Please try again.");
    assert_eq!(editor.board().items, layout);
    assert!(!editor.board().is_persisted());
    assert!(editor.is_dirty());
    assert!(!editor.is_saving());

    store.set_failing(false);
    let saved = editor.save(&store).unwrap();
    assert!(editor.notice().is_none());
    assert!(editor.board().is_persisted());
    assert!(!editor.is_dirty());
    assert_eq!(saved.items, layout);
    assert_eq!(store.inner().moodboard_count(), 1);
}

#[test]
fn test_blank_title_is_rejected_before_the_store() {
    let store = MemoryStore::new();
    let mut editor = editor_with(&[snapshot("s1")]);
    editor.set_title("   ");

    let err = editor.save(&store).unwrap_err();
    assert!(matches!(err, BacklotError::Validation(_)));
    let notice = editor.notice().unwrap();
    assert_eq!(notice.action, NoticeAction::Dismiss);
    assert_eq!(notice.message, "Please enter a title for your mood board");
    assert_eq!(store.moodboard_count(), 0);
    assert!(!editor.is_saving());
}

#[test]
fn test_only_one_save_in_flight() {
    let store = MemoryStore::new();
    let mut editor = editor_with(&[]);
    editor.set_title("Pier");

    let doc = editor.begin_save().unwrap();
    assert!(editor.is_saving());
    assert!(editor.begin_save().is_err());

    editor.finish_save(store.save_moodboard(&doc)).unwrap();
    assert!(!editor.is_saving());
    assert!(editor.begin_save().is_ok());
}

#[test]
fn test_edits_during_save_stay_dirty() {
    let store = MemoryStore::new();
    let mut editor = editor_with(&[snapshot("s1")]);
    editor.set_title("Pier");
    let id = editor.board().items[0].id.clone();

    let doc = editor.begin_save().unwrap();
    editor.interact(|canvas| canvas.update_item(&id, ItemPatch::scale(2.0)));
    editor.finish_save(store.save_moodboard(&doc)).unwrap();

    assert!(editor.is_dirty());
    assert_eq!(editor.board().item(&id).unwrap().scale, 2.0);
}

#[test]
fn test_open_missing_board_sends_back_to_list() {
    let store = MemoryStore::new();
    let editor = MoodBoardEditor::open(&store, &MoodBoardId::new("moodboard-gone"), None, &settings());

    let notice = editor.notice().unwrap();
    assert_eq!(notice.action, NoticeAction::BackToList);
    assert!(editor.board().items.is_empty());
    assert!(editor.canvas().is_empty());
}

#[test]
fn test_open_failure_then_reload() {
    let store = FlakyStore::new();
    let saved = store
        .save_moodboard(&TestBoardBuilder::new().with_title("Tunnel").with_n_items(3).build())
        .unwrap();

    store.set_failing(true);
    let mut editor = MoodBoardEditor::open(&store, &saved.id, None, &settings());
    let notice = editor.notice().unwrap();
    assert!(notice.is_retryable());
    assert_eq!(notice.message, "Failed to load mood board. Please try again.");

    store.set_failing(false);
    editor.reload(&store, &saved.id).unwrap();
    assert!(editor.notice().is_none());
    assert_eq!(editor.board(), &saved);
    assert_eq!(editor.canvas().len(), 3);
    assert!(!editor.is_dirty());
}

#[test]
fn test_picker_adds_selected_snapshots() {
    let mut editor = editor_with(&[]);
    assert!(editor.toggle_snapshot(&snapshot("s1")));
    assert!(editor.toggle_snapshot(&snapshot("s2")));
    assert!(!editor.toggle_snapshot(&snapshot("s2")));
    assert!(editor.toggle_snapshot(&snapshot("s3")));

    assert_eq!(editor.add_selected_snapshots(), 2);
    assert!(editor.selected_snapshots().is_empty());
    assert_eq!(editor.board().items.len(), 2);
    assert_eq!(editor.canvas().len(), 2);
    assert_eq!(editor.item_count_label(), "2 items");
    assert_eq!(editor.add_selected_snapshots(), 0);
}

#[test]
fn test_drag_and_drop_updates_board() {
    let mut editor = editor_with(&[snapshot("s1")]);
    let id = editor.board().items[0].id.clone();

    let outcome = editor.interact(|canvas| {
        canvas.begin_drag(&id);
        canvas.accept_drop(
            DropPayload::ExistingItem(id.clone()),
            Point::new(340.0, 260.0),
            &canvas_rect(),
        )
    });

    assert_eq!(outcome, DropOutcome::Moved(id.clone()));
    assert_eq!(editor.board().items.len(), 1);
    assert_eq!(editor.board().item(&id).unwrap().position, Point::new(300.0, 200.0));
}

#[test]
fn test_dropped_snapshot_lands_under_pointer() {
    let mut editor = editor_with(&[snapshot("s1")]);

    editor.interact(|canvas| {
        canvas.accept_drop(
            DropPayload::NewSnapshot(snapshot("s2")),
            Point::new(640.0, 460.0),
            &canvas_rect(),
        )
    });

    let items = &editor.board().items;
    assert_eq!(items.len(), 2);
    let placed = &items[1];
    assert_eq!(placed.snapshot.id.as_str(), "s2");
    assert_eq!(placed.position, Point::new(600.0, 400.0));
    assert_eq!(placed.scale, 1.0);
    assert!((-5.0..=5.0).contains(&placed.rotation));
    assert_eq!(editor.canvas().len(), 2);
}

#[test]
fn test_remove_item_is_idempotent() {
    let mut editor = editor_with(&[snapshot("s1"), snapshot("s2")]);
    let id = editor.board().items[0].id.clone();

    assert!(editor.remove_item(&id));
    assert!(!editor.remove_item(&id));
    assert!(!editor.remove_item(&ItemId::new("never-there")));
    assert_eq!(editor.board().items.len(), 1);
    assert_eq!(editor.item_count_label(), "1 item");
}

#[test]
fn test_share_url_needs_permission_and_saved_board() {
    let store = MemoryStore::new();
    let sharer = User::new("u1", "Ada").with_permissions([Permission::Moodboard, Permission::Share]);
    let mut editor = MoodBoardEditor::with_policy(
        Some(sharer),
        &[snapshot("s1")],
        &settings(),
        seeded_policy(3),
    );
    editor.set_title("Downtown");
    assert_eq!(editor.share_url(), None);

    let saved = editor.save(&store).unwrap();
    assert_eq!(
        editor.share_url(),
        Some(format!("https://backlot.example.com/shared/{}", saved.id))
    );
    assert_eq!(saved.created_by.as_ref().map(|u| u.as_str()), Some("u1"));

    let viewer_only = User::new("u2", "Bo").with_permissions([Permission::View]);
    let other = MoodBoardEditor::open(&store, &saved.id, Some(viewer_only), &settings());
    assert!(other.notice().is_none());
    assert_eq!(other.share_url(), None);
}

#[test]
fn test_apply_settings_takes_effect_immediately() {
    let store = MemoryStore::new();
    let sharer = User::new("u1", "Ada").with_permissions([Permission::Moodboard, Permission::Share]);
    let mut editor =
        MoodBoardEditor::with_policy(Some(sharer), &[snapshot("s1")], &settings(), seeded_policy(5));
    editor.set_title("Pier");
    let saved = editor.save(&store).unwrap();

    let reloaded = Settings {
        item_size: Size::new(200.0, 50.0),
        share_base_url: "https://review.example.com".into(),
        placement: PlacementRegion {
            min_x: 1000.0,
            min_y: 1000.0,
            width: 10.0,
            height: 10.0,
            jitter_degrees: 0.0,
        },
        ..Default::default()
    };
    editor.apply_settings(&reloaded);

    assert_eq!(editor.canvas().item_size(), Size::new(200.0, 50.0));
    assert_eq!(
        editor.share_url(),
        Some(format!("https://review.example.com/shared/{}", saved.id))
    );

    editor.queue_snapshots(&[snapshot("s2")]);
    assert_eq!(editor.add_selected_snapshots(), 1);
    let placed = editor.board().items.last().unwrap();
    assert!(placed.position.x >= 1000.0 && placed.position.x <= 1010.0);
    assert!(placed.position.y >= 1000.0 && placed.position.y <= 1010.0);
    assert_eq!(placed.rotation, 0.0);
}
