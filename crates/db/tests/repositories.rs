//! Integration tests for the user, todo list and note repositories.

use noteboard_core::board::DEFAULT_LISTS;
use noteboard_db::models::note::{CreateNote, NotePatch};
use noteboard_db::models::todo_list::{CreateTodoList, TodoListPatch};
use noteboard_db::repositories::{NoteRepo, TodoListRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_note(user_id: i64, text: &str) -> CreateNote {
    CreateNote {
        user_id,
        text: text.to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_or_create_reports_insert_once(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();

    let (first, created) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();
    assert!(created);
    let (second, created) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();
    assert!(!created);
    assert_eq!(first.id, second.id);

    let found = UserRepo::find_by_key(&mut conn, "alice").await.unwrap().unwrap();
    assert_eq!(found.id, first.id);
    assert!(UserRepo::find_by_key(&mut conn, "Alice").await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Todo lists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_defaults_inserts_default_frames(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (user, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();

    TodoListRepo::create_defaults(&mut conn, user.id).await.unwrap();

    let lists = TodoListRepo::list_by_user(&mut conn, user.id).await.unwrap();
    assert_eq!(lists.len(), DEFAULT_LISTS.len());
    assert_eq!(lists[0].title, DEFAULT_LISTS[0].title);
    assert_eq!(lists[0].width, 520.0);
    assert_eq!(lists[0].height, 360.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_patch_only_applies_supplied_fields(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (user, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();
    let list = TodoListRepo::create(
        &mut conn,
        &CreateTodoList {
            user_id: user.id,
            title: "Work".to_string(),
            pos_x: Some(10.0),
            pos_y: None,
            width: None,
            height: None,
        },
    )
    .await
    .unwrap();

    let patched = TodoListRepo::patch(
        &mut conn,
        list.id,
        &TodoListPatch {
            width: Some(700.0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(patched.title, "Work");
    assert_eq!(patched.pos_x, 10.0);
    assert_eq!(patched.width, 700.0);
    assert!(patched.updated_at >= list.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_patch_missing_returns_none(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let result = TodoListRepo::patch(&mut conn, 999_999, &TodoListPatch::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_delete_unfiles_notes_and_snapshot_restores_id(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (user, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();
    let list = TodoListRepo::create(
        &mut conn,
        &CreateTodoList {
            user_id: user.id,
            title: "Shopping".to_string(),
            pos_x: None,
            pos_y: None,
            width: None,
            height: None,
        },
    )
    .await
    .unwrap();
    let note = NoteRepo::create(
        &mut conn,
        &CreateNote {
            todo_list_id: Some(list.id),
            ..new_note(user.id, "Eggs")
        },
    )
    .await
    .unwrap();
    assert_eq!(note.todo_list_id, Some(list.id));

    let snapshot = list.snapshot();
    assert!(TodoListRepo::delete(&mut conn, list.id).await.unwrap());
    assert!(!TodoListRepo::delete(&mut conn, list.id).await.unwrap());

    let note = NoteRepo::find_by_id(&mut conn, note.id).await.unwrap().unwrap();
    assert_eq!(note.todo_list_id, None);

    let restored = TodoListRepo::create_from_snapshot(&mut conn, &snapshot).await.unwrap();
    assert_eq!(restored.id, list.id);
    assert_eq!(restored.title, "Shopping");
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_create_uses_defaults(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (user, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();

    let note = NoteRepo::create(&mut conn, &new_note(user.id, "Buy milk")).await.unwrap();
    assert_eq!(note.severity, "normal");
    assert!(!note.is_done);
    assert!(!note.is_processed_by_llm);
    assert_eq!(note.meta, json!({}));
    assert!(note.todo_list_id.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_create_rejects_foreign_list(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (alice, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();
    let (bob, _) = UserRepo::get_or_create(&mut conn, "bob").await.unwrap();
    TodoListRepo::create_defaults(&mut conn, bob.id).await.unwrap();
    let bobs_list = TodoListRepo::list_by_user(&mut conn, bob.id).await.unwrap()[0].id;

    let note = NoteRepo::create(
        &mut conn,
        &CreateNote {
            todo_list_id: Some(bobs_list),
            ..new_note(alice.id, "mine")
        },
    )
    .await
    .unwrap();
    assert!(note.todo_list_id.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_patch_omitted_keeps_and_null_clears(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (user, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();
    let note = NoteRepo::create(&mut conn, &new_note(user.id, "Call mom")).await.unwrap();

    let tagged = NoteRepo::patch(
        &mut conn,
        note.id,
        &NotePatch {
            tag: Some(Some("family".to_string())),
            notify_by: Some(Some("time".to_string())),
            notify_value: Some(Some(json!({"at": "2025-12-24T09:00:00Z"}))),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(tagged.tag.as_deref(), Some("family"));
    assert_eq!(tagged.notify_by.as_deref(), Some("time"));

    // Omitted fields are untouched.
    let moved = NoteRepo::patch(
        &mut conn,
        note.id,
        &NotePatch {
            pos_x: Some(50.0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(moved.pos_x, 50.0);
    assert_eq!(moved.tag.as_deref(), Some("family"));
    assert_eq!(moved.text, "Call mom");

    // Explicit null clears.
    let cleared = NoteRepo::patch(
        &mut conn,
        note.id,
        &NotePatch {
            tag: Some(None),
            notify_by: Some(None),
            notify_value: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(cleared.tag.is_none());
    assert!(cleared.notify_by.is_none());
    assert!(cleared.notify_value.is_none());
    assert_eq!(cleared.pos_x, 50.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_snapshot_patch_restores_every_field(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (user, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();
    let note = NoteRepo::create(
        &mut conn,
        &CreateNote {
            device: Some("phone".to_string()),
            geo: Some(json!({"lat": 55.75, "lon": 37.62})),
            ..new_note(user.id, "Original")
        },
    )
    .await
    .unwrap();
    let before = note.snapshot();

    NoteRepo::patch(
        &mut conn,
        note.id,
        &NotePatch {
            text: Some("Changed".to_string()),
            severity: Some("high".to_string()),
            device: Some(None),
            tag: Some(Some("x".to_string())),
            meta: Some(json!({"pinned": true})),
            is_done: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let restored = NoteRepo::patch(&mut conn, note.id, &NotePatch::from_snapshot(&before))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(restored.snapshot(), before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_delete_and_recreate_from_snapshot(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (user, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();
    let note = NoteRepo::create(&mut conn, &new_note(user.id, "Ephemeral")).await.unwrap();
    let note = NoteRepo::patch(
        &mut conn,
        note.id,
        &NotePatch {
            meta: Some(json!({"color": "yellow", "stickers": [1, 2]})),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    let snapshot = note.snapshot();

    assert!(NoteRepo::delete(&mut conn, note.id).await.unwrap());
    assert!(NoteRepo::find_by_id(&mut conn, note.id).await.unwrap().is_none());

    let restored = NoteRepo::create_from_snapshot(&mut conn, &snapshot).await.unwrap();
    assert_eq!(restored.id, note.id);
    assert_eq!(restored.snapshot(), snapshot);

    // The sequence keeps moving forward past the restored id.
    let fresh = NoteRepo::create(&mut conn, &new_note(user.id, "Next")).await.unwrap();
    assert!(fresh.id > restored.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_unprocessed_skips_processed(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (user, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();
    let done = NoteRepo::create(&mut conn, &new_note(user.id, "done")).await.unwrap();
    let pending = NoteRepo::create(&mut conn, &new_note(user.id, "pending")).await.unwrap();
    NoteRepo::patch(
        &mut conn,
        done.id,
        &NotePatch {
            is_processed_by_llm: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let unprocessed = NoteRepo::list_unprocessed_by_user(&mut conn, user.id, 100)
        .await
        .unwrap();
    assert_eq!(unprocessed.len(), 1);
    assert_eq!(unprocessed[0].id, pending.id);

    let all = NoteRepo::list_by_user(&mut conn, user.id, 100).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, pending.id, "newest note first");
}
