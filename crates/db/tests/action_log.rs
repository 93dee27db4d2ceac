//! Integration tests for the action log queries backing undo/redo.

use noteboard_core::history::{ActionKind, EntityKind};
use noteboard_db::models::action_log::{ActionLog, NewActionLog};
use noteboard_db::repositories::{ActionLogRepo, UserRepo};
use serde_json::json;
use sqlx::{PgConnection, PgPool};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn record_update(conn: &mut PgConnection, user_id: i64, entity_id: i64) -> ActionLog {
    ActionLogRepo::record(
        conn,
        &NewActionLog {
            user_id,
            action: ActionKind::Update,
            entity: EntityKind::Note,
            entity_id: Some(entity_id),
            before: Some(json!({"id": entity_id, "severity": "normal"})),
            after: Some(json!({"id": entity_id, "severity": "high"})),
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_stores_kinds_and_snapshots(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (user, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();

    let entry = ActionLogRepo::record(
        &mut conn,
        &NewActionLog {
            user_id: user.id,
            action: ActionKind::Create,
            entity: EntityKind::TodoList,
            entity_id: Some(42),
            before: None,
            after: Some(json!({"id": 42, "title": "Work"})),
        },
    )
    .await
    .unwrap();

    assert_eq!(entry.action_kind().unwrap(), ActionKind::Create);
    assert_eq!(entry.entity_kind().unwrap(), EntityKind::TodoList);
    assert_eq!(entry.entity_id, Some(42));
    assert!(entry.before.is_none());
    assert_eq!(entry.after.as_ref().unwrap()["title"], "Work");
    assert!(!entry.is_undone());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_last_undoable_is_highest_id_not_undone(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (user, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();

    let first = record_update(&mut conn, user.id, 1).await;
    let second = record_update(&mut conn, user.id, 2).await;

    let last = ActionLogRepo::last_undoable(&mut conn, user.id).await.unwrap().unwrap();
    assert_eq!(last.id, second.id);

    ActionLogRepo::mark_undone(&mut conn, second.id).await.unwrap();
    let last = ActionLogRepo::last_undoable(&mut conn, user.id).await.unwrap().unwrap();
    assert_eq!(last.id, first.id);

    ActionLogRepo::mark_undone(&mut conn, first.id).await.unwrap();
    assert!(ActionLogRepo::last_undoable(&mut conn, user.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_last_redoable_is_latest_undone(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (user, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();

    let first = record_update(&mut conn, user.id, 1).await;
    let second = record_update(&mut conn, user.id, 2).await;

    assert!(ActionLogRepo::last_redoable(&mut conn, user.id).await.unwrap().is_none());

    ActionLogRepo::mark_undone(&mut conn, second.id).await.unwrap();
    ActionLogRepo::mark_undone(&mut conn, first.id).await.unwrap();

    let redo = ActionLogRepo::last_redoable(&mut conn, user.id).await.unwrap().unwrap();
    assert_eq!(redo.id, first.id);

    ActionLogRepo::mark_redone(&mut conn, first.id).await.unwrap();
    let redo = ActionLogRepo::last_redoable(&mut conn, user.id).await.unwrap().unwrap();
    assert_eq!(redo.id, second.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clear_redo_only_removes_undone_entries_of_user(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (alice, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();
    let (bob, _) = UserRepo::get_or_create(&mut conn, "bob").await.unwrap();

    let kept = record_update(&mut conn, alice.id, 1).await;
    let undone = record_update(&mut conn, alice.id, 2).await;
    let bobs = record_update(&mut conn, bob.id, 3).await;
    ActionLogRepo::mark_undone(&mut conn, undone.id).await.unwrap();
    ActionLogRepo::mark_undone(&mut conn, bobs.id).await.unwrap();

    let removed = ActionLogRepo::clear_redo(&mut conn, alice.id).await.unwrap();
    assert_eq!(removed, 1);

    assert!(ActionLogRepo::find_by_id(&mut conn, undone.id).await.unwrap().is_none());
    assert!(ActionLogRepo::find_by_id(&mut conn, kept.id).await.unwrap().is_some());
    assert!(ActionLogRepo::last_redoable(&mut conn, alice.id).await.unwrap().is_none());

    let bob_redo = ActionLogRepo::last_redoable(&mut conn, bob.id).await.unwrap().unwrap();
    assert_eq!(bob_redo.id, bobs.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_for_user_newest_first(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let (user, _) = UserRepo::get_or_create(&mut conn, "alice").await.unwrap();

    for entity_id in 1..=3 {
        record_update(&mut conn, user.id, entity_id).await;
    }

    let entries = ActionLogRepo::list_for_user(&mut conn, user.id, 2).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].entity_id, Some(3));
    assert_eq!(entries[1].entity_id, Some(2));
}
