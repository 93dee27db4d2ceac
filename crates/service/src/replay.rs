//! Executes one action log entry in the undo or redo direction.

use noteboard_core::history::{plan_replay, EntityKind, ReplayDirection, ReplayStep};
use noteboard_core::snapshot::{NoteSnapshot, TodoListSnapshot};
use noteboard_core::types::DbId;
use noteboard_db::models::action_log::ActionLog;
use noteboard_db::models::note::NotePatch;
use noteboard_db::models::todo_list::TodoListPatch;
use noteboard_db::repositories::{NoteRepo, TodoListRepo};
use serde_json::Value;
use sqlx::PgConnection;

use crate::error::BoardResult;

/// Apply the snapshot `direction` selects from `entry`.
pub(crate) async fn apply(
    conn: &mut PgConnection,
    entry: &ActionLog,
    direction: ReplayDirection,
) -> BoardResult<()> {
    let action = entry.action_kind()?;
    let entity = entry.entity_kind()?;
    let payload = direction.select(entry.before.as_ref(), entry.after.as_ref());

    match (plan_replay(action, direction, entry.entity_id, payload.is_some()), payload) {
        (ReplayStep::Delete(id), _) => delete(conn, entity, id).await,
        (ReplayStep::Patch(id), Some(payload)) => patch(conn, entity, id, payload).await,
        (ReplayStep::Upsert, Some(payload)) => upsert(conn, entity, payload).await,
        _ => {
            tracing::debug!(action_id = entry.id, ?direction, "Replay step skipped");
            Ok(())
        }
    }
}

async fn delete(conn: &mut PgConnection, entity: EntityKind, id: DbId) -> BoardResult<()> {
    match entity {
        EntityKind::Note => NoteRepo::delete(conn, id).await?,
        EntityKind::TodoList => TodoListRepo::delete(conn, id).await?,
    };
    Ok(())
}

async fn patch(
    conn: &mut PgConnection,
    entity: EntityKind,
    id: DbId,
    payload: &Value,
) -> BoardResult<()> {
    match entity {
        EntityKind::Note => {
            let snapshot: NoteSnapshot = serde_json::from_value(payload.clone())?;
            NoteRepo::patch(conn, id, &NotePatch::from_snapshot(&snapshot)).await?;
        }
        EntityKind::TodoList => {
            let snapshot: TodoListSnapshot = serde_json::from_value(payload.clone())?;
            TodoListRepo::patch(conn, id, &TodoListPatch::from_snapshot(&snapshot)).await?;
        }
    }
    Ok(())
}

/// Overwrite the row named by the snapshot's id, recreating it with that id
/// if it is gone.
async fn upsert(conn: &mut PgConnection, entity: EntityKind, payload: &Value) -> BoardResult<()> {
    match entity {
        EntityKind::Note => {
            let snapshot: NoteSnapshot = serde_json::from_value(payload.clone())?;
            if NoteRepo::find_by_id(conn, snapshot.id).await?.is_some() {
                NoteRepo::patch(conn, snapshot.id, &NotePatch::from_snapshot(&snapshot)).await?;
            } else {
                NoteRepo::create_from_snapshot(conn, &snapshot).await?;
            }
        }
        EntityKind::TodoList => {
            let snapshot: TodoListSnapshot = serde_json::from_value(payload.clone())?;
            if TodoListRepo::find_by_id(conn, snapshot.id).await?.is_some() {
                TodoListRepo::patch(conn, snapshot.id, &TodoListPatch::from_snapshot(&snapshot))
                    .await?;
            } else {
                TodoListRepo::create_from_snapshot(conn, &snapshot).await?;
            }
        }
    }
    Ok(())
}
