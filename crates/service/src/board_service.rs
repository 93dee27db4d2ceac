//! Logged board mutations and undo/redo.
//!
//! Each mutation follows the same sequence: read the current row (a missing
//! row is a silent no-op), mutate, capture the resulting row, clear the
//! owner's redo entries, then append one action log entry holding both
//! snapshots. Undo and redo replay those snapshots and never log.

use noteboard_core::board::{
    normalize_list_title, normalize_note_text, validate_user_key, Geo, Severity, MAX_BOARD_NOTES,
};
use noteboard_core::history::{ActionKind, EntityKind, ReplayDirection};
use noteboard_core::types::DbId;
use noteboard_db::models::action_log::{ActionLog, NewActionLog};
use noteboard_db::models::note::{CreateNote, Note, NotePatch};
use noteboard_db::models::todo_list::{CreateTodoList, TodoList, TodoListPatch};
use noteboard_db::models::user::User;
use noteboard_db::repositories::{ActionLogRepo, NoteRepo, TodoListRepo, UserRepo};
use serde::Serialize;
use sqlx::PgConnection;

use crate::error::BoardResult;
use crate::replay;

/// Input for [`BoardService::create_note`].
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub device: Option<String>,
    pub text: String,
    pub geo: Option<Geo>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub todo_list_id: Option<DbId>,
    pub severity: Option<Severity>,
    pub is_done: Option<bool>,
}

/// Input for [`BoardService::create_todo_list`].
#[derive(Debug, Clone, Default)]
pub struct NewTodoList {
    pub title: String,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// A user's whole board.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    pub user: User,
    /// Lists in creation order.
    pub lists: Vec<TodoList>,
    /// Notes newest first, capped at [`MAX_BOARD_NOTES`].
    pub notes: Vec<Note>,
}

/// Stateless entry point for board operations.
pub struct BoardService;

impl BoardService {
    /// Resolve a user by key, creating the user and the default lists on
    /// first contact.
    ///
    /// Defaults are seeded only together with the user row, so a board whose
    /// lists were all deleted stays empty.
    pub async fn ensure_user(conn: &mut PgConnection, user_key: &str) -> BoardResult<User> {
        validate_user_key(user_key)?;
        let (user, created) = UserRepo::get_or_create(conn, user_key).await?;
        if created {
            TodoListRepo::create_defaults(conn, user.id).await?;
            tracing::info!(user_id = user.id, "User created");
        }
        Ok(user)
    }

    pub async fn get_board(conn: &mut PgConnection, user_key: &str) -> BoardResult<Board> {
        let user = Self::ensure_user(conn, user_key).await?;
        let lists = TodoListRepo::list_by_user(conn, user.id).await?;
        let notes = NoteRepo::list_by_user(conn, user.id, MAX_BOARD_NOTES).await?;
        Ok(Board { user, lists, notes })
    }

    // -----------------------------------------------------------------------
    // Notes
    // -----------------------------------------------------------------------

    /// Create a note on the user's board. Text is trimmed and missing
    /// positions default to the origin.
    pub async fn create_note(
        conn: &mut PgConnection,
        user_key: &str,
        input: &NewNote,
    ) -> BoardResult<Note> {
        let user = Self::ensure_user(conn, user_key).await?;
        let text = normalize_note_text(&input.text)?;

        let note = NoteRepo::create(
            conn,
            &CreateNote {
                user_id: user.id,
                device: input.device.clone(),
                text,
                geo: input.geo.map(Geo::to_json),
                todo_list_id: input.todo_list_id,
                pos_x: input.pos_x.unwrap_or(0.0),
                pos_y: input.pos_y.unwrap_or(0.0),
                severity: input.severity.map(|s| s.as_str().to_string()),
                is_done: input.is_done,
            },
        )
        .await?;

        let after = serde_json::to_value(note.snapshot())?;
        Self::log_mutation(
            conn,
            NewActionLog {
                user_id: user.id,
                action: ActionKind::Create,
                entity: EntityKind::Note,
                entity_id: Some(note.id),
                before: None,
                after: Some(after),
            },
        )
        .await?;

        tracing::info!(user_id = user.id, note_id = note.id, "Note created");
        Ok(note)
    }

    /// Apply a partial update to a note.
    ///
    /// Returns `false` when the note does not exist.
    pub async fn patch_note(
        conn: &mut PgConnection,
        note_id: DbId,
        patch: &NotePatch,
    ) -> BoardResult<bool> {
        let Some(current) = NoteRepo::find_by_id(conn, note_id).await? else {
            tracing::debug!(note_id, "Patch skipped, note not found");
            return Ok(false);
        };

        let mut patch = patch.clone();
        if let Some(text) = patch.text.as_deref() {
            patch.text = Some(normalize_note_text(text)?);
        }

        let Some(updated) = NoteRepo::patch(conn, note_id, &patch).await? else {
            return Ok(false);
        };

        let before = serde_json::to_value(current.snapshot())?;
        let after = serde_json::to_value(updated.snapshot())?;
        Self::log_mutation(
            conn,
            NewActionLog {
                user_id: current.user_id,
                action: ActionKind::Update,
                entity: EntityKind::Note,
                entity_id: Some(note_id),
                before: Some(before),
                after: Some(after),
            },
        )
        .await?;

        tracing::info!(user_id = current.user_id, note_id, "Note updated");
        Ok(true)
    }

    /// Delete a note. Returns `false` when the note does not exist.
    pub async fn delete_note(conn: &mut PgConnection, note_id: DbId) -> BoardResult<bool> {
        let Some(current) = NoteRepo::find_by_id(conn, note_id).await? else {
            tracing::debug!(note_id, "Delete skipped, note not found");
            return Ok(false);
        };

        NoteRepo::delete(conn, note_id).await?;

        let before = serde_json::to_value(current.snapshot())?;
        Self::log_mutation(
            conn,
            NewActionLog {
                user_id: current.user_id,
                action: ActionKind::Delete,
                entity: EntityKind::Note,
                entity_id: Some(note_id),
                before: Some(before),
                after: None,
            },
        )
        .await?;

        tracing::info!(user_id = current.user_id, note_id, "Note deleted");
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Todo lists
    // -----------------------------------------------------------------------

    pub async fn create_todo_list(
        conn: &mut PgConnection,
        user_key: &str,
        input: &NewTodoList,
    ) -> BoardResult<TodoList> {
        let user = Self::ensure_user(conn, user_key).await?;
        let title = normalize_list_title(&input.title)?;

        let list = TodoListRepo::create(
            conn,
            &CreateTodoList {
                user_id: user.id,
                title,
                pos_x: input.pos_x,
                pos_y: input.pos_y,
                width: input.width,
                height: input.height,
            },
        )
        .await?;

        let after = serde_json::to_value(list.snapshot())?;
        Self::log_mutation(
            conn,
            NewActionLog {
                user_id: user.id,
                action: ActionKind::Create,
                entity: EntityKind::TodoList,
                entity_id: Some(list.id),
                before: None,
                after: Some(after),
            },
        )
        .await?;

        tracing::info!(user_id = user.id, todo_list_id = list.id, "Todo list created");
        Ok(list)
    }

    /// Apply a partial update to a list.
    ///
    /// Returns `false` when the list does not exist.
    pub async fn patch_todo_list(
        conn: &mut PgConnection,
        list_id: DbId,
        patch: &TodoListPatch,
    ) -> BoardResult<bool> {
        let Some(current) = TodoListRepo::find_by_id(conn, list_id).await? else {
            tracing::debug!(todo_list_id = list_id, "Patch skipped, todo list not found");
            return Ok(false);
        };

        let mut patch = patch.clone();
        if let Some(title) = patch.title.as_deref() {
            patch.title = Some(normalize_list_title(title)?);
        }

        let Some(updated) = TodoListRepo::patch(conn, list_id, &patch).await? else {
            return Ok(false);
        };

        let before = serde_json::to_value(current.snapshot())?;
        let after = serde_json::to_value(updated.snapshot())?;
        Self::log_mutation(
            conn,
            NewActionLog {
                user_id: current.user_id,
                action: ActionKind::Update,
                entity: EntityKind::TodoList,
                entity_id: Some(list_id),
                before: Some(before),
                after: Some(after),
            },
        )
        .await?;

        tracing::info!(user_id = current.user_id, todo_list_id = list_id, "Todo list updated");
        Ok(true)
    }

    /// Delete a list. Its notes stay on the board, unfiled.
    ///
    /// Returns `false` when the list does not exist.
    pub async fn delete_todo_list(conn: &mut PgConnection, list_id: DbId) -> BoardResult<bool> {
        let Some(current) = TodoListRepo::find_by_id(conn, list_id).await? else {
            tracing::debug!(todo_list_id = list_id, "Delete skipped, todo list not found");
            return Ok(false);
        };

        TodoListRepo::delete(conn, list_id).await?;

        let before = serde_json::to_value(current.snapshot())?;
        Self::log_mutation(
            conn,
            NewActionLog {
                user_id: current.user_id,
                action: ActionKind::Delete,
                entity: EntityKind::TodoList,
                entity_id: Some(list_id),
                before: Some(before),
                after: None,
            },
        )
        .await?;

        tracing::info!(user_id = current.user_id, todo_list_id = list_id, "Todo list deleted");
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Reverse the user's most recent not-undone action.
    ///
    /// Returns `false` when the user is unknown or has nothing to undo.
    /// Never creates the user.
    pub async fn undo(conn: &mut PgConnection, user_key: &str) -> BoardResult<bool> {
        Self::step(conn, user_key, ReplayDirection::Undo).await
    }

    /// Re-apply the user's most recently undone action.
    ///
    /// Returns `false` when the user is unknown or has nothing to redo.
    pub async fn redo(conn: &mut PgConnection, user_key: &str) -> BoardResult<bool> {
        Self::step(conn, user_key, ReplayDirection::Redo).await
    }

    /// The user's action log, newest first. Unknown users have no history.
    pub async fn history(
        conn: &mut PgConnection,
        user_key: &str,
        limit: i64,
    ) -> BoardResult<Vec<ActionLog>> {
        let Some(user) = UserRepo::find_by_key(conn, user_key).await? else {
            return Ok(Vec::new());
        };
        Ok(ActionLogRepo::list_for_user(conn, user.id, limit).await?)
    }

    async fn step(
        conn: &mut PgConnection,
        user_key: &str,
        direction: ReplayDirection,
    ) -> BoardResult<bool> {
        let Some(user) = UserRepo::find_by_key(conn, user_key).await? else {
            tracing::debug!(user_key, ?direction, "Replay skipped, unknown user");
            return Ok(false);
        };

        let entry = match direction {
            ReplayDirection::Undo => ActionLogRepo::last_undoable(conn, user.id).await?,
            ReplayDirection::Redo => ActionLogRepo::last_redoable(conn, user.id).await?,
        };
        let Some(entry) = entry else {
            tracing::debug!(user_id = user.id, ?direction, "Nothing to replay");
            return Ok(false);
        };

        replay::apply(conn, &entry, direction).await?;

        match direction {
            ReplayDirection::Undo => ActionLogRepo::mark_undone(conn, entry.id).await?,
            ReplayDirection::Redo => ActionLogRepo::mark_redone(conn, entry.id).await?,
        };

        tracing::info!(
            user_id = user.id,
            action_id = entry.id,
            action = %entry.action_type,
            entity = %entry.entity_type,
            entity_id = ?entry.entity_id,
            ?direction,
            "Action replayed",
        );
        Ok(true)
    }

    /// Drop the owner's redo entries, then append the new entry.
    async fn log_mutation(conn: &mut PgConnection, entry: NewActionLog) -> BoardResult<()> {
        let cleared = ActionLogRepo::clear_redo(conn, entry.user_id).await?;
        if cleared > 0 {
            tracing::debug!(user_id = entry.user_id, cleared, "Redo history cleared");
        }
        let logged = ActionLogRepo::record(conn, &entry).await?;
        tracing::debug!(
            user_id = entry.user_id,
            action_id = logged.id,
            action = %entry.action,
            entity = %entry.entity,
            "Action recorded",
        );
        Ok(())
    }
}
