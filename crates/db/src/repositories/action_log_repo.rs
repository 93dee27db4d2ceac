//! Repository for the `action_logs` table.
//!
//! The log forms one linear undo stack per user. Entries with `undone_at`
//! set form the redo side; [`ActionLogRepo::clear_redo`] drops them before
//! every new mutation so history never branches.

use noteboard_core::types::DbId;
use sqlx::PgConnection;

use crate::models::action_log::{ActionLog, NewActionLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, action_type, entity_type, entity_id, before, after, \
    undone_at, created_at";

/// Provides append and undo/redo lookups for the action log.
pub struct ActionLogRepo;

impl ActionLogRepo {
    /// Append one entry. Snapshot shape is not validated.
    pub async fn record(
        conn: &mut PgConnection,
        input: &NewActionLog,
    ) -> Result<ActionLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO action_logs (user_id, action_type, entity_type, entity_id, before, after)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActionLog>(&query)
            .bind(input.user_id)
            .bind(input.action.as_str())
            .bind(input.entity.as_str())
            .bind(input.entity_id)
            .bind(&input.before)
            .bind(&input.after)
            .fetch_one(&mut *conn)
            .await
    }

    /// Delete every redo-eligible entry for the user.
    ///
    /// Returns the number of entries removed.
    pub async fn clear_redo(conn: &mut PgConnection, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM action_logs WHERE user_id = $1 AND undone_at IS NOT NULL")
                .bind(user_id)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected())
    }

    /// The highest-id entry for the user that is not undone.
    pub async fn last_undoable(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Option<ActionLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM action_logs
             WHERE user_id = $1 AND undone_at IS NULL
             ORDER BY id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ActionLog>(&query)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// The most recently undone entry for the user.
    ///
    /// Ties on `undone_at` resolve to the lower id: undo walks ids downward,
    /// so the lower id was undone last.
    pub async fn last_redoable(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Option<ActionLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM action_logs
             WHERE user_id = $1 AND undone_at IS NOT NULL
             ORDER BY undone_at DESC, id ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, ActionLog>(&query)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Move an entry to the undone state. Uses wall-clock time so several
    /// undos inside one transaction still order correctly.
    ///
    /// Returns `true` if the row was updated.
    pub async fn mark_undone(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE action_logs SET undone_at = clock_timestamp() WHERE id = $1")
                .bind(id)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move an entry back to the done state.
    ///
    /// Returns `true` if the row was updated.
    pub async fn mark_redone(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE action_logs SET undone_at = NULL WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find an entry by internal ID.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<ActionLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM action_logs WHERE id = $1");
        sqlx::query_as::<_, ActionLog>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List a user's entries newest first, capped at `limit`.
    pub async fn list_for_user(
        conn: &mut PgConnection,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActionLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM action_logs
             WHERE user_id = $1
             ORDER BY id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ActionLog>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&mut *conn)
            .await
    }
}
