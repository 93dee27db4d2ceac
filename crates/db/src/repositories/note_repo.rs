//! Repository for the `notes` table.

use noteboard_core::snapshot::NoteSnapshot;
use noteboard_core::types::DbId;
use sqlx::PgConnection;

use crate::models::note::{CreateNote, Note, NotePatch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, device, text, geo, todo_list_id, pos_x, pos_y, \
    is_processed_by_llm, notify_by, notify_value, severity, tag, meta, is_done, \
    created_at, updated_at";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a new note, returning the created row.
    ///
    /// A `todo_list_id` that does not name one of the owner's lists is
    /// stored as NULL.
    pub async fn create(conn: &mut PgConnection, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes
                (user_id, device, text, geo, todo_list_id, pos_x, pos_y, severity, is_done)
             VALUES ($1, $2, $3, $4,
                     (SELECT id FROM todo_lists WHERE id = $5 AND user_id = $1),
                     $6, $7, COALESCE($8, 'normal'), COALESCE($9, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(input.user_id)
            .bind(&input.device)
            .bind(&input.text)
            .bind(&input.geo)
            .bind(input.todo_list_id)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .bind(&input.severity)
            .bind(input.is_done)
            .fetch_one(&mut *conn)
            .await
    }

    /// Re-insert a note from a snapshot, keeping its original ID.
    ///
    /// A `todo_list_id` that no longer exists is stored as NULL.
    pub async fn create_from_snapshot(
        conn: &mut PgConnection,
        snapshot: &NoteSnapshot,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes
                (id, user_id, device, text, geo, todo_list_id, pos_x, pos_y,
                 is_processed_by_llm, notify_by, notify_value, severity, tag, meta, is_done)
             VALUES ($1, $2, $3, $4, $5,
                     (SELECT id FROM todo_lists WHERE id = $6 AND user_id = $2),
                     $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(snapshot.id)
            .bind(snapshot.user_id)
            .bind(&snapshot.device)
            .bind(&snapshot.text)
            .bind(&snapshot.geo)
            .bind(snapshot.todo_list_id)
            .bind(snapshot.pos_x)
            .bind(snapshot.pos_y)
            .bind(snapshot.is_processed_by_llm)
            .bind(&snapshot.notify_by)
            .bind(&snapshot.notify_value)
            .bind(&snapshot.severity)
            .bind(&snapshot.tag)
            .bind(&snapshot.meta)
            .bind(snapshot.is_done)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a note by internal ID.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List a user's notes, newest first, capped at `limit`.
    pub async fn list_by_user(
        conn: &mut PgConnection,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&mut *conn)
            .await
    }

    /// List a user's notes the classifier has not seen yet, newest first.
    pub async fn list_unprocessed_by_user(
        conn: &mut PgConnection,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE user_id = $1 AND is_processed_by_llm = false
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&mut *conn)
            .await
    }

    /// Patch a note.
    ///
    /// Plain fields use `COALESCE` (unchanged when `None`). Clearable fields
    /// bind a "was supplied" flag next to the value, so `Some(None)` writes
    /// NULL while `None` keeps the column. A list id outside the note
    /// owner's board unfiles the note.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn patch(
        conn: &mut PgConnection,
        id: DbId,
        input: &NotePatch,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                text = COALESCE($2, text),
                pos_x = COALESCE($3, pos_x),
                pos_y = COALESCE($4, pos_y),
                is_processed_by_llm = COALESCE($5, is_processed_by_llm),
                severity = COALESCE($6, severity),
                meta = COALESCE($7, meta),
                is_done = COALESCE($8, is_done),
                device = CASE WHEN $9 THEN $10 ELSE device END,
                geo = CASE WHEN $11 THEN $12 ELSE geo END,
                todo_list_id = CASE WHEN $13
                    THEN (SELECT l.id FROM todo_lists l
                          WHERE l.id = $14 AND l.user_id = notes.user_id)
                    ELSE todo_list_id END,
                tag = CASE WHEN $15 THEN $16 ELSE tag END,
                notify_by = CASE WHEN $17 THEN $18 ELSE notify_by END,
                notify_value = CASE WHEN $19 THEN $20 ELSE notify_value END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );

        let (set_device, device) = clearable(&input.device);
        let (set_geo, geo) = clearable(&input.geo);
        let (set_list, todo_list_id) = clearable(&input.todo_list_id);
        let (set_tag, tag) = clearable(&input.tag);
        let (set_notify_by, notify_by) = clearable(&input.notify_by);
        let (set_notify_value, notify_value) = clearable(&input.notify_value);

        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(&input.text)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .bind(input.is_processed_by_llm)
            .bind(&input.severity)
            .bind(&input.meta)
            .bind(input.is_done)
            .bind(set_device)
            .bind(device)
            .bind(set_geo)
            .bind(geo)
            .bind(set_list)
            .bind(todo_list_id)
            .bind(set_tag)
            .bind(tag)
            .bind(set_notify_by)
            .bind(notify_by)
            .bind(set_notify_value)
            .bind(notify_value)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Permanently delete a note by ID. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Split a clearable patch field into `(supplied, value)` bind parameters.
fn clearable<T>(field: &Option<Option<T>>) -> (bool, Option<&T>) {
    match field {
        Some(value) => (true, value.as_ref()),
        None => (false, None),
    }
}
