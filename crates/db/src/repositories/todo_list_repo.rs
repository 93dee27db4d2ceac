//! Repository for the `todo_lists` table.

use noteboard_core::board::DEFAULT_LISTS;
use noteboard_core::snapshot::TodoListSnapshot;
use noteboard_core::types::DbId;
use sqlx::PgConnection;

use crate::models::todo_list::{CreateTodoList, TodoList, TodoListPatch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, pos_x, pos_y, width, height, created_at, updated_at";

/// Provides CRUD operations for todo list frames.
pub struct TodoListRepo;

impl TodoListRepo {
    /// Insert a new list, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateTodoList,
    ) -> Result<TodoList, sqlx::Error> {
        let query = format!(
            "INSERT INTO todo_lists (user_id, title, pos_x, pos_y, width, height)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0), COALESCE($5, 520), COALESCE($6, 360))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoList>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .bind(input.width)
            .bind(input.height)
            .fetch_one(&mut *conn)
            .await
    }

    /// Re-insert a list from a snapshot, keeping its original ID.
    pub async fn create_from_snapshot(
        conn: &mut PgConnection,
        snapshot: &TodoListSnapshot,
    ) -> Result<TodoList, sqlx::Error> {
        let query = format!(
            "INSERT INTO todo_lists (id, user_id, title, pos_x, pos_y, width, height)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoList>(&query)
            .bind(snapshot.id)
            .bind(snapshot.user_id)
            .bind(&snapshot.title)
            .bind(snapshot.pos_x)
            .bind(snapshot.pos_y)
            .bind(snapshot.width)
            .bind(snapshot.height)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a list by internal ID.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<TodoList>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todo_lists WHERE id = $1");
        sqlx::query_as::<_, TodoList>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List all of a user's lists in creation order.
    pub async fn list_by_user(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Vec<TodoList>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todo_lists WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, TodoList>(&query)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Insert the default frames for a freshly created user.
    pub async fn create_defaults(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<(), sqlx::Error> {
        for frame in DEFAULT_LISTS {
            sqlx::query(
                "INSERT INTO todo_lists (user_id, title, pos_x, pos_y) VALUES ($1, $2, $3, $4)",
            )
            .bind(user_id)
            .bind(frame.title)
            .bind(frame.pos_x)
            .bind(frame.pos_y)
            .execute(&mut *conn)
            .await?;
        }

        tracing::debug!(user_id, count = DEFAULT_LISTS.len(), "Default todo lists created");
        Ok(())
    }

    /// Patch a list. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn patch(
        conn: &mut PgConnection,
        id: DbId,
        input: &TodoListPatch,
    ) -> Result<Option<TodoList>, sqlx::Error> {
        let query = format!(
            "UPDATE todo_lists SET
                title = COALESCE($2, title),
                pos_x = COALESCE($3, pos_x),
                pos_y = COALESCE($4, pos_y),
                width = COALESCE($5, width),
                height = COALESCE($6, height)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoList>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .bind(input.width)
            .bind(input.height)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a list by ID. Notes filed under it become unfiled.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todo_lists WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
