//! Repository for the `users` table.

use sqlx::PgConnection;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_key, created_at";

/// Provides lookup and lazy creation of users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by key (case-sensitive). Never creates.
    pub async fn find_by_key(
        conn: &mut PgConnection,
        user_key: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE user_key = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(user_key)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Return the user with this key, inserting it first if absent.
    ///
    /// The flag is `true` only when this call inserted the row. A concurrent
    /// insert of the same key makes `DO NOTHING` wait for it, after which the
    /// committed row is read back.
    pub async fn get_or_create(
        conn: &mut PgConnection,
        user_key: &str,
    ) -> Result<(User, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO users (user_key) VALUES ($1)
             ON CONFLICT (user_key) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, User>(&query)
            .bind(user_key)
            .fetch_optional(&mut *conn)
            .await?;
        if let Some(user) = inserted {
            return Ok((user, true));
        }

        let user = Self::find_by_key(conn, user_key)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok((user, false))
    }
}
