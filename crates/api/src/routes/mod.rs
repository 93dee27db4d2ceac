pub mod health;
pub mod notes;
pub mod todo_lists;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /notes                                  create (POST)
/// /notes/{id}                             patch, delete
///
/// /todo-lists/{id}                        patch, delete
///
/// /users/{user_key}/board                 board view (GET)
/// /users/{user_key}/todo-lists            create list (POST)
/// /users/{user_key}/classify              classify unprocessed notes (POST)
/// /users/{user_key}/undo                  undo last action (POST)
/// /users/{user_key}/redo                  redo last undone action (POST)
/// /users/{user_key}/history               action log (GET, ?limit=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/notes", notes::router())
        .nest("/todo-lists", todo_lists::router())
        .nest("/users", users::router())
}
