//! Route definitions for the `/todo-lists` resource.

use axum::routing::patch;
use axum::Router;

use crate::handlers::todo_lists;
use crate::state::AppState;

/// Routes mounted at `/todo-lists`. Lists are created under `/users`.
///
/// ```text
/// PATCH  /{id}    -> patch_todo_list
/// DELETE /{id}    -> delete_todo_list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        patch(todo_lists::patch_todo_list).delete(todo_lists::delete_todo_list),
    )
}
