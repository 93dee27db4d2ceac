//! Route definitions scoped to one user's board.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{todo_lists, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /{user_key}/board         -> get_board
/// POST   /{user_key}/todo-lists    -> create_todo_list
/// POST   /{user_key}/classify      -> classify
/// POST   /{user_key}/undo          -> undo
/// POST   /{user_key}/redo          -> redo
/// GET    /{user_key}/history       -> history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{user_key}/board", get(users::get_board))
        .route("/{user_key}/todo-lists", post(todo_lists::create_todo_list))
        .route("/{user_key}/classify", post(users::classify))
        .route("/{user_key}/undo", post(users::undo))
        .route("/{user_key}/redo", post(users::redo))
        .route("/{user_key}/history", get(users::history))
}
