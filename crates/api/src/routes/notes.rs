//! Route definitions for the `/notes` resource.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes`.
///
/// ```text
/// POST   /        -> create_note
/// PATCH  /{id}    -> patch_note
/// DELETE /{id}    -> delete_note
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(notes::create_note))
        .route("/{id}", patch(notes::patch_note).delete(notes::delete_note))
}
