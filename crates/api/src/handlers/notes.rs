//! Handlers for the `/notes` resource.
//!
//! Every mutation runs in one transaction through [`BoardService`], so the
//! change and its action log entry commit together.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use noteboard_core::board::{
    Geo, NotifyBy, Severity, MAX_DEVICE_LENGTH, MAX_NOTE_TEXT_LENGTH, MAX_USER_KEY_LENGTH,
};
use noteboard_core::patch::nullable;
use noteboard_core::types::DbId;
use noteboard_db::models::note::NotePatch;
use noteboard_service::{BoardService, NewNote};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::response::{DataResponse, MutationResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /notes`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateNoteRequest {
    /// Key of the board owner; the user is created on first use.
    #[validate(length(min = 1, max = MAX_USER_KEY_LENGTH))]
    pub user: String,
    #[validate(length(max = MAX_DEVICE_LENGTH))]
    pub device: Option<String>,
    #[validate(length(min = 1, max = MAX_NOTE_TEXT_LENGTH))]
    pub text: String,
    #[validate(nested)]
    pub geo: Option<Geo>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub todo_list_id: Option<DbId>,
    pub severity: Option<Severity>,
    pub is_done: Option<bool>,
}

/// Body of `PATCH /notes/{id}`.
///
/// Absent keys leave the field unchanged. For `todo_list_id`, `tag`,
/// `notify_by` and `notify_value` an explicit `null` clears the field.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PatchNoteRequest {
    #[validate(length(min = 1, max = MAX_NOTE_TEXT_LENGTH))]
    pub text: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub todo_list_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub tag: Option<Option<String>>,
    pub severity: Option<Severity>,
    #[serde(default, deserialize_with = "nullable")]
    pub notify_by: Option<Option<NotifyBy>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notify_value: Option<Option<serde_json::Value>>,
    pub is_processed_by_llm: Option<bool>,
    pub is_done: Option<bool>,
}

impl PatchNoteRequest {
    fn into_patch(self) -> NotePatch {
        NotePatch {
            text: self.text,
            pos_x: self.pos_x,
            pos_y: self.pos_y,
            is_processed_by_llm: self.is_processed_by_llm,
            severity: self.severity.map(|s| s.as_str().to_string()),
            is_done: self.is_done,
            todo_list_id: self.todo_list_id,
            tag: self.tag,
            notify_by: self
                .notify_by
                .map(|kind| kind.map(|k| k.as_str().to_string())),
            notify_value: self.notify_value,
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteCreated {
    pub note_id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/notes
///
/// Create a note on the named user's board. Returns 201 with the new id.
pub async fn create_note(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateNoteRequest>,
) -> AppResult<impl IntoResponse> {
    let new_note = NewNote {
        device: input.device,
        text: input.text,
        geo: input.geo,
        pos_x: input.pos_x,
        pos_y: input.pos_y,
        todo_list_id: input.todo_list_id,
        severity: input.severity,
        is_done: input.is_done,
    };

    let mut tx = state.pool.begin().await?;
    let note = BoardService::create_note(&mut tx, &input.user, &new_note).await?;
    tx.commit().await?;

    tracing::debug!(note_id = note.id, user_id = note.user_id, "Note created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: NoteCreated { note_id: note.id },
        }),
    ))
}

/// PATCH /api/v1/notes/{id}
///
/// Apply a partial update. A missing note is not an error: the response
/// reports `applied: false`.
pub async fn patch_note(
    State(state): State<AppState>,
    Path(note_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<PatchNoteRequest>,
) -> AppResult<Json<DataResponse<MutationResult>>> {
    let patch = input.into_patch();

    let mut tx = state.pool.begin().await?;
    let applied = BoardService::patch_note(&mut tx, note_id, &patch).await?;
    tx.commit().await?;

    tracing::debug!(note_id, applied, "Note patch handled");

    Ok(Json(DataResponse {
        data: MutationResult::new(applied),
    }))
}

/// DELETE /api/v1/notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    Path(note_id): Path<DbId>,
) -> AppResult<Json<DataResponse<MutationResult>>> {
    let mut tx = state.pool.begin().await?;
    let applied = BoardService::delete_note(&mut tx, note_id).await?;
    tx.commit().await?;

    tracing::debug!(note_id, applied, "Note delete handled");

    Ok(Json(DataResponse {
        data: MutationResult::new(applied),
    }))
}
