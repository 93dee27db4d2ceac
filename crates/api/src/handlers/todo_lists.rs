//! Handlers for todo list frames.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use noteboard_core::board::MAX_LIST_TITLE_LENGTH;
use noteboard_core::types::DbId;
use noteboard_db::models::todo_list::TodoListPatch;
use noteboard_service::{BoardService, NewTodoList};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::response::{DataResponse, MutationResult};
use crate::state::AppState;

/// Body of `POST /users/{user_key}/todo-lists`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoListRequest {
    #[validate(length(min = 1, max = MAX_LIST_TITLE_LENGTH))]
    pub title: String,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    #[validate(range(min = 1.0))]
    pub width: Option<f64>,
    #[validate(range(min = 1.0))]
    pub height: Option<f64>,
}

/// Body of `PATCH /todo-lists/{id}`. Absent keys leave the field unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PatchTodoListRequest {
    #[validate(length(min = 1, max = MAX_LIST_TITLE_LENGTH))]
    pub title: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    #[validate(range(min = 1.0))]
    pub width: Option<f64>,
    #[validate(range(min = 1.0))]
    pub height: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TodoListCreated {
    pub todo_list_id: DbId,
}

/// POST /api/v1/users/{user_key}/todo-lists
pub async fn create_todo_list(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
    ValidatedJson(input): ValidatedJson<CreateTodoListRequest>,
) -> AppResult<impl IntoResponse> {
    let new_list = NewTodoList {
        title: input.title,
        pos_x: input.pos_x,
        pos_y: input.pos_y,
        width: input.width,
        height: input.height,
    };

    let mut tx = state.pool.begin().await?;
    let list = BoardService::create_todo_list(&mut tx, &user_key, &new_list).await?;
    tx.commit().await?;

    tracing::debug!(todo_list_id = list.id, user_id = list.user_id, "Todo list created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TodoListCreated {
                todo_list_id: list.id,
            },
        }),
    ))
}

/// PATCH /api/v1/todo-lists/{id}
pub async fn patch_todo_list(
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<PatchTodoListRequest>,
) -> AppResult<Json<DataResponse<MutationResult>>> {
    let patch = TodoListPatch {
        title: input.title,
        pos_x: input.pos_x,
        pos_y: input.pos_y,
        width: input.width,
        height: input.height,
    };

    let mut tx = state.pool.begin().await?;
    let applied = BoardService::patch_todo_list(&mut tx, list_id, &patch).await?;
    tx.commit().await?;

    tracing::debug!(todo_list_id = list_id, applied, "Todo list patch handled");

    Ok(Json(DataResponse {
        data: MutationResult::new(applied),
    }))
}

/// DELETE /api/v1/todo-lists/{id}
///
/// Notes filed under the list stay on the board, unfiled.
pub async fn delete_todo_list(
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
) -> AppResult<Json<DataResponse<MutationResult>>> {
    let mut tx = state.pool.begin().await?;
    let applied = BoardService::delete_todo_list(&mut tx, list_id).await?;
    tx.commit().await?;

    tracing::debug!(todo_list_id = list_id, applied, "Todo list delete handled");

    Ok(Json(DataResponse {
        data: MutationResult::new(applied),
    }))
}
