//! Handlers scoped to one user's board: board view, classification,
//! undo/redo and the action history.

use axum::extract::{Path, Query, State};
use axum::Json;
use noteboard_core::board::clamp_history_limit;
use noteboard_db::models::action_log::ActionLog;
use noteboard_service::{classify_notes, Board, BoardService};
use serde::Serialize;

use crate::error::AppResult;
use crate::query::LimitParams;
use crate::response::{DataResponse, ReplayResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ClassifyResult {
    pub processed: usize,
}

/// GET /api/v1/users/{user_key}/board
///
/// Creates the user and the default lists on first visit.
pub async fn get_board(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
) -> AppResult<Json<DataResponse<Board>>> {
    let mut tx = state.pool.begin().await?;
    let board = BoardService::get_board(&mut tx, &user_key).await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: board }))
}

/// POST /api/v1/users/{user_key}/classify
///
/// Runs the classifier over every unprocessed note. Each note commits on
/// its own, so a failure part-way keeps earlier results.
pub async fn classify(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
) -> AppResult<Json<DataResponse<ClassifyResult>>> {
    let processed = classify_notes(&state.pool, state.classifier.as_ref(), &user_key).await?;

    tracing::debug!(user_key = %user_key, processed, "Classify handled");

    Ok(Json(DataResponse {
        data: ClassifyResult { processed },
    }))
}

/// POST /api/v1/users/{user_key}/undo
pub async fn undo(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
) -> AppResult<Json<DataResponse<ReplayResult>>> {
    let mut tx = state.pool.begin().await?;
    let ok = BoardService::undo(&mut tx, &user_key).await?;
    tx.commit().await?;

    Ok(Json(DataResponse {
        data: ReplayResult { ok },
    }))
}

/// POST /api/v1/users/{user_key}/redo
pub async fn redo(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
) -> AppResult<Json<DataResponse<ReplayResult>>> {
    let mut tx = state.pool.begin().await?;
    let ok = BoardService::redo(&mut tx, &user_key).await?;
    tx.commit().await?;

    Ok(Json(DataResponse {
        data: ReplayResult { ok },
    }))
}

/// GET /api/v1/users/{user_key}/history?limit=
///
/// Action log entries, newest first. Undone entries carry `undone_at`.
pub async fn history(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<ActionLog>>>> {
    let limit = clamp_history_limit(params.limit);

    let mut conn = state.pool.acquire().await?;
    let entries = BoardService::history(&mut conn, &user_key, limit).await?;

    Ok(Json(DataResponse { data: entries }))
}
