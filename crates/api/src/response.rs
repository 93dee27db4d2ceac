//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Outcome of a mutation addressed by id.
///
/// `ok` is always `true` for a handled request; `applied` is `false` when
/// the target did not exist and nothing changed.
#[derive(Debug, Serialize)]
pub struct MutationResult {
    pub ok: bool,
    pub applied: bool,
}

impl MutationResult {
    pub fn new(applied: bool) -> Self {
        Self { ok: true, applied }
    }
}

/// Outcome of an undo or redo request.
#[derive(Debug, Serialize)]
pub struct ReplayResult {
    pub ok: bool,
}
