use std::sync::Arc;

use noteboard_core::classifier::NoteClassifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: noteboard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Note classifier used by the classify endpoint.
    pub classifier: Arc<dyn NoteClassifier>,
}
