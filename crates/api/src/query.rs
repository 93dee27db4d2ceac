//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for listings. Clamped by the handler.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
