//! Action log entry model and DTOs.

use noteboard_core::error::CoreError;
use noteboard_core::history::{ActionKind, EntityKind};
use noteboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `action_logs` table.
///
/// `undone_at` is set while the entry sits in the undone (redo-eligible)
/// state and cleared again by redo.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionLog {
    pub id: DbId,
    pub user_id: DbId,
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub before: Option<serde_json::Value>,
    pub after: Option<serde_json::Value>,
    pub undone_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl ActionLog {
    pub fn action_kind(&self) -> Result<ActionKind, CoreError> {
        self.action_type.parse()
    }

    pub fn entity_kind(&self) -> Result<EntityKind, CoreError> {
        self.entity_type.parse()
    }

    pub fn is_undone(&self) -> bool {
        self.undone_at.is_some()
    }
}

/// DTO for appending an entry.
#[derive(Debug, Clone)]
pub struct NewActionLog {
    pub user_id: DbId,
    pub action: ActionKind,
    pub entity: EntityKind,
    pub entity_id: Option<DbId>,
    pub before: Option<serde_json::Value>,
    pub after: Option<serde_json::Value>,
}
