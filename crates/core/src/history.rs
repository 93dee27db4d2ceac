//! Action log kinds and the undo/redo replay table.
//!
//! Every logged mutation stores a `before` and `after` snapshot. Undo
//! replays `before`, redo replays `after`; [`plan_replay`] decides which
//! repository primitive carries the replay for a given entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Entity types recorded in the action log.
pub const VALID_ENTITY_TYPES: &[&str] = &["note", "todo_list"];

/// Action types recorded in the action log.
pub const VALID_ACTION_TYPES: &[&str] = &["create", "update", "delete"];

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// What a logged mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Create,
    Update,
    Delete,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Create => "create",
            ActionKind::Update => "update",
            ActionKind::Delete => "delete",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(ActionKind::Create),
            "update" => Ok(ActionKind::Update),
            "delete" => Ok(ActionKind::Delete),
            other => Err(CoreError::Validation(format!(
                "Invalid action type '{other}'. Must be one of: {}",
                VALID_ACTION_TYPES.join(", ")
            ))),
        }
    }
}

/// Which table a logged mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Note,
    TodoList,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Note => "note",
            EntityKind::TodoList => "todo_list",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(EntityKind::Note),
            "todo_list" => Ok(EntityKind::TodoList),
            other => Err(CoreError::Validation(format!(
                "Invalid entity type '{other}'. Must be one of: {}",
                VALID_ENTITY_TYPES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Replay planning
// ---------------------------------------------------------------------------

/// Direction a log entry is replayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayDirection {
    /// Restore the `before` snapshot.
    Undo,
    /// Restore the `after` snapshot.
    Redo,
}

impl ReplayDirection {
    /// Pick the snapshot this direction restores.
    pub fn select<'a, T>(self, before: Option<&'a T>, after: Option<&'a T>) -> Option<&'a T> {
        match self {
            ReplayDirection::Undo => before,
            ReplayDirection::Redo => after,
        }
    }
}

/// Repository primitive chosen for one replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStep {
    /// Delete the entity with this id.
    Delete(DbId),
    /// Patch the entity if the snapshot's id exists, otherwise recreate it
    /// from the snapshot with its original id.
    Upsert,
    /// Overwrite the entity's fields with the snapshot.
    Patch(DbId),
    /// Nothing to apply (missing id or snapshot).
    Skip,
}

/// Decide how to replay an entry.
///
/// The table is the same for notes and todo lists:
///
/// | action | undo            | redo            |
/// |--------|-----------------|-----------------|
/// | create | delete          | upsert          |
/// | delete | upsert          | delete          |
/// | update | patch           | patch           |
pub fn plan_replay(
    action: ActionKind,
    direction: ReplayDirection,
    entity_id: Option<DbId>,
    has_payload: bool,
) -> ReplayStep {
    let removes = matches!(
        (action, direction),
        (ActionKind::Create, ReplayDirection::Undo) | (ActionKind::Delete, ReplayDirection::Redo)
    );

    match action {
        ActionKind::Update => match entity_id {
            Some(id) if has_payload => ReplayStep::Patch(id),
            _ => ReplayStep::Skip,
        },
        _ if removes => entity_id.map_or(ReplayStep::Skip, ReplayStep::Delete),
        _ if has_payload => ReplayStep::Upsert,
        _ => ReplayStep::Skip,
    }
}
