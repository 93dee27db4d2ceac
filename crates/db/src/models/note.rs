//! Note model and DTOs.

use noteboard_core::snapshot::NoteSnapshot;
use noteboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Note {
    pub id: DbId,
    pub user_id: DbId,
    pub device: Option<String>,
    pub text: String,
    pub geo: Option<serde_json::Value>,
    pub todo_list_id: Option<DbId>,
    pub pos_x: f64,
    pub pos_y: f64,
    pub is_processed_by_llm: bool,
    pub notify_by: Option<String>,
    pub notify_value: Option<serde_json::Value>,
    pub severity: String,
    pub tag: Option<String>,
    pub meta: serde_json::Value,
    pub is_done: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Note {
    /// Full field map recorded in the action log.
    pub fn snapshot(&self) -> NoteSnapshot {
        NoteSnapshot {
            id: self.id,
            user_id: self.user_id,
            device: self.device.clone(),
            text: self.text.clone(),
            geo: self.geo.clone(),
            todo_list_id: self.todo_list_id,
            pos_x: self.pos_x,
            pos_y: self.pos_y,
            is_processed_by_llm: self.is_processed_by_llm,
            notify_by: self.notify_by.clone(),
            notify_value: self.notify_value.clone(),
            severity: self.severity.clone(),
            tag: self.tag.clone(),
            meta: self.meta.clone(),
            is_done: self.is_done,
        }
    }
}

/// DTO for inserting a note. `None` fields take the column defaults.
#[derive(Debug, Clone, Default)]
pub struct CreateNote {
    pub user_id: DbId,
    pub device: Option<String>,
    pub text: String,
    pub geo: Option<serde_json::Value>,
    pub todo_list_id: Option<DbId>,
    pub pos_x: f64,
    pub pos_y: f64,
    pub severity: Option<String>,
    pub is_done: Option<bool>,
}

/// DTO for patching a note.
///
/// Plain `Option` fields are left unchanged when `None`. The nested
/// `Option<Option<_>>` fields distinguish "unchanged" (`None`) from
/// "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub text: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub is_processed_by_llm: Option<bool>,
    pub severity: Option<String>,
    pub meta: Option<serde_json::Value>,
    pub is_done: Option<bool>,
    pub device: Option<Option<String>>,
    pub geo: Option<Option<serde_json::Value>>,
    pub todo_list_id: Option<Option<DbId>>,
    pub tag: Option<Option<String>>,
    pub notify_by: Option<Option<String>>,
    pub notify_value: Option<Option<serde_json::Value>>,
}

impl NotePatch {
    /// A patch that overwrites every mutable field with the snapshot's value,
    /// clearing nullable columns the snapshot had empty.
    pub fn from_snapshot(snapshot: &NoteSnapshot) -> Self {
        Self {
            text: Some(snapshot.text.clone()),
            pos_x: Some(snapshot.pos_x),
            pos_y: Some(snapshot.pos_y),
            is_processed_by_llm: Some(snapshot.is_processed_by_llm),
            severity: Some(snapshot.severity.clone()),
            meta: Some(snapshot.meta.clone()),
            is_done: Some(snapshot.is_done),
            device: Some(snapshot.device.clone()),
            geo: Some(snapshot.geo.clone()),
            todo_list_id: Some(snapshot.todo_list_id),
            tag: Some(snapshot.tag.clone()),
            notify_by: Some(snapshot.notify_by.clone()),
            notify_value: Some(snapshot.notify_value.clone()),
        }
    }
}
