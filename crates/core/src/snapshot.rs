//! Snapshot shapes stored in the `before` / `after` columns of the action log.
//!
//! A snapshot carries the entity's full field set, including its own `id`,
//! so that reversing a create or delete can recreate the row with its
//! original identity. Missing keys fall back to the column defaults, which
//! keeps snapshots written before a column existed readable.

use serde::{Deserialize, Serialize};

use crate::board::{DEFAULT_LIST_HEIGHT, DEFAULT_LIST_WIDTH};
use crate::types::DbId;

/// Full state of a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteSnapshot {
    pub id: DbId,
    pub user_id: DbId,
    #[serde(default)]
    pub device: Option<String>,
    pub text: String,
    #[serde(default)]
    pub geo: Option<serde_json::Value>,
    #[serde(default)]
    pub todo_list_id: Option<DbId>,
    #[serde(default)]
    pub pos_x: f64,
    #[serde(default)]
    pub pos_y: f64,
    #[serde(default)]
    pub is_processed_by_llm: bool,
    #[serde(default)]
    pub notify_by: Option<String>,
    #[serde(default)]
    pub notify_value: Option<serde_json::Value>,
    #[serde(default = "default_severity")]
    pub severity: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default = "empty_object")]
    pub meta: serde_json::Value,
    #[serde(default)]
    pub is_done: bool,
}

/// Full state of a todo list frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoListSnapshot {
    pub id: DbId,
    pub user_id: DbId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pos_x: f64,
    #[serde(default)]
    pub pos_y: f64,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

fn default_severity() -> String {
    crate::board::Severity::default().as_str().to_string()
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn default_width() -> f64 {
    DEFAULT_LIST_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_LIST_HEIGHT
}
