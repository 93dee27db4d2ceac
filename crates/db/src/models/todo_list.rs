//! Todo list frame model and DTOs.

use noteboard_core::snapshot::TodoListSnapshot;
use noteboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `todo_lists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TodoList {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub pos_x: f64,
    pub pos_y: f64,
    pub width: f64,
    pub height: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TodoList {
    /// Full field map recorded in the action log.
    pub fn snapshot(&self) -> TodoListSnapshot {
        TodoListSnapshot {
            id: self.id,
            user_id: self.user_id,
            title: self.title.clone(),
            pos_x: self.pos_x,
            pos_y: self.pos_y,
            width: self.width,
            height: self.height,
        }
    }
}

/// DTO for creating a todo list. Omitted geometry uses the column defaults.
#[derive(Debug, Clone)]
pub struct CreateTodoList {
    pub user_id: DbId,
    pub title: String,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// DTO for patching a todo list. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoListPatch {
    pub title: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl TodoListPatch {
    /// A patch that overwrites every mutable field with the snapshot's value.
    pub fn from_snapshot(snapshot: &TodoListSnapshot) -> Self {
        Self {
            title: Some(snapshot.title.clone()),
            pos_x: Some(snapshot.pos_x),
            pos_y: Some(snapshot.pos_y),
            width: Some(snapshot.width),
            height: Some(snapshot.height),
        }
    }
}
