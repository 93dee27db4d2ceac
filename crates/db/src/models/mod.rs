//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - A patch DTO (all `Option` fields) for partial updates

pub mod action_log;
pub mod note;
pub mod todo_list;
pub mod user;
