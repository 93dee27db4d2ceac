//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&mut PgConnection` as the first argument, so callers pick
//! the unit of work: a pooled connection or an open transaction.

pub mod action_log_repo;
pub mod note_repo;
pub mod todo_list_repo;
pub mod user_repo;

pub use action_log_repo::ActionLogRepo;
pub use note_repo::NoteRepo;
pub use todo_list_repo::TodoListRepo;
pub use user_repo::UserRepo;
