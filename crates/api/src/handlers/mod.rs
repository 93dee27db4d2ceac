pub mod notes;
pub mod todo_lists;
pub mod users;
