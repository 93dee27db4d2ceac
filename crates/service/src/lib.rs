//! Board operations: logged mutations, undo/redo and the classifier pass.
//!
//! Every operation takes the connection it runs on. Callers open one
//! transaction per request and commit it once the operation returns, so a
//! mutation and its action log entry land together or not at all.

pub mod board_service;
pub mod classify;
pub mod error;
mod replay;

pub use board_service::{Board, BoardService, NewNote, NewTodoList};
pub use classify::classify_notes;
pub use error::{BoardError, BoardResult};
