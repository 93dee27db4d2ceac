//! Domain types, validation rules and pure logic for the notes board.
//!
//! Nothing in this crate touches the database; repositories live in
//! `noteboard_db` and orchestration in `noteboard_service`.

pub mod board;
pub mod classifier;
pub mod error;
pub mod history;
pub mod patch;
pub mod snapshot;
pub mod types;
