use noteboard_core::error::CoreError;
use noteboard_core::types::DbId;

/// Errors raised by board operations.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Domain validation or parsing failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A logged snapshot could not be encoded or read back.
    #[error("Malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// The note classifier failed for one note.
    #[error("Classifier failed for note {note_id}: {source}")]
    Classifier {
        note_id: DbId,
        #[source]
        source: CoreError,
    },
}

pub type BoardResult<T> = Result<T, BoardError>;
