//! Classifier pass over a user's unprocessed notes.

use noteboard_core::board::MAX_BOARD_NOTES;
use noteboard_core::classifier::{Classification, ListTitleIndex, NoteClassifier};
use noteboard_db::models::note::NotePatch;
use noteboard_db::repositories::{NoteRepo, TodoListRepo};
use sqlx::PgPool;

use crate::board_service::BoardService;
use crate::error::{BoardError, BoardResult};

/// Classify every note the classifier has not seen yet.
///
/// Each note is patched through [`BoardService::patch_note`] in its own
/// transaction, so every assignment is undoable and a failure part-way
/// keeps the notes already processed. Returns the number of notes patched.
pub async fn classify_notes(
    pool: &PgPool,
    classifier: &dyn NoteClassifier,
    user_key: &str,
) -> BoardResult<usize> {
    let mut tx = pool.begin().await?;
    let user = BoardService::ensure_user(&mut tx, user_key).await?;
    let lists = TodoListRepo::list_by_user(&mut tx, user.id).await?;
    let pending = NoteRepo::list_unprocessed_by_user(&mut tx, user.id, MAX_BOARD_NOTES).await?;
    tx.commit().await?;

    let index = ListTitleIndex::new(lists.iter().map(|l| (l.title.as_str(), l.id)));

    let mut processed = 0;
    for note in pending {
        let classification = classifier
            .analyze(&note.text)
            .await
            .map_err(|source| BoardError::Classifier {
                note_id: note.id,
                source,
            })?;
        let patch = classification_patch(&index, classification);

        let mut tx = pool.begin().await?;
        if BoardService::patch_note(&mut tx, note.id, &patch).await? {
            processed += 1;
        }
        tx.commit().await?;
    }

    tracing::info!(user_id = user.id, processed, "Classifier pass finished");
    Ok(processed)
}

/// Patch that writes a classification onto a note and marks it processed.
fn classification_patch(index: &ListTitleIndex, c: Classification) -> NotePatch {
    NotePatch {
        todo_list_id: Some(index.resolve(c.todo_list_title.as_deref())),
        severity: Some(c.severity.as_str().to_string()),
        tag: Some(c.tag),
        notify_by: Some(c.notify_by.map(|n| n.as_str().to_string())),
        notify_value: Some(c.notify_value),
        is_processed_by_llm: Some(true),
        ..Default::default()
    }
}
