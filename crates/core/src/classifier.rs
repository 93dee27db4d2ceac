//! Note classification seam.
//!
//! The classifier suggests a list, severity, tag and notification policy
//! for a note's text. The shipped implementation is a stub that returns the
//! default classification; real backends implement [`NoteClassifier`].

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::board::{NotifyBy, Severity};
use crate::error::CoreError;
use crate::types::DbId;

/// Suggested annotations for one note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Title of the list the note belongs in, matched case-insensitively.
    pub todo_list_title: Option<String>,
    pub severity: Severity,
    pub tag: Option<String>,
    pub notify_by: Option<NotifyBy>,
    pub notify_value: Option<serde_json::Value>,
}

#[async_trait]
pub trait NoteClassifier: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Classification, CoreError>;
}

/// Classifier that never suggests anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubClassifier;

#[async_trait]
impl NoteClassifier for StubClassifier {
    async fn analyze(&self, _text: &str) -> Result<Classification, CoreError> {
        Ok(Classification::default())
    }
}

/// Lowercased list title -> list id for one user's board.
///
/// Exact match only; when two lists share a title the later one wins.
#[derive(Debug, Default, Clone)]
pub struct ListTitleIndex {
    by_title: HashMap<String, DbId>,
}

impl ListTitleIndex {
    pub fn new<'a>(lists: impl IntoIterator<Item = (&'a str, DbId)>) -> Self {
        let by_title = lists
            .into_iter()
            .map(|(title, id)| (title.to_lowercase(), id))
            .collect();
        Self { by_title }
    }

    /// Resolve a suggested title. Unknown or absent titles yield `None`.
    pub fn resolve(&self, title: Option<&str>) -> Option<DbId> {
        title.and_then(|t| self.by_title.get(&t.to_lowercase()).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_returns_default_classification() {
        let result = StubClassifier.analyze("call mom at 5").await.unwrap();
        assert_eq!(result, Classification::default());
        assert_eq!(result.severity, Severity::Normal);
        assert!(result.todo_list_title.is_none());
    }

    #[test]
    fn title_lookup_is_case_insensitive() {
        let index = ListTitleIndex::new([("Покупки", 3), ("Work", 4)]);
        assert_eq!(index.resolve(Some("покупки")), Some(3));
        assert_eq!(index.resolve(Some("WORK")), Some(4));
    }

    #[test]
    fn title_lookup_is_exact() {
        let index = ListTitleIndex::new([("Work", 4)]);
        assert_eq!(index.resolve(Some("Work stuff")), None);
        assert_eq!(index.resolve(Some("wor")), None);
        assert_eq!(index.resolve(None), None);
    }

    #[test]
    fn later_duplicate_title_wins() {
        let index = ListTitleIndex::new([("Home", 1), ("home", 2)]);
        assert_eq!(index.resolve(Some("HOME")), Some(2));
    }
}
