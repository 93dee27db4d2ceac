//! Board constants, enumerations and validation functions.
//!
//! Severity and notification kinds are stored as `TEXT` columns guarded by
//! `CHECK` constraints; the enums here are the typed view used at the HTTP
//! boundary and by the classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a caller-supplied user key.
pub const MAX_USER_KEY_LENGTH: u64 = 200;

/// Maximum length of the originating device tag.
pub const MAX_DEVICE_LENGTH: u64 = 200;

/// Maximum length of note text in characters.
pub const MAX_NOTE_TEXT_LENGTH: u64 = 20_000;

/// Maximum length of a todo list title.
pub const MAX_LIST_TITLE_LENGTH: u64 = 200;

/// Upper bound on notes returned for one board.
pub const MAX_BOARD_NOTES: i64 = 2000;

/// Default number of action log entries returned by the history listing.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// Maximum number of action log entries returned by the history listing.
pub const MAX_HISTORY_LIMIT: i64 = 500;

pub const DEFAULT_LIST_WIDTH: f64 = 520.0;
pub const DEFAULT_LIST_HEIGHT: f64 = 360.0;

/// A todo list frame created for every new board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultList {
    pub title: &'static str,
    pub pos_x: f64,
    pub pos_y: f64,
}

/// Frames created the first time a user has no lists at all.
pub const DEFAULT_LISTS: &[DefaultList] = &[
    DefaultList {
        title: "Рутуб",
        pos_x: 200.0,
        pos_y: 120.0,
    },
    DefaultList {
        title: "Автопродажник",
        pos_x: 800.0,
        pos_y: 120.0,
    },
    DefaultList {
        title: "Покупки",
        pos_x: 200.0,
        pos_y: 560.0,
    },
];

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Note severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Normal,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Normal, Severity::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Normal => "normal",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid severity '{s}'. Must be one of: low, normal, high"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Notification policy
// ---------------------------------------------------------------------------

/// How a note asks to be surfaced again. The policy payload lives in the
/// note's `notify_value` JSON column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyBy {
    Time,
    Location,
}

impl NotifyBy {
    pub fn as_str(self) -> &'static str {
        match self {
            NotifyBy::Time => "time",
            NotifyBy::Location => "location",
        }
    }
}

impl fmt::Display for NotifyBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotifyBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(NotifyBy::Time),
            "location" => Ok(NotifyBy::Location),
            other => Err(CoreError::Validation(format!(
                "Invalid notify_by '{other}'. Must be one of: time, location"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Geolocation
// ---------------------------------------------------------------------------

/// Where a note was captured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Geo {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

impl Geo {
    /// JSON form stored in the `notes.geo` column.
    pub fn to_json(self) -> serde_json::Value {
        serde_json::json!({ "lat": self.lat, "lon": self.lon })
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Trim note text and reject text that is empty once trimmed.
pub fn normalize_note_text(text: &str) -> Result<String, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Note text must not be blank".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Trim a todo list title and reject titles that are empty once trimmed.
pub fn normalize_list_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Todo list title must not be blank".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Clamp a requested history page size to `1..=MAX_HISTORY_LIMIT`.
pub fn clamp_history_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

/// Validate a user key: non-blank and within the length limit.
pub fn validate_user_key(user_key: &str) -> Result<(), CoreError> {
    if user_key.trim().is_empty() {
        return Err(CoreError::Validation(
            "User key must not be blank".to_string(),
        ));
    }
    if user_key.chars().count() as u64 > MAX_USER_KEY_LENGTH {
        return Err(CoreError::Validation(format!(
            "User key exceeds {MAX_USER_KEY_LENGTH} characters"
        )));
    }
    Ok(())
}
