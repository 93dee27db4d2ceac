//! Helpers for partial-update request bodies.
//!
//! Clearable fields are `Option<Option<T>>`: an absent key leaves the column
//! unchanged, an explicit JSON `null` clears it.

use serde::{Deserialize, Deserializer};

/// Deserialize a present key into `Some(..)`, keeping `null` as `Some(None)`.
///
/// Pair with `#[serde(default)]` so an absent key becomes `None`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "nullable")]
        tag: Option<Option<String>>,
    }

    #[test]
    fn absent_key_is_unchanged() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.tag, None);
    }

    #[test]
    fn null_clears() {
        let body: Body = serde_json::from_str(r#"{"tag": null}"#).unwrap();
        assert_eq!(body.tag, Some(None));
    }

    #[test]
    fn value_sets() {
        let body: Body = serde_json::from_str(r#"{"tag": "home"}"#).unwrap();
        assert_eq!(body.tag, Some(Some("home".to_string())));
    }
}
