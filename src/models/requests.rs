//! Request DTOs for the cache proxy API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

/// Query string for the lookup operation (GET /get?key=...)
///
/// A missing `key` parameter deserializes to an empty key so that the
/// handler rejects it the same way as `?key=`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupQuery {
    /// The key to look up
    #[serde(default)]
    pub key: String,
}

impl LookupQuery {
    /// Validates the query
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("key is empty".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_query_deserialize() {
        let query: LookupQuery = serde_json::from_str(r#"{"key": "abc"}"#).unwrap();
        assert_eq!(query.key, "abc");
        assert!(query.validate().is_none());
    }

    #[test]
    fn test_missing_key_defaults_to_empty() {
        let query: LookupQuery = serde_json::from_str("{}").unwrap();
        assert!(query.key.is_empty());
        assert_eq!(query.validate(), Some("key is empty".to_string()));
    }
}
