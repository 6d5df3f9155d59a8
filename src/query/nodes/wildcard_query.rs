//! Wildcard query - matches field values against a pattern
//!
//! Patterns use `*` for any sequence of characters (including empty) and
//! `?` for exactly one character. The pattern is passed to the engine as
//! is; characters in the operand are not escaped.

use crate::query::nodes::single_entry;
use serde::{Serialize, Serializer};

/// Pattern matching everything
pub const MATCH_ANY: &str = "*";

/// Clause matching values against a wildcard pattern
#[derive(Clone, Debug, PartialEq)]
pub struct WildcardQuery {
    /// Field to search in
    pub field: String,
    /// Wildcard pattern
    pub pattern: String,
}

impl WildcardQuery {
    /// Create a new wildcard query
    pub fn new(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    /// `*text*`, or `*` when `text` is empty
    pub fn contains(field: impl Into<String>, text: &str) -> Self {
        if text.is_empty() {
            Self::new(field, MATCH_ANY)
        } else {
            Self::new(field, format!("*{}*", text))
        }
    }

    /// `*text`
    pub fn ends_with(field: impl Into<String>, text: &str) -> Self {
        Self::new(field, format!("*{}", text))
    }
}

impl Serialize for WildcardQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        single_entry(serializer, &self.field, &self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern() {
        assert_eq!(WildcardQuery::contains("title", "rust").pattern, "*rust*");
        assert_eq!(WildcardQuery::contains("title", "").pattern, MATCH_ANY);
    }

    #[test]
    fn test_ends_with_pattern() {
        assert_eq!(WildcardQuery::ends_with("file", ".rs").pattern, "*.rs");
        // already a match-any pattern, so no special case is needed
        assert_eq!(WildcardQuery::ends_with("file", "").pattern, MATCH_ANY);
    }

    #[test]
    fn test_wildcard_serialization() {
        let query = WildcardQuery::new("title", "prog*");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({ "title": "prog*" })
        );
    }
}
