//! Prefix query - matches field values starting with a prefix
//!
//! # Example
//!
//! ```rust
//! use odata_dsl::query::nodes::PrefixQuery;
//!
//! // Match titles starting with "prog" (programming, progress, etc.)
//! let query = PrefixQuery::new("title", "prog");
//! assert_eq!(
//!     serde_json::to_string(&query).unwrap(),
//!     r#"{"title":"prog"}"#
//! );
//! ```

use crate::query::nodes::single_entry;
use serde::{Serialize, Serializer};

/// Clause matching values that begin with `prefix`
#[derive(Clone, Debug, PartialEq)]
pub struct PrefixQuery {
    /// Field to search in
    pub field: String,
    /// Prefix to match
    pub prefix: String,
}

impl PrefixQuery {
    /// Create a new prefix query
    pub fn new(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            prefix: prefix.into(),
        }
    }
}

impl Serialize for PrefixQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        single_entry(serializer, &self.field, &self.prefix)
    }
}
