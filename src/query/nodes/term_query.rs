//! Term query - exact match on a field

use crate::query::nodes::single_entry;
use crate::query::types::LiteralValue;
use serde::{Serialize, Serializer};

/// Clause matching documents whose field holds exactly the given value
///
/// Serializes as `{ "<field>": <value> }`.
#[derive(Clone, Debug, PartialEq)]
pub struct TermQuery {
    /// Field to match on
    pub field: String,
    /// Exact value to match
    pub value: LiteralValue,
}

impl TermQuery {
    /// Create a new term query
    pub fn new(field: impl Into<String>, value: impl Into<LiteralValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Serialize for TermQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        single_entry(serializer, &self.field, &self.value)
    }
}
