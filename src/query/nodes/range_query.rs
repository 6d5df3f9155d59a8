//! Range query - matches documents with field values in a range

use crate::query::nodes::single_entry;
use crate::query::types::{LiteralValue, RangeBounds};
use serde::{Serialize, Serializer};

/// Clause matching documents whose field value falls within the bounds
///
/// Serializes as `{ "<field>": { "gt": .., "lte": .. } }` with only the set
/// bounds present.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeQuery {
    /// Field to compare
    pub field: String,
    /// Range bounds (gt, gte, lt, lte)
    pub bounds: RangeBounds,
}

impl RangeQuery {
    /// Create a new unbounded range query
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            bounds: RangeBounds::default(),
        }
    }

    /// Replace the bounds
    pub fn with_bounds(mut self, bounds: RangeBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the greater-than bound
    pub fn gt(mut self, value: impl Into<LiteralValue>) -> Self {
        self.bounds.gt = Some(value.into());
        self
    }

    /// Set the greater-than-or-equal bound
    pub fn gte(mut self, value: impl Into<LiteralValue>) -> Self {
        self.bounds.gte = Some(value.into());
        self
    }

    /// Set the less-than bound
    pub fn lt(mut self, value: impl Into<LiteralValue>) -> Self {
        self.bounds.lt = Some(value.into());
        self
    }

    /// Set the less-than-or-equal bound
    pub fn lte(mut self, value: impl Into<LiteralValue>) -> Self {
        self.bounds.lte = Some(value.into());
        self
    }
}

impl Serialize for RangeQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        single_entry(serializer, &self.field, &self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_range_query_single_bound() {
        let query = RangeQuery::new("priority").gt(3);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "priority": { "gt": 3 } })
        );
    }

    #[test]
    fn test_range_query_two_bounds() {
        let query = RangeQuery::new("created_at")
            .gte("2024-01-01")
            .lt("2025-01-01");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "created_at": { "gte": "2024-01-01", "lt": "2025-01-01" } })
        );
    }
}
