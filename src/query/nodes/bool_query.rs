//! Boolean query - combines clauses with AND, OR, NOT semantics

use crate::query::nodes::Fragment;
use serde::Serialize;

/// Boolean combination of fragments
///
/// - `must`: all clauses must match (AND)
/// - `should`: at least one clause should match (OR)
/// - `must_not`: the clause must not match (NOT)
///
/// Empty sections are left out of the serialized form, and `must_not`
/// serializes as a single clause object rather than an array.
///
/// # Example
///
/// ```json
/// {
///   "bool": {
///     "must": [
///       { "term": { "status": "open" } },
///       { "range": { "priority": { "gt": 3 } } }
///     ]
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    /// Clauses that must match
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<Fragment>,
    /// Clauses where at least one should match
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Fragment>,
    /// Clause that must not match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub must_not: Option<Box<Fragment>>,
}

impl BoolQuery {
    /// Create a new empty boolean query
    pub fn new() -> Self {
        Self::default()
    }

    /// All of `clauses`
    pub fn all_of(clauses: Vec<Fragment>) -> Self {
        Self {
            must: clauses,
            ..Self::default()
        }
    }

    /// Any of `clauses`
    pub fn any_of(clauses: Vec<Fragment>) -> Self {
        Self {
            should: clauses,
            ..Self::default()
        }
    }

    /// Negation of `clause`
    pub fn not(clause: Fragment) -> Self {
        Self {
            must_not: Some(Box::new(clause)),
            ..Self::default()
        }
    }

    /// Add a must clause
    pub fn must(mut self, clause: impl Into<Fragment>) -> Self {
        self.must.push(clause.into());
        self
    }

    /// Add a should clause
    pub fn should(mut self, clause: impl Into<Fragment>) -> Self {
        self.should.push(clause.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::{RangeQuery, TermQuery};
    use serde_json::json;

    #[test]
    fn test_bool_query_builder() {
        let query = BoolQuery::new()
            .must(TermQuery::new("status", "open"))
            .must(RangeQuery::new("priority").gt(3))
            .should(TermQuery::new("tags", "urgent"));

        assert_eq!(query.must.len(), 2);
        assert_eq!(query.should.len(), 1);
        assert!(query.must_not.is_none());
    }

    #[test]
    fn test_empty_bool_query() {
        let query = BoolQuery::new();
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({}));
    }

    #[test]
    fn test_must_not_is_single_object() {
        let query = BoolQuery::not(TermQuery::new("status", "draft").into());
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "must_not": { "term": { "status": "draft" } } })
        );
    }

    #[test]
    fn test_should_keeps_order() {
        let query = BoolQuery::any_of(vec![
            TermQuery::new("a", "1").into(),
            TermQuery::new("b", "2").into(),
        ]);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "should": [ { "term": { "a": "1" } }, { "term": { "b": "2" } } ] })
        );
    }
}
