//! The search request body handed to the engine

use crate::query::nodes::{single_entry, Fragment};
use crate::query::types::SortOrder;
use crate::Result;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Complete query document
///
/// Serializes with exactly the keys `from`, `size`, `query`, `_source` and
/// `sort`, in that order:
///
/// ```json
/// {
///   "from": 0,
///   "size": 10,
///   "query": { "term": { "status": "open" } },
///   "_source": ["id", "status"],
///   "sort": [ { "priority": "desc" } ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct QueryDocument {
    /// Offset of the first hit
    pub from: u64,
    /// Maximum number of hits
    pub size: u64,
    /// Filter; `{}` matches everything
    pub query: Fragment,
    /// Projected fields; empty projects all of them
    #[serde(rename = "_source")]
    pub source: Vec<String>,
    /// Sort keys in priority order
    pub sort: Vec<SortClause>,
}

impl QueryDocument {
    /// Render as a JSON value
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Render as a JSON string
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// One sort key, serialized as `{ "<field>": "asc" | "desc" }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortClause {
    pub field: String,
    pub order: SortOrder,
}

impl SortClause {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

impl Serialize for SortClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        single_entry(serializer, &self.field, &self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::TermQuery;
    use serde_json::json;

    #[test]
    fn test_default_document() {
        let doc = QueryDocument::default();
        assert_eq!(
            doc.to_json().unwrap(),
            json!({ "from": 0, "size": 0, "query": {}, "_source": [], "sort": [] })
        );
    }

    #[test]
    fn test_key_order() {
        let doc = QueryDocument {
            from: 5,
            size: 10,
            query: TermQuery::new("status", "open").into(),
            source: vec!["id".to_string()],
            sort: vec![SortClause::new("priority", SortOrder::Desc)],
        };
        assert_eq!(
            doc.to_json_string(false).unwrap(),
            r#"{"from":5,"size":10,"query":{"term":{"status":"open"}},"_source":["id"],"sort":[{"priority":"desc"}]}"#
        );
    }
}
