//! OData to query DSL translation
//!
//! This module turns parsed OData query options into a search request body:
//! - `$filter` trees become query clauses (term, range, prefix, wildcard, bool)
//! - `$top` / `$skip` become `size` / `from`
//! - `$select` becomes `_source`
//! - `$orderby` becomes `sort`
//!
//! # Example
//!
//! ```rust
//! use odata_dsl::models::{OrderItem, ParsedQuery};
//! use odata_dsl::query::{build_query, ParseNode};
//!
//! let filter = ParseNode::binary(
//!     "and",
//!     ParseNode::binary("eq", ParseNode::field("status"), ParseNode::literal("open")),
//!     ParseNode::binary("gt", ParseNode::field("priority"), ParseNode::literal(3)),
//! );
//! let parsed = ParsedQuery::new()
//!     .filter(filter)
//!     .top(10)
//!     .skip(0)
//!     .select(["id", "status"])
//!     .order_by(vec![OrderItem::new("priority", "desc")]);
//!
//! let doc = build_query(&parsed).unwrap();
//! assert_eq!(
//!     doc.to_json().unwrap(),
//!     serde_json::json!({
//!         "from": 0,
//!         "size": 10,
//!         "query": { "bool": { "must": [
//!             { "term": { "status": "open" } },
//!             { "range": { "priority": { "gt": 3 } } }
//!         ] } },
//!         "_source": ["id", "status"],
//!         "sort": [ { "priority": "desc" } ]
//!     })
//! );
//! ```

pub mod assembler;
pub mod ast;
pub mod document;
pub mod nodes;
pub mod translator;
pub mod types;

pub use assembler::{build_query, QueryAssembler};
pub use ast::{ComparisonOp, FilterExpr, LogicalOp, Operator, ParseNode, StringMatchOp};
pub use document::{QueryDocument, SortClause};
pub use nodes::{BoolQuery, Fragment, PrefixQuery, RangeQuery, TermQuery, WildcardQuery};
pub use translator::{translate, FilterTranslator};
pub use types::*;
