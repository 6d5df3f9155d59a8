//! `$filter` translation
//!
//! Lowers a filter expression into a query DSL fragment:
//!
//! | operator | fragment |
//! |---|---|
//! | `eq` | `{"term": {f: v}}` |
//! | `ne` | `{"bool": {"must_not": {"term": {f: v}}}}` |
//! | `gt` `ge` `lt` `le` | `{"range": {f: {"gt"/"gte"/"lt"/"lte": v}}}` |
//! | `and` | `{"bool": {"must": [l, r]}}` |
//! | `or` | `{"bool": {"should": [l, r]}}` |
//! | `startswith` | `{"prefix": {f: v}}` |
//! | `contains` | `{"wildcard": {f: "*v*"}}`, or `"*"` for an empty `v` |
//! | `endswith` | `{"wildcard": {f: "*v"}}` |

use crate::config::DEFAULT_MAX_FILTER_DEPTH;
use crate::error::FilterError;
use crate::query::ast::{ComparisonOp, FilterExpr, LogicalOp, ParseNode, StringMatchOp};
use crate::query::nodes::{BoolQuery, Fragment, PrefixQuery, RangeQuery, TermQuery, WildcardQuery};
use crate::query::types::{LiteralValue, RangeBounds};
use tracing::trace;

/// Translates filter expressions into query DSL fragments
///
/// Holds no state besides its depth limit, so one translator can be shared
/// freely between threads.
#[derive(Clone, Copy, Debug)]
pub struct FilterTranslator {
    max_depth: usize,
}

impl Default for FilterTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILTER_DEPTH)
    }
}

impl FilterTranslator {
    /// Create a translator rejecting trees nested deeper than `max_depth` operators
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Translate a parse tree
    ///
    /// Fails on unknown operators, operands in the wrong role, wrong arity
    /// and trees deeper than the limit. No partial fragment is ever
    /// returned.
    pub fn translate(&self, node: &ParseNode) -> Result<Fragment, FilterError> {
        let expr = FilterExpr::from_parse_node(node, self.max_depth)?;
        Ok(lower(&expr))
    }

    /// Translate an already typed expression
    pub fn translate_expr(&self, expr: &FilterExpr) -> Result<Fragment, FilterError> {
        if expr.depth() > self.max_depth {
            return Err(FilterError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(lower(expr))
    }
}

/// Translate a parse tree with the default depth limit
pub fn translate(node: &ParseNode) -> Result<Fragment, FilterError> {
    FilterTranslator::default().translate(node)
}

fn lower(expr: &FilterExpr) -> Fragment {
    trace!(operator = %expr.operator(), "lowering filter operator");

    match expr {
        FilterExpr::Comparison { op, field, literal } => lower_comparison(*op, field, literal),
        FilterExpr::Logical { op, left, right } => {
            let clauses = vec![lower(left), lower(right)];
            match op {
                LogicalOp::And => BoolQuery::all_of(clauses).into(),
                LogicalOp::Or => BoolQuery::any_of(clauses).into(),
            }
        }
        FilterExpr::StringMatch { op, field, literal } => {
            let text = literal.to_text();
            match op {
                StringMatchOp::StartsWith => PrefixQuery::new(field.as_str(), text).into(),
                StringMatchOp::Contains => WildcardQuery::contains(field.as_str(), &text).into(),
                StringMatchOp::EndsWith => WildcardQuery::ends_with(field.as_str(), &text).into(),
            }
        }
    }
}

fn lower_comparison(op: ComparisonOp, field: &str, literal: &LiteralValue) -> Fragment {
    let value = literal.clone();
    match op {
        ComparisonOp::Eq => TermQuery::new(field, value).into(),
        ComparisonOp::Ne => BoolQuery::not(TermQuery::new(field, value).into()).into(),
        ComparisonOp::Gt => range(field, RangeBounds::gt(value)),
        ComparisonOp::Ge => range(field, RangeBounds::gte(value)),
        ComparisonOp::Lt => range(field, RangeBounds::lt(value)),
        ComparisonOp::Le => range(field, RangeBounds::lte(value)),
    }
}

fn range(field: &str, bounds: RangeBounds) -> Fragment {
    RangeQuery::new(field).with_bounds(bounds).into()
}
