//! Filter expression trees
//!
//! Two representations live here:
//! - [`ParseNode`], the generic operator/field/literal tree handed over by
//!   the `$filter` parser
//! - [`FilterExpr`], a typed expression with one variant per operator
//!   category, which is what the translator lowers into fragments
//!
//! [`FilterExpr::from_parse_node`] converts the first into the second and
//! rejects unknown operators, wrong arity, misplaced operands and trees that
//! nest deeper than the configured limit.

use crate::error::FilterError;
use crate::query::types::LiteralValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Node of a parsed `$filter` clause
///
/// # Example
///
/// ```json
/// {
///   "type": "operator",
///   "op": "eq",
///   "children": [
///     { "type": "field", "name": "status" },
///     { "type": "literal", "value": "open" }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParseNode {
    /// Operator applied to ordered children
    Operator {
        op: String,
        #[serde(default)]
        children: Vec<ParseNode>,
    },
    /// Reference to a document field
    Field { name: String },
    /// Literal value, already unquoted
    Literal { value: LiteralValue },
}

impl ParseNode {
    /// Create an operator node
    pub fn op(op: impl Into<String>, children: Vec<ParseNode>) -> Self {
        ParseNode::Operator {
            op: op.into(),
            children,
        }
    }

    /// Create a binary operator node
    pub fn binary(op: impl Into<String>, left: ParseNode, right: ParseNode) -> Self {
        Self::op(op, vec![left, right])
    }

    /// Create a field reference leaf
    pub fn field(name: impl Into<String>) -> Self {
        ParseNode::Field { name: name.into() }
    }

    /// Create a literal leaf
    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        ParseNode::Literal {
            value: value.into(),
        }
    }

    fn describe(&self) -> String {
        match self {
            ParseNode::Operator { op, .. } => format!("operator `{}`", op),
            ParseNode::Field { name } => format!("field `{}`", name),
            ParseNode::Literal { value } => format!("literal `{}`", value),
        }
    }
}

/// Comparison operators
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

/// Logical combinators
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

/// String-match functions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringMatchOp {
    StartsWith,
    Contains,
    EndsWith,
}

/// Every operator the translator understands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Comparison(ComparisonOp),
    Logical(LogicalOp),
    StringMatch(StringMatchOp),
}

impl Operator {
    /// Operator tag as it appears in a parse tree
    pub fn tag(&self) -> &'static str {
        match self {
            Operator::Comparison(ComparisonOp::Eq) => "eq",
            Operator::Comparison(ComparisonOp::Ne) => "ne",
            Operator::Comparison(ComparisonOp::Gt) => "gt",
            Operator::Comparison(ComparisonOp::Ge) => "ge",
            Operator::Comparison(ComparisonOp::Lt) => "lt",
            Operator::Comparison(ComparisonOp::Le) => "le",
            Operator::Logical(LogicalOp::And) => "and",
            Operator::Logical(LogicalOp::Or) => "or",
            Operator::StringMatch(StringMatchOp::StartsWith) => "startswith",
            Operator::StringMatch(StringMatchOp::Contains) => "contains",
            Operator::StringMatch(StringMatchOp::EndsWith) => "endswith",
        }
    }

    /// Number of children the operator takes
    pub fn arity(&self) -> usize {
        2
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let op = match tag {
            "eq" => Operator::Comparison(ComparisonOp::Eq),
            "ne" => Operator::Comparison(ComparisonOp::Ne),
            "gt" => Operator::Comparison(ComparisonOp::Gt),
            "ge" => Operator::Comparison(ComparisonOp::Ge),
            "lt" => Operator::Comparison(ComparisonOp::Lt),
            "le" => Operator::Comparison(ComparisonOp::Le),
            "and" => Operator::Logical(LogicalOp::And),
            "or" => Operator::Logical(LogicalOp::Or),
            "startswith" => Operator::StringMatch(StringMatchOp::StartsWith),
            "contains" => Operator::StringMatch(StringMatchOp::Contains),
            "endswith" => Operator::StringMatch(StringMatchOp::EndsWith),
            other => {
                return Err(FilterError::UnsupportedOperator {
                    operator: other.to_string(),
                })
            }
        };
        Ok(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Typed filter expression
#[derive(Clone, Debug, PartialEq)]
pub enum FilterExpr {
    /// `field op literal`
    Comparison {
        op: ComparisonOp,
        field: String,
        literal: LiteralValue,
    },
    /// `left op right`
    Logical {
        op: LogicalOp,
        left: Box<FilterExpr>,
        right: Box<FilterExpr>,
    },
    /// `op(field, literal)`
    StringMatch {
        op: StringMatchOp,
        field: String,
        literal: LiteralValue,
    },
}

impl FilterExpr {
    pub fn comparison(
        op: ComparisonOp,
        field: impl Into<String>,
        literal: impl Into<LiteralValue>,
    ) -> Self {
        FilterExpr::Comparison {
            op,
            field: field.into(),
            literal: literal.into(),
        }
    }

    pub fn string_match(
        op: StringMatchOp,
        field: impl Into<String>,
        literal: impl Into<LiteralValue>,
    ) -> Self {
        FilterExpr::StringMatch {
            op,
            field: field.into(),
            literal: literal.into(),
        }
    }

    pub fn logical(op: LogicalOp, left: FilterExpr, right: FilterExpr) -> Self {
        FilterExpr::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn eq(field: impl Into<String>, literal: impl Into<LiteralValue>) -> Self {
        Self::comparison(ComparisonOp::Eq, field, literal)
    }

    pub fn ne(field: impl Into<String>, literal: impl Into<LiteralValue>) -> Self {
        Self::comparison(ComparisonOp::Ne, field, literal)
    }

    pub fn and(left: FilterExpr, right: FilterExpr) -> Self {
        Self::logical(LogicalOp::And, left, right)
    }

    pub fn or(left: FilterExpr, right: FilterExpr) -> Self {
        Self::logical(LogicalOp::Or, left, right)
    }

    /// Operator at the root of this expression
    pub fn operator(&self) -> Operator {
        match self {
            FilterExpr::Comparison { op, .. } => Operator::Comparison(*op),
            FilterExpr::Logical { op, .. } => Operator::Logical(*op),
            FilterExpr::StringMatch { op, .. } => Operator::StringMatch(*op),
        }
    }

    /// Number of operators on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            FilterExpr::Logical { left, right, .. } => 1 + left.depth().max(right.depth()),
            _ => 1,
        }
    }

    /// Build a typed expression from a parse tree
    ///
    /// The root must be an operator node. Nesting deeper than `max_depth`
    /// operators fails before the deeper levels are visited.
    pub fn from_parse_node(node: &ParseNode, max_depth: usize) -> Result<Self, FilterError> {
        lower_node(node, "$filter", 1, max_depth)
    }
}

fn lower_node(
    node: &ParseNode,
    parent: &str,
    depth: usize,
    max_depth: usize,
) -> Result<FilterExpr, FilterError> {
    let (tag, children) = match node {
        ParseNode::Operator { op, children } => (op, children),
        other => {
            return Err(FilterError::malformed(
                parent,
                format!("expected an operator node, found {}", other.describe()),
            ))
        }
    };

    if depth > max_depth {
        return Err(FilterError::DepthLimitExceeded { limit: max_depth });
    }

    let operator: Operator = tag.parse()?;
    let [left, right] = children.as_slice() else {
        return Err(FilterError::malformed(
            tag.as_str(),
            format!(
                "expected {} operands, got {}",
                operator.arity(),
                children.len()
            ),
        ));
    };

    let expr = match operator {
        Operator::Logical(op) => FilterExpr::Logical {
            op,
            left: Box::new(lower_node(left, tag, depth + 1, max_depth)?),
            right: Box::new(lower_node(right, tag, depth + 1, max_depth)?),
        },
        Operator::Comparison(op) => {
            let (field, literal) = field_and_literal(operator, left, right)?;
            FilterExpr::Comparison { op, field, literal }
        }
        Operator::StringMatch(op) => {
            let (field, literal) = field_and_literal(operator, left, right)?;
            FilterExpr::StringMatch { op, field, literal }
        }
    };

    Ok(expr)
}

fn field_and_literal(
    operator: Operator,
    left: &ParseNode,
    right: &ParseNode,
) -> Result<(String, LiteralValue), FilterError> {
    let field = match left {
        ParseNode::Field { name } => name.clone(),
        other => {
            return Err(FilterError::malformed(
                operator.tag(),
                format!(
                    "left operand must be a field reference, found {}",
                    other.describe()
                ),
            ))
        }
    };

    let literal = match right {
        ParseNode::Literal { value } => value.clone(),
        other => {
            return Err(FilterError::malformed(
                operator.tag(),
                format!(
                    "right operand must be a literal, found {}",
                    other.describe()
                ),
            ))
        }
    };

    Ok((field, literal))
}
