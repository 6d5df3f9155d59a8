//! Core types for the query system

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal operand of a filter condition
///
/// The parser hands over literals already unquoted and unescaped; numbers
/// and booleans keep their JSON type so they reach the engine unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    /// 64-bit integer
    Integer(i64),
    /// 64-bit floating point
    Float(f64),
    String(String),
}

impl LiteralValue {
    /// Text used when the literal is embedded in a prefix or wildcard pattern
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => f.write_str("null"),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Integer(i) => write!(f, "{}", i),
            LiteralValue::Float(v) => write!(f, "{}", v),
            LiteralValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        LiteralValue::String(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        LiteralValue::Integer(value.into())
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        LiteralValue::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Boolean(value)
    }
}

/// Range bounds for range queries
///
/// Only the bounds that are set are serialized.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RangeBounds {
    /// Greater than
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<LiteralValue>,
    /// Greater than or equal to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<LiteralValue>,
    /// Less than
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<LiteralValue>,
    /// Less than or equal to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<LiteralValue>,
}

impl RangeBounds {
    pub fn gt(value: LiteralValue) -> Self {
        Self {
            gt: Some(value),
            ..Default::default()
        }
    }

    pub fn gte(value: LiteralValue) -> Self {
        Self {
            gte: Some(value),
            ..Default::default()
        }
    }

    pub fn lt(value: LiteralValue) -> Self {
        Self {
            lt: Some(value),
            ..Default::default()
        }
    }

    pub fn lte(value: LiteralValue) -> Self {
        Self {
            lte: Some(value),
            ..Default::default()
        }
    }
}

/// Sort direction emitted in the `sort` array
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Normalize a raw `$orderby` direction
    ///
    /// Only the exact string `"desc"` sorts descending. Anything else,
    /// including a missing direction or `"DESC"`, sorts ascending.
    pub fn from_direction(direction: Option<&str>) -> Self {
        match direction {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_value_conversions() {
        let int = LiteralValue::from(42);
        assert_eq!(int, LiteralValue::Integer(42));
        assert_eq!(int.to_text(), "42");

        assert_eq!(
            LiteralValue::from("100"),
            LiteralValue::String("100".to_string())
        );

        assert_eq!(LiteralValue::from(true).to_text(), "true");
        assert_eq!(LiteralValue::from(2.5).to_text(), "2.5");
        assert_eq!(LiteralValue::Null.to_text(), "null");
    }

    #[test]
    fn test_literal_value_json_types() {
        let values: Vec<LiteralValue> =
            serde_json::from_str(r#"[null, true, 3, 1.5, "open"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                LiteralValue::Null,
                LiteralValue::Boolean(true),
                LiteralValue::Integer(3),
                LiteralValue::Float(1.5),
                LiteralValue::String("open".to_string()),
            ]
        );
    }

    #[test]
    fn test_range_bounds_serialize_only_set_bound() {
        let bounds = RangeBounds::gte(LiteralValue::from(10));
        assert_eq!(
            serde_json::to_value(&bounds).unwrap(),
            serde_json::json!({ "gte": 10 })
        );
        assert_eq!(
            serde_json::to_value(RangeBounds::default()).unwrap(),
            serde_json::json!({})
        );
    }

    #[test]
    fn test_sort_order_normalization() {
        assert_eq!(SortOrder::from_direction(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::from_direction(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::from_direction(Some("DESC")), SortOrder::Asc);
        assert_eq!(SortOrder::from_direction(Some("descending")), SortOrder::Asc);
        assert_eq!(SortOrder::from_direction(None), SortOrder::Asc);
    }
}
