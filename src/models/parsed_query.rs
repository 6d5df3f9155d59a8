//! Parsed OData query options
//!
//! The parser collaborator hands over a loosely typed map
//! ([`RawParsedQuery`]). It is converted once into [`ParsedQuery`], where each
//! option is a [`Directive`] recording whether it was provided, replaced by
//! a default because its value was unusable, or absent.

use crate::error::{DslError, FilterError};
use crate::query::ast::ParseNode;
use crate::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Sentinel `$select` entry meaning "all fields"
pub const SELECT_ALL: &str = "*";

/// Status of one query option after conversion
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Directive<T> {
    /// The option was not given
    #[default]
    Absent,
    /// The option was given with a usable value
    Provided(T),
    /// The option was given, but its value was unusable and is ignored
    Defaulted { reason: String },
}

impl<T> Directive<T> {
    /// The provided value, if any
    pub fn provided(&self) -> Option<&T> {
        match self {
            Directive::Provided(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Directive::Absent)
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Directive::Defaulted { .. })
    }

    fn defaulted(option: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        debug!(option, %reason, "ignoring unusable query option");
        Directive::Defaulted { reason }
    }
}

/// One `$orderby` item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub field: String,
    /// Direction as written by the client, if any
    ///
    /// A direction that is not a string decodes as `None` and sorts
    /// ascending.
    #[serde(
        default,
        alias = "direction",
        deserialize_with = "lenient_direction",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<String>,
}

impl OrderItem {
    pub fn new(field: impl Into<String>, order: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: Some(order.into()),
        }
    }

    /// Item without an explicit direction
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: None,
        }
    }
}

fn lenient_direction<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(order) => Ok(Some(order)),
        Value::Null => Ok(None),
        other => {
            debug!(direction = %other, "sorting ascending on non-string $orderby direction");
            Ok(None)
        }
    }
}

/// Deepest bracket nesting accepted in a query options document
pub const MAX_INPUT_NESTING: usize = 256;

/// Deepest `$filter` tree that fits within [`MAX_INPUT_NESTING`]
///
/// The options object and the innermost leaf take one level each, every
/// operator takes two (its object and its `children` array). Configuring
/// a larger `max_filter_depth` has no effect on JSON input.
pub const MAX_DECODABLE_FILTER_DEPTH: usize = (MAX_INPUT_NESTING - 2) / 2;

/// Query options exactly as the parser produced them
///
/// Keys follow the OData system query option names; the bare names
/// (`Top`, `top`, ...) are accepted as aliases. When an option appears
/// under several keys, the `$` name wins, then the first alias seen.
/// Unknown keys are ignored and `null` counts as absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RawParsedQuery {
    #[serde(rename = "$top", skip_serializing_if = "Option::is_none")]
    pub top: Option<Value>,
    #[serde(rename = "$skip", skip_serializing_if = "Option::is_none")]
    pub skip: Option<Value>,
    #[serde(rename = "$filter", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(rename = "$select", skip_serializing_if = "Option::is_none")]
    pub select: Option<Value>,
    #[serde(rename = "$orderby", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Value>,
}

impl RawParsedQuery {
    /// Decode from a JSON string
    ///
    /// Documents nested deeper than [`MAX_INPUT_NESTING`] fail with
    /// [`FilterError::DepthLimitExceeded`] before any decoding happens.
    pub fn from_json_str(json: &str) -> Result<Self> {
        if nesting_depth(json) > MAX_INPUT_NESTING {
            return Err(FilterError::DepthLimitExceeded {
                limit: MAX_DECODABLE_FILTER_DEPTH,
            }
            .into());
        }

        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let value = Value::deserialize(&mut deserializer)
            .and_then(|value| deserializer.end().map(|()| value))
            .map_err(|e| DslError::InvalidRequest(format!("invalid query options: {}", e)))?;
        Self::from_value(value)
    }

    /// Decode from a JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(options) = value else {
            return Err(DslError::InvalidRequest(
                "query options must be a JSON object".to_string(),
            ));
        };

        let mut raw = Self::default();
        for (key, value) in options {
            if value.is_null() {
                continue;
            }
            let Some((name, slot)) = raw.option_slot(&key) else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(value);
            } else if key == name {
                debug!(option = name, "query option given twice; using the `$` key");
                *slot = Some(value);
            } else {
                debug!(option = name, key = %key, "ignoring duplicate query option");
            }
        }
        Ok(raw)
    }

    fn option_slot(&mut self, key: &str) -> Option<(&'static str, &mut Option<Value>)> {
        let slot = match key {
            "$top" | "Top" | "top" => ("$top", &mut self.top),
            "$skip" | "Skip" | "skip" => ("$skip", &mut self.skip),
            "$filter" | "Filter" | "filter" => ("$filter", &mut self.filter),
            "$select" | "Select" | "select" => ("$select", &mut self.select),
            "$orderby" | "OrderBy" | "orderby" => ("$orderby", &mut self.order_by),
            _ => return None,
        };
        Some(slot)
    }
}

/// Deepest `{`/`[` nesting in `json`, ignoring brackets inside strings
fn nesting_depth(json: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in json.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

/// Typed query options
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedQuery {
    /// `$top`: page size
    pub top: Directive<u64>,
    /// `$skip`: page offset
    pub skip: Directive<u64>,
    /// `$filter`: root of the filter tree
    pub filter: Option<ParseNode>,
    /// `$select`: projected fields, in order
    pub select: Directive<Vec<String>>,
    /// `$orderby`: sort keys, in order
    pub order_by: Directive<Vec<OrderItem>>,
}

impl ParsedQuery {
    /// Empty query: no options set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(mut self, top: u64) -> Self {
        self.top = Directive::Provided(top);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Directive::Provided(skip);
        self
    }

    pub fn filter(mut self, root: ParseNode) -> Self {
        self.filter = Some(root);
        self
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Directive::Provided(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn order_by(mut self, items: Vec<OrderItem>) -> Self {
        self.order_by = Directive::Provided(items);
        self
    }

    /// Convert the parser's raw options
    ///
    /// Pagination, projection and sort values of the wrong type become
    /// [`Directive::Defaulted`]. A `$filter` that is not a parse tree is an
    /// error.
    pub fn from_raw(raw: RawParsedQuery) -> Result<Self> {
        let filter = match raw.filter {
            Some(value) => Some(serde_json::from_value::<ParseNode>(value).map_err(|e| {
                DslError::InvalidRequest(format!("$filter is not a filter expression: {}", e))
            })?),
            None => None,
        };

        Ok(Self {
            top: convert_count("$top", raw.top),
            skip: convert_count("$skip", raw.skip),
            filter,
            select: convert_select(raw.select),
            order_by: convert_order_by(raw.order_by),
        })
    }

    /// Decode and convert in one step
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_raw(RawParsedQuery::from_json_str(json)?)
    }
}

impl TryFrom<RawParsedQuery> for ParsedQuery {
    type Error = DslError;

    fn try_from(raw: RawParsedQuery) -> Result<Self> {
        Self::from_raw(raw)
    }
}

fn convert_count(option: &str, value: Option<Value>) -> Directive<u64> {
    match value {
        None => Directive::Absent,
        Some(value) => match value.as_u64() {
            Some(n) => Directive::Provided(n),
            None => Directive::defaulted(
                option,
                format!("expected a non-negative integer, got {}", value),
            ),
        },
    }
}

fn convert_select(value: Option<Value>) -> Directive<Vec<String>> {
    let items = match value {
        None => return Directive::Absent,
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Directive::defaulted("$select", format!("expected a list of fields, got {}", other))
        }
    };

    let mut fields = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(field) => fields.push(field),
            other => {
                return Directive::defaulted(
                    "$select",
                    format!("expected field names, got {}", other),
                )
            }
        }
    }
    Directive::Provided(fields)
}

fn convert_order_by(value: Option<Value>) -> Directive<Vec<OrderItem>> {
    let items = match value {
        None => return Directive::Absent,
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Directive::defaulted(
                "$orderby",
                format!("expected a list of sort items, got {}", other),
            )
        }
    };

    let order_items = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<OrderItem>(item.clone()) {
            Ok(order_item) => Some(order_item),
            Err(e) => {
                debug!(%item, error = %e, "dropping unusable $orderby item");
                None
            }
        })
        .collect();
    Directive::Provided(order_items)
}
