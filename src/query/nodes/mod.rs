//! Query DSL fragments
//!
//! Each node type serializes to the body of one search-engine query clause.
//! [`Fragment`] wraps them under their clause key, so a term node on
//! `status` becomes `{ "term": { "status": "open" } }`.

mod bool_query;
mod prefix_query;
mod range_query;
mod term_query;
mod wildcard_query;

pub use bool_query::BoolQuery;
pub use prefix_query::PrefixQuery;
pub use range_query::RangeQuery;
pub use term_query::TermQuery;
pub use wildcard_query::WildcardQuery;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One translated filter condition or combinator
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Fragment {
    /// No filtering; serializes as `{}`
    #[default]
    MatchAll,
    Term(TermQuery),
    Range(RangeQuery),
    Prefix(PrefixQuery),
    Wildcard(WildcardQuery),
    Bool(BoolQuery),
}

impl Fragment {
    /// Clause key this fragment serializes under, `None` for match-all
    pub fn query_type(&self) -> Option<&'static str> {
        match self {
            Fragment::MatchAll => None,
            Fragment::Term(_) => Some("term"),
            Fragment::Range(_) => Some("range"),
            Fragment::Prefix(_) => Some("prefix"),
            Fragment::Wildcard(_) => Some("wildcard"),
            Fragment::Bool(_) => Some("bool"),
        }
    }
}

impl Serialize for Fragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Fragment::MatchAll => serializer.serialize_map(Some(0))?.end(),
            Fragment::Term(q) => single_entry(serializer, "term", q),
            Fragment::Range(q) => single_entry(serializer, "range", q),
            Fragment::Prefix(q) => single_entry(serializer, "prefix", q),
            Fragment::Wildcard(q) => single_entry(serializer, "wildcard", q),
            Fragment::Bool(q) => single_entry(serializer, "bool", q),
        }
    }
}

impl From<TermQuery> for Fragment {
    fn from(query: TermQuery) -> Self {
        Fragment::Term(query)
    }
}

impl From<RangeQuery> for Fragment {
    fn from(query: RangeQuery) -> Self {
        Fragment::Range(query)
    }
}

impl From<PrefixQuery> for Fragment {
    fn from(query: PrefixQuery) -> Self {
        Fragment::Prefix(query)
    }
}

impl From<WildcardQuery> for Fragment {
    fn from(query: WildcardQuery) -> Self {
        Fragment::Wildcard(query)
    }
}

impl From<BoolQuery> for Fragment {
    fn from(query: BoolQuery) -> Self {
        Fragment::Bool(query)
    }
}

/// Serialize `{ key: value }`
pub(crate) fn single_entry<S, V>(serializer: S, key: &str, value: &V) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize + ?Sized,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(key, value)?;
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_all_is_empty_object() {
        let fragment = Fragment::default();
        assert_eq!(fragment, Fragment::MatchAll);
        assert_eq!(fragment.query_type(), None);
        assert_eq!(serde_json::to_value(&fragment).unwrap(), json!({}));
    }

    #[test]
    fn test_fragment_wraps_clause_key() {
        let fragment = Fragment::from(TermQuery::new("status", "open"));
        assert_eq!(fragment.query_type(), Some("term"));
        assert_eq!(
            serde_json::to_value(&fragment).unwrap(),
            json!({ "term": { "status": "open" } })
        );
    }
}
