//! Query document assembly
//!
//! Combines the translated `$filter` with pagination, projection and sort
//! options into one [`QueryDocument`].

use crate::config::TranslatorConfig;
use crate::models::{Directive, OrderItem, ParsedQuery, RawParsedQuery, SELECT_ALL};
use crate::query::document::{QueryDocument, SortClause};
use crate::query::nodes::Fragment;
use crate::query::translator::FilterTranslator;
use crate::query::types::SortOrder;
use crate::Result;
use tracing::debug;

/// Builds query documents from parsed query options
#[derive(Clone, Debug, Default)]
pub struct QueryAssembler {
    config: TranslatorConfig,
    translator: FilterTranslator,
}

impl QueryAssembler {
    /// Create an assembler with the given settings
    pub fn new(config: TranslatorConfig) -> Self {
        let translator = FilterTranslator::new(config.max_filter_depth);
        Self { config, translator }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Build the query document
    ///
    /// - `from`/`size` come from `$skip`/`$top`; missing or unusable values
    ///   fall back to 0 and the configured default page size
    /// - `query` is the translated `$filter`, or `{}` without one
    /// - `_source` is the `$select` list when it holds more than one field
    ///   and does not start with `*`; otherwise it is empty
    /// - `sort` has one `{field: direction}` entry per `$orderby` item
    ///
    /// Only filter translation can fail; its error is reported as an input
    /// error.
    pub fn build_query(&self, parsed: &ParsedQuery) -> Result<QueryDocument> {
        let query = match &parsed.filter {
            Some(root) => self.translator.translate(root)?,
            None => Fragment::MatchAll,
        };

        Ok(QueryDocument {
            from: parsed.skip.provided().copied().unwrap_or(0),
            size: parsed
                .top
                .provided()
                .copied()
                .unwrap_or(self.config.default_page_size),
            query,
            source: self.projection(&parsed.select),
            sort: sort_clauses(&parsed.order_by),
        })
    }

    /// Convert raw parser output and build the document
    pub fn build_from_raw(&self, raw: RawParsedQuery) -> Result<QueryDocument> {
        self.build_query(&ParsedQuery::from_raw(raw)?)
    }

    fn projection(&self, select: &Directive<Vec<String>>) -> Vec<String> {
        let Some(fields) = select.provided() else {
            return Vec::new();
        };

        match fields.first() {
            None => Vec::new(),
            Some(first) if first == SELECT_ALL => Vec::new(),
            Some(_) if fields.len() > 1 || self.config.project_single_field => fields.clone(),
            Some(field) => {
                debug!(%field, "single-field $select projects all fields");
                Vec::new()
            }
        }
    }
}

fn sort_clauses(order_by: &Directive<Vec<OrderItem>>) -> Vec<SortClause> {
    order_by
        .provided()
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    let direction = item.order.as_deref();
                    if !matches!(direction, None | Some("asc") | Some("desc")) {
                        debug!(
                            field = %item.field,
                            ?direction,
                            "unknown sort direction, sorting ascending"
                        );
                    }
                    SortClause::new(item.field.as_str(), SortOrder::from_direction(direction))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Build a query document with the default settings
pub fn build_query(parsed: &ParsedQuery) -> Result<QueryDocument> {
    QueryAssembler::default().build_query(parsed)
}
