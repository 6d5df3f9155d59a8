pub mod parsed_query;

pub use parsed_query::{
    Directive, OrderItem, ParsedQuery, RawParsedQuery, MAX_DECODABLE_FILTER_DEPTH,
    MAX_INPUT_NESTING, SELECT_ALL,
};
