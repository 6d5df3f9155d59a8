pub mod config;
pub mod error;
pub mod models;
pub mod query;

pub use config::TranslatorConfig;
pub use error::{DslError, DslErrorKind, FilterError, Result};
pub use models::*;
pub use query::{build_query, translate, FilterTranslator, Fragment, QueryAssembler, QueryDocument};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
