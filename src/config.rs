use serde::{Deserialize, Serialize};

/// Default limit on operator nesting in a `$filter` tree
pub const DEFAULT_MAX_FILTER_DEPTH: usize = 64;

/// Translation settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// `size` emitted when `$top` is absent or unusable.
    ///
    /// Zero asks the engine for no hits at all.
    pub default_page_size: u64,
    /// Maximum operator nesting accepted in a filter tree
    pub max_filter_depth: usize,
    /// Honor a `$select` list holding a single field
    ///
    /// Off by default: a one-entry select list projects all fields.
    pub project_single_field: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            default_page_size: 0,
            max_filter_depth: DEFAULT_MAX_FILTER_DEPTH,
            project_single_field: false,
        }
    }
}

impl TranslatorConfig {
    /// Set the page size used when `$top` is missing
    pub fn with_default_page_size(mut self, size: u64) -> Self {
        self.default_page_size = size;
        self
    }

    /// Set the maximum filter depth
    pub fn with_max_filter_depth(mut self, depth: usize) -> Self {
        self.max_filter_depth = depth;
        self
    }

    /// Honor single-entry `$select` lists
    pub fn with_project_single_field(mut self, enabled: bool) -> Self {
        self.project_single_field = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TranslatorConfig::default();
        assert_eq!(config.default_page_size, 0);
        assert_eq!(config.max_filter_depth, 64);
        assert!(!config.project_single_field);
    }

    #[test]
    fn test_config_builder() {
        let config = TranslatorConfig::default()
            .with_default_page_size(25)
            .with_max_filter_depth(8)
            .with_project_single_field(true);

        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.max_filter_depth, 8);
        assert!(config.project_single_field);
    }

    #[test]
    fn test_partial_config_from_json() {
        let config: TranslatorConfig =
            serde_json::from_str(r#"{ "default_page_size": 50 }"#).unwrap();
        assert_eq!(config.default_page_size, 50);
        assert_eq!(config.max_filter_depth, DEFAULT_MAX_FILTER_DEPTH);
    }
}
