//! Search configuration with sensible defaults.
//!
//! [`CatalogConfig`] controls the search endpoint, which result pages are
//! fetched, per-page timeouts, and how the merged payload is reshaped into
//! catalog items and facets. It can be loaded from TOML; missing fields fall
//! back to the defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::facets::DEFAULT_FACET_ATTRIBUTES;
use crate::error::SearchError;
use crate::types::PageOffset;

/// Site-restricted Custom Search JSON API endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://customsearch.googleapis.com/customsearch/v1/siterestrict";

/// Link prefix identifying a product detail page.
pub const DEFAULT_PRODUCT_PATH_PREFIX: &str = "https://www.homedepot.com/p/";

/// Store id attached to every extracted item until inventory lookup exists.
pub const DEFAULT_STORE_ID: u32 = 32;

/// Largest page the Custom Search API will return.
pub const MAX_PAGE_SIZE: u32 = 10;

/// Configuration for a catalog search.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Search service endpoint.
    pub endpoint: String,
    /// Number of results requested per page.
    pub page_size: u32,
    /// Starting rank of every page to fetch. Fetched concurrently and merged
    /// in this order.
    pub offsets: Vec<u32>,
    /// Per-page fetch timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, the crate name and version are sent.
    pub user_agent: Option<String>,
    /// Entries whose link contains this prefix are treated as products.
    pub product_path_prefix: String,
    /// Store id reported in each item's metadata.
    pub placeholder_store_id: u32,
    /// Product attributes to build dimensions for, in output order.
    pub facet_attributes: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            page_size: MAX_PAGE_SIZE,
            offsets: vec![1, 11, 21],
            timeout_seconds: 8,
            user_agent: None,
            product_path_prefix: DEFAULT_PRODUCT_PATH_PREFIX.to_owned(),
            placeholder_store_id: DEFAULT_STORE_ID,
            facet_attributes: DEFAULT_FACET_ATTRIBUTES.map(str::to_owned).to_vec(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SearchError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SearchError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the text is not valid TOML for this type.
    pub fn from_toml_str(content: &str) -> Result<Self, SearchError> {
        toml::from_str(content).map_err(|e| SearchError::Config(e.to_string()))
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `endpoint` is an absolute `http` or `https` URL
    /// - `page_size` is between 1 and [`MAX_PAGE_SIZE`]
    /// - `offsets` is non-empty and every offset is at least 1
    /// - `timeout_seconds` is greater than 0
    /// - `product_path_prefix` is not empty
    /// - `facet_attributes` is non-empty and contains no blank names
    pub fn validate(&self) -> Result<(), SearchError> {
        let endpoint = Url::parse(&self.endpoint)
            .map_err(|e| SearchError::Config(format!("endpoint is not a valid URL: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SearchError::Config(
                "endpoint must use http or https".into(),
            ));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(SearchError::Config(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if self.offsets.is_empty() {
            return Err(SearchError::Config(
                "at least one page offset is required".into(),
            ));
        }
        if self.offsets.contains(&0) {
            return Err(SearchError::Config(
                "page offsets start at 1".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.product_path_prefix.is_empty() {
            return Err(SearchError::Config(
                "product_path_prefix must not be empty".into(),
            ));
        }
        if self.facet_attributes.is_empty() {
            return Err(SearchError::Config(
                "at least one facet attribute is required".into(),
            ));
        }
        if self.facet_attributes.iter().any(|a| a.trim().is_empty()) {
            return Err(SearchError::Config(
                "facet attribute names must not be blank".into(),
            ));
        }
        Ok(())
    }

    /// Page offsets in fetch/merge order.
    pub fn page_offsets(&self) -> Vec<PageOffset> {
        self.offsets.iter().copied().map(PageOffset::new).collect()
    }

    /// Per-page fetch timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = CatalogConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.offsets, vec![1, 11, 21]);
        assert_eq!(config.timeout_seconds, 8);
        assert!(config.user_agent.is_none());
        assert_eq!(config.product_path_prefix, "https://www.homedepot.com/p/");
        assert_eq!(config.placeholder_store_id, 32);
        assert_eq!(config.facet_attributes, vec!["brand", "color"]);
    }

    #[test]
    fn default_facets_match_facet_builder() {
        let config = CatalogConfig::default();
        assert_eq!(config.facet_attributes, DEFAULT_FACET_ATTRIBUTES);
        assert_eq!(
            crate::catalog::FacetBuilder::from_config(&config),
            crate::catalog::FacetBuilder::default()
        );
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(CatalogConfig::default().validate().is_ok());
    }

    #[test]
    fn page_offsets_follow_configured_order() {
        let config = CatalogConfig {
            offsets: vec![21, 1, 11],
            ..Default::default()
        };
        let offsets: Vec<u32> = config.page_offsets().iter().map(|o| o.get()).collect();
        assert_eq!(offsets, vec![21, 1, 11]);
    }

    #[test]
    fn malformed_endpoint_rejected() {
        let config = CatalogConfig {
            endpoint: "not a url".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn non_http_endpoint_rejected() {
        let config = CatalogConfig {
            endpoint: "ftp://example.com/search".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http"));
    }

    #[test]
    fn page_size_out_of_range_rejected() {
        for page_size in [0, 11] {
            let config = CatalogConfig {
                page_size,
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("page_size"));
        }
    }

    #[test]
    fn empty_offsets_rejected() {
        let config = CatalogConfig {
            offsets: vec![],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("offset"));
    }

    #[test]
    fn zero_offset_rejected() {
        let config = CatalogConfig {
            offsets: vec![0, 10],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("offsets"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = CatalogConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn empty_prefix_rejected() {
        let config = CatalogConfig {
            product_path_prefix: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_facet_attribute_rejected() {
        let config = CatalogConfig {
            facet_attributes: vec!["brand".into(), " ".into()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("facet"));

        let config = CatalogConfig {
            facet_attributes: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = CatalogConfig::from_toml_str(
            r#"
            timeout_seconds = 3
            offsets = [1, 11]
            "#,
        )
        .expect("parse");
        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.offsets, vec![1, 11]);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.facet_attributes, vec!["brand", "color"]);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = CatalogConfig::from_toml_str("page_size = \"ten\"").unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            "placeholder_store_id = 121\nfacet_attributes = [\"brand\"]\n",
        )
        .expect("write");

        let config = CatalogConfig::from_file(&path).expect("load");
        assert_eq!(config.placeholder_store_id, 121);
        assert_eq!(config.facet_attributes, vec!["brand"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_file_missing_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = CatalogConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
