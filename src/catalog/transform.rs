//! Reshape a merged result into the enriched catalog view.

use crate::config::CatalogConfig;
use crate::types::{EnrichedResult, MergedResult};

use super::facets::FacetBuilder;
use super::items::ItemExtractor;

/// Adds `itemIds` and `dimensions` to a merged result.
///
/// Pure: the input is only read, and the same input always produces the
/// same output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogTransformer {
    items: ItemExtractor,
    facets: FacetBuilder,
}

impl CatalogTransformer {
    pub fn new(items: ItemExtractor, facets: FacetBuilder) -> Self {
        Self { items, facets }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            ItemExtractor::from_config(config),
            FacetBuilder::from_config(config),
        )
    }

    pub fn transform(&self, merged: &MergedResult) -> EnrichedResult {
        EnrichedResult {
            merged: merged.as_map().clone(),
            item_ids: self.items.extract(merged),
            dimensions: self.facets.build_dimensions(merged),
        }
    }
}
