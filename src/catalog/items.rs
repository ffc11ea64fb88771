//! Product item extraction from merged result entries.

use serde_json::Value;

use crate::config::{CatalogConfig, DEFAULT_PRODUCT_PATH_PREFIX, DEFAULT_STORE_ID};
use crate::types::{Item, ItemMetadata, MergedResult};

/// Turns result entries that link to product pages into [`Item`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemExtractor {
    product_path_prefix: String,
    store_id: u32,
}

impl Default for ItemExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_PRODUCT_PATH_PREFIX, DEFAULT_STORE_ID)
    }
}

impl ItemExtractor {
    pub fn new(product_path_prefix: impl Into<String>, store_id: u32) -> Self {
        Self {
            product_path_prefix: product_path_prefix.into(),
            store_id,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.product_path_prefix.clone(), config.placeholder_store_id)
    }

    /// Extract one item per product entry, in entry order.
    ///
    /// An entry qualifies when its `link` contains the product path prefix.
    /// The product id is the last path segment; entries with an empty last
    /// segment or no `link` are skipped. Duplicates are kept.
    pub fn extract(&self, merged: &MergedResult) -> Vec<Item> {
        merged
            .entries()
            .iter()
            .filter_map(|entry| entry.get("link").and_then(Value::as_str))
            .filter(|link| link.contains(self.product_path_prefix.as_str()))
            .filter_map(product_id)
            .map(|id| Item {
                product_id: id.to_owned(),
                item_id: id.to_owned(),
                // TODO: look the store id up from inventory once an inventory client exists.
                metadata: ItemMetadata {
                    store_id: self.store_id,
                },
            })
            .collect()
    }
}

/// The text after the last `/`, if non-empty.
fn product_id(link: &str) -> Option<&str> {
    let (_, id) = link.rsplit_once('/')?;
    (!id.is_empty()).then_some(id)
}
