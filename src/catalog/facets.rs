//! Facet (dimension) counts over product metadata.
//!
//! Each entry may carry `pagemap.product`, a list of product descriptors.
//! For every descriptor, the string value at the facet attribute is counted
//! as one record. Entries without product metadata are skipped.

use serde_json::Value;

use crate::config::CatalogConfig;
use crate::types::{Dimension, MergedResult};

/// Attributes faceted when nothing else is configured, in output order.
pub const DEFAULT_FACET_ATTRIBUTES: [&str; 2] = ["brand", "color"];

/// Builds one [`Dimension`] per configured attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetBuilder {
    attributes: Vec<String>,
}

impl Default for FacetBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_FACET_ATTRIBUTES)
    }
}

impl FacetBuilder {
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.facet_attributes.iter().cloned())
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// One dimension per attribute, in attribute order.
    pub fn build_dimensions(&self, merged: &MergedResult) -> Vec<Dimension> {
        self.attributes
            .iter()
            .map(|attribute| build_dimension(merged, attribute))
            .collect()
    }
}

/// Count the values of `attribute` across every product descriptor.
///
/// Refinements appear in the order their value was first seen. Descriptors
/// without a string value for `attribute` are not counted.
pub fn build_dimension(merged: &MergedResult, attribute: &str) -> Dimension {
    let mut dimension = Dimension::new(attribute);

    for (position, entry) in merged.entries().iter().enumerate() {
        let Some(products) = product_descriptors(entry) else {
            tracing::debug!(position, attribute, "entry has no product metadata; skipped");
            continue;
        };
        for value in products
            .iter()
            .filter_map(|product| product.get(attribute).and_then(Value::as_str))
        {
            dimension.record(value);
        }
    }

    dimension
}

fn product_descriptors(entry: &Value) -> Option<&Vec<Value>> {
    entry.get("pagemap")?.get("product")?.as_array()
}
