//! Catalog projections of a merged search result.
//!
//! Product items are pulled out of entry links, facet counts out of the
//! structured product metadata, and both are attached to the merged payload
//! by [`CatalogTransformer`]. Nothing here does I/O or mutates its input.

pub mod facets;
pub mod items;
pub mod transform;

pub use facets::{DEFAULT_FACET_ATTRIBUTES, FacetBuilder, build_dimension};
pub use items::ItemExtractor;
pub use transform::CatalogTransformer;
