//! # catalog-search
//!
//! Multi-page site search reshaped into a product catalog view.
//!
//! A query is sent to a site-restricted Custom Search endpoint once per
//! configured page offset, all pages at the same time. The pages that come
//! back are merged in offset order, then the merged payload is extended with
//! the product ids found in result links (`itemIds`) and per-attribute facet
//! counts (`dimensions`).
//!
//! ## Design
//!
//! - The search backend is injected as a [`PageSource`]; tests use fakes
//! - Pages are fetched concurrently, each with its own timeout
//! - Merge order is offset order, never completion order
//! - Graceful degradation: failed or malformed pages are reported in the
//!   [`Aggregation`] and left out; the rest are still merged
//! - The catalog transform is pure and tolerates an empty merged result
//!
//! ## Security
//!
//! - Queries are logged only at trace level
//! - Error messages never include the request URL (it carries the API key)

pub mod catalog;
pub mod config;
pub mod engines;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod source;
pub mod types;

pub use catalog::{CatalogTransformer, FacetBuilder, ItemExtractor};
pub use config::CatalogConfig;
pub use engines::CustomSearchClient;
pub use error::{Result, SearchError};
pub use orchestrator::{Aggregation, AggregationStatus, PageFailure, PageFailureKind};
pub use source::PageSource;
pub use types::{
    Dimension, EnrichedResult, Item, ItemMetadata, MergedResult, PageOffset, PageResult, Query,
    Refinement,
};

/// The enriched result of a catalog search and how it was assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSearch {
    /// The merged pages plus `itemIds` and `dimensions`.
    pub result: EnrichedResult,
    /// Whether every page, some pages, or no page made it into the result.
    pub status: AggregationStatus,
    /// Pages left out of the result, in offset order.
    pub failures: Vec<PageFailure>,
}

/// Search every configured page of `query` and build the catalog view.
///
/// Pages are fetched concurrently from `source`, merged in offset order,
/// and transformed with the items and facets described by `config`.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid, or
/// [`SearchError::InvalidQuery`] if `query` is blank. Page failures are not
/// errors: they are reported in [`CatalogSearch::failures`], and if every
/// page fails the result carries only empty `itemIds` and `dimensions`.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> catalog_search::Result<()> {
/// let config = catalog_search::CatalogConfig::default();
/// let client = catalog_search::CustomSearchClient::new("api-key", "engine-id", &config)?;
/// let search = catalog_search::search_catalog(&client, "hammer", &config).await?;
/// for item in &search.result.item_ids {
///     println!("{}", item.product_id);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_catalog<S: PageSource>(
    source: &S,
    query: &str,
    config: &CatalogConfig,
) -> Result<CatalogSearch> {
    config.validate()?;
    let query = Query::new(query)?;

    let aggregation = orchestrator::aggregate(source, &query, config).await;
    let status = aggregation.status();
    let result = CatalogTransformer::from_config(config).transform(&aggregation.merged);

    Ok(CatalogSearch {
        result,
        status,
        failures: aggregation.failures,
    })
}
