//! Trait definition for the remote search collaborator.
//!
//! The aggregator only ever asks for one page at a time. Anything that can
//! answer "give me `num` results for this query starting at rank `start`"
//! implements [`PageSource`]: the HTTP client in
//! [`crate::engines::CustomSearchClient`], or a fake in tests.

use std::future::Future;
use std::sync::Arc;

use crate::error::SearchError;
use crate::types::{JsonMap, PageOffset, Query};

/// A search backend that returns one page of results per call.
///
/// One handle is shared by every concurrent page fetch of an aggregation,
/// so implementations must be `Send + Sync` and safe to call concurrently.
pub trait PageSource: Send + Sync {
    /// Fetch one page of results.
    ///
    /// # Arguments
    ///
    /// * `query`: The search query.
    /// * `start`: Rank of the first result on the page (1-based).
    /// * `num`: Number of results requested.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, the service reports an
    /// error, or the response is not a JSON object.
    fn fetch_page(
        &self,
        query: &Query,
        start: PageOffset,
        num: u32,
    ) -> impl Future<Output = Result<JsonMap, SearchError>> + Send;
}

impl<T: PageSource> PageSource for Arc<T> {
    fn fetch_page(
        &self,
        query: &Query,
        start: PageOffset,
        num: u32,
    ) -> impl Future<Output = Result<JsonMap, SearchError>> + Send {
        (**self).fetch_page(query, start, num)
    }
}
