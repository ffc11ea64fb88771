//! Single-page fetch with timeout and latency logging.
//!
//! Every failure mode of the collaborator (transport, API status, parse,
//! timeout) is folded into the returned [`PageResult`]; nothing here
//! returns early or panics.

use std::time::Instant;

use crate::config::CatalogConfig;
use crate::error::SearchError;
use crate::source::PageSource;
use crate::types::{JsonMap, PageOffset, PageResult, Query};

/// Fetch the page starting at `offset`, bounded by `config.timeout()`.
///
/// Failures are logged at warn level with the offset and returned inside
/// the [`PageResult`]. Elapsed latency is logged for every call.
pub async fn fetch_page<S: PageSource>(
    source: &S,
    query: &Query,
    offset: PageOffset,
    config: &CatalogConfig,
) -> PageResult {
    let started = Instant::now();
    let request = source.fetch_page(query, offset, config.page_size);

    let outcome = match tokio::time::timeout(config.timeout(), request).await {
        Ok(outcome) => outcome,
        Err(_) => Err(SearchError::Timeout(format!(
            "page at offset {offset} exceeded {}s",
            config.timeout_seconds
        ))),
    };

    let page = PageResult { offset, outcome };
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    match &page.outcome {
        Ok(_) => {
            tracing::debug!(
                offset = offset.get(),
                elapsed_ms,
                entries = ?page.entry_count(),
                "page fetched"
            );
        }
        Err(err) => {
            tracing::warn!(offset = offset.get(), elapsed_ms, error = %err, "page fetch failed");
        }
    }
    page
}

/// Fetch only the first page (offset 1) and return it as-is.
///
/// A diagnostic probe for checking the collaborator's credentials and
/// response shape without running a full aggregation.
///
/// # Errors
///
/// Returns the page's [`SearchError`] if the fetch failed or timed out.
pub async fn fetch_first_page<S: PageSource>(
    source: &S,
    query: &Query,
    config: &CatalogConfig,
) -> Result<JsonMap, SearchError> {
    fetch_page(source, query, PageOffset::new(1), config)
        .await
        .outcome
}
