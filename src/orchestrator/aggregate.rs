//! Concurrent multi-page fetch and offset-ordered merge.
//!
//! One fetch per configured offset runs concurrently. Each fetch is tagged
//! with its slot index and lands in a slot array sized to the offset count,
//! so the merge walks pages in offset order no matter which finished first.

use std::fmt;
use std::time::Instant;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use serde_json::Value;

use crate::config::CatalogConfig;
use crate::error::SearchError;
use crate::source::PageSource;
use crate::types::{ITEMS_KEY, JsonMap, MergedResult, PageOffset, PageResult, Query};

use super::fetch::fetch_page;

/// Why a page contributed nothing to the merged result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFailureKind {
    /// The collaborator call failed or timed out.
    Fetch,
    /// The page arrived but its `items` were missing or not a list.
    Malformed,
}

/// A page that contributed no entries, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub offset: PageOffset,
    pub kind: PageFailureKind,
    pub message: String,
}

impl PageFailure {
    fn fetch(offset: PageOffset, err: &SearchError) -> Self {
        Self {
            offset,
            kind: PageFailureKind::Fetch,
            message: err.to_string(),
        }
    }

    fn malformed(offset: PageOffset, message: impl Into<String>) -> Self {
        Self {
            offset,
            kind: PageFailureKind::Malformed,
            message: message.into(),
        }
    }
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}: {}", self.offset, self.message)
    }
}

/// Overall outcome of an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationStatus {
    /// Every page merged cleanly.
    Complete,
    /// Some pages failed; the merged result holds the rest.
    Partial,
    /// Every page failed or was malformed; the merged result is empty.
    Failed,
}

/// The merged result plus a record of every page that was left out.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub merged: MergedResult,
    pub failures: Vec<PageFailure>,
    /// Number of pages that were merged or attempted.
    pub pages: usize,
}

impl Aggregation {
    pub fn status(&self) -> AggregationStatus {
        if self.failures.len() >= self.pages {
            AggregationStatus::Failed
        } else if self.failures.is_empty() {
            AggregationStatus::Complete
        } else {
            AggregationStatus::Partial
        }
    }

    pub fn into_merged(self) -> MergedResult {
        self.merged
    }
}

/// Fetch every configured page of `query` concurrently and merge them.
///
/// Never fails: fetch errors, timeouts and malformed pages are recorded in
/// [`Aggregation::failures`] and the remaining pages are still merged.
pub async fn aggregate<S: PageSource>(
    source: &S,
    query: &Query,
    config: &CatalogConfig,
) -> Aggregation {
    let started = Instant::now();
    tracing::trace!(query = %query, "aggregating pages");

    let offsets = config.page_offsets();
    let mut slots: Vec<Option<PageResult>> = vec![None; offsets.len()];

    let mut in_flight: FuturesUnordered<_> = offsets
        .iter()
        .copied()
        .enumerate()
        .map(|(slot, offset)| async move {
            (slot, fetch_page(source, query, offset, config).await)
        })
        .collect();

    while let Some((slot, page)) = in_flight.next().await {
        if let Some(entry) = slots.get_mut(slot) {
            *entry = Some(page);
        }
    }

    let aggregation = merge_pages(slots.into_iter().flatten());

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    tracing::info!(
        pages = offsets.len(),
        failed = aggregation.failures.len(),
        entries = aggregation.merged.entries().len(),
        status = ?aggregation.status(),
        elapsed_ms,
        "aggregation finished"
    );
    aggregation
}

/// Merge page results, which must already be in offset order.
///
/// The first successful page becomes the seed: its metadata and entries are
/// adopted whole. Every later successful page appends its `items` to the
/// seed's. Failed pages are skipped. A page whose `items` is missing or not
/// a list is recorded as malformed and contributes nothing.
pub fn merge_pages(pages: impl IntoIterator<Item = PageResult>) -> Aggregation {
    let mut seed: Option<JsonMap> = None;
    let mut failures = Vec::new();
    let mut attempted = 0;

    for page in pages {
        attempted += 1;
        let offset = page.offset;
        let body = match page.outcome {
            Ok(body) => body,
            Err(err) => {
                failures.push(PageFailure::fetch(offset, &err));
                continue;
            }
        };

        let Some(merged) = seed.as_mut() else {
            match body.get(ITEMS_KEY) {
                Some(Value::Array(_)) | None => seed = Some(body),
                Some(_) => {
                    tracing::warn!(offset = offset.get(), "first page has non-list items; skipped");
                    failures.push(PageFailure::malformed(offset, "`items` is not a list"));
                }
            }
            continue;
        };

        match append_entries(merged, body) {
            Ok(count) => tracing::debug!(offset = offset.get(), count, "page merged"),
            Err(reason) => {
                tracing::warn!(offset = offset.get(), reason, "malformed page skipped");
                failures.push(PageFailure::malformed(offset, reason));
            }
        }
    }

    Aggregation {
        merged: seed.map(MergedResult::from).unwrap_or_default(),
        failures,
        pages: attempted,
    }
}

/// Move a page's entries onto the end of the merged `items`.
fn append_entries(merged: &mut JsonMap, mut page: JsonMap) -> Result<usize, &'static str> {
    let entries = match page.remove(ITEMS_KEY) {
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err("`items` is not a list"),
        None => return Err("response has no `items`"),
    };
    let count = entries.len();

    let target = merged
        .entry(ITEMS_KEY)
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(existing) = target {
        existing.extend(entries);
    }
    Ok(count)
}
