//! Page orchestration: single-page fetches and the concurrent aggregate.
//!
//! This module fans a query out to every configured page offset at once,
//! waits for all of them, and merges the pages that succeeded in offset
//! order. Page failures are reported, never raised.

pub mod aggregate;
pub mod fetch;

pub use aggregate::{
    Aggregation, AggregationStatus, PageFailure, PageFailureKind, aggregate, merge_pages,
};
pub use fetch::{fetch_first_page, fetch_page};
