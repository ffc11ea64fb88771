//! Error types for the catalog-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. API keys never appear in error messages.

/// Errors that can occur while searching, fetching pages, or configuring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The request to the search service could not be sent or read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The search service answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message reported by the service, or the status reason.
        message: String,
    },

    /// The search service response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// A page fetch did not complete within its time budget.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The query text is unusable (blank).
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Convenience type alias for catalog-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
