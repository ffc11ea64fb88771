//! Shared HTTP client for search service requests.
//!
//! One [`reqwest::Client`] is built per [`crate::engines::CustomSearchClient`]
//! and reused by every concurrent page fetch; `reqwest` pools connections
//! internally and is safe to share across tasks.

use std::time::Duration;

use crate::config::CatalogConfig;
use crate::error::SearchError;

/// User-Agent sent when the config does not override it.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] for search service requests.
///
/// The client has:
/// - Timeout from config
/// - User-Agent from config, or [`DEFAULT_USER_AGENT`]
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &CatalogConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}
