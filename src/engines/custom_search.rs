//! Custom Search JSON API client.
//!
//! Calls the site-restricted Custom Search endpoint with
//! `key`, `cx`, `q`, `num` and `start` query parameters and returns the
//! response object untouched. The response shape is owned by the service;
//! this module only checks that it is a JSON object.

use serde_json::Value;
use url::Url;

use crate::config::CatalogConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::PageSource;
use crate::types::{JsonMap, PageOffset, Query};

/// HTTP client for the Custom Search JSON API.
///
/// Holds a single pooled [`reqwest::Client`]; clone-free sharing across
/// concurrent page fetches is done by reference or through an `Arc`.
pub struct CustomSearchClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    engine_id: String,
}

impl CustomSearchClient {
    /// Create a client for the search engine `engine_id` (the `cx` parameter).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        config: &CatalogConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| SearchError::Config(format!("endpoint is not a valid URL: {e}")))?;
        Ok(Self {
            client: http::build_client(config)?,
            endpoint,
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PageSource for CustomSearchClient {
    async fn fetch_page(
        &self,
        query: &Query,
        start: PageOffset,
        num: u32,
    ) -> Result<JsonMap, SearchError> {
        tracing::trace!(query = %query, start = start.get(), num, "custom search request");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query.as_str()),
            ])
            .query(&[("num", num), ("start", start.get())])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        tracing::trace!(
            status = status.as_u16(),
            bytes = body.len(),
            "custom search response received"
        );

        if !status.is_success() {
            let message = api_error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_owned))
                .unwrap_or_else(|| "unknown error".to_owned());
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_page(&body)
    }
}

/// Map a transport error without leaking the request URL (it carries the API key).
fn request_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        return SearchError::Timeout("custom search request timed out".into());
    }
    SearchError::Http(format!("custom search request failed: {}", err.without_url()))
}

/// Decode a success body into the response object.
pub(crate) fn parse_page(body: &str) -> Result<JsonMap, SearchError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(page)) => Ok(page),
        Ok(_) => Err(SearchError::Parse("response is not a JSON object".into())),
        Err(e) => Err(SearchError::Parse(format!("invalid JSON response: {e}"))),
    }
}

/// Pull `error.message` out of an API error body, if there is one.
fn api_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_owned)
}
