//! News API interaction: keyword search against `/v2/everything`.
//!
//! # Architecture
//!
//! - [`ArticleSearch`]: the trait collaborators call through
//! - [`ArticleSearchClient`]: the HTTP implementation
//! - [`decode_results`]: the synchronous decode-and-filter step, usable on
//!   its own
//!
//! # Request Shape
//!
//! ```text
//! GET {base_url}/v2/everything?q=<percent-encoded keyword>&apiKey=<key>
//! ```
//!
//! One request per call. No retries, no caching, no rate limiting: every
//! failure goes straight back to the caller.

use crate::config::SearchConfig;
use crate::error::{SearchError, SearchResult};
use crate::models::{Article, SearchResponse, SearchResults};
use crate::utils::{redact_api_key, truncate_for_log};
use serde::Deserialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Path appended to the configured base URL.
const EVERYTHING_PATH: [&str; 2] = ["v2", "everything"];

/// How much of an unexpected body to include in log lines.
const BODY_PREVIEW_BYTES: usize = 300;

/// Trait for keyword article search.
///
/// Implementors resolve each call exactly once with either the complete
/// articles for that keyword or an error. Calls are independent of one
/// another and may overlap.
#[allow(async_fn_in_trait)]
pub trait ArticleSearch {
    /// Search for `keyword` and return the full outcome, including the
    /// backend's `status` and `totalResults`.
    ///
    /// # Arguments
    ///
    /// * `keyword` - Raw user input; may contain spaces, punctuation, or
    ///   non-ASCII text.
    async fn search_results(&self, keyword: &str) -> SearchResult<SearchResults>;

    /// Search for articles matching `keyword`.
    ///
    /// # Returns
    ///
    /// Complete articles in the order the backend ranked them. An empty
    /// vector is a valid result.
    async fn search(&self, keyword: &str) -> SearchResult<Vec<Article>> {
        self.search_results(keyword).await.map(|r| r.articles)
    }
}

/// Error object the API returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// HTTP client for the news search endpoint.
///
/// Holds only immutable configuration and a connection pool, so it is cheap
/// to clone and safe to share between tasks. Dropping a pending `search`
/// future cancels its request; nothing is delivered afterwards.
#[derive(Clone)]
pub struct ArticleSearchClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl fmt::Debug for ArticleSearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleSearchClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"***")
            .finish()
    }
}

impl ArticleSearchClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the base URL cannot carry a path or
    /// the HTTP client cannot be constructed.
    pub fn new(config: SearchConfig) -> SearchResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::Config(format!("cannot build HTTP client: {e}")))?;

        let mut endpoint = config.base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| SearchError::Config(format!("base URL cannot be a base: {}", config.base_url)))?
            .pop_if_empty()
            .extend(EVERYTHING_PATH);

        info!(endpoint = %endpoint, timeout = ?config.timeout, "Article search client ready");
        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key,
        })
    }

    /// The request URL for `keyword`, without sending anything.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidKeyword`] for blank keywords.
    pub fn request_url(&self, keyword: &str) -> SearchResult<Url> {
        let encoded = encode_keyword(keyword)?;
        let mut url = self.endpoint.clone();
        url.set_query(Some(&format!(
            "q={}&apiKey={}",
            encoded,
            urlencoding::encode(&self.api_key)
        )));
        Ok(url)
    }

    /// Search and return the full decoded outcome, including the API's
    /// `status` and `totalResults`.
    #[instrument(level = "info", skip(self))]
    pub async fn search_results(&self, keyword: &str) -> SearchResult<SearchResults> {
        let url = self.request_url(keyword).inspect_err(|e| {
            warn!(error = %e, "Rejected keyword before sending");
        })?;
        debug!(url = %redact_api_key(&url), "Sending search request");

        let t0 = Instant::now();
        let response = self.http.get(url).send().await.map_err(|e| {
            error!(elapsed_ms = t0.elapsed().as_millis() as u64, error = %e, "Search request failed");
            SearchError::Network(e)
        })?;

        let status = response.status();
        let rejected = match response.error_for_status_ref() {
            Ok(_) => None,
            Err(e) => Some(e),
        };
        if let Some(e) = rejected {
            let body = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(api) => warn!(
                    %status,
                    code = api.code.as_deref().unwrap_or("unknown"),
                    message = api.message.as_deref().unwrap_or(""),
                    "News API rejected the request"
                ),
                Err(_) => warn!(
                    %status,
                    body_preview = %truncate_for_log(&body, BODY_PREVIEW_BYTES),
                    "News API returned an error status"
                ),
            }
            return Err(SearchError::Network(e));
        }

        let body = response.bytes().await.map_err(|e| {
            error!(%status, error = %e, "Failed reading search response body");
            SearchError::Network(e)
        })?;
        let elapsed_ms = t0.elapsed().as_millis() as u64;

        let results = decode_results(&body)?;
        info!(
            %status,
            elapsed_ms,
            bytes = body.len(),
            total_results = ?results.total_results,
            returned = results.articles.len(),
            dropped = results.dropped,
            "Search completed"
        );
        Ok(results)
    }
}

impl ArticleSearch for ArticleSearchClient {
    async fn search_results(&self, keyword: &str) -> SearchResult<SearchResults> {
        ArticleSearchClient::search_results(self, keyword).await
    }
}

/// Decode a response body and reduce it to complete articles.
///
/// # Errors
///
/// Returns [`SearchError::Decode`] if the body is not JSON or its top level
/// is not the expected object. Incomplete records are dropped, not reported.
pub fn decode_results(body: &[u8]) -> SearchResult<SearchResults> {
    // Top level must be an object; a bare struct decode also accepts arrays.
    let decoded = serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(body)
        .and_then(|object| serde_json::from_value::<SearchResponse>(object.into()));
    match decoded {
        Ok(response) => Ok(SearchResults::from(response)),
        Err(e) => {
            let preview = String::from_utf8_lossy(body);
            warn!(
                error = %e,
                truncated = crate::utils::looks_truncated(&e),
                body_preview = %truncate_for_log(&preview, BODY_PREVIEW_BYTES),
                "Search response did not decode"
            );
            Err(SearchError::Decode(e))
        }
    }
}

/// Percent-encode a keyword for use as a query value.
///
/// Everything outside the RFC 3986 unreserved set is escaped as UTF-8 `%XX`,
/// so `&`, `?`, `+`, `#`, spaces and control characters cannot change the
/// query's structure. Only a blank keyword is refused.
fn encode_keyword(keyword: &str) -> SearchResult<String> {
    if keyword.trim().is_empty() {
        return Err(SearchError::InvalidKeyword("keyword is empty".to_string()));
    }
    Ok(urlencoding::encode(keyword).into_owned())
}
