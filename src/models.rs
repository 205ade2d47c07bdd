//! Data models for search responses and the articles distilled from them.
//!
//! This module defines two layers:
//! - Wire types ([`SearchResponse`], [`RawArticle`]) that mirror the JSON the
//!   news API returns, with every field optional.
//! - Output types ([`Article`], [`SearchResults`]) that only ever hold
//!   fully-populated, validated data.
//!
//! The only way to get an [`Article`] is `Article::try_from(raw)`, so a
//! partially-filled article cannot exist.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// The top-level JSON object returned by `/v2/everything`.
///
/// This is decoding scaffolding: it lives only as long as it takes to reduce
/// it to [`SearchResults`].
///
/// # JSON Schema
///
/// ```json
/// { "status": "ok", "totalResults": 12, "articles": [ { ... } ] }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// `"ok"` on success. Informational only.
    pub status: Option<String>,
    /// Total number of matches the API knows about, not the size of this page.
    pub total_results: Option<u64>,
    /// Absent is treated the same as empty. Elements stay untyped so one
    /// malformed record cannot fail the whole response.
    pub articles: Option<Vec<Value>>,
}

/// One element of the `articles` array, exactly as received.
///
/// Unknown fields (`source`, `author`, `publishedAt`, `content`) are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
}

/// A complete article: every field present and well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    title: String,
    description: String,
    link: Url,
    image_url: Url,
}

impl Article {
    /// The headline. Never blank.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The summary text. May be empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Absolute URL of the full article.
    pub fn link(&self) -> &Url {
        &self.link
    }

    /// Absolute URL of the thumbnail image.
    pub fn image_url(&self) -> &Url {
        &self.image_url
    }
}

/// Why a [`RawArticle`] did not become an [`Article`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncompleteArticle {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("title is blank")]
    BlankTitle,

    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("field `{field}` is not an absolute http(s) URL: {value}")]
    InvalidUrl { field: &'static str, value: String },
}

impl TryFrom<RawArticle> for Article {
    type Error = IncompleteArticle;

    fn try_from(raw: RawArticle) -> Result<Self, Self::Error> {
        let title = raw.title.ok_or(IncompleteArticle::MissingField("title"))?;
        let description = raw
            .description
            .ok_or(IncompleteArticle::MissingField("description"))?;
        let url = raw.url.ok_or(IncompleteArticle::MissingField("url"))?;
        let url_to_image = raw
            .url_to_image
            .ok_or(IncompleteArticle::MissingField("urlToImage"))?;

        if title.trim().is_empty() {
            return Err(IncompleteArticle::BlankTitle);
        }

        Ok(Article {
            title,
            description,
            link: parse_web_url("url", url)?,
            image_url: parse_web_url("urlToImage", url_to_image)?,
        })
    }
}

impl TryFrom<Value> for Article {
    type Error = IncompleteArticle;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if !value.is_object() {
            return Err(IncompleteArticle::Malformed("expected an object".to_string()));
        }
        let raw: RawArticle = serde_json::from_value(value)
            .map_err(|e| IncompleteArticle::Malformed(e.to_string()))?;
        Article::try_from(raw)
    }
}

/// Parse an absolute URL, accepting only `http` and `https`.
fn parse_web_url(field: &'static str, value: String) -> Result<Url, IncompleteArticle> {
    match Url::parse(value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(url),
        _ => Err(IncompleteArticle::InvalidUrl { field, value }),
    }
}

/// The outcome of one successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    /// `status` as reported by the API, if any.
    pub status: Option<String>,
    /// `totalResults` as reported by the API, if any.
    pub total_results: Option<u64>,
    /// Complete articles, in the order the API returned them.
    pub articles: Vec<Article>,
    /// How many records were dropped for being incomplete.
    #[serde(skip)]
    pub dropped: usize,
}

impl From<SearchResponse> for SearchResults {
    fn from(response: SearchResponse) -> Self {
        let raw = response.articles.unwrap_or_default();
        let received = raw.len();
        let articles: Vec<Article> = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match Article::try_from(value) {
                Ok(article) => Some(article),
                Err(reason) => {
                    tracing::debug!(index, %reason, "Dropping incomplete article");
                    None
                }
            })
            .collect();

        SearchResults {
            status: response.status,
            total_results: response.total_results,
            dropped: received - articles.len(),
            articles,
        }
    }
}
