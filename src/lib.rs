//! # News Search
//!
//! Keyword search against a NewsAPI-compatible `/v2/everything` endpoint,
//! decoded into a clean list of complete articles.
//!
//! ## Usage
//!
//! ```no_run
//! use news_search::{ArticleSearch, ArticleSearchClient, SearchConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArticleSearchClient::new(SearchConfig::new("your-api-key")?)?;
//! for article in client.search("rust language").await? {
//!     println!("{} <{}>", article.title(), article.link());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Guarantees
//!
//! - One HTTP GET per `search` call; nothing is retried or cached.
//! - Every returned [`Article`] has a non-blank title, a description, and two
//!   absolute http(s) URLs. Records missing any of these are silently dropped.
//! - Order is the order the API returned.
//! - Concurrent calls on one client are independent.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use api::{ArticleSearch, ArticleSearchClient, decode_results};
pub use config::{ConfigFile, SearchConfig};
pub use error::{SearchError, SearchResult};
pub use models::{Article, IncompleteArticle, SearchResults};
