//! Search client configuration.
//!
//! The API host and key are static for the life of a client. They come from,
//! in increasing order of precedence:
//!
//! 1. Built-in defaults (`https://newsapi.org`, 60 second timeout)
//! 2. An optional YAML file
//! 3. Command-line flags / environment variables (applied by the binary)
//!
//! # File Format
//!
//! ```yaml
//! api_key: 0123456789abcdef
//! base_url: https://newsapi.org   # optional
//! timeout_secs: 60                # optional
//! ```

use crate::error::{SearchError, SearchResult};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Public NewsAPI endpoint host.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";

/// Matches the platform HTTP default the app was written against.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Everything an [`ArticleSearchClient`](crate::api::ArticleSearchClient) needs.
#[derive(Clone)]
pub struct SearchConfig {
    /// Scheme and host (optionally a path prefix) that `/v2/everything` hangs off.
    pub base_url: Url,
    /// Sent as the `apiKey` query parameter.
    pub api_key: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// On-disk shape of the YAML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Parse a config file from YAML text.
    pub fn from_yaml_str(yaml: &str) -> SearchResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| SearchError::Config(format!("invalid YAML: {e}")))
    }

    /// Read and parse a config file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> SearchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("cannot read {}: {e}", path.display())))?;
        let file = Self::from_yaml_str(&text)?;
        info!(
            has_api_key = file.api_key.is_some(),
            base_url = ?file.base_url,
            "Loaded configuration file"
        );
        Ok(file)
    }
}

impl SearchConfig {
    /// Configuration with the default endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> SearchResult<Self> {
        Self::build(Some(api_key.into()), None, None)
    }

    /// Point the client at a different host, e.g. a proxy or a test server.
    pub fn with_base_url(mut self, base_url: &str) -> SearchResult<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from a YAML file, with no overrides.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> SearchResult<Self> {
        let file = ConfigFile::load(path)?;
        Self::build(file.api_key, file.base_url.as_deref(), file.timeout_secs)
    }

    /// Merge an optional config file with explicit overrides.
    ///
    /// Overrides win over file values; file values win over defaults. The API
    /// key has no default: if neither source supplies one this fails.
    pub fn resolve(
        file: Option<ConfigFile>,
        api_key: Option<String>,
        base_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> SearchResult<Self> {
        let file = file.unwrap_or_default();
        Self::build(
            api_key.or(file.api_key),
            base_url.or(file.base_url.as_deref()),
            timeout_secs.or(file.timeout_secs),
        )
    }

    fn build(
        api_key: Option<String>,
        base_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> SearchResult<Self> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SearchError::Config("missing API key".to_string()))?;

        let timeout = match timeout_secs {
            Some(0) => return Err(SearchError::Config("timeout must be positive".to_string())),
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        Ok(SearchConfig {
            base_url: parse_base_url(base_url.unwrap_or(DEFAULT_BASE_URL))?,
            api_key,
            timeout,
        })
    }
}

fn parse_base_url(raw: &str) -> SearchResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| SearchError::Config(format!("invalid base URL {raw:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(SearchError::Config(format!(
            "base URL must be an http(s) URL with a host: {raw:?}"
        )));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(SearchError::Config(format!(
            "base URL must not carry a query or fragment: {raw:?}"
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::new("key").unwrap();
        assert_eq!(config.base_url.as_str(), "https://newsapi.org/");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(
            SearchConfig::resolve(None, None, None, None),
            Err(SearchError::Config(_))
        ));
        assert!(matches!(SearchConfig::new("   "), Err(SearchError::Config(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = SearchConfig::new("key").unwrap();
        assert!(config.clone().with_base_url("not a url").is_err());
        assert!(config.clone().with_base_url("ftp://example.com").is_err());
        assert!(config.clone().with_base_url("https://example.com/?x=1").is_err());
        assert!(config.with_base_url("http://127.0.0.1:8080").is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(SearchConfig::resolve(None, Some("key".into()), None, Some(0)).is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = ConfigFile::from_yaml_str(
            "api_key: from-file\nbase_url: https://file.example\ntimeout_secs: 5\n",
        )
        .unwrap();
        let config = SearchConfig::resolve(
            Some(file),
            Some("from-flag".to_string()),
            None,
            Some(10),
        )
        .unwrap();

        assert_eq!(config.api_key, "from-flag");
        assert_eq!(config.base_url.as_str(), "https://file.example/");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_unknown_yaml_field_rejected() {
        assert!(ConfigFile::from_yaml_str("api_key: k\napi_host: x\n").is_err());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: abc123").unwrap();
        writeln!(file, "timeout_secs: 15").unwrap();

        let config = SearchConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.base_url.as_str(), "https://newsapi.org/");
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            SearchConfig::from_yaml_file("/definitely/not/here.yaml"),
            Err(SearchError::Config(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SearchConfig::new("super-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }
}
