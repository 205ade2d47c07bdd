//! Command-line interface definitions for News Search.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Connection settings can also come from environment variables or a YAML
//! config file; flags take precedence over both.

use clap::Parser;

/// Command-line arguments for the News Search application.
///
/// # Examples
///
/// ```sh
/// # Key from the environment
/// NEWS_API_KEY=... news_search "rust language"
///
/// # Several keywords at once, with JSON reports
/// news_search -k YOUR_KEY -j ./reports rust tokio "async await"
///
/// # Settings from a config file
/// news_search -c ~/.config/news_search.yaml climate
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Keywords to search for; each one is a separate search
    #[arg(required = true)]
    pub keywords: Vec<String>,

    /// News API key
    #[arg(short = 'k', long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the news API
    #[arg(short, long, env = "NEWS_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout_secs: Option<u64>,

    /// Output directory for JSON result files
    #[arg(short, long)]
    pub json_output_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "news_search",
            "--api-key",
            "abc",
            "--json-output-dir",
            "./json",
            "rust language",
        ]);

        assert_eq!(cli.keywords, vec!["rust language"]);
        assert_eq!(cli.api_key.as_deref(), Some("abc"));
        assert_eq!(cli.json_output_dir.as_deref(), Some("./json"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_short_flags_and_multiple_keywords() {
        let cli = Cli::parse_from([
            "news_search",
            "-k",
            "abc",
            "-b",
            "http://localhost:8080",
            "-t",
            "5",
            "-c",
            "/tmp/news.yaml",
            "rust",
            "tokio",
        ]);

        assert_eq!(cli.keywords, vec!["rust", "tokio"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.timeout_secs, Some(5));
        assert_eq!(cli.config.as_deref(), Some("/tmp/news.yaml"));
    }

    #[test]
    fn test_cli_requires_keyword() {
        assert!(Cli::try_parse_from(["news_search", "-k", "abc"]).is_err());
    }
}
