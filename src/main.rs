//! # News Search
//!
//! Searches a news API for one or more keywords and prints the complete
//! articles it finds, optionally writing a JSON report per keyword.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... news_search rust "async await" -j ./reports
//! ```
//!
//! ## Flow
//!
//! 1. **Configure**: merge the optional YAML config with flags and environment
//! 2. **Search**: run every keyword concurrently, one request each
//! 3. **Output**: print results in argument order; write JSON reports if asked
//!
//! Logs go to stderr so stdout carries only results.

use chrono::Local;
use clap::Parser;
use futures::future::join_all;
use news_search::{ArticleSearch, ArticleSearchClient, ConfigFile, SearchConfig};
use std::error::Error;
use std::io::Write;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod outputs;

use cli::Cli;
use news_search::utils::ensure_writable_dir;
use outputs::json::{SearchReport, write_report};
use outputs::text;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(keywords = ?args.keywords, config = ?args.config, "Parsed CLI arguments");

    // ---- Configuration ----
    let file = match args.config.as_deref() {
        Some(path) => Some(ConfigFile::load(path)?),
        None => None,
    };
    let config = SearchConfig::resolve(
        file,
        args.api_key.clone(),
        args.base_url.as_deref(),
        args.timeout_secs,
    )?;
    info!(?config, "Resolved configuration");

    if let Some(dir) = args.json_output_dir.as_deref() {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let client = ArticleSearchClient::new(config)?;

    let failed = search_and_present(
        &client,
        &args.keywords,
        args.json_output_dir.as_deref(),
        &mut std::io::stdout().lock(),
    )
    .await;

    let elapsed = start_time.elapsed();
    let total = args.keywords.len();
    info!(
        ?elapsed,
        total,
        succeeded = total - failed,
        failed,
        "Execution complete"
    );

    if failed == total {
        return Err(format!("all {total} searches failed").into());
    }
    if failed > 0 {
        warn!(failed, "Some searches failed");
    }
    Ok(())
}

/// Search every keyword concurrently, then render results in argument order.
///
/// Text goes to `out`; a JSON report is written per successful keyword when
/// `json_output_dir` is set. Returns how many searches failed.
#[instrument(level = "info", skip_all, fields(keywords = keywords.len()))]
async fn search_and_present<S: ArticleSearch>(
    searcher: &S,
    keywords: &[String],
    json_output_dir: Option<&str>,
    out: &mut impl Write,
) -> usize {
    let outcomes = join_all(keywords.iter().map(|keyword| searcher.search_results(keyword))).await;

    let mut failed = 0usize;
    for (keyword, outcome) in keywords.iter().zip(outcomes) {
        let results = match outcome {
            Ok(results) => results,
            Err(e) => {
                failed += 1;
                error!(%keyword, error = %e, status = ?e.status(), "Search failed");
                continue;
            }
        };

        if let Err(e) = out.write_all(text::render(keyword, &results).as_bytes()) {
            error!(%keyword, error = %e, "Failed to print results");
        }

        if let Some(dir) = json_output_dir {
            let now = Local::now();
            let report = SearchReport::new(keyword, now, &results);
            if let Err(e) = write_report(&report, now, dir).await {
                error!(%keyword, error = %e, "Failed to write JSON report");
            }
        }
    }
    failed
}
