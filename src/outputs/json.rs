//! JSON report output.
//!
//! Each keyword searched produces one file, grouped by the local date of the
//! search. The file name is the keyword's slug plus a hash of the keyword as
//! typed, so `Rust` and `rust` land in different files:
//!
//! ```text
//! json_output_dir/
//! └── 2026-10-15/
//!     └── rust-language-1a2b3c4d.json
//! ```
//!
//! Searching the exact same keyword twice on one day overwrites the earlier report.

use chrono::{DateTime, Local};
use news_search::SearchResults;
use news_search::utils::report_file_stem;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// What gets written for one keyword.
#[derive(Debug, Serialize)]
pub struct SearchReport<'a> {
    /// The keyword exactly as the user typed it.
    pub keyword: &'a str,
    /// When the search completed, RFC 3339 with local offset.
    pub searched_at: String,
    #[serde(flatten)]
    pub results: &'a SearchResults,
}

impl<'a> SearchReport<'a> {
    pub fn new(keyword: &'a str, searched_at: DateTime<Local>, results: &'a SearchResults) -> Self {
        Self {
            keyword,
            searched_at: searched_at.to_rfc3339(),
            results,
        }
    }
}

/// Write a [`SearchReport`] under `{json_output_dir}/{date}/{slug}-{hash}.json`.
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Directory creation, serialization, or the write itself failing.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, keyword = %report.keyword))]
pub async fn write_report(
    report: &SearchReport<'_>,
    searched_on: DateTime<Local>,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    let dir = PathBuf::from(json_output_dir).join(searched_on.date_naive().to_string());
    if let Err(e) = fs::create_dir_all(&dir).await {
        error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = dir.join(format!("{}.json", report_file_stem(report.keyword)));
    fs::write(&path, json).await?;
    info!(
        path = %path.display(),
        articles = report.results.articles.len(),
        "Wrote JSON report"
    );

    Ok(path)
}
