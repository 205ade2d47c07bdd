//! Utility functions for logging, file naming, and file system checks.
//!
//! - String truncation for log previews of response bodies
//! - Redaction of the API key from request URLs before they are logged
//! - JSON error classification for truncated bodies
//! - Slugs and hashed stems for report file names, output directory validation

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary) with
/// an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Detect if a serde_json error indicates truncated/incomplete JSON.
///
/// A body that was cut off mid-transfer fails with an EOF error rather than
/// a syntax error.
pub fn looks_truncated(e: &serde_json::Error) -> bool {
    use serde_json::error::Category;
    matches!(e.classify(), Category::Eof)
}

/// Render a request URL with the `apiKey` query value replaced by `***`.
pub fn redact_api_key(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "apiKey") {
        return url.to_string();
    }
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apiKey" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

/// Convert a keyword to a file-name friendly slug.
///
/// Lowercases the text, drops everything but alphanumerics, spaces and
/// hyphens, then replaces spaces with hyphens. Falls back to `"search"` when
/// nothing survives.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("C++ & Rust?"), "c--rust");
/// ```
pub fn slugify(text: &str) -> String {
    let slug = text
        .trim()
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .replace(' ', "-");
    if slug.is_empty() { "search".to_string() } else { slug }
}

/// File name stem for a keyword's report: its slug plus a short hash of the
/// raw keyword.
///
/// Keywords that slug alike (`"C++"`, `"C#"`, `"c"`, or `"Rust"` and
/// `"rust"`) still get distinct stems; the same keyword always gets the same one.
pub fn report_file_stem(keyword: &str) -> String {
    let hash = xxhash_rust::xxh3::xxh3_64(keyword.as_bytes());
    format!("{}-{:08x}", slugify(keyword), hash as u32)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and deletes a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte_boundary() {
        // 'é' is two bytes; cutting at 3 would split the second one
        let result = truncate_for_log("éééé", 3);
        assert_eq!(result, "é…(+6 bytes)");
    }

    #[test]
    fn test_looks_truncated() {
        let json_eof = r#"{"field": "value"#;
        let e = serde_json::from_str::<serde_json::Value>(json_eof).unwrap_err();
        assert!(looks_truncated(&e));

        let e = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(!looks_truncated(&e));
    }

    #[test]
    fn test_redact_api_key() {
        let url = Url::parse("https://newsapi.org/v2/everything?q=rust%20lang&apiKey=secret").unwrap();
        let redacted = redact_api_key(&url);
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("apiKey=***") || redacted.contains("apiKey=%2A%2A%2A"));

        let parsed = Url::parse(&redacted).unwrap();
        let q: Vec<_> = parsed.query_pairs().filter(|(k, _)| k == "q").collect();
        assert_eq!(q[0].1, "rust lang");
    }

    #[test]
    fn test_redact_without_key_is_unchanged() {
        let url = Url::parse("https://example.com/path?q=a").unwrap();
        assert_eq!(redact_api_key(&url), "https://example.com/path?q=a");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Test-Article!"), "test-article");
        assert_eq!(slugify("C++ & Rust?"), "c--rust");
        assert_eq!(slugify("東京 ニュース"), "東京-ニュース");
        assert_eq!(slugify("???"), "search");
    }

    #[test]
    fn test_report_file_stem_distinguishes_colliding_slugs() {
        let stems: Vec<String> = ["C++", "C#", "c", "Rust", "rust"]
            .iter()
            .map(|k| report_file_stem(k))
            .collect();
        for (i, a) in stems.iter().enumerate() {
            for b in &stems[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(stems[0].starts_with("c-"));
        assert!(stems[3].starts_with("rust-"));
        assert_eq!(report_file_stem("C++"), stems[0]);
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b/c");
        let nested = nested.to_str().unwrap();
        ensure_writable_dir(nested).await.unwrap();
        assert!(std::path::Path::new(nested).is_dir());
    }
}
