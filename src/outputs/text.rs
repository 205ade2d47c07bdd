//! Plain-text rendering of search results for the terminal.

use news_search::SearchResults;
use std::fmt::Write;

/// Render one keyword's results as a numbered list.
///
/// ```text
/// == rust (2 of 120) ==
/// 1. Headline
///    Description
///    https://example.com/story
///    thumbnail: https://example.com/thumb.jpg
/// ```
pub fn render(keyword: &str, results: &SearchResults) -> String {
    let mut out = String::new();
    let shown = results.articles.len();
    match results.total_results {
        Some(total) => writeln!(out, "== {keyword} ({shown} of {total}) ==").ok(),
        None => writeln!(out, "== {keyword} ({shown}) ==").ok(),
    };

    if results.articles.is_empty() {
        out.push_str("No articles found.\n");
        return out;
    }

    for (i, article) in results.articles.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, article.title()).ok();
        if !article.description().is_empty() {
            writeln!(out, "   {}", article.description().trim()).ok();
        }
        writeln!(out, "   {}", article.link()).ok();
        writeln!(out, "   thumbnail: {}", article.image_url()).ok();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use news_search::decode_results;

    #[test]
    fn test_render_lists_articles_in_order() {
        let results = decode_results(
            br#"{"totalResults": 7, "articles": [
                {"title": "One", "description": "First", "url": "https://a.example/1", "urlToImage": "https://a.example/1.png"},
                {"title": "Two", "description": "", "url": "https://a.example/2", "urlToImage": "https://a.example/2.png"}
            ]}"#,
        )
        .unwrap();

        let text = render("rust", &results);
        let expected = "\
== rust (2 of 7) ==
1. One
   First
   https://a.example/1
   thumbnail: https://a.example/1.png
2. Two
   https://a.example/2
   thumbnail: https://a.example/2.png
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty() {
        let results = decode_results(br#"{"status": "ok"}"#).unwrap();
        assert_eq!(render("nothing", &results), "== nothing (0) ==\nNo articles found.\n");
    }
}
