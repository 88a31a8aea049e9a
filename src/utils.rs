//! Small helpers for URL joining, text cleanup, and output paths.

use scraper::ElementRef;
use std::path::Path;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a char boundary) with
/// `"…(+N bytes)"` appended.
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

/// Join a site origin and an `href` with exactly one `/` between them.
///
/// Absolute `http(s)` hrefs are returned unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(join_origin("https://www.cricbuzz.com/", "/cricket-news/1"),
///            "https://www.cricbuzz.com/cricket-news/1");
/// ```
pub fn join_origin(origin: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

/// All text beneath an element, concatenated, with outer whitespace trimmed.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Create the parent directory of `path` if it has one and it is missing.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            tokio::fs::create_dir_all(parent).await?;
            info!(parent = %parent.display(), "Output directory ready");
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

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
    fn test_truncate_for_log_respects_char_boundary() {
        let result = truncate_for_log("ééé", 3);
        assert_eq!(result, "é…(+4 bytes)");
    }

    #[test]
    fn test_join_origin_slash_combinations() {
        let expected = "https://www.cricbuzz.com/cricket-news/130001/rcb-win";
        for (origin, href) in [
            ("https://www.cricbuzz.com", "/cricket-news/130001/rcb-win"),
            ("https://www.cricbuzz.com/", "/cricket-news/130001/rcb-win"),
            ("https://www.cricbuzz.com", "cricket-news/130001/rcb-win"),
            ("https://www.cricbuzz.com/", "cricket-news/130001/rcb-win"),
        ] {
            assert_eq!(join_origin(origin, href), expected, "{origin} + {href}");
        }
    }

    #[test]
    fn test_join_origin_keeps_absolute_href() {
        assert_eq!(
            join_origin("https://www.cricbuzz.com", "https://static.example.com/a"),
            "https://static.example.com/a"
        );
    }

    #[test]
    fn test_element_text_concatenates_and_trims() {
        let html = Html::parse_fragment("<h2>\n  Kohli <b>hits</b> ton  \n</h2>");
        let selector = Selector::parse("h2").unwrap();
        let h2 = html.select(&selector).next().unwrap();
        assert_eq!(element_text(&h2), "Kohli hits ton");
    }

    #[tokio::test]
    async fn test_ensure_parent_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/out.xlsx");
        ensure_parent_dir(&target).await.unwrap();
        assert!(dir.path().join("a/b").is_dir());
        ensure_parent_dir(Path::new("bare.xlsx")).await.unwrap();
    }
}
