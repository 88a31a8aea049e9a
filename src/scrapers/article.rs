//! Article page scraper.
//!
//! Each article body is the trimmed text of every `p.cb-nws-para` on the page,
//! joined with `\n` in document order. Articles are fetched one at a time in
//! listing order.

use crate::error::Result;
use crate::http::PageSource;
use futures::stream::{self, StreamExt, TryStreamExt};
use rand::{Rng, rng};
use scraper::{Html, Selector};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::utils::element_text;

/// How [`fetch_articles`] paces and reacts to failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchPolicy {
    /// Pause before every article fetch except the first.
    pub delay: Duration,
    /// Yield `None` for a failed article instead of aborting.
    pub skip_failed: bool,
}

/// Join the text of every matched paragraph with newlines.
///
/// Each paragraph's text is trimmed first. A page with no matching
/// paragraphs yields an empty string.
///
/// # Examples
///
/// ```ignore
/// let para = Selector::parse("p.cb-nws-para").unwrap();
/// let html = r#"<p class="cb-nws-para"> One </p><p class="cb-nws-para">Two</p>"#;
/// assert_eq!(extract_inner_text(html, &para), "One\nTwo");
/// ```
pub fn extract_inner_text(html: &str, paragraph: &Selector) -> String {
    let document = Html::parse_document(html);
    document
        .select(paragraph)
        .map(|p| element_text(&p))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fetch a single article and return its body text.
#[instrument(level = "info", skip(source, paragraph))]
pub async fn fetch_article<S: PageSource>(
    source: &S,
    url: &str,
    paragraph: &Selector,
) -> Result<String> {
    let html = source.fetch(url).await?;
    let text = extract_inner_text(&html, paragraph);
    info!(bytes = text.len(), lines = text.lines().count(), "Parsed article");
    Ok(text)
}

/// Fetch every article sequentially, in order.
///
/// # Arguments
///
/// * `source` - Where pages come from
/// * `urls` - Absolute article URLs, in listing order
/// * `paragraph` - Selector for body paragraphs
/// * `policy` - Delay between requests and failure handling
///
/// # Returns
///
/// One entry per URL, in the same order. Without `skip_failed` the first
/// failure aborts the batch and no further articles are requested. With it,
/// the failed slot is `None`.
#[instrument(level = "info", skip_all, fields(count = urls.len()))]
pub async fn fetch_articles<S: PageSource>(
    source: &S,
    urls: &[String],
    paragraph: &Selector,
    policy: FetchPolicy,
) -> Result<Vec<Option<String>>> {
    let bodies: Vec<Option<String>> = stream::iter(urls.iter().enumerate())
        .then(|(index, url)| async move {
            if index > 0 && !policy.delay.is_zero() {
                let jitter_ms: u64 = rng().random_range(0..=250);
                let pause = policy.delay + Duration::from_millis(jitter_ms);
                debug!(?pause, "Politeness delay");
                sleep(pause).await;
            }
            match fetch_article(source, url, paragraph).await {
                Ok(text) => Ok(Some(text)),
                Err(e) if policy.skip_failed => {
                    warn!(error = %e, %url, "Article fetch failed; skipping");
                    Ok(None)
                }
                Err(e) => {
                    error!(error = %e, %url, "Article fetch failed");
                    Err(e)
                }
            }
        })
        .try_collect()
        .await?;

    let fetched = bodies.iter().filter(|b| b.is_some()).count();
    info!(fetched, failed = bodies.len() - fetched, "Fetched article contents");
    Ok(bodies)
}
