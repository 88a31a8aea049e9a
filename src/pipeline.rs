//! The end-to-end scrape: listing, articles, rows, files.
//!
//! 1. **Indexing**: fetch the listing and extract the four field lists
//! 2. **Aligning**: trim every list to the heading count, failing if one falls short
//! 3. **Fetching**: download each article body, sequentially
//! 4. **Assembling**: zip everything into rows
//! 5. **Output**: write the spreadsheet (and the JSON report if asked)

use crate::assemble::{align, assemble_rows};
use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::http::{HttpSource, PageSource, RetryFetch};
use crate::models::ScrapeReport;
use crate::outputs::{json, xlsx};
use crate::scrapers::article::{FetchPolicy, fetch_articles};
use crate::scrapers::listing::index_listing;
use chrono::Local;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// First retry waits this long; later ones double it.
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Scrape the configured listing through `source` and return the rows.
///
/// # Arguments
///
/// * `source` - Fetches the listing and every article page
/// * `config` - Listing URL, origin, selectors and fetch policy
///
/// # Returns
///
/// The rows in listing order plus the links of any skipped articles.
/// Nothing is written to disk.
///
/// # Errors
///
/// Fails on the listing fetch, on a field list shorter than the headings,
/// and on the first failed article unless `skip_failed` is set.
#[instrument(level = "info", skip_all, fields(listing_url = %config.listing_url))]
pub async fn scrape<S: PageSource>(source: &S, config: &ScrapeConfig) -> Result<ScrapeReport> {
    let selectors = config.selectors.compile()?;
    let fields = index_listing(
        source,
        &config.listing_url,
        &config.base_origin,
        &selectors,
    )
    .await?;
    let fields = align(fields)?;

    let policy = FetchPolicy {
        delay: config.delay(),
        skip_failed: config.skip_failed,
    };
    let bodies = fetch_articles(source, &fields.links, &selectors.paragraph, policy).await?;

    let skipped: Vec<String> = fields
        .links
        .iter()
        .zip(&bodies)
        .filter(|(_, body)| body.is_none())
        .map(|(link, _)| link.clone())
        .collect();
    if !skipped.is_empty() {
        warn!(count = skipped.len(), "Some articles were skipped");
    }

    let rows = assemble_rows(fields, bodies)?;
    info!(rows = rows.len(), "Assembled rows");

    Ok(ScrapeReport {
        listing_url: config.listing_url.clone(),
        scraped_at: Local::now().to_rfc3339(),
        rows,
        skipped,
    })
}

/// Scrape over HTTP and write every configured output.
#[instrument(level = "info", skip_all)]
pub async fn run(config: &ScrapeConfig) -> Result<ScrapeReport> {
    let http = HttpSource::new(config.timeout())?;
    let source = RetryFetch::new(http, config.retries, RETRY_BASE_DELAY);

    let report = scrape(&source, config).await?;

    xlsx::write_spreadsheet(&report.rows, &config.output).await?;
    if let Some(path) = &config.json_output {
        json::write_report(&report, path).await?;
    }
    Ok(report)
}
