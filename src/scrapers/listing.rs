//! Listing page scraper.
//!
//! Pulls the four per-item fields off a series news listing:
//!
//! | Field | Default selector | Value |
//! |-------|------------------|-------|
//! | Heading | `h2[class="cb-nws-hdln cb-font-18 line-ht24"]` | trimmed text |
//! | Summary | `div.cb-nws-intr` | trimmed text |
//! | Image URL | `img.cb-lst-img` | literal `src` |
//! | Link | `a[class="cb-nws-hdln-ancr text-hvr-underline"]` | origin + `href` |
//!
//! Two modes are supported. Page-wide mode selects each field across the
//! whole document and relies on the lists lining up by position. Item mode
//! (enabled by an `item` selector) reads the four fields inside each item
//! container, so one item's missing image cannot shift the others.

use crate::config::CompiledSelectors;
use crate::error::{Result, ScrapeError};
use crate::http::PageSource;
use crate::models::ListingFields;
use crate::utils::{element_text, join_origin, truncate_for_log};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};

/// Longest link dump written to the debug log.
const LINK_LOG_MAX: usize = 1_000;

/// Fetch the listing page and extract every field from it.
///
/// # Arguments
///
/// * `source` - Where pages come from (HTTP in production)
/// * `listing_url` - The series news listing
/// * `base_origin` - Origin prefixed onto relative article links
/// * `selectors` - Compiled field selectors
///
/// # Returns
///
/// The extracted [`ListingFields`], or an error if the fetch fails or a
/// matched image/anchor lacks its `src`/`href`.
#[instrument(level = "info", skip(source, selectors))]
pub async fn index_listing<S: PageSource>(
    source: &S,
    listing_url: &str,
    base_origin: &str,
    selectors: &CompiledSelectors,
) -> Result<ListingFields> {
    let html = source.fetch(listing_url).await?;
    let fields = parse_listing(&html, base_origin, selectors)?;
    info!(
        headings = fields.headings.len(),
        summaries = fields.summaries.len(),
        images = fields.image_urls.len(),
        links = fields.links.len(),
        "Indexed listing page"
    );
    debug!(
        links = %truncate_for_log(&format!("{:?}", fields.links), LINK_LOG_MAX),
        "Article links"
    );
    Ok(fields)
}

/// Extract listing fields from raw markup.
pub fn parse_listing(
    html: &str,
    base_origin: &str,
    selectors: &CompiledSelectors,
) -> Result<ListingFields> {
    let document = Html::parse_document(html);
    match &selectors.item {
        Some(item) => extract_items(&document, item, base_origin, selectors),
        None => Ok(ListingFields {
            headings: extract_headings(&document, &selectors.heading),
            summaries: extract_summaries(&document, &selectors.summary),
            image_urls: extract_image_urls(&document, &selectors.image, &selectors.source.image)?,
            links: extract_links(&document, &selectors.link, &selectors.source.link, base_origin)?,
        }),
    }
}

pub fn extract_headings(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|el| element_text(&el))
        .collect()
}

pub fn extract_summaries(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|el| element_text(&el))
        .collect()
}

/// `src` of every matched image, unmodified.
pub fn extract_image_urls(
    document: &Html,
    selector: &Selector,
    selector_src: &str,
) -> Result<Vec<String>> {
    document
        .select(selector)
        .map(|el| required_attr(&el, "src", selector_src))
        .collect()
}

/// `href` of every matched anchor, joined onto `base_origin`.
pub fn extract_links(
    document: &Html,
    selector: &Selector,
    selector_src: &str,
    base_origin: &str,
) -> Result<Vec<String>> {
    document
        .select(selector)
        .map(|el| required_attr(&el, "href", selector_src).map(|href| join_origin(base_origin, &href)))
        .collect()
}

fn required_attr(element: &ElementRef<'_>, attribute: &str, selector_src: &str) -> Result<String> {
    element
        .value()
        .attr(attribute)
        .map(str::to_string)
        .ok_or_else(|| ScrapeError::MissingAttribute {
            selector: selector_src.to_string(),
            attribute: attribute.to_string(),
        })
}

/// Read one record per item container. Incomplete items are skipped.
fn extract_items(
    document: &Html,
    item: &Selector,
    base_origin: &str,
    selectors: &CompiledSelectors,
) -> Result<ListingFields> {
    let mut fields = ListingFields::default();
    for (index, container) in document.select(item).enumerate() {
        let heading = container.select(&selectors.heading).next().map(|el| element_text(&el));
        let summary = container.select(&selectors.summary).next().map(|el| element_text(&el));
        let image = container
            .select(&selectors.image)
            .next()
            .and_then(|el| el.value().attr("src"));
        let href = container
            .select(&selectors.link)
            .next()
            .and_then(|el| el.value().attr("href"));

        match (heading, summary, image, href) {
            (Some(heading), Some(summary), Some(image), Some(href)) => {
                fields.push(heading, summary, image.to_string(), join_origin(base_origin, href));
            }
            (heading, summary, image, href) => {
                warn!(
                    index,
                    has_heading = heading.is_some(),
                    has_summary = summary.is_some(),
                    has_image = image.is_some(),
                    has_link = href.is_some(),
                    "Skipping incomplete listing item"
                );
            }
        }
    }
    Ok(fields)
}
