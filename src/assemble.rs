//! Pairs listing fields with article bodies into [`Row`]s.
//!
//! The heading list decides how many items a listing has. Every other list
//! must cover at least that many positions; entries past the last heading
//! (a stray promo thumbnail, say) are never paired and are dropped.

use crate::error::{Result, ScrapeError};
use crate::models::{ListingFields, Row};
use itertools::izip;
use tracing::debug;

/// Trim every list to the heading count.
///
/// # Arguments
///
/// * `fields` - Lists as extracted from the listing page
///
/// # Returns
///
/// The same fields with exactly `headings.len()` entries per list.
///
/// # Errors
///
/// [`ScrapeError::Misaligned`] if any list is shorter than the heading list,
/// i.e. some heading would have nothing to pair with.
pub fn align(mut fields: ListingFields) -> Result<ListingFields> {
    let n = fields.headings.len();
    check_lengths(&fields, fields.links.len())?;

    let extra = fields.summaries.len() + fields.image_urls.len() + fields.links.len() - 3 * n;
    if extra > 0 {
        debug!(
            extra,
            summaries = fields.summaries.len(),
            images = fields.image_urls.len(),
            links = fields.links.len(),
            headings = n,
            "Dropping listing entries past the last heading"
        );
    }
    fields.summaries.truncate(n);
    fields.image_urls.truncate(n);
    fields.links.truncate(n);
    Ok(fields)
}

fn check_lengths(fields: &ListingFields, paragraphs: usize) -> Result<()> {
    let n = fields.headings.len();
    let covered = fields.summaries.len() >= n
        && fields.image_urls.len() >= n
        && fields.links.len() >= n
        && paragraphs >= n;
    if covered {
        Ok(())
    } else {
        Err(ScrapeError::Misaligned {
            headings: n,
            summaries: fields.summaries.len(),
            images: fields.image_urls.len(),
            links: fields.links.len(),
            paragraphs,
        })
    }
}

/// Zip the listing fields and article bodies by position.
///
/// Iterates positions `0..headings.len()`. `bodies[i]` of `None` marks an
/// article that failed to download; that item is left out.
///
/// # Errors
///
/// [`ScrapeError::Misaligned`] if any list, `bodies` included, has fewer
/// entries than there are headings.
pub fn assemble_rows(fields: ListingFields, bodies: Vec<Option<String>>) -> Result<Vec<Row>> {
    check_lengths(&fields, bodies.len())?;
    let ListingFields {
        headings,
        summaries,
        image_urls,
        links,
    } = fields;

    Ok(izip!(headings, summaries, image_urls, links, bodies)
        .filter_map(|(heading, summary, image_url, target_link, body)| {
            body.map(|inner_para| Row {
                heading,
                summary,
                image_url,
                target_link,
                inner_para,
            })
        })
        .collect())
}
