//! Data models for scraped listing fields and assembled rows.
//!
//! - [`ListingFields`]: the four lists pulled off the listing page
//! - [`Row`]: one news item with its article body, ready for export
//! - [`ScrapeReport`]: everything a single run produced

use serde::{Deserialize, Serialize};

/// Spreadsheet header, in column order.
pub const HEADER: [&str; 5] = ["Heading", "SubContent", "ImageURL", "TargetLink", "InnerPara"];

/// The four parallel lists extracted from a listing page.
///
/// Index `i` of every list is expected to describe the same news item.
/// [`crate::assemble::align`] trims the lists to the heading count and fails
/// if any of them falls short.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFields {
    pub headings: Vec<String>,
    pub summaries: Vec<String>,
    pub image_urls: Vec<String>,
    /// Absolute article URLs.
    pub links: Vec<String>,
}

impl ListingFields {
    /// Number of news items, counted by headline.
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    pub(crate) fn push(&mut self, heading: String, summary: String, image_url: String, link: String) {
        self.headings.push(heading);
        self.summaries.push(summary);
        self.image_urls.push(image_url);
        self.links.push(link);
    }
}

/// One exported record.
///
/// Field order matches [`HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Row {
    pub heading: String,
    pub summary: String,
    pub image_url: String,
    pub target_link: String,
    /// Article paragraphs joined with `\n`. The spreadsheet writer cuts this at
    /// Excel's 32,767-character cell limit; the JSON report keeps it whole.
    pub inner_para: String,
}

impl Row {
    /// Cells in spreadsheet column order.
    pub fn cells(&self) -> [&str; 5] {
        [
            self.heading.as_str(),
            self.summary.as_str(),
            self.image_url.as_str(),
            self.target_link.as_str(),
            self.inner_para.as_str(),
        ]
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScrapeReport {
    /// The listing page that was scraped.
    pub listing_url: String,
    /// Local timestamp (RFC 3339) taken when the run finished.
    pub scraped_at: String,
    /// Assembled rows in listing order.
    pub rows: Vec<Row>,
    /// Articles dropped because their page could not be fetched.
    pub skipped: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_cells_follow_header_order() {
        let row = Row {
            heading: "h".to_string(),
            summary: "s".to_string(),
            image_url: "i".to_string(),
            target_link: "t".to_string(),
            inner_para: "p".to_string(),
        };
        assert_eq!(row.cells(), ["h", "s", "i", "t", "p"]);
        assert_eq!(HEADER.len(), row.cells().len());
    }

    #[test]
    fn test_listing_fields_len_counts_headings() {
        let mut fields = ListingFields::default();
        assert!(fields.is_empty());
        fields.push("a".into(), "b".into(), "c".into(), "d".into());
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.links, vec!["d".to_string()]);
    }

    #[test]
    fn test_report_serializes_rows() {
        let report = ScrapeReport {
            listing_url: "https://example.com/series".to_string(),
            scraped_at: "2024-04-01T10:00:00+00:00".to_string(),
            rows: vec![],
            skipped: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["listing_url"], "https://example.com/series");
        assert!(json["rows"].as_array().unwrap().is_empty());
    }
}
