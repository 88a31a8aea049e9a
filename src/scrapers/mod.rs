//! Scrapers for the listing page and the article pages it links to.
//!
//! The scrape runs in two phases:
//!
//! 1. **Indexing** ([`listing`]): fetch the series listing and extract
//!    headings, summaries, image URLs and article links
//! 2. **Fetching** ([`article`]): download each linked article, one at a time,
//!    and join its paragraphs into a single text block
//!
//! Both phases fetch through a [`crate::http::PageSource`], so tests can feed
//! them canned markup.

pub mod article;
pub mod listing;
