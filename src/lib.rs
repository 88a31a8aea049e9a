//! # Cricket News Scrape
//!
//! Scrapes a cricket series news listing (Cricbuzz by default), follows every
//! story link to collect the full article text, and exports one spreadsheet row
//! per story.
//!
//! ## Architecture
//!
//! The crate is a linear pipeline:
//! 1. **Indexing**: pull headings, summaries, image URLs and links off the listing
//! 2. **Fetching**: download each article, one after another
//! 3. **Assembling**: zip the listing fields and article bodies into rows
//! 4. **Output**: write `scraped_data.xlsx` and, optionally, a JSON report

pub mod assemble;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod scrapers;
pub mod utils;

pub use config::ScrapeConfig;
pub use error::{Result, ScrapeError};
pub use models::{Row, ScrapeReport};
