//! Command-line interface definitions.
//!
//! Every flag is optional. Unset flags fall back to the YAML config file (if
//! one is given) and then to the built-in defaults in [`crate::config`].

use clap::Parser;
use std::path::PathBuf;

/// Scrape a cricket series news listing and export it to a spreadsheet.
///
/// # Examples
///
/// ```sh
/// # Scrape the default IPL 2024 listing into ./scraped_data.xlsx
/// cricket_news_scrape
///
/// # Another series, with a JSON copy and a polite delay between articles
/// cricket_news_scrape --listing-url https://www.cricbuzz.com/cricket-series/9237/... \
///     --json-output rows.json --delay-ms 500
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listing page to scrape
    #[arg(short, long, env = "CRICKET_LISTING_URL")]
    pub listing_url: Option<String>,

    /// Origin prefixed onto relative article links
    #[arg(long, env = "CRICKET_BASE_ORIGIN")]
    pub base_origin: Option<String>,

    /// Spreadsheet to write (overwritten if it exists)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the rows as JSON to this path
    #[arg(short, long)]
    pub json_output: Option<PathBuf>,

    /// Pause between article fetches, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Extra attempts per request after a failure
    #[arg(long)]
    pub retries: Option<usize>,

    /// Per-request timeout, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Skip articles that fail to download instead of aborting the run
    #[arg(long)]
    pub skip_failed: bool,
}
