//! # Cricket News Scrape
//!
//! ## Usage
//!
//! ```sh
//! cricket_news_scrape                      # writes ./scraped_data.xlsx
//! cricket_news_scrape -c scrape.yaml -j rows.json
//! ```

use clap::Parser;
use cricket_news_scrape::cli::Cli;
use cricket_news_scrape::config::ScrapeConfig;
use cricket_news_scrape::pipeline;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("cricket_news_scrape starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match ScrapeConfig::resolve(&args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    info!(
        listing_url = %config.listing_url,
        output = %config.output.display(),
        delay_ms = config.delay_ms,
        retries = config.retries,
        skip_failed = config.skip_failed,
        "Configuration resolved"
    );

    let report = match pipeline::run(&config).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Scrape failed");
            return Err(e.into());
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        rows = report.rows.len(),
        skipped = report.skipped.len(),
        "Execution complete"
    );
    println!("Data saved to {}", config.output.display());

    Ok(())
}
