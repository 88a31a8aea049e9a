//! Scrape configuration.
//!
//! Defaults point at the IPL 2024 series news page on Cricbuzz. Every value can
//! be overridden from a YAML file and then from the command line:
//!
//! ```yaml
//! listing_url: https://www.cricbuzz.com/cricket-series/7607/indian-premier-league-2024
//! base_origin: https://www.cricbuzz.com
//! output: scraped_data.xlsx
//! delay_ms: 500
//! selectors:
//!   heading: h2.cb-nws-hdln
//!   item: div.cb-lst-itm
//! ```

use crate::cli::Cli;
use crate::error::{Result, ScrapeError};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_LISTING_URL: &str =
    "https://www.cricbuzz.com/cricket-series/7607/indian-premier-league-2024";
pub const DEFAULT_BASE_ORIGIN: &str = "https://www.cricbuzz.com";
pub const DEFAULT_OUTPUT: &str = "scraped_data.xlsx";

/// CSS selectors for every field the scraper pulls.
///
/// Multi-class defaults use `[class="..."]` so the class attribute has to
/// match exactly: same classes, same order, nothing extra.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Selectors {
    pub heading: String,
    pub summary: String,
    pub image: String,
    pub link: String,
    pub paragraph: String,
    /// Per-item container. When set, fields are read inside each container
    /// instead of as four page-wide lists.
    pub item: Option<String>,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            heading: r#"h2[class="cb-nws-hdln cb-font-18 line-ht24"]"#.to_string(),
            summary: "div.cb-nws-intr".to_string(),
            image: "img.cb-lst-img".to_string(),
            link: r#"a[class="cb-nws-hdln-ancr text-hvr-underline"]"#.to_string(),
            paragraph: "p.cb-nws-para".to_string(),
            item: None,
        }
    }
}

/// Parsed form of [`Selectors`].
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub heading: Selector,
    pub summary: Selector,
    pub image: Selector,
    pub link: Selector,
    pub paragraph: Selector,
    pub item: Option<Selector>,
    /// Source strings, kept for error messages.
    pub source: Selectors,
}

impl Selectors {
    pub fn compile(&self) -> Result<CompiledSelectors> {
        Ok(CompiledSelectors {
            heading: parse_selector(&self.heading)?,
            summary: parse_selector(&self.summary)?,
            image: parse_selector(&self.image)?,
            link: parse_selector(&self.link)?,
            paragraph: parse_selector(&self.paragraph)?,
            item: self.item.as_deref().map(parse_selector).transpose()?,
            source: self.clone(),
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Everything a run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub listing_url: String,
    /// Origin prefixed onto relative article links.
    pub base_origin: String,
    pub output: PathBuf,
    pub json_output: Option<PathBuf>,
    /// Pause between article fetches, in milliseconds.
    pub delay_ms: u64,
    /// Extra attempts per request after the first failure.
    pub retries: usize,
    pub timeout_secs: u64,
    /// Drop articles whose page cannot be fetched instead of aborting.
    pub skip_failed: bool,
    pub selectors: Selectors,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            base_origin: DEFAULT_BASE_ORIGIN.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            json_output: None,
            delay_ms: 0,
            retries: 0,
            timeout_secs: 30,
            skip_failed: false,
            selectors: Selectors::default(),
        }
    }
}

impl ScrapeConfig {
    /// Load a YAML config file. Missing keys fall back to defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: ScrapeConfig = serde_yaml::from_str(&text)?;
        debug!(?config, "Loaded config file");
        Ok(config)
    }

    /// Build the effective config: defaults, then the optional file, then flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// the merged config fails [`ScrapeConfig::validate`].
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.listing_url {
            self.listing_url = url.clone();
        }
        if let Some(origin) = &cli.base_origin {
            self.base_origin = origin.clone();
        }
        if let Some(output) = &cli.output {
            self.output = output.clone();
        }
        if let Some(json) = &cli.json_output {
            self.json_output = Some(json.clone());
        }
        if let Some(delay) = cli.delay_ms {
            self.delay_ms = delay;
        }
        if let Some(retries) = cli.retries {
            self.retries = retries;
        }
        if let Some(timeout) = cli.timeout_secs {
            self.timeout_secs = timeout;
        }
        if cli.skip_failed {
            self.skip_failed = true;
        }
    }

    /// Reject configs that would fail halfway through a run.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.listing_url)?;
        let origin = url::Url::parse(&self.base_origin)?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(ScrapeError::Config(format!(
                "base origin must be http(s): {}",
                self.base_origin
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ScrapeError::Config("timeout must be at least 1 second".into()));
        }
        self.selectors.compile()?;
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults_match_cricbuzz_listing() {
        let config = ScrapeConfig::default();
        assert_eq!(config.listing_url, DEFAULT_LISTING_URL);
        assert_eq!(config.base_origin, "https://www.cricbuzz.com");
        assert_eq!(config.output, PathBuf::from("scraped_data.xlsx"));
        assert_eq!(config.delay_ms, 0);
        assert_eq!(config.retries, 0);
        assert!(!config.skip_failed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "delay_ms: 250\nselectors:\n  item: div.cb-lst-itm\n";
        let config: ScrapeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.delay_ms, 250);
        assert_eq!(config.selectors.item.as_deref(), Some("div.cb-lst-itm"));
        assert_eq!(config.selectors.paragraph, "p.cb-nws-para");
        assert_eq!(config.listing_url, DEFAULT_LISTING_URL);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output: from_file.xlsx\nretries: 2").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::parse_from([
            "cricket_news_scrape",
            "--config",
            path.as_str(),
            "--output",
            "from_cli.xlsx",
        ]);
        let config = ScrapeConfig::resolve(&cli).unwrap();
        assert_eq!(config.output, PathBuf::from("from_cli.xlsx"));
        assert_eq!(config.retries, 2);
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let mut config = ScrapeConfig::default();
        config.selectors.heading = "h2[".to_string();
        match config.validate() {
            Err(ScrapeError::Selector { selector, .. }) => assert_eq!(selector, "h2["),
            other => panic!("expected selector error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_http_origin_is_rejected() {
        let config = ScrapeConfig {
            base_origin: "ftp://www.cricbuzz.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScrapeError::Config(_))));
    }
}
