//! Error types shared by every pipeline stage.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("element matched by `{selector}` has no `{attribute}` attribute")]
    MissingAttribute { selector: String, attribute: String },

    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error(
        "listing fields are misaligned: {headings} headings, {summaries} summaries, \
         {images} images, {links} links, {paragraphs} article bodies"
    )]
    Misaligned {
        headings: usize,
        summaries: usize,
        images: usize,
        links: usize,
        paragraphs: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
