//! Output writers for scraped rows.
//!
//! - [`xlsx`]: the spreadsheet (always written)
//! - [`json`]: an optional JSON copy of the same report

pub mod json;
pub mod xlsx;
