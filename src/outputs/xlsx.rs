//! Spreadsheet output.
//!
//! One worksheet: the [`HEADER`] row, then one row per scraped item in listing
//! order. The workbook's creation timestamp is pinned, so identical rows always
//! produce an identical file.
//!
//! # Cell Limit
//!
//! Excel caps a cell at 32,767 characters. Longer text (in practice only a very
//! long `InnerPara`) is cut at that limit and a warning is logged, so for such
//! an article the cell holds a prefix of the joined paragraphs rather than all
//! of it.

use crate::error::Result;
use crate::models::{HEADER, Row};
use crate::utils::ensure_parent_dir;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Excel refuses longer cell strings.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Render rows into an in-memory xlsx file.
///
/// # Arguments
///
/// * `rows` - Rows in the order they should appear below the header
///
/// # Returns
///
/// The xlsx bytes. Cells over [`MAX_CELL_CHARS`] are truncated.
pub fn render_workbook(rows: &[Row]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(2024, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet();
    for (col, title) in HEADER.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let excel_row = (i + 1) as u32;
        for (col, cell) in row.cells().iter().enumerate() {
            worksheet.write_string(excel_row, col as u16, fit_cell(cell, excel_row, col))?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn fit_cell(cell: &str, row: u32, col: usize) -> &str {
    match cell.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            warn!(row, column = HEADER[col], chars = cell.chars().count(), "Cell truncated to Excel limit");
            &cell[..cut]
        }
        None => cell,
    }
}

/// Write rows to `path`, replacing any existing file.
///
/// Missing parent directories are created. The write is not atomic.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = rows.len()))]
pub async fn write_spreadsheet(rows: &[Row], path: &Path) -> Result<()> {
    let bytes = render_workbook(rows)?;
    ensure_parent_dir(path).await?;
    tokio::fs::write(path, &bytes).await?;
    info!(bytes = bytes.len(), "Wrote spreadsheet");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx, open_workbook};
    use std::io::Read;

    fn row(n: usize, inner: &str) -> Row {
        Row {
            heading: format!("Heading {n}"),
            summary: format!("Summary {n}"),
            image_url: format!("https://static.cricbuzz.com/{n}.jpg"),
            target_link: format!("https://www.cricbuzz.com/cricket-news/{n}"),
            inner_para: inner.to_string(),
        }
    }

    fn read_back(path: &Path) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        range
            .rows()
            .map(|r| {
                r.iter()
                    .map(|c| match c {
                        Data::String(s) => s.clone(),
                        Data::Empty => String::new(),
                        other => format!("{other:?}"),
                    })
                    .collect()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_header_and_rows_in_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scraped_data.xlsx");
        write_spreadsheet(&[row(1, "p1\np2"), row(2, "")], &path).await.unwrap();

        let cells = read_back(&path);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0], HEADER.map(str::to_string).to_vec());
        assert_eq!(cells[1][0], "Heading 1");
        assert_eq!(cells[1][3], "https://www.cricbuzz.com/cricket-news/1");
        assert_eq!(cells[1][4], "p1\np2");
        assert_eq!(cells[2][4], "");
    }

    #[tokio::test]
    async fn test_header_only_when_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/empty.xlsx");
        write_spreadsheet(&[], &path).await.unwrap();

        let cells = read_back(&path);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0][0], "Heading");
        assert_eq!(cells[0][4], "InnerPara");
    }

    #[test]
    fn test_render_is_deterministic_across_seconds() {
        let rows = vec![row(1, "a"), row(2, "b")];
        let first = render_workbook(&rows).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let second = render_workbook(&rows).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_creation_timestamp_is_pinned() {
        let bytes = render_workbook(&[row(1, "a")]).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut core = String::new();
        archive
            .by_name("docProps/core.xml")
            .unwrap()
            .read_to_string(&mut core)
            .unwrap();
        let created = core
            .split("<dcterms:created")
            .nth(1)
            .and_then(|rest| rest.split("</dcterms:created>").next())
            .expect("core.xml has a created element");
        assert!(created.contains("2024-01-01T00:00:00"), "created = {created}");
    }

    #[test]
    fn test_fit_cell_truncates_long_text() {
        let long = "x".repeat(MAX_CELL_CHARS + 10);
        assert_eq!(fit_cell(&long, 1, 4).len(), MAX_CELL_CHARS);
        assert_eq!(fit_cell("short", 1, 4), "short");
    }
}
