use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use roster_core::{Level, PendingRow, MAX_PREVIEW_ROWS};
use roster_logging::{roster_debug, roster_warn};
use thiserror::Error;

/// Extensions offered by the file prompt.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported file type: {0}")]
    UnsupportedExtension(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("workbook has no sheets")]
    NoSheet,
    #[error("sheet {0:?} has no header row")]
    NoHeader(String),
}

pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

/// Reads the file at `path` and parses it with [`parse_workbook`].
pub fn read_spreadsheet(path: &Path) -> Result<Vec<PendingRow>, ImportError> {
    if !is_supported_extension(path) {
        return Err(ImportError::UnsupportedExtension(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    roster_debug!("Read {} bytes from {:?}", bytes.len(), path);
    parse_workbook(bytes)
}

/// Parses the first sheet of a workbook into pending rows.
///
/// The first row of the used range is the header row. Every following
/// non-blank row becomes a header-keyed map (blank cells left out), then a
/// [`PendingRow`] built from the `name`, `position` and `level` columns.
/// Only the first [`MAX_PREVIEW_ROWS`] non-blank rows are considered; among
/// those, rows missing a column or carrying an unknown level are skipped
/// with a warning naming the sheet row.
pub fn parse_workbook(bytes: Vec<u8>) -> Result<Vec<PendingRow>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::NoSheet)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut keyed =
        keyed_rows(&range).ok_or_else(|| ImportError::NoHeader(sheet_name.clone()))?;
    if keyed.len() > MAX_PREVIEW_ROWS {
        roster_debug!(
            "Sheet {:?} has {} rows; keeping the first {}",
            sheet_name,
            keyed.len(),
            MAX_PREVIEW_ROWS
        );
        keyed.truncate(MAX_PREVIEW_ROWS);
    }
    let mut rows = Vec::with_capacity(keyed.len());
    for (sheet_row, cells) in keyed {
        match pending_row(&cells) {
            Ok(row) => rows.push(row),
            Err(issue) => roster_warn!("Skipping {} row {}: {}", sheet_name, sheet_row, issue),
        }
    }
    roster_debug!("Sheet {:?} produced {} rows", sheet_name, rows.len());
    Ok(rows)
}

type KeyedRow = BTreeMap<String, String>;

/// Pairs the 1-based sheet row number with the header-keyed cells.
fn keyed_rows(range: &Range<Data>) -> Option<Vec<(u32, KeyedRow)>> {
    let first_row = range.start().map(|(row, _)| row)?;
    let mut rows = range.rows();
    let headers: Vec<Option<String>> = rows.next()?.iter().map(cell_text).collect();
    if headers.iter().all(Option::is_none) {
        return None;
    }

    let keyed = rows
        .enumerate()
        .filter_map(|(offset, cells)| {
            let map: KeyedRow = headers
                .iter()
                .zip(cells)
                .filter_map(|(header, cell)| Some((header.clone()?, cell_text(cell)?)))
                .collect();
            // First data row sits right below the header row.
            let sheet_row = first_row + offset as u32 + 2;
            (!map.is_empty()).then_some((sheet_row, map))
        })
        .collect();
    Some(keyed)
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(text) => text.trim().to_string(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => value.to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

#[derive(Debug, PartialEq, Eq)]
enum RowIssue {
    Missing(&'static str),
    UnknownLevel(String),
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowIssue::Missing(column) => write!(f, "missing {column}"),
            RowIssue::UnknownLevel(level) => write!(f, "unknown level {level:?}"),
        }
    }
}

fn pending_row(cells: &KeyedRow) -> Result<PendingRow, RowIssue> {
    let field = |column: &'static str| cells.get(column).cloned().ok_or(RowIssue::Missing(column));
    let name = field("name")?;
    let position = field("position")?;
    let raw_level = field("level")?;
    let level = Level::parse(&raw_level).ok_or(RowIssue::UnknownLevel(raw_level))?;
    Ok(PendingRow {
        name,
        position,
        level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(pairs: &[(&str, &str)]) -> KeyedRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(cell_text(&Data::Float(3.0)), Some("3".to_string()));
        assert_eq!(cell_text(&Data::Int(12)), Some("12".to_string()));
        assert_eq!(cell_text(&Data::String("  ".into())), None);
        assert_eq!(cell_text(&Data::Empty), None);
    }

    #[test]
    fn row_needs_all_three_columns() {
        let row = keyed(&[("name", "Ann"), ("level", "Junior")]);
        assert_eq!(pending_row(&row), Err(RowIssue::Missing("position")));
    }

    #[test]
    fn row_rejects_unknown_level() {
        let row = keyed(&[("name", "Ann"), ("position", "Dev"), ("level", "Lead")]);
        assert_eq!(
            pending_row(&row),
            Err(RowIssue::UnknownLevel("Lead".to_string()))
        );
    }

    #[test]
    fn extra_columns_are_ignored() {
        let row = keyed(&[
            ("name", "Ann"),
            ("position", "Dev"),
            ("level", "Senior"),
            ("email", "ann@example.com"),
        ]);
        assert_eq!(
            pending_row(&row),
            Ok(PendingRow {
                name: "Ann".into(),
                position: "Dev".into(),
                level: Level::Senior,
            })
        );
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_supported_extension(Path::new("staff.XLSX")));
        assert!(is_supported_extension(Path::new("old/staff.xls")));
        assert!(!is_supported_extension(Path::new("staff.csv")));
        assert!(!is_supported_extension(Path::new("staff")));
    }
}
