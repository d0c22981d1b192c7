//! Reading catalog files into a [`RawSheet`]
//!
//! Every reader error is reported as [`QuoteError::CatalogFormat`] so that
//! callers see a single "could not read catalog file" condition.

use super::sheet::{Cell, RawSheet};
use crate::options::CatalogOptions;
use crate::types::*;
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;
use std::path::Path;

/// File formats the catalog can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogSource {
    /// xlsx / xlsm / xls / ods workbook
    Workbook,
    /// CSV export of the catalog sheet
    Csv,
}

impl CatalogSource {
    /// Pick the format from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(CatalogSource::Workbook),
            "csv" => Ok(CatalogSource::Csv),
            other => Err(QuoteError::CatalogFormat(format!(
                "unsupported file type '{}'",
                other
            ))),
        }
    }
}

/// Parse catalog file bytes into a sheet grid
pub fn read_sheet(bytes: &[u8], source: CatalogSource, options: &CatalogOptions) -> Result<RawSheet> {
    match source {
        CatalogSource::Workbook => read_workbook(bytes, &options.sheet_name),
        CatalogSource::Csv => read_csv(bytes),
    }
}

fn read_workbook(bytes: &[u8], sheet_name: &str) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| QuoteError::CatalogFormat(e.to_string()))?;
    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| QuoteError::CatalogFormat(format!("sheet '{}': {}", sheet_name, e)))?;

    // The used range may start below/right of A1; pad it back so the header
    // offset stays absolute.
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = (0..start_row).map(|_| Vec::new()).collect();
    for row in range.rows() {
        let mut cells: Vec<Cell> = (0..start_col).map(|_| Cell::Empty).collect();
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }

    Ok(RawSheet::new(rows))
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        other => Cell::Text(other.to_string()),
    }
}

fn read_csv(bytes: &[u8]) -> Result<RawSheet> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| QuoteError::CatalogFormat(e.to_string()))?;
        rows.push(record.iter().map(Cell::from).collect());
    }

    Ok(RawSheet::new(rows))
}
