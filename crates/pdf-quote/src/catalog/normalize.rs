//! Recovery of categorized, priced rows from a catalog sheet
//!
//! The sheet structure is only implicit: rows without a price are category
//! headers, and the item-name column is found by a marker substring. Each
//! data row is classified once into a [`SheetRow`], priced rows are stamped
//! with the category in effect, and only priced rows are kept.

use super::sheet::{Cell, RawSheet};
use crate::constants::CURRENCY_SYMBOL;
use crate::options::CatalogOptions;
use crate::types::*;

/// Classification of one data row
#[derive(Debug, Clone, PartialEq)]
enum SheetRow {
    /// No price; the text labels the rows that follow
    Header(String),
    Priced(CatalogRow),
    /// No price and no text at all
    Blank,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    pub names: Vec<String>,
    pub item: usize,
    pub price: usize,
    pub notes: Option<usize>,
}

/// Normalize a raw sheet into catalog rows.
///
/// A sheet without any content yields no rows. A sheet whose header row is
/// missing, or which has no price or item column, is a
/// [`QuoteError::CatalogFormat`] error.
pub fn normalize(sheet: &RawSheet, options: &CatalogOptions) -> Result<Vec<CatalogRow>> {
    if sheet.is_blank() {
        log::info!("Catalog sheet is empty");
        return Ok(Vec::new());
    }

    let header = sheet.rows().get(options.header_row).ok_or_else(|| {
        QuoteError::CatalogFormat(format!(
            "header row {} not found (sheet has {} rows)",
            options.header_row + 1,
            sheet.row_count()
        ))
    })?;
    let columns = resolve_columns(header, options)?;

    let mut current_category = String::new();
    let classified: Vec<SheetRow> = sheet.rows()[options.header_row + 1..]
        .iter()
        .enumerate()
        .map(|(row_index, cells)| {
            let row = classify_row(row_index, cells, &columns, &current_category);
            if let SheetRow::Header(text) = &row {
                current_category = text.clone();
            }
            row
        })
        .collect();

    let rows: Vec<CatalogRow> = classified
        .into_iter()
        .filter_map(|row| match row {
            SheetRow::Priced(row) => Some(row),
            SheetRow::Header(_) | SheetRow::Blank => None,
        })
        .collect();

    log::info!(
        "Normalized catalog: {} priced rows in {} categories",
        rows.len(),
        count_categories(&rows)
    );
    Ok(rows)
}

/// Trim headers, apply synonyms and locate the item, price and notes columns.
pub fn resolve_columns(header: &[Cell], options: &CatalogOptions) -> Result<ColumnMap> {
    let mut names: Vec<String> = header.iter().map(Cell::to_text).collect();

    for name in names.iter_mut() {
        if let Some((_, canonical)) = options
            .column_synonyms
            .iter()
            .find(|(synonym, _)| synonym.trim() == name.as_str())
        {
            *name = canonical.clone();
        }
    }

    let item = match names.iter().position(|n| *n == options.item_column) {
        Some(idx) => idx,
        None => {
            let idx = names
                .iter()
                .position(|n| n.contains(options.item_marker.as_str()))
                .ok_or_else(|| {
                    QuoteError::CatalogFormat(format!(
                        "no column containing '{}'",
                        options.item_marker
                    ))
                })?;
            log::debug!(
                "Using column '{}' as '{}'",
                names[idx],
                options.item_column
            );
            names[idx] = options.item_column.clone();
            idx
        }
    };

    let price = names
        .iter()
        .position(|n| *n == options.price_column)
        .ok_or_else(|| {
            QuoteError::CatalogFormat(format!("no '{}' column", options.price_column))
        })?;

    let notes = names.iter().position(|n| *n == options.notes_column);

    Ok(ColumnMap {
        names,
        item,
        price,
        notes,
    })
}

fn classify_row(
    row_index: usize,
    cells: &[Cell],
    columns: &ColumnMap,
    current_category: &str,
) -> SheetRow {
    let cell = |idx: usize| cells.get(idx).unwrap_or(&Cell::Empty);
    let price_cell = cell(columns.price);

    if price_cell.is_blank() {
        return match cells.iter().find(|c| !c.is_blank()) {
            Some(first) => SheetRow::Header(first.to_text()),
            None => SheetRow::Blank,
        };
    }

    SheetRow::Priced(CatalogRow {
        name: cell(columns.item).to_text(),
        category: current_category.to_string(),
        unit_price: coerce_price(price_cell, row_index),
        note: columns.notes.map(|idx| cell(idx).to_text()).unwrap_or_default(),
        row_index,
    })
}

/// Numeric unit price; anything unparseable or negative becomes zero.
fn coerce_price(cell: &Cell, row_index: usize) -> f64 {
    let value = match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => parse_price_text(s),
        Cell::Empty => None,
    };

    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => {
            log::warn!(
                "Row {}: price '{}' is not a non-negative number, using 0",
                row_index,
                cell.to_text()
            );
            0.0
        }
    }
}

fn parse_price_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches(CURRENCY_SYMBOL)
        .trim_end_matches(CURRENCY_SYMBOL)
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    cleaned.parse::<f64>().ok()
}

fn count_categories(rows: &[CatalogRow]) -> usize {
    let mut seen: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}
