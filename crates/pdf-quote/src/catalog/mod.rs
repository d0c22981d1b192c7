//! Catalog normalization
//!
//! 1. Read the workbook sheet (or CSV export) into a raw cell grid
//! 2. Resolve the header row and the item / price / notes columns
//! 3. Classify rows as category headers or priced rows and keep the priced ones

mod cache;
mod load;
mod normalize;
mod sheet;

pub use cache::CatalogCache;
pub use load::{CatalogSource, read_sheet};
pub use normalize::{ColumnMap, normalize, resolve_columns};
pub use sheet::{Cell, RawSheet};

use crate::options::CatalogOptions;
use crate::types::*;
use std::path::Path;

/// Read and normalize catalog file bytes
pub fn normalize_bytes(
    bytes: &[u8],
    source: CatalogSource,
    options: &CatalogOptions,
) -> Result<Vec<CatalogRow>> {
    let sheet = read_sheet(bytes, source, options)?;
    normalize(&sheet, options)
}

/// Load and normalize a catalog file
pub async fn load_catalog(
    path: impl AsRef<Path>,
    options: &CatalogOptions,
) -> Result<Vec<CatalogRow>> {
    let path = path.as_ref().to_owned();
    let source = CatalogSource::from_path(&path)?;
    let options = options.clone();

    let bytes = tokio::fs::read(&path).await?;

    // Spreadsheet parsing is CPU-bound, spawn blocking
    let rows =
        tokio::task::spawn_blocking(move || normalize_bytes(&bytes, source, &options)).await??;

    Ok(rows)
}
