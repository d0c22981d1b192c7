//! Normalized catalog of the current file, keyed by file identity

use super::load::{CatalogSource, read_sheet};
use super::normalize::normalize;
use crate::options::CatalogOptions;
use crate::types::*;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Normalization is deterministic, so identical bytes read with identical
/// options always map to the same rows. Only the most recently loaded file
/// is held; loading a different one discards the previous rows.
#[derive(Debug, Default)]
pub struct CatalogCache {
    current: Option<(String, Arc<[CatalogRow]>)>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity of a file: content digest plus the reading conventions
    pub fn key(bytes: &[u8], source: CatalogSource, options: &CatalogOptions) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hasher.update(format!("{:?}|{:?}", source, options).as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Return cached rows or normalize and remember them. Failures are not cached.
    pub fn get_or_load(
        &mut self,
        bytes: &[u8],
        source: CatalogSource,
        options: &CatalogOptions,
    ) -> Result<Arc<[CatalogRow]>> {
        let key = Self::key(bytes, source, options);
        if let Some((_, rows)) = self.current.as_ref().filter(|(cached, _)| *cached == key) {
            log::debug!("Catalog cache hit ({} rows)", rows.len());
            return Ok(Arc::clone(rows));
        }

        let sheet = read_sheet(bytes, source, options)?;
        let rows: Arc<[CatalogRow]> = normalize(&sheet, options)?.into();
        if self.current.is_some() {
            log::debug!("Replacing cached catalog with a new file");
        }
        self.current = Some((key, Arc::clone(&rows)));
        Ok(rows)
    }

    pub fn len(&self) -> usize {
        usize::from(self.current.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
