//! State of one quote being assembled
//!
//! Holds the loaded catalog, the customer record, chosen quantities and the
//! optional illustration bytes. Totals are derived on demand and never stored.

use crate::catalog::{CatalogCache, CatalogSource};
use crate::options::CatalogOptions;
use crate::pricing;
use crate::types::*;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug)]
pub struct QuoteSession {
    cache: CatalogCache,
    catalog: Arc<[CatalogRow]>,
    customer: CustomerData,
    /// Keyed by `CatalogRow::row_index`; never holds a zero
    quantities: BTreeMap<usize, u32>,
    image_a: Option<Vec<u8>>,
    image_b: Option<Vec<u8>>,
}

impl QuoteSession {
    pub fn new(customer: CustomerData) -> Self {
        Self {
            cache: CatalogCache::new(),
            catalog: Arc::from(Vec::new()),
            customer,
            quantities: BTreeMap::new(),
            image_a: None,
            image_b: None,
        }
    }

    /// Normalize catalog bytes, reusing the cached rows for identical input.
    ///
    /// Loading a different catalog clears the selection. Returns the row count.
    pub fn load_catalog_bytes(
        &mut self,
        bytes: &[u8],
        source: CatalogSource,
        options: &CatalogOptions,
    ) -> Result<usize> {
        let rows = self.cache.get_or_load(bytes, source, options)?;
        self.set_catalog(rows);
        Ok(self.catalog.len())
    }

    /// Replace the catalog. The selection survives only when the rows are the same.
    pub fn set_catalog(&mut self, rows: impl Into<Arc<[CatalogRow]>>) {
        let rows = rows.into();
        if !Arc::ptr_eq(&rows, &self.catalog) {
            self.quantities.clear();
        }
        self.catalog = rows;
    }

    pub fn catalog(&self) -> &[CatalogRow] {
        &self.catalog
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    pub fn customer(&self) -> &CustomerData {
        &self.customer
    }

    pub fn customer_mut(&mut self) -> &mut CustomerData {
        &mut self.customer
    }

    /// Set the quantity of a catalog row; zero removes it from the selection
    pub fn set_quantity(&mut self, row_index: usize, quantity: u32) -> Result<()> {
        if !self.catalog.iter().any(|row| row.row_index == row_index) {
            return Err(QuoteError::Validation(format!(
                "No catalog row with index {}",
                row_index
            )));
        }
        if quantity == 0 {
            self.quantities.remove(&row_index);
        } else {
            self.quantities.insert(row_index, quantity);
        }
        Ok(())
    }

    pub fn quantity(&self, row_index: usize) -> u32 {
        self.quantities.get(&row_index).copied().unwrap_or(0)
    }

    pub fn set_image_a(&mut self, bytes: Option<Vec<u8>>) {
        self.image_a = bytes;
    }

    pub fn set_image_b(&mut self, bytes: Option<Vec<u8>>) {
        self.image_b = bytes;
    }

    /// Chosen rows in catalog order
    pub fn selected_items(&self) -> Vec<SelectedLineItem> {
        self.catalog
            .iter()
            .filter_map(|row| SelectedLineItem::new(row.clone(), self.quantity(row.row_index)))
            .collect()
    }

    pub fn summary(&self) -> FinancialSummary {
        pricing::compute(
            &self.selected_items(),
            self.customer.discount_pct,
            self.customer.effective_contractor_discount(),
        )
    }

    /// Validate the session and produce the input of the renderer
    pub fn build_request(&self) -> Result<QuoteRequest> {
        let request = QuoteRequest {
            customer: self.customer.clone(),
            items: self.selected_items(),
            image_a: self.image_a.clone(),
            image_b: self.image_b.clone(),
        };
        request.validate()?;
        Ok(request)
    }
}
