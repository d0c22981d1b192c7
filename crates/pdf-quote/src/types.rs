use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Could not read catalog file: {0}")]
    CatalogFormat(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, QuoteError>;

/// One priced row recovered from the catalog sheet.
///
/// A `unit_price` of zero means the price is not fixed ("by measurement").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub name: String,
    pub category: String,
    pub unit_price: f64,
    pub note: String,
    /// Zero-based data row index below the header row
    pub row_index: usize,
}

impl CatalogRow {
    pub fn is_priced_by_measurement(&self) -> bool {
        self.unit_price == 0.0
    }
}

/// A catalog row chosen with a positive quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedLineItem {
    pub row: CatalogRow,
    pub quantity: u32,
    pub line_total: f64,
}

impl SelectedLineItem {
    /// Returns `None` for a zero quantity: an item only exists while it is selected.
    pub fn new(row: CatalogRow, quantity: u32) -> Option<Self> {
        if quantity == 0 {
            return None;
        }
        let line_total = quantity as f64 * row.unit_price;
        Some(Self {
            row,
            quantity,
            line_total,
        })
    }
}

/// Customer block and discount inputs for one quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerData {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub quote_date: NaiveDate,
    /// Percentage discount applied to the VAT-inclusive amount, in [0, 100]
    #[serde(default)]
    pub discount_pct: f64,
    #[serde(default)]
    pub contractor: bool,
    #[serde(default)]
    pub contractor_discount_amount: f64,
}

impl CustomerData {
    pub fn new(name: impl Into<String>, quote_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            quote_date,
            discount_pct: 0.0,
            contractor: false,
            contractor_discount_amount: 0.0,
        }
    }

    /// The contractor amount only counts when the contractor flag is set.
    pub fn effective_contractor_discount(&self) -> f64 {
        if self.contractor {
            self.contractor_discount_amount
        } else {
            0.0
        }
    }

    /// Range checks the discount inputs and requires a customer name.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(QuoteError::Validation(
                "Customer name is required".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.discount_pct) {
            return Err(QuoteError::Validation(format!(
                "Discount percentage must be between 0 and 100, got {}",
                self.discount_pct
            )));
        }
        if self.contractor_discount_amount < 0.0 || !self.contractor_discount_amount.is_finite() {
            return Err(QuoteError::Validation(format!(
                "Contractor discount must be a non-negative amount, got {}",
                self.contractor_discount_amount
            )));
        }
        Ok(())
    }
}

/// Derived totals for a quote. Recomputed on every render, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FinancialSummary {
    pub subtotal: f64,
    pub contractor_discount: f64,
    pub subtotal_after_contractor: f64,
    pub vat_amount: f64,
    pub discount_amount: f64,
    pub grand_total: f64,
}

/// Validated input for the document layout engine.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub customer: CustomerData,
    pub items: Vec<SelectedLineItem>,
    /// Raw bytes of the first illustration (design rendering)
    pub image_a: Option<Vec<u8>>,
    /// Raw bytes of the second illustration (water/electric points)
    pub image_b: Option<Vec<u8>>,
}

impl QuoteRequest {
    /// Caller-side pre-conditions of rendering.
    pub fn validate(&self) -> Result<()> {
        self.customer.validate()?;
        if self.items.is_empty() {
            return Err(QuoteError::Validation(
                "At least one catalog item must be selected".to_string(),
            ));
        }
        Ok(())
    }
}

/// Decorative or font asset that the renderer can do without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Logo,
    SmallLogo,
    Watermark,
    RegularFont,
    BoldFont,
    ImageA,
    ImageB,
}

impl AssetKind {
    pub fn name(&self) -> &'static str {
        match self {
            AssetKind::Logo => "logo",
            AssetKind::SmallLogo => "footer logo",
            AssetKind::Watermark => "watermark",
            AssetKind::RegularFont => "regular font",
            AssetKind::BoldFont => "bold font",
            AssetKind::ImageA => "illustration A",
            AssetKind::ImageB => "illustration B",
        }
    }
}

/// Non-fatal asset problem reported alongside a rendered document.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetWarning {
    Missing { kind: AssetKind, path: String },
    Unreadable { kind: AssetKind, reason: String },
}

impl std::fmt::Display for AssetWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetWarning::Missing { kind, path } => {
                write!(f, "{} not found at {}", kind.name(), path)
            }
            AssetWarning::Unreadable { kind, reason } => {
                write!(f, "{} could not be used: {}", kind.name(), reason)
            }
        }
    }
}

/// Output of a render call.
#[derive(Debug, Clone)]
pub struct RenderedQuote {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<AssetWarning>,
}
