pub mod assets;
pub mod bidi;
pub mod catalog;
pub mod constants;
mod format;
mod options;
pub mod pricing;
pub mod render;
mod session;
mod types;

pub use assets::{ImageAsset, ResolvedAssets};
pub use bidi::shape;
pub use catalog::{CatalogCache, CatalogSource, load_catalog, normalize, normalize_bytes};
pub use format::{BY_MEASUREMENT, format_currency, format_deduction, quote_file_name};
pub use options::*;
pub use render::{DocumentPlan, PlanInput, generate_quote_pdf, plan_document, render};
pub use session::QuoteSession;
pub use types::*;
