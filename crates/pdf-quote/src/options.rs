use crate::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Comprehensive quote generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteOptions {
    // Catalog sheet conventions
    pub catalog: CatalogOptions,

    // Look of the document
    pub theme: LayoutTheme,
    pub table_currency: CurrencyMode,
    pub image_layout: ImageLayout,

    // Fixed text
    pub company: CompanyInfo,

    // Decorative assets and fonts
    pub assets: AssetPaths,
}

impl Default for QuoteOptions {
    fn default() -> Self {
        Self {
            catalog: CatalogOptions::default(),
            theme: LayoutTheme::default(),
            table_currency: CurrencyMode::Precise,
            image_layout: ImageLayout::SharedPage,
            company: CompanyInfo::default(),
            assets: AssetPaths::default(),
        }
    }
}

impl QuoteOptions {
    /// Load options from JSON file
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| QuoteError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| QuoteError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.catalog.sheet_name.trim().is_empty() {
            return Err(QuoteError::Config(
                "Sheet name must not be empty".to_string(),
            ));
        }
        if self.catalog.price_column.trim().is_empty() {
            return Err(QuoteError::Config(
                "Price column name must not be empty".to_string(),
            ));
        }
        if self.catalog.item_marker.trim().is_empty() {
            return Err(QuoteError::Config(
                "Item column marker must not be empty".to_string(),
            ));
        }
        self.theme.validate()
    }
}

/// Conventions of the uploaded catalog sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    /// Worksheet to read from workbook files (ignored for CSV)
    pub sheet_name: String,
    /// Zero-based row index of the column header row
    pub header_row: usize,
    /// Substring identifying the item-name column
    pub item_marker: String,
    /// Canonical item-name column; detection is skipped when present
    pub item_column: String,
    pub price_column: String,
    pub notes_column: String,
    /// Header synonyms renamed to canonical names, as (from, to)
    pub column_synonyms: Vec<(String, String)>,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            sheet_name: "גיליון1".to_string(),
            header_row: 8,
            item_marker: "פריט".to_string(),
            item_column: "הפריט".to_string(),
            price_column: "מחיר יחידה".to_string(),
            notes_column: "הערות".to_string(),
            column_synonyms: vec![
                ("מס'".to_string(), "מספר".to_string()),
                ("סה\"כ".to_string(), "סהכ".to_string()),
            ],
        }
    }
}

/// RGB color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ThemeColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: ThemeColor = ThemeColor::new(0.0, 0.0, 0.0);
    pub const WHITE: ThemeColor = ThemeColor::new(1.0, 1.0, 1.0);
}

/// Table and typography settings shared by every page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTheme {
    /// Fixed height of table rows
    pub row_height_mm: f32,
    /// Fill of the table header row and the footer bar
    pub header_color: ThemeColor,
    /// Title, summary rule and grand total
    pub accent_color: ThemeColor,
    /// Background of every other table row
    pub zebra_color: ThemeColor,
    pub grid_color: ThemeColor,
    /// Table body font size (points)
    pub body_font_size: f32,
    /// Table header font size (points)
    pub header_font_size: f32,
}

impl Default for LayoutTheme {
    fn default() -> Self {
        ThemePreset::Classic.theme()
    }
}

impl LayoutTheme {
    pub fn validate(&self) -> Result<()> {
        if !(self.row_height_mm > 0.0) {
            return Err(QuoteError::Config(
                "Row height must be positive".to_string(),
            ));
        }
        if !(self.body_font_size > 0.0) || !(self.header_font_size > 0.0) {
            return Err(QuoteError::Config(
                "Font sizes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Named theme variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemePreset {
    Classic,
    Compact,
}

impl ThemePreset {
    pub fn theme(self) -> LayoutTheme {
        let red = ThemeColor::new(0.827, 0.184, 0.184);
        match self {
            ThemePreset::Classic => LayoutTheme {
                row_height_mm: 6.0,
                header_color: red,
                accent_color: red,
                zebra_color: ThemeColor::new(0.95, 0.95, 0.95),
                grid_color: ThemeColor::new(0.8, 0.8, 0.8),
                body_font_size: 10.0,
                header_font_size: 11.0,
            },
            ThemePreset::Compact => LayoutTheme {
                row_height_mm: 5.0,
                header_color: ThemeColor::new(0.25, 0.25, 0.25),
                accent_color: red,
                zebra_color: ThemeColor::new(0.93, 0.93, 0.93),
                grid_color: ThemeColor::new(0.85, 0.85, 0.85),
                body_font_size: 8.5,
                header_font_size: 9.0,
            },
        }
    }
}

/// How currency amounts are printed. One table never mixes modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyMode {
    /// Two decimal places
    Precise,
    /// Whole units, for previews
    Compact,
}

impl CurrencyMode {
    pub fn decimals(self) -> usize {
        match self {
            CurrencyMode::Precise => 2,
            CurrencyMode::Compact => 0,
        }
    }
}

/// Placement of the optional illustrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageLayout {
    /// Both images share one page, each fitted to half of it
    SharedPage,
    /// Each image gets a page of its own
    SeparatePages,
}

/// Fixed company text printed on the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub title: String,
    pub contact_line: String,
    pub terms: Vec<String>,
    pub signature_line: String,
    pub image_a_caption: String,
    pub image_b_caption: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            title: "הצעת מחיר".to_string(),
            contact_line:
                "הנגרים 1 (מתחם הורדוס), באר שבע | טל: 072-393-3997 | דוא\"ל: info@panel-k.co.il"
                    .to_string(),
            terms: vec![
                "הצעת המחיר תקפה ל-14 ימים ממועד הפקתה.".to_string(),
                "ההצעה מיועדת ללקוח הספציפי בלבד ולא להעברה לחוץ.".to_string(),
                "המחירים עשויים להשתנות והחברה אינה אחראית לטעויות.".to_string(),
                "אישור ההצעה מהווה התחייבות לתשלום 10% מקדמה.".to_string(),
                "הלקוח מתחייב לפנות נקודות מים וחשמל בהתאם לתכניות.".to_string(),
                "אי עמידה בתנאים עלולה לגרור עיכובים וחריגות.".to_string(),
            ],
            signature_line: "חתימת הלקוח: ____________________".to_string(),
            image_a_caption: "הדמיה".to_string(),
            image_b_caption: "הדמיית נקודות מים וחשמל".to_string(),
        }
    }
}

/// Locations of optional decorative assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub dir: PathBuf,
    pub logo: String,
    pub logo_small: String,
    pub watermark: String,
    pub font_regular: String,
    pub font_bold: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
            logo: "logo.png".to_string(),
            logo_small: "logo_small.png".to_string(),
            watermark: "watermark.png".to_string(),
            font_regular: "Heebo-Regular.ttf".to_string(),
            font_bold: "Heebo-Bold.ttf".to_string(),
        }
    }
}

impl AssetPaths {
    /// Absolute-or-relative path of a file inside the assets directory
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Default file names looked up inside `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }
}
