//! Shared constants for quote generation
//!
//! This module centralizes the fixed numbers used by the pricing
//! calculator and the document layout engine.

// =============================================================================
// Pricing
// =============================================================================

/// Value-added tax rate applied after the contractor discount
pub const VAT_RATE: f64 = 0.17;

/// Currency symbol prefixed to every amount
pub const CURRENCY_SYMBOL: &str = "₪";

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Page Geometry (mm, origin at bottom-left)
// =============================================================================

/// A4 page width
pub const PAGE_WIDTH_MM: f32 = 210.0;

/// A4 page height
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Left/right/top page margin
pub const PAGE_MARGIN_MM: f32 = 20.0;

/// Lowest y any flowing content may reach; the footer lives below it
pub const CONTENT_BOTTOM_MM: f32 = 25.0;

/// Width the header logo is scaled to
pub const HEADER_LOGO_WIDTH_MM: f32 = 35.0;

/// Tallest the header logo may get
pub const HEADER_LOGO_MAX_HEIGHT_MM: f32 = 40.0;

/// Gap between the logo bottom and the title baseline
pub const TITLE_OFFSET_MM: f32 = 10.0;

/// Gap between the logo bottom and the first content line
pub const HEADER_CONTENT_OFFSET_MM: f32 = 20.0;

/// Title font size (points)
pub const TITLE_FONT_SIZE: f32 = 36.0;

// =============================================================================
// Footer
// =============================================================================

/// Height of the colored footer bar
pub const FOOTER_BAR_HEIGHT_MM: f32 = 3.0;

/// Bottom edge of the footer bar, above the footer line
pub const FOOTER_BAR_Y_MM: f32 = 13.0;

/// Baseline of footer text
pub const FOOTER_TEXT_Y_MM: f32 = 5.0;

/// Height the footer logo is scaled to
pub const FOOTER_LOGO_HEIGHT_MM: f32 = 5.0;

/// Gap between the footer logo and the contact text
pub const FOOTER_LOGO_GAP_MM: f32 = 5.0;

/// Footer font size (points)
pub const FOOTER_FONT_SIZE: f32 = 8.0;

// =============================================================================
// Customer Block
// =============================================================================

/// Line pitch of the customer block
pub const CUSTOMER_LINE_HEIGHT_MM: f32 = 6.0;

/// Customer block font size (points)
pub const CUSTOMER_FONT_SIZE: f32 = 12.0;

/// Number of customer lines (name, date, phone, email, address)
pub const CUSTOMER_LINES: usize = 5;

// =============================================================================
// Item Table
// =============================================================================

/// Width of each numeric column (quantity, unit price, line total)
pub const NUMERIC_COLUMN_WIDTH_MM: f32 = 40.0;

/// Inner padding between cell border and text
pub const CELL_PADDING_MM: f32 = 1.5;

/// Grid line width (points)
pub const GRID_LINE_WIDTH: f32 = 0.5;

/// Marker appended to truncated product names
pub const ELLIPSIS: &str = "...";

// =============================================================================
// Summary Block
// =============================================================================

/// Space between the table and the summary rule
pub const SUMMARY_GAP_MM: f32 = 20.0;

/// Space between the summary rule and the first summary line
pub const SUMMARY_RULE_GAP_MM: f32 = 10.0;

/// Summary rule width (points)
pub const SUMMARY_RULE_WIDTH: f32 = 2.0;

/// Line pitch of the summary block
pub const SUMMARY_LINE_HEIGHT_MM: f32 = 6.0;

/// Horizontal distance from the right margin to the value column's right edge
pub const SUMMARY_VALUE_OFFSET_MM: f32 = 60.0;

/// Summary font size (points)
pub const SUMMARY_FONT_SIZE: f32 = 12.0;

/// Extra space between the separator rule and the grand total
pub const GRAND_TOTAL_SPACING_MM: f32 = 2.0;

/// Grand total font size (points)
pub const GRAND_TOTAL_FONT_SIZE: f32 = 14.0;

// =============================================================================
// Image Pages
// =============================================================================

/// Caption font size (points)
pub const CAPTION_FONT_SIZE: f32 = 24.0;

/// Space taken by a caption above its image
pub const CAPTION_HEIGHT_MM: f32 = 10.0;

/// Space left below each image
pub const IMAGE_GAP_MM: f32 = 20.0;

/// Watermark opacity, blended against white
pub const WATERMARK_OPACITY: f32 = 0.1;

/// Watermark rotation (degrees counter-clockwise)
pub const WATERMARK_ROTATION_DEG: f32 = 45.0;

// =============================================================================
// Terms And Signature
// =============================================================================

/// Gap above the terms block
pub const TERMS_GAP_MM: f32 = 10.0;

/// Line pitch of the terms block
pub const TERMS_LINE_HEIGHT_MM: f32 = 4.0;

/// Terms font size (points)
pub const TERMS_FONT_SIZE: f32 = 8.0;

/// Gap between the last terms line and the signature line
pub const SIGNATURE_GAP_MM: f32 = 8.0;

/// Height reserved for the signature line
pub const SIGNATURE_HEIGHT_MM: f32 = 6.0;

/// Signature font size (points)
pub const SIGNATURE_FONT_SIZE: f32 = 12.0;

// =============================================================================
// Fonts
// =============================================================================

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;
