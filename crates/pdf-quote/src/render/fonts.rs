//! Font registration and text measurement

use crate::constants::{HELVETICA_CHAR_WIDTH_RATIO, pt_to_mm};
use printpdf::{BuiltinFont, FontId, ParsedFont, PdfDocument};

/// A font usable for drawing and measuring
pub enum FontFace {
    Embedded { id: FontId, parsed: ParsedFont },
    Builtin(BuiltinFont),
}

impl FontFace {
    /// Advance width of already shaped text, in points
    pub fn text_width_pt(&self, text: &str, size: f32) -> f32 {
        match self {
            FontFace::Embedded { parsed, .. } => {
                let units_per_em = parsed.font_metrics.units_per_em;
                text.chars()
                    .filter_map(|ch| parsed.lookup_glyph_index(ch as u32))
                    .map(|glyph_id| {
                        advance_pt(parsed.get_horizontal_advance(glyph_id), units_per_em, size)
                    })
                    .sum()
            }
            FontFace::Builtin(_) => text.chars().count() as f32 * size * HELVETICA_CHAR_WIDTH_RATIO,
        }
    }

    pub fn text_width_mm(&self, text: &str, size: f32) -> f32 {
        pt_to_mm(self.text_width_pt(text, size))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Regular and bold faces registered with one document
pub struct Fonts {
    regular: FontFace,
    bold: Option<FontFace>,
}

impl Fonts {
    /// Register the resolved fonts. A missing bold face falls back to the
    /// regular one; with neither, built-in Helvetica is used.
    pub fn register(
        doc: &mut PdfDocument,
        regular: Option<ParsedFont>,
        bold: Option<ParsedFont>,
    ) -> Self {
        match (regular, bold) {
            (Some(regular), bold) => Self {
                regular: embed(doc, regular),
                bold: bold.map(|b| embed(doc, b)),
            },
            (None, Some(bold)) => Self {
                regular: embed(doc, bold),
                bold: None,
            },
            (None, None) => {
                log::warn!("No embedded font available, falling back to Helvetica");
                Self::builtin()
            }
        }
    }

    /// Built-in Helvetica pair, no embedding
    pub fn builtin() -> Self {
        Self {
            regular: FontFace::Builtin(BuiltinFont::Helvetica),
            bold: Some(FontFace::Builtin(BuiltinFont::HelveticaBold)),
        }
    }

    pub fn face(&self, weight: FontWeight) -> &FontFace {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => self.bold.as_ref().unwrap_or(&self.regular),
        }
    }
}

/// Glyph advance in font design units scaled to points at `size`
fn advance_pt(advance: u16, units_per_em: u16, size: f32) -> f32 {
    if units_per_em == 0 {
        return 0.0;
    }
    advance as f32 / units_per_em as f32 * size
}

fn embed(doc: &mut PdfDocument, parsed: ParsedFont) -> FontFace {
    let id = doc.add_font(&parsed);
    FontFace::Embedded { id, parsed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_scales_by_units_per_em() {
        // Same glyph proportion in a 1000-unit and a 2048-unit font
        assert_eq!(advance_pt(500, 1000, 10.0), 5.0);
        assert_eq!(advance_pt(1024, 2048, 10.0), 5.0);
        assert_eq!(advance_pt(1843, 2048, 12.0), 1843.0 / 2048.0 * 12.0);
        assert_eq!(advance_pt(500, 0, 10.0), 0.0);
    }

    #[test]
    fn test_builtin_width_is_per_char() {
        let face = FontFace::Builtin(BuiltinFont::Helvetica);
        assert_eq!(face.text_width_pt("abcd", 10.0), 4.0 * 10.0 * HELVETICA_CHAR_WIDTH_RATIO);
    }
}
