//! Drawing primitives in millimeters on top of printpdf operations

use super::fonts::{FontFace, FontWeight, Fonts};
use super::plan::ImageRect;
use crate::bidi::shape;
use crate::constants::{WATERMARK_ROTATION_DEG, mm_to_pt};
use crate::options::ThemeColor;
use printpdf::*;

/// Operations of one page being drawn
pub struct PageCanvas<'a> {
    ops: Vec<Op>,
    fonts: &'a Fonts,
}

impl<'a> PageCanvas<'a> {
    pub fn new(fonts: &'a Fonts) -> Self {
        Self {
            ops: Vec::new(),
            fonts,
        }
    }

    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    pub fn face(&self, weight: FontWeight) -> &'a FontFace {
        self.fonts.face(weight)
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: ThemeColor) {
        self.ops.push(Op::SetFillColor { col: rgb(color) });
        self.ops.push(Op::DrawPolygon {
            polygon: rect_polygon(x, y, width, height, PaintMode::Fill),
        });
    }

    pub fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: ThemeColor,
        line_width_pt: f32,
    ) {
        self.ops.push(Op::SetOutlineColor { col: rgb(color) });
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(line_width_pt),
        });
        self.ops.push(Op::DrawPolygon {
            polygon: rect_polygon(x, y, width, height, PaintMode::Stroke),
        });
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: ThemeColor, line_width_pt: f32) {
        self.ops.push(Op::SetOutlineColor { col: rgb(color) });
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(line_width_pt),
        });
        self.ops.push(Op::DrawLine {
            line: Line {
                points: vec![line_point(from.0, from.1), line_point(to.0, to.1)],
                is_closed: false,
            },
        });
    }

    /// Draw glyph-ordered text starting at `x`
    pub fn text_left(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        weight: FontWeight,
        size: f32,
        color: ThemeColor,
    ) {
        if text.is_empty() {
            return;
        }
        self.ops.push(Op::SetFillColor { col: rgb(color) });
        let pos_x = Mm(x).into_pt();
        let pos_y = Mm(y).into_pt();

        self.ops.push(Op::StartTextSection);
        match self.fonts.face(weight) {
            FontFace::Embedded { id, .. } => {
                self.ops.push(Op::SetFontSize {
                    font: id.clone(),
                    size: Pt(size),
                });
                self.ops.push(Op::SetTextMatrix {
                    matrix: TextMatrix::Translate(pos_x, pos_y),
                });
                self.ops.push(Op::WriteText {
                    items: vec![TextItem::Text(text.to_string())],
                    font: id.clone(),
                });
            }
            FontFace::Builtin(font) => {
                self.ops.push(Op::SetTextCursor {
                    pos: Point { x: pos_x, y: pos_y },
                });
                self.ops.push(Op::SetFontSizeBuiltinFont {
                    font: *font,
                    size: Pt(size),
                });
                self.ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text.to_string())],
                    font: *font,
                });
            }
        }
        self.ops.push(Op::EndTextSection);
    }

    /// Draw glyph-ordered text ending at `x_right`
    pub fn text_right(
        &mut self,
        x_right: f32,
        y: f32,
        text: &str,
        weight: FontWeight,
        size: f32,
        color: ThemeColor,
    ) {
        let width = self.face(weight).text_width_mm(text, size);
        self.text_left(x_right - width, y, text, weight, size, color);
    }

    /// Draw glyph-ordered text centered on `x_center`
    pub fn text_center(
        &mut self,
        x_center: f32,
        y: f32,
        text: &str,
        weight: FontWeight,
        size: f32,
        color: ThemeColor,
    ) {
        let width = self.face(weight).text_width_mm(text, size);
        self.text_left(x_center - width / 2.0, y, text, weight, size, color);
    }

    /// Shape logical-order text and draw it right-anchored
    pub fn rtl_right(
        &mut self,
        x_right: f32,
        y: f32,
        text: &str,
        weight: FontWeight,
        size: f32,
        color: ThemeColor,
    ) {
        self.text_right(x_right, y, &shape(text), weight, size, color);
    }

    /// Shape logical-order text and draw it centered
    pub fn rtl_center(
        &mut self,
        x_center: f32,
        y: f32,
        text: &str,
        weight: FontWeight,
        size: f32,
        color: ThemeColor,
    ) {
        self.text_center(x_center, y, &shape(text), weight, size, color);
    }

    /// Place an image so its pixels fill `rect`
    pub fn image(&mut self, id: &XObjectId, width_px: u32, rect: ImageRect) {
        self.ops.push(Op::UseXobject {
            id: id.clone(),
            transform: XObjectTransform {
                translate_x: Some(Mm(rect.x_mm).into_pt()),
                translate_y: Some(Mm(rect.y_mm).into_pt()),
                dpi: Some(dpi_for(width_px, rect.width_mm)),
                ..Default::default()
            },
        });
    }

    /// Place an image of the given size centered on a point and rotated
    pub fn image_rotated(
        &mut self,
        id: &XObjectId,
        width_px: u32,
        center: (f32, f32),
        size_mm: (f32, f32),
    ) {
        let angle = WATERMARK_ROTATION_DEG.to_radians();
        let (sin, cos) = angle.sin_cos();

        self.ops.push(Op::SaveGraphicsState);
        self.ops.push(Op::SetTransformationMatrix {
            matrix: CurTransMat::Raw([
                cos,
                sin,
                -sin,
                cos,
                mm_to_pt(center.0),
                mm_to_pt(center.1),
            ]),
        });
        self.ops.push(Op::UseXobject {
            id: id.clone(),
            transform: XObjectTransform {
                translate_x: Some(Mm(-size_mm.0 / 2.0).into_pt()),
                translate_y: Some(Mm(-size_mm.1 / 2.0).into_pt()),
                dpi: Some(dpi_for(width_px, size_mm.0)),
                ..Default::default()
            },
        });
        self.ops.push(Op::RestoreGraphicsState);
    }
}

/// DPI at which `width_px` pixels span `width_mm`
fn dpi_for(width_px: u32, width_mm: f32) -> f32 {
    width_px as f32 / (width_mm / 25.4)
}

fn rgb(color: ThemeColor) -> Color {
    Color::Rgb(Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
        icc_profile: None,
    })
}

fn line_point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point {
            x: Mm(x).into_pt(),
            y: Mm(y).into_pt(),
        },
        bezier: false,
    }
}

fn rect_polygon(x: f32, y: f32, width: f32, height: f32, mode: PaintMode) -> Polygon {
    Polygon {
        rings: vec![PolygonRing {
            points: vec![
                line_point(x, y),
                line_point(x + width, y),
                line_point(x + width, y + height),
                line_point(x, y + height),
            ],
        }],
        mode,
        winding_order: WindingOrder::NonZero,
    }
}
