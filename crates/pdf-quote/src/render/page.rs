//! Per-page furniture: watermark, header and footer

use super::RenderContext;
use super::canvas::PageCanvas;
use super::fonts::FontWeight;
use super::plan::{ImageRect, fit_scale};
use crate::bidi::shape;
use crate::constants::*;
use crate::options::ThemeColor;

/// Page label in the footer, e.g. "עמוד 2 מתוך 5"
pub fn page_label(number: usize, total: usize) -> String {
    format!("עמוד {} מתוך {}", number, total)
}

/// Faded logo centered on the page and turned diagonally, under all content
pub fn draw_watermark(canvas: &mut PageCanvas<'_>, ctx: &RenderContext<'_>) {
    let Some(image) = &ctx.images.watermark else {
        return;
    };
    let (w, h) = (image.width_px as f32, image.height_px as f32);
    let max_width = PAGE_WIDTH_MM - 2.0 * PAGE_MARGIN_MM;
    let max_height = PAGE_HEIGHT_MM - 2.0 * PAGE_MARGIN_MM;
    let scale = fit_scale(max_width, max_height, w, h);

    canvas.image_rotated(
        &image.id,
        image.width_px,
        (PAGE_WIDTH_MM / 2.0, PAGE_HEIGHT_MM / 2.0),
        (w * scale, h * scale),
    );
}

/// Logo in the top-right corner and the centered document title
pub fn draw_header(canvas: &mut PageCanvas<'_>, ctx: &RenderContext<'_>) {
    let top = PAGE_HEIGHT_MM - PAGE_MARGIN_MM;
    let mut logo_bottom = top;

    if let (Some(logo), Some((width_mm, height_mm))) = (&ctx.images.logo, ctx.plan.logo_mm) {
        let rect = ImageRect {
            x_mm: PAGE_WIDTH_MM - PAGE_MARGIN_MM - width_mm,
            y_mm: top - height_mm,
            width_mm,
            height_mm,
        };
        canvas.image(&logo.id, logo.width_px, rect);
        logo_bottom = rect.y_mm;
    }

    canvas.rtl_center(
        PAGE_WIDTH_MM / 2.0,
        logo_bottom - TITLE_OFFSET_MM,
        &ctx.options.company.title,
        FontWeight::Bold,
        TITLE_FONT_SIZE,
        ctx.options.theme.accent_color,
    );
}

/// Colored bar, small logo, contact line and "page N of TOTAL"
pub fn draw_footer(canvas: &mut PageCanvas<'_>, ctx: &RenderContext<'_>, number: usize) {
    let theme = &ctx.options.theme;
    canvas.fill_rect(
        0.0,
        FOOTER_BAR_Y_MM,
        PAGE_WIDTH_MM,
        FOOTER_BAR_HEIGHT_MM,
        theme.header_color,
    );

    let mut contact_left = PAGE_MARGIN_MM;
    if let Some(logo) = &ctx.images.logo_small {
        let w = FOOTER_LOGO_HEIGHT_MM * logo.width_px as f32 / logo.height_px as f32;
        let rect = ImageRect {
            x_mm: PAGE_MARGIN_MM,
            y_mm: FOOTER_TEXT_Y_MM - 1.0,
            width_mm: w,
            height_mm: FOOTER_LOGO_HEIGHT_MM,
        };
        canvas.image(&logo.id, logo.width_px, rect);
        contact_left += w + FOOTER_LOGO_GAP_MM;
    }

    let label = page_label(number, ctx.plan.page_count());
    let label_width = canvas
        .face(FontWeight::Regular)
        .text_width_mm(&shape(&label), FOOTER_FONT_SIZE);
    canvas.rtl_right(
        PAGE_WIDTH_MM - PAGE_MARGIN_MM,
        FOOTER_TEXT_Y_MM,
        &label,
        FontWeight::Regular,
        FOOTER_FONT_SIZE,
        ThemeColor::BLACK,
    );

    // Contact line centered between the logo and the page label
    let contact_right = PAGE_WIDTH_MM - PAGE_MARGIN_MM - label_width - FOOTER_LOGO_GAP_MM;
    canvas.rtl_center(
        (contact_left + contact_right) / 2.0,
        FOOTER_TEXT_Y_MM,
        &ctx.options.company.contact_line,
        FontWeight::Regular,
        FOOTER_FONT_SIZE,
        ThemeColor::BLACK,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_label() {
        assert_eq!(page_label(2, 5), "עמוד 2 מתוך 5");
    }
}
