//! Flowing content blocks: summary, illustrations, terms and signature

use super::RenderContext;
use super::canvas::PageCanvas;
use super::fonts::FontWeight;
use super::plan::{Block, ImageRect, ImageSlot};
use super::table;
use crate::constants::*;
use crate::format::{format_currency, format_deduction};
use crate::options::{CurrencyMode, ThemeColor};
use crate::types::FinancialSummary;

/// Draw one planned block
pub fn draw_block(canvas: &mut PageCanvas<'_>, ctx: &RenderContext<'_>, block: &Block) {
    match block {
        Block::Customer { top_mm } => table::draw_customer(canvas, ctx, *top_mm),
        Block::TableHeader { top_mm } => table::draw_table_header(canvas, ctx, *top_mm),
        Block::TableRow { index, top_mm } => table::draw_table_row(canvas, ctx, *index, *top_mm),
        Block::Summary { rule_mm } => draw_summary(canvas, ctx, *rule_mm),
        Block::Image {
            slot,
            caption_mm,
            rect,
        } => draw_image(canvas, ctx, *slot, *caption_mm, *rect),
        Block::Terms {
            first_line,
            line_count,
            first_baseline_mm,
        } => draw_terms(canvas, ctx, *first_line, *line_count, *first_baseline_mm),
        Block::Signature { baseline_mm } => draw_signature(canvas, ctx, *baseline_mm),
    }
}

/// Label and amount of each summary line above the grand total
pub fn summary_lines(summary: &FinancialSummary, discount_pct: f64) -> Vec<(String, String)> {
    let mode = CurrencyMode::Precise;
    let mut lines = Vec::with_capacity(4);
    if summary.contractor_discount != 0.0 {
        lines.push((
            "הנחת קבלן".to_string(),
            format_deduction(summary.contractor_discount, mode),
        ));
    }
    lines.push((
        "סכום ביניים".to_string(),
        format_currency(summary.subtotal_after_contractor, mode),
    ));
    lines.push((
        format!("מע\"מ ({}%)", (VAT_RATE * 100.0).round()),
        format_currency(summary.vat_amount, mode),
    ));
    lines.push((
        format!("הנחה ({}%)", discount_pct),
        format_deduction(summary.discount_amount, mode),
    ));
    lines
}

fn draw_summary(canvas: &mut PageCanvas<'_>, ctx: &RenderContext<'_>, rule_mm: f32) {
    let theme = &ctx.options.theme;
    let right = PAGE_WIDTH_MM - PAGE_MARGIN_MM;
    let value_right = right - SUMMARY_VALUE_OFFSET_MM;

    canvas.line(
        (PAGE_MARGIN_MM, rule_mm),
        (right, rule_mm),
        theme.accent_color,
        SUMMARY_RULE_WIDTH,
    );

    let mut y = rule_mm - SUMMARY_RULE_GAP_MM;
    for (label, value) in summary_lines(ctx.summary, ctx.request.customer.discount_pct) {
        canvas.rtl_right(
            right,
            y,
            &label,
            FontWeight::Regular,
            SUMMARY_FONT_SIZE,
            ThemeColor::BLACK,
        );
        canvas.rtl_right(
            value_right,
            y,
            &value,
            FontWeight::Regular,
            SUMMARY_FONT_SIZE,
            ThemeColor::BLACK,
        );
        y -= SUMMARY_LINE_HEIGHT_MM;
    }

    let separator_y = y + SUMMARY_LINE_HEIGHT_MM / 2.0;
    canvas.line(
        (value_right - SUMMARY_VALUE_OFFSET_MM / 2.0, separator_y),
        (right, separator_y),
        ThemeColor::BLACK,
        GRID_LINE_WIDTH,
    );

    let total_y = y - GRAND_TOTAL_SPACING_MM;
    canvas.rtl_right(
        right,
        total_y,
        "סך הכל לתשלום",
        FontWeight::Bold,
        GRAND_TOTAL_FONT_SIZE,
        theme.accent_color,
    );
    canvas.rtl_right(
        value_right,
        total_y,
        &format_currency(ctx.summary.grand_total, CurrencyMode::Precise),
        FontWeight::Bold,
        GRAND_TOTAL_FONT_SIZE,
        theme.accent_color,
    );
}

fn draw_image(
    canvas: &mut PageCanvas<'_>,
    ctx: &RenderContext<'_>,
    slot: ImageSlot,
    caption_mm: f32,
    rect: ImageRect,
) {
    let (image, caption) = match slot {
        ImageSlot::A => (&ctx.images.image_a, &ctx.options.company.image_a_caption),
        ImageSlot::B => (&ctx.images.image_b, &ctx.options.company.image_b_caption),
    };
    let Some(image) = image else {
        return;
    };

    canvas.rtl_center(
        PAGE_WIDTH_MM / 2.0,
        caption_mm - pt_to_mm(CAPTION_FONT_SIZE) * 0.7,
        caption,
        FontWeight::Bold,
        CAPTION_FONT_SIZE,
        ThemeColor::BLACK,
    );
    canvas.image(&image.id, image.width_px, rect);
}

fn draw_terms(
    canvas: &mut PageCanvas<'_>,
    ctx: &RenderContext<'_>,
    first_line: usize,
    line_count: usize,
    first_baseline_mm: f32,
) {
    let right = PAGE_WIDTH_MM - PAGE_MARGIN_MM;
    let lines = ctx.options.company.terms.iter().skip(first_line).take(line_count);
    for (i, line) in lines.enumerate() {
        canvas.rtl_right(
            right,
            first_baseline_mm - i as f32 * TERMS_LINE_HEIGHT_MM,
            line,
            FontWeight::Regular,
            TERMS_FONT_SIZE,
            ThemeColor::BLACK,
        );
    }
}

fn draw_signature(canvas: &mut PageCanvas<'_>, ctx: &RenderContext<'_>, baseline_mm: f32) {
    canvas.rtl_right(
        PAGE_WIDTH_MM - PAGE_MARGIN_MM,
        baseline_mm,
        &ctx.options.company.signature_line,
        FontWeight::Regular,
        SIGNATURE_FONT_SIZE,
        ThemeColor::BLACK,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::summary_line_count;

    #[test]
    fn test_summary_line_count_matches_plan() {
        let mut summary = FinancialSummary {
            subtotal: 1000.0,
            ..Default::default()
        };
        assert_eq!(summary_lines(&summary, 0.0).len(), summary_line_count(false));

        summary.contractor_discount = 100.0;
        summary.subtotal_after_contractor = 900.0;
        let lines = summary_lines(&summary, 10.0);
        assert_eq!(lines.len(), summary_line_count(true));
        assert_eq!(lines[0].1, "-₪100.00");
        assert_eq!(lines[1].1, "₪900.00");
        assert_eq!(lines[2].0, "מע\"מ (17%)");
    }

    #[test]
    fn test_zero_discount_line_is_unsigned() {
        let summary = FinancialSummary {
            subtotal: 1000.0,
            subtotal_after_contractor: 1000.0,
            ..Default::default()
        };
        let lines = summary_lines(&summary, 0.0);
        let (label, value) = lines.last().unwrap();
        assert_eq!(label, "הנחה (0%)");
        assert_eq!(value, "₪0.00");
    }
}
