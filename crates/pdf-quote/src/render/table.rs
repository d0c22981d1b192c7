//! Customer block and the line-item table

use super::RenderContext;
use super::canvas::PageCanvas;
use super::fonts::FontWeight;
use super::text::fit_shaped;
use crate::constants::*;
use crate::format::{BY_MEASUREMENT, format_currency};
use crate::options::ThemeColor;

const TABLE_HEADERS: [&str; 4] = ["מוצר", "כמות", "מחיר ליחידה", "סה\"כ"];

/// Horizontal extent of one table column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub left_mm: f32,
    pub width_mm: f32,
}

impl Column {
    pub fn right_mm(&self) -> f32 {
        self.left_mm + self.width_mm
    }

    pub fn center_mm(&self) -> f32 {
        self.left_mm + self.width_mm / 2.0
    }
}

/// Columns in logical order: name, quantity, unit price, line total.
///
/// Visually the name is rightmost and the line total leftmost.
pub fn columns() -> [Column; 4] {
    let right = PAGE_WIDTH_MM - PAGE_MARGIN_MM;
    let left = PAGE_MARGIN_MM;
    let name_width = (right - left) - 3.0 * NUMERIC_COLUMN_WIDTH_MM;

    let name = Column {
        left_mm: right - name_width,
        width_mm: name_width,
    };
    let quantity = Column {
        left_mm: name.left_mm - NUMERIC_COLUMN_WIDTH_MM,
        width_mm: NUMERIC_COLUMN_WIDTH_MM,
    };
    let unit_price = Column {
        left_mm: quantity.left_mm - NUMERIC_COLUMN_WIDTH_MM,
        width_mm: NUMERIC_COLUMN_WIDTH_MM,
    };
    let total = Column {
        left_mm: left,
        width_mm: NUMERIC_COLUMN_WIDTH_MM,
    };
    [name, quantity, unit_price, total]
}

/// Baseline that vertically centers text of `size` points in a row
fn row_baseline(top_mm: f32, row_height_mm: f32, size: f32) -> f32 {
    let cap_height_mm = pt_to_mm(size) * 0.7;
    top_mm - (row_height_mm + cap_height_mm) / 2.0
}

pub fn draw_customer(canvas: &mut PageCanvas<'_>, ctx: &RenderContext<'_>, top_mm: f32) {
    let customer = &ctx.request.customer;
    let date = customer.quote_date.format("%d/%m/%Y").to_string();
    let lines = [
        ("לכבוד:", customer.name.as_str()),
        ("תאריך:", date.as_str()),
        ("טלפון:", customer.phone.as_str()),
        ("דוא\"ל:", customer.email.as_str()),
        ("כתובת:", customer.address.as_str()),
    ];

    let right = PAGE_WIDTH_MM - PAGE_MARGIN_MM;
    for (i, (label, value)) in lines.iter().enumerate() {
        if value.trim().is_empty() {
            continue;
        }
        let weight = if i == 0 {
            FontWeight::Bold
        } else {
            FontWeight::Regular
        };
        canvas.rtl_right(
            right,
            top_mm - i as f32 * CUSTOMER_LINE_HEIGHT_MM,
            &format!("{} {}", label, value.trim()),
            weight,
            CUSTOMER_FONT_SIZE,
            ThemeColor::BLACK,
        );
    }
}

pub fn draw_table_header(canvas: &mut PageCanvas<'_>, ctx: &RenderContext<'_>, top_mm: f32) {
    let theme = &ctx.options.theme;
    let row_height = theme.row_height_mm;
    let bottom = top_mm - row_height;
    let cols = columns();

    canvas.fill_rect(
        cols[3].left_mm,
        bottom,
        cols[0].right_mm() - cols[3].left_mm,
        row_height,
        theme.header_color,
    );

    let baseline = row_baseline(top_mm, row_height, theme.header_font_size);
    for (col, title) in cols.iter().zip(TABLE_HEADERS) {
        canvas.rtl_center(
            col.center_mm(),
            baseline,
            title,
            FontWeight::Bold,
            theme.header_font_size,
            ThemeColor::WHITE,
        );
    }
}

pub fn draw_table_row(
    canvas: &mut PageCanvas<'_>,
    ctx: &RenderContext<'_>,
    index: usize,
    top_mm: f32,
) {
    let Some(item) = ctx.request.items.get(index) else {
        return;
    };
    let theme = &ctx.options.theme;
    let mode = ctx.options.table_currency;
    let row_height = theme.row_height_mm;
    let bottom = top_mm - row_height;
    let cols = columns();

    // Striping follows the row position, never the content
    if index % 2 == 1 {
        canvas.fill_rect(
            cols[3].left_mm,
            bottom,
            cols[0].right_mm() - cols[3].left_mm,
            row_height,
            theme.zebra_color,
        );
    }
    for col in &cols {
        canvas.stroke_rect(
            col.left_mm,
            bottom,
            col.width_mm,
            row_height,
            theme.grid_color,
            GRID_LINE_WIDTH,
        );
    }

    let size = theme.body_font_size;
    let baseline = row_baseline(top_mm, row_height, size);

    let name = fit_shaped(
        &item.row.name,
        cols[0].width_mm - 2.0 * CELL_PADDING_MM,
        canvas.face(FontWeight::Regular),
        size,
    );
    canvas.text_right(
        cols[0].right_mm() - CELL_PADDING_MM,
        baseline,
        &name,
        FontWeight::Regular,
        size,
        ThemeColor::BLACK,
    );

    let line_total = if item.row.is_priced_by_measurement() {
        BY_MEASUREMENT.to_string()
    } else {
        format_currency(item.line_total, mode)
    };
    let cells = [
        item.quantity.to_string(),
        item.row.price_label(mode),
        line_total,
    ];
    for (col, value) in cols[1..].iter().zip(cells) {
        canvas.rtl_center(
            col.center_mm(),
            baseline,
            &value,
            FontWeight::Regular,
            size,
            ThemeColor::BLACK,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_span_content_width() {
        let cols = columns();
        assert_eq!(cols[3].left_mm, PAGE_MARGIN_MM);
        assert!((cols[0].right_mm() - (PAGE_WIDTH_MM - PAGE_MARGIN_MM)).abs() < 1e-3);
        // Name column is rightmost and wider than the numeric ones
        assert!(cols[0].left_mm > cols[1].left_mm);
        assert!(cols[0].width_mm > NUMERIC_COLUMN_WIDTH_MM);
        for pair in cols.windows(2) {
            assert!((pair[1].right_mm() - pair[0].left_mm).abs() < 1e-3);
        }
    }
}
