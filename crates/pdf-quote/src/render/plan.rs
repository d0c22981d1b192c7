//! Page planning
//!
//! The whole document is laid out before any page is drawn, so the total
//! page count printed in every footer is known up front. Planning depends
//! only on the item count, the theme, and the pixel sizes of the logo and
//! illustrations; the same input always produces the same plan.
//!
//! All coordinates are millimeters with the origin at the bottom-left of
//! the page, matching PDF user space.

use crate::constants::*;
use crate::options::{ImageLayout, LayoutTheme};

/// Facts about the content that drive pagination
#[derive(Debug, Clone, PartialEq)]
pub struct PlanInput {
    pub item_count: usize,
    /// Pixel size of the header logo, if one resolved
    pub logo_px: Option<(u32, u32)>,
    pub image_a_px: Option<(u32, u32)>,
    pub image_b_px: Option<(u32, u32)>,
    /// Whether the summary carries a contractor discount line
    pub has_contractor_line: bool,
    pub terms_lines: usize,
}

/// Which optional illustration a block shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    A,
    B,
}

/// Placed image rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRect {
    pub x_mm: f32,
    /// Bottom edge
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

/// One positioned piece of flowing content
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Customer details; `top_mm` is the first baseline
    Customer { top_mm: f32 },
    /// Table column titles; `top_mm` is the row's upper edge
    TableHeader { top_mm: f32 },
    TableRow { index: usize, top_mm: f32 },
    /// Financial summary starting with a rule at `rule_mm`
    Summary { rule_mm: f32 },
    Image {
        slot: ImageSlot,
        caption_mm: f32,
        rect: ImageRect,
    },
    /// Terms lines `first_line..first_line + line_count`, the first one at `first_baseline_mm`
    Terms {
        first_line: usize,
        line_count: usize,
        first_baseline_mm: f32,
    },
    Signature { baseline_mm: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// 1-based
    pub number: usize,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    /// Header logo size after scaling, if drawn
    pub logo_mm: Option<(f32, f32)>,
    /// First y below the page header
    pub content_top_mm: f32,
    pub pages: Vec<PagePlan>,
}

impl DocumentPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of pages holding at least one table row
    pub fn table_page_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.blocks.iter().any(|b| matches!(b, Block::TableRow { .. })))
            .count()
    }
}

/// Scale factor that fits `width` x `height` inside the bounds, preserving aspect ratio
pub fn fit_scale(max_width: f32, max_height: f32, width: f32, height: f32) -> f32 {
    (max_width / width).min(max_height / height)
}

/// Header logo size: fixed width, height from the aspect ratio, capped
pub fn header_logo_size_mm(logo_px: Option<(u32, u32)>) -> Option<(f32, f32)> {
    let (w, h) = logo_px?;
    if w == 0 || h == 0 {
        return None;
    }
    let scale = fit_scale(HEADER_LOGO_WIDTH_MM, HEADER_LOGO_MAX_HEIGHT_MM, w as f32, h as f32);
    Some((w as f32 * scale, h as f32 * scale))
}

/// Height of the summary block below its opening rule
pub fn summary_height_mm(has_contractor_line: bool) -> f32 {
    SUMMARY_RULE_GAP_MM
        + summary_line_count(has_contractor_line) as f32 * SUMMARY_LINE_HEIGHT_MM
        + GRAND_TOTAL_SPACING_MM
        + SUMMARY_LINE_HEIGHT_MM
}

/// Regular lines above the grand total
pub fn summary_line_count(has_contractor_line: bool) -> usize {
    if has_contractor_line { 4 } else { 3 }
}

/// Height of the terms block plus signature line
pub fn terms_height_mm(terms_lines: usize) -> f32 {
    TERMS_GAP_MM
        + terms_lines as f32 * TERMS_LINE_HEIGHT_MM
        + SIGNATURE_GAP_MM
        + SIGNATURE_HEIGHT_MM
}

/// Ephemeral cursor owned by one planning call
#[derive(Debug)]
struct PageLayoutState {
    current_y: f32,
    page_number: usize,
    content_top: f32,
    pages: Vec<PagePlan>,
}

impl PageLayoutState {
    fn new(content_top: f32) -> Self {
        Self {
            current_y: content_top,
            page_number: 1,
            content_top,
            pages: vec![PagePlan {
                number: 1,
                blocks: Vec::new(),
            }],
        }
    }

    fn fits(&self, height: f32) -> bool {
        self.current_y - height >= CONTENT_BOTTOM_MM
    }

    fn break_page(&mut self) {
        self.page_number += 1;
        self.current_y = self.content_top;
        self.pages.push(PagePlan {
            number: self.page_number,
            blocks: Vec::new(),
        });
        log::debug!("Page break, now on page {}", self.page_number);
    }

    fn push(&mut self, block: Block) {
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(block);
        }
    }
}

/// Lay out the whole document
pub fn plan_document(input: &PlanInput, theme: &LayoutTheme, image_layout: ImageLayout) -> DocumentPlan {
    let logo_mm = header_logo_size_mm(input.logo_px);
    let logo_height = logo_mm.map(|(_, h)| h).unwrap_or(0.0);
    let content_top = PAGE_HEIGHT_MM - PAGE_MARGIN_MM - logo_height - HEADER_CONTENT_OFFSET_MM;

    let mut state = PageLayoutState::new(content_top);

    // Customer block, first page only
    state.push(Block::Customer {
        top_mm: state.current_y,
    });
    state.current_y -= (CUSTOMER_LINES + 1) as f32 * CUSTOMER_LINE_HEIGHT_MM;

    plan_table(&mut state, input.item_count, theme.row_height_mm);
    plan_summary(&mut state, input.has_contractor_line);
    plan_images(&mut state, input, image_layout);
    plan_terms(&mut state, input.terms_lines);

    DocumentPlan {
        logo_mm,
        content_top_mm: content_top,
        pages: state.pages,
    }
}

fn plan_table(state: &mut PageLayoutState, item_count: usize, row_height: f32) {
    if item_count == 0 {
        return;
    }

    // Never leave a header row without at least one row below it
    if !state.fits(2.0 * row_height) {
        state.break_page();
    }
    state.push(Block::TableHeader {
        top_mm: state.current_y,
    });
    state.current_y -= row_height;

    for index in 0..item_count {
        if !state.fits(row_height) {
            state.break_page();
            state.push(Block::TableHeader {
                top_mm: state.current_y,
            });
            state.current_y -= row_height;
        }
        state.push(Block::TableRow {
            index,
            top_mm: state.current_y,
        });
        state.current_y -= row_height;
    }
}

fn plan_summary(state: &mut PageLayoutState, has_contractor_line: bool) {
    let body = summary_height_mm(has_contractor_line);
    let rule_mm = if state.fits(SUMMARY_GAP_MM + body) {
        state.current_y - SUMMARY_GAP_MM
    } else {
        state.break_page();
        state.current_y
    };
    state.push(Block::Summary { rule_mm });
    state.current_y = rule_mm - body;
}

fn plan_images(state: &mut PageLayoutState, input: &PlanInput, image_layout: ImageLayout) {
    let slots: Vec<(ImageSlot, (u32, u32))> = [
        (ImageSlot::A, input.image_a_px),
        (ImageSlot::B, input.image_b_px),
    ]
    .into_iter()
    .filter_map(|(slot, px)| px.filter(|(w, h)| *w > 0 && *h > 0).map(|px| (slot, px)))
    .collect();

    if slots.is_empty() {
        return;
    }

    match image_layout {
        ImageLayout::SharedPage => {
            state.break_page();
            place_images(state, &slots);
        }
        ImageLayout::SeparatePages => {
            for slot in &slots {
                state.break_page();
                place_images(state, std::slice::from_ref(slot));
            }
        }
    }
}

/// Stack images vertically, splitting the remaining page height evenly
fn place_images(state: &mut PageLayoutState, slots: &[(ImageSlot, (u32, u32))]) {
    let available = state.current_y - CONTENT_BOTTOM_MM;
    let per_slot = available / slots.len() as f32;
    let max_width = PAGE_WIDTH_MM - 2.0 * PAGE_MARGIN_MM;
    let max_height = (per_slot - CAPTION_HEIGHT_MM - IMAGE_GAP_MM).max(1.0);

    for (slot, (w, h)) in slots {
        let (w, h) = (*w as f32, *h as f32);
        let scale = fit_scale(max_width, max_height, w, h);
        let (width_mm, height_mm) = (w * scale, h * scale);

        let caption_mm = state.current_y;
        let rect = ImageRect {
            x_mm: (PAGE_WIDTH_MM - width_mm) / 2.0,
            y_mm: caption_mm - CAPTION_HEIGHT_MM - height_mm,
            width_mm,
            height_mm,
        };
        state.push(Block::Image {
            slot: *slot,
            caption_mm,
            rect,
        });
        state.current_y = rect.y_mm - IMAGE_GAP_MM;
    }
}

fn plan_terms(state: &mut PageLayoutState, terms_lines: usize) {
    if state.fits(terms_height_mm(terms_lines)) {
        state.current_y -= TERMS_GAP_MM;
    } else {
        state.break_page();
    }

    let signature_mm = SIGNATURE_GAP_MM + SIGNATURE_HEIGHT_MM;
    let mut first_line = 0;
    let mut first_baseline_mm = state.current_y;
    for line in 0..terms_lines {
        // The last line keeps the signature on its page
        let needed = if line + 1 == terms_lines {
            TERMS_LINE_HEIGHT_MM + signature_mm
        } else {
            TERMS_LINE_HEIGHT_MM
        };
        if !state.fits(needed) {
            if line > first_line {
                state.push(Block::Terms {
                    first_line,
                    line_count: line - first_line,
                    first_baseline_mm,
                });
            }
            state.break_page();
            first_line = line;
            first_baseline_mm = state.current_y;
        }
        state.current_y -= TERMS_LINE_HEIGHT_MM;
    }
    if terms_lines > first_line {
        state.push(Block::Terms {
            first_line,
            line_count: terms_lines - first_line,
            first_baseline_mm,
        });
    } else if !state.fits(signature_mm) {
        state.break_page();
    }

    let baseline_mm = state.current_y - SIGNATURE_GAP_MM;
    state.push(Block::Signature { baseline_mm });
    state.current_y = baseline_mm - SIGNATURE_HEIGHT_MM;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_scale_preserves_aspect() {
        // Wide image is width-bound
        assert_eq!(fit_scale(100.0, 100.0, 200.0, 50.0), 0.5);
        // Tall image is height-bound
        assert_eq!(fit_scale(100.0, 100.0, 50.0, 400.0), 0.25);
    }

    #[test]
    fn test_logo_height_is_capped() {
        let (w, h) = header_logo_size_mm(Some((100, 1000))).unwrap();
        assert!(h <= HEADER_LOGO_MAX_HEIGHT_MM + f32::EPSILON);
        assert!(w < HEADER_LOGO_WIDTH_MM);
        assert_eq!(header_logo_size_mm(Some((0, 10))), None);
    }
}
