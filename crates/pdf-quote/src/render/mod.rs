//! Quote document rendering
//!
//! 1. Resolve optional assets and decode the illustrations
//! 2. Plan every page (see [`plan_document`])
//! 3. Emit the printpdf operations of each planned page with the known total

mod canvas;
mod fonts;
mod page;
mod plan;
mod sections;
mod table;
mod text;

pub use fonts::{FontFace, FontWeight, Fonts};
pub use plan::{
    Block, DocumentPlan, ImageRect, ImageSlot, PagePlan, PlanInput, fit_scale,
    header_logo_size_mm, plan_document, summary_height_mm, summary_line_count, terms_height_mm,
};
pub use text::{fit_shaped, fit_with};

use crate::assets::{ImageAsset, ResolvedAssets};
use crate::constants::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::format::quote_file_name;
use crate::options::QuoteOptions;
use crate::pricing;
use crate::types::*;
use canvas::PageCanvas;
use printpdf::{
    Mm, PdfDocument, PdfPage, PdfSaveOptions, RawImage, RawImageData, RawImageFormat, XObjectId,
};
use std::path::{Path, PathBuf};

/// An image registered with the document
pub(crate) struct PlacedImage {
    pub id: XObjectId,
    pub width_px: u32,
    pub height_px: u32,
}

impl PlacedImage {
    fn add(doc: &mut PdfDocument, asset: &ImageAsset) -> Self {
        let (width, height) = asset.dimensions();
        let raw = RawImage {
            pixels: RawImageData::U8(asset.pixels.as_raw().clone()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        Self {
            id: doc.add_image(&raw),
            width_px: width,
            height_px: height,
        }
    }
}

/// Images available to page drawing
#[derive(Default)]
pub(crate) struct PlacedImages {
    pub logo: Option<PlacedImage>,
    pub logo_small: Option<PlacedImage>,
    pub watermark: Option<PlacedImage>,
    pub image_a: Option<PlacedImage>,
    pub image_b: Option<PlacedImage>,
}

/// Everything page drawing reads
pub(crate) struct RenderContext<'a> {
    pub request: &'a QuoteRequest,
    pub summary: &'a FinancialSummary,
    pub options: &'a QuoteOptions,
    pub plan: &'a DocumentPlan,
    pub images: &'a PlacedImages,
}

/// Pagination facts of a request, without rendering
pub fn plan_input(
    request: &QuoteRequest,
    summary: &FinancialSummary,
    options: &QuoteOptions,
    assets: &ResolvedAssets,
    image_a: Option<&ImageAsset>,
    image_b: Option<&ImageAsset>,
) -> PlanInput {
    PlanInput {
        item_count: request.items.len(),
        logo_px: assets.logo.as_ref().map(ImageAsset::dimensions),
        image_a_px: image_a.map(ImageAsset::dimensions),
        image_b_px: image_b.map(ImageAsset::dimensions),
        has_contractor_line: summary.contractor_discount != 0.0,
        terms_lines: options.company.terms.len(),
    }
}

/// Render a validated request into PDF bytes
pub fn render(
    request: &QuoteRequest,
    summary: &FinancialSummary,
    options: &QuoteOptions,
) -> Result<RenderedQuote> {
    request.validate()?;
    options.theme.validate()?;

    let mut assets = ResolvedAssets::resolve(&options.assets);
    let image_a = assets.decode_illustration(request.image_a.as_deref(), AssetKind::ImageA);
    let image_b = assets.decode_illustration(request.image_b.as_deref(), AssetKind::ImageB);

    let input = plan_input(
        request,
        summary,
        options,
        &assets,
        image_a.as_ref(),
        image_b.as_ref(),
    );
    let plan = plan_document(&input, &options.theme, options.image_layout);
    log::info!(
        "Rendering quote for {} with {} items on {} pages",
        request.customer.name,
        request.items.len(),
        plan.page_count()
    );

    let mut doc = PdfDocument::new(&options.company.title);
    let fonts = Fonts::register(&mut doc, assets.font_regular.take(), assets.font_bold.take());

    let images = PlacedImages {
        logo: assets.logo.as_ref().map(|a| PlacedImage::add(&mut doc, a)),
        logo_small: assets
            .logo_small
            .as_ref()
            .map(|a| PlacedImage::add(&mut doc, a)),
        watermark: assets
            .watermark
            .as_ref()
            .map(|a| PlacedImage::add(&mut doc, a)),
        image_a: image_a.as_ref().map(|a| PlacedImage::add(&mut doc, a)),
        image_b: image_b.as_ref().map(|a| PlacedImage::add(&mut doc, a)),
    };

    let ctx = RenderContext {
        request,
        summary,
        options,
        plan: &plan,
        images: &images,
    };

    let mut pages = Vec::with_capacity(plan.page_count());
    for page_plan in &plan.pages {
        let mut canvas = PageCanvas::new(&fonts);
        page::draw_watermark(&mut canvas, &ctx);
        page::draw_header(&mut canvas, &ctx);
        for block in &page_plan.blocks {
            sections::draw_block(&mut canvas, &ctx, block);
        }
        page::draw_footer(&mut canvas, &ctx, page_plan.number);
        pages.push(PdfPage::new(
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            canvas.into_ops(),
        ));
    }
    doc.pages = pages;

    let mut save_warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut save_warnings);
    if bytes.is_empty() {
        return Err(QuoteError::Pdf("PDF serialization produced no output".to_string()));
    }
    for warning in &save_warnings {
        log::debug!("PDF save: {:?}", warning);
    }

    Ok(RenderedQuote {
        bytes,
        page_count: plan.page_count(),
        warnings: assets.warnings,
    })
}

/// Compute the summary, render, and write the quote into `output_dir`.
///
/// Returns the path of the written file.
pub async fn generate_quote_pdf(
    request: QuoteRequest,
    options: &QuoteOptions,
    output_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    request.validate()?;
    let output_path = output_dir.as_ref().join(quote_file_name(&request.customer));
    let options = options.clone();

    // PDF generation is CPU-bound, spawn blocking
    let rendered = tokio::task::spawn_blocking(move || {
        let summary = pricing::compute(
            &request.items,
            request.customer.discount_pct,
            request.customer.effective_contractor_discount(),
        );
        render(&request, &summary, &options)
    })
    .await??;

    // Async file write
    tokio::fs::write(&output_path, rendered.bytes).await?;
    log::info!("Quote written to {}", output_path.display());

    Ok(output_path)
}
