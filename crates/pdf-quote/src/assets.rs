//! Optional decorative assets, resolved once before layout
//!
//! A missing or broken asset never aborts generation: it resolves to `None`
//! and an [`AssetWarning`] is recorded.

use crate::constants::WATERMARK_OPACITY;
use crate::options::AssetPaths;
use crate::types::{AssetKind, AssetWarning};
use image::{Rgb, RgbImage, Rgba};
use printpdf::ParsedFont;
use std::path::Path;

/// Decoded image flattened onto a white background
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub pixels: RgbImage,
}

impl ImageAsset {
    /// Decode PNG/JPEG bytes
    pub fn decode(bytes: &[u8]) -> std::result::Result<Self, String> {
        Self::decode_faded(bytes, 1.0)
    }

    /// Decode and fade toward white, for drawing underneath content
    pub fn decode_faded(bytes: &[u8], opacity: f32) -> std::result::Result<Self, String> {
        let decoded = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
        let pixels = flatten_on_white(&decoded.to_rgba8(), opacity);
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err("image has no pixels".to_string());
        }
        Ok(Self { pixels })
    }

    pub fn width_px(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height_px(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Composite RGBA pixels over white, scaling alpha by `opacity`
fn flatten_on_white(rgba: &image::RgbaImage, opacity: f32) -> RgbImage {
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = (a as f32 / 255.0) * opacity;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}

/// Everything optional the renderer may draw, with what went wrong
#[derive(Default)]
pub struct ResolvedAssets {
    pub logo: Option<ImageAsset>,
    pub logo_small: Option<ImageAsset>,
    pub watermark: Option<ImageAsset>,
    pub font_regular: Option<ParsedFont>,
    pub font_bold: Option<ParsedFont>,
    pub warnings: Vec<AssetWarning>,
}

impl ResolvedAssets {
    /// Read every asset from disk
    pub fn resolve(paths: &AssetPaths) -> Self {
        let mut assets = Self::default();

        assets.logo = assets.load_image(&paths.path(&paths.logo), AssetKind::Logo, 1.0);
        assets.logo_small =
            assets.load_image(&paths.path(&paths.logo_small), AssetKind::SmallLogo, 1.0);
        assets.watermark = assets.load_image(
            &paths.path(&paths.watermark),
            AssetKind::Watermark,
            WATERMARK_OPACITY,
        );
        assets.font_regular =
            assets.load_font(&paths.path(&paths.font_regular), AssetKind::RegularFont);
        assets.font_bold = assets.load_font(&paths.path(&paths.font_bold), AssetKind::BoldFont);

        assets
    }

    /// Decode a caller-supplied illustration, recording a warning on failure
    pub fn decode_illustration(&mut self, bytes: Option<&[u8]>, kind: AssetKind) -> Option<ImageAsset> {
        let bytes = bytes?;
        match ImageAsset::decode(bytes) {
            Ok(image) => Some(image),
            Err(reason) => {
                self.warn(AssetWarning::Unreadable { kind, reason });
                None
            }
        }
    }

    pub fn warn(&mut self, warning: AssetWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn read(&mut self, path: &Path, kind: AssetKind) -> Option<Vec<u8>> {
        match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                self.warn(AssetWarning::Missing {
                    kind,
                    path: path.display().to_string(),
                });
                None
            }
            Err(err) => {
                self.warn(AssetWarning::Unreadable {
                    kind,
                    reason: err.to_string(),
                });
                None
            }
        }
    }

    fn load_image(&mut self, path: &Path, kind: AssetKind, opacity: f32) -> Option<ImageAsset> {
        let bytes = self.read(path, kind)?;
        match ImageAsset::decode_faded(&bytes, opacity) {
            Ok(image) => Some(image),
            Err(reason) => {
                self.warn(AssetWarning::Unreadable { kind, reason });
                None
            }
        }
    }

    fn load_font(&mut self, path: &Path, kind: AssetKind) -> Option<ParsedFont> {
        let bytes = self.read(path, kind)?;
        let mut font_warnings = Vec::new();
        match ParsedFont::from_bytes(&bytes, 0, &mut font_warnings) {
            Some(font) => Some(font),
            None => {
                self.warn(AssetWarning::Unreadable {
                    kind,
                    reason: "failed to parse font".to_string(),
                });
                None
            }
        }
    }
}
