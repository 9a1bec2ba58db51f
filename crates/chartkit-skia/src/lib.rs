// File: crates/chartkit-skia/src/lib.rs
// Summary: Skia paragraph-based text metrics and SVG rasterisation to PNG.

use chartkit_core::{FontSpec, TextMetrics};
use log::debug;
use skia_safe as skia;
use skia::font_style::{Slant, Weight, Width};
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};
use thiserror::Error;

const FALLBACK_FAMILIES: [&str; 5] = ["Helvetica", "Arial", "Roboto", "DejaVu Sans", "sans-serif"];

#[derive(Error, Debug)]
pub enum SkiaError {
    #[error("failed to create a {0}x{1} raster surface")]
    Surface(i32, i32),
    #[error("failed to parse SVG: {0}")]
    Svg(String),
    #[error("encode PNG failed")]
    Encode,
}

/// Text metrics from Skia's paragraph shaper with the system font manager.
pub struct SkiaTextMetrics {
    fonts: FontCollection,
}

impl Default for SkiaTextMetrics {
    fn default() -> Self { Self::new() }
}

impl SkiaTextMetrics {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn style(font: &FontSpec) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(font.size.max(1.0));
        let mut families: Vec<&str> = font
            .family
            .split(',')
            .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|f| !f.is_empty())
            .collect();
        families.extend(FALLBACK_FAMILIES);
        ts.set_font_families(&families);
        ts.set_font_style(skia::FontStyle::new(Weight::from(i32::from(font.weight)), Width::NORMAL, Slant::Upright));
        ts
    }

    fn layout(&self, text: &str, font: &FontSpec) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::style(font));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(f32::MAX / 4.0);
        paragraph
    }
}

impl TextMetrics for SkiaTextMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout(text, font).longest_line()
    }

    fn line_height(&self, font: &FontSpec) -> f32 {
        let h = self.layout("Hg", font).height();
        if h > 0.0 { h } else { font.size * 1.2 }
    }
}

/// Rasterise an SVG document string to PNG bytes at `width` × `height`.
pub fn rasterize_svg(svg: &str, width: i32, height: i32) -> Result<Vec<u8>, SkiaError> {
    let mut dom = skia::svg::Dom::from_str(svg, skia::FontMgr::default()).map_err(|e| SkiaError::Svg(format!("{e:?}")))?;
    let mut surface = skia::surfaces::raster_n32_premul((width, height)).ok_or(SkiaError::Surface(width, height))?;
    let canvas = surface.canvas();
    canvas.clear(skia::Color::WHITE);
    dom.set_container_size((width as f32, height as f32));
    dom.render(canvas);

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image.encode_to_data(skia::EncodedImageFormat::PNG).ok_or(SkiaError::Encode)?;
    debug!("rasterised {width}x{height} SVG to {} PNG bytes", data.len());
    Ok(data.as_bytes().to_vec())
}
