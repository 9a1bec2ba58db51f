// File: crates/chartkit-core/src/container.rs
// Summary: Render target that holds either the mounted chart document or a visible error message.

use svg::Document;

use crate::config::FontSpec;
use crate::draw::{self, Anchor};
use crate::layout::wrap_text;
use crate::text::HeuristicMetrics;
use crate::theme::Palette;
use crate::types::{HEIGHT, WIDTH};

const ERROR_FILL: &str = "#b3261e";

/// Where a chart is mounted. Every render clears it first.
#[derive(Clone, Debug, Default)]
pub struct Container {
    id: String,
    content: Option<Document>,
    error: Option<String>,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), content: None, error: None }
    }

    pub fn id(&self) -> &str { &self.id }

    pub fn clear(&mut self) {
        self.content = None;
        self.error = None;
    }

    pub fn mount(&mut self, doc: Document) {
        self.error = None;
        self.content = Some(doc);
    }

    /// Replace the content with a message box sized `width` × `height`.
    pub fn show_error(&mut self, message: &str, width: f32, height: f32) {
        let (w, h) = if width > 0.0 && height > 0.0 { (width, height) } else { (WIDTH, HEIGHT) };
        let font = FontSpec::new(14.0, 600);
        let palette = Palette::light();
        let lines = wrap_text(message, (w - 32.0).max(font.size), &font, &HeuristicMetrics);
        let lh = font.size * 1.4;
        let top = h * 0.5 - (lines.len() as f32 - 1.0) * lh * 0.5;
        let doc = Document::new()
            .set("width", draw::r2(w))
            .set("height", draw::r2(h))
            .set("viewBox", format!("0 0 {} {}", draw::r2(w), draw::r2(h)))
            .add(draw::rect(0.0, 0.0, w, h, &palette.background).set("class", "background"))
            .add(draw::text_lines(w * 0.5, top, &lines, &font, ERROR_FILL, Anchor::Middle, lh).set("class", "error"));
        self.content = Some(doc);
        self.error = Some(message.to_string());
    }

    pub fn content(&self) -> Option<&Document> { self.content.as_ref() }
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }
    pub fn is_empty(&self) -> bool { self.content.is_none() }

    /// Serialised content; empty when nothing is mounted.
    pub fn to_svg_string(&self) -> String {
        self.content.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}
