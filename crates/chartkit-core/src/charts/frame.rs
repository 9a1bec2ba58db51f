// File: crates/chartkit-core/src/charts/frame.rs
// Summary: Chart canvas: background, title block, legend, footer and the remaining body rect.

use svg::node::element::Group;
use svg::node::Node;
use svg::Document;

use super::RenderCtx;
use crate::draw::{self, Anchor};
use crate::error::{ChartError, Result};
use crate::geometry::Rect;
use crate::layout::{auto_margins, wrap_text, MarginRequest};
use crate::types::Insets;

/// Outer padding between the chart edge and any content.
pub const PAD: f32 = 16.0;
const SWATCH: f32 = 12.0;
const LEGEND_GAP: f32 = 16.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub color: String,
    pub icon: Option<String>,
}

impl LegendItem {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self { label: label.into(), color: color.into(), icon: None }
    }
}

/// Document under construction. Header and footer are laid out on creation;
/// `body` is what is left for the legend and the plot.
pub struct Canvas<'c, 'a> {
    ctx: &'c RenderCtx<'a>,
    root: Group,
    pub width: f32,
    pub height: f32,
    pub body: Rect,
}

impl<'c, 'a> Canvas<'c, 'a> {
    pub fn new(ctx: &'c RenderCtx<'a>) -> Result<Self> {
        let v = ctx.vars();
        let (width, height) = (v.width, v.height);
        if !(width > 0.0 && height > 0.0) {
            return Err(ChartError::NonPositiveLayout { width, height });
        }
        let mut canvas = Self {
            ctx,
            root: Group::new().set("class", "chart"),
            width,
            height,
            body: Rect::from_ltrb(PAD, PAD, width - PAD, height - PAD),
        };
        canvas.header();
        canvas.footer();
        if canvas.body.width() <= 0.0 || canvas.body.height() <= 0.0 {
            return Err(ChartError::NonPositiveLayout { width: canvas.body.width(), height: canvas.body.height() });
        }
        Ok(canvas)
    }

    pub fn add<T>(&mut self, node: T)
    where
        T: Into<Box<dyn Node>>,
    {
        let root = std::mem::replace(&mut self.root, Group::new());
        self.root = root.add(node);
    }

    fn header(&mut self) {
        let ctx = self.ctx;
        let typo = ctx.typo();
        let max_w = self.body.width();
        let mut y = self.body.top;
        for (content, font, fill) in [
            (ctx.vars().title.as_deref(), &typo.title, ctx.palette.text.as_str()),
            (ctx.vars().subtitle.as_deref(), &typo.subtitle, ctx.palette.muted.as_str()),
        ] {
            let Some(content) = content.filter(|s| !s.trim().is_empty()) else { continue };
            let lines = wrap_text(content, max_w, font, ctx.metrics);
            let lh = ctx.line_height(font);
            let block = draw::text_lines(self.body.left, y + font.size, &lines, font, fill, Anchor::Start, lh);
            self.add(block.set("class", "header"));
            y += lines.len() as f32 * lh + 4.0;
        }
        if y > self.body.top {
            self.body.top = y + 8.0;
        }
    }

    fn footer(&mut self) {
        let ctx = self.ctx;
        let Some(source) = ctx.vars().source.as_deref().filter(|s| !s.trim().is_empty()) else { return };
        let font = &ctx.typo().footer;
        let lines = wrap_text(source, self.body.width(), font, ctx.metrics);
        let lh = ctx.line_height(font);
        let top = self.body.bottom - lines.len() as f32 * lh;
        let block = draw::text_lines(self.body.left, top + font.size, &lines, font, &ctx.palette.muted, Anchor::Start, lh);
        self.add(block.set("class", "footer"));
        self.body.bottom = top - 8.0;
    }

    /// Flowing legend under the header. Skipped for fewer than two items or when disabled.
    pub fn legend(&mut self, items: &[LegendItem]) {
        let ctx = self.ctx;
        if !ctx.vars().show_legend || items.len() < 2 {
            return;
        }
        let font = &ctx.typo().legend;
        let lh = ctx.line_height(font).max(SWATCH + 4.0);
        let mut x = self.body.left;
        let mut y = self.body.top;
        let mut group = Group::new().set("class", "legend");
        for item in items {
            let marker = if item.icon.is_some() { SWATCH + 4.0 } else { SWATCH };
            let w = marker + 6.0 + ctx.measure(&item.label, font);
            if x > self.body.left && x + w > self.body.right {
                x = self.body.left;
                y += lh;
            }
            let mid = y + lh * 0.5;
            group = match &item.icon {
                Some(url) => group.add(draw::image(url, x, mid - marker * 0.5, marker, marker)),
                None => group.add(draw::rect(x, mid - SWATCH * 0.5, SWATCH, SWATCH, &item.color).set("rx", 2)),
            };
            group = group.add(draw::text_middle(x + marker + 6.0, mid, &item.label, font, &ctx.palette.text, Anchor::Start));
            x += w + LEGEND_GAP;
        }
        self.add(group);
        self.body.top = y + lh + 8.0;
    }

    /// Plot rect: explicit `variables.margin` if set, otherwise sized from `req`.
    pub fn plot(&self, req: &MarginRequest<'_>) -> Result<Rect> {
        let ctx = self.ctx;
        let insets: Insets = match ctx.vars().margin {
            Some(m) => m,
            None => auto_margins(req, ctx.typo(), ctx.metrics),
        };
        self.body.inset(&insets)
    }

    pub fn finish(self) -> Document {
        let (w, h) = (draw::r2(self.width), draw::r2(self.height));
        Document::new()
            .set("width", w)
            .set("height", h)
            .set("viewBox", format!("0 0 {w} {h}"))
            .add(draw::rect(0.0, 0.0, self.width, self.height, &self.ctx.palette.background).set("class", "background"))
            .add(self.root)
    }
}
