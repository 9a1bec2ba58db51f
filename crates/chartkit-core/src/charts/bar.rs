// File: crates/chartkit-core/src/charts/bar.rs
// Summary: Horizontal bar chart with wrapped category labels, optional icons and value labels.

use svg::node::element::Group;
use svg::Document;

use super::axis;
use super::frame::Canvas;
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::totals_by;
use crate::draw::{self, Anchor};
use crate::error::{ChartError, Result};
use crate::layout::{wrap_limited, MarginRequest};
use crate::scale::{value_domain, BandScale, LinearScale};
use crate::theme::luminance;

const ICON_GAP: f32 = 4.0;

pub struct BarChart;

/// Text colour readable on `fill`.
pub(crate) fn contrast_text(fill: &str) -> &'static str {
    match luminance(fill) {
        Some(l) if l > 0.6 => "#1d1d1f",
        _ => "#ffffff",
    }
}

impl ChartTemplate for BarChart {
    fn id(&self) -> &'static str { "bar" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Y] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let v = ctx.vars();
        let items = totals_by(ctx.rows(), ctx.col(Role::X), ctx.col(Role::Y));
        if items.is_empty() {
            return Err(ChartError::NoNumericValues(ctx.col(Role::Y).into()));
        }
        let (lo, hi) = items.iter().fold((0.0f64, 0.0f64), |(a, b), (_, x)| (a.min(*x), b.max(*x)));
        let x_nice = LinearScale::new(value_domain(lo, hi, v.y_min, v.y_max), (0.0, 1.0)).nice(v.tick_count);
        let ticks = x_nice.ticks(v.tick_count);
        let tick_labels = axis::value_tick_labels(ctx, &ticks, Role::Y);

        let mut canvas = Canvas::new(ctx)?;
        let font = &ctx.typo().axis;
        let lh = ctx.line_height(font);
        let max_label_w = (canvas.body.width() * 0.3).max(font.size * 3.0);
        let wrapped: Vec<Vec<String>> = items
            .iter()
            .map(|(c, _)| wrap_limited(c, max_label_w, v.max_label_lines, font, ctx.metrics))
            .collect();
        let icon = lh * 1.2;
        let has_icons = items.iter().any(|(c, _)| ctx.cfg.image_for(c).is_some());
        let label_lines: Vec<String> = wrapped.iter().flatten().cloned().collect();
        let mut plot = canvas.plot(&MarginRequest { left_labels: &label_lines, bottom_lines: 1, ..Default::default() })?;
        if has_icons {
            plot.left += icon + ICON_GAP;
        }

        let categories: Vec<String> = items.iter().map(|(c, _)| c.clone()).collect();
        let band = BandScale::new(categories, (plot.top, plot.bottom), v.bar_padding);
        let x = LinearScale::new((x_nice.d0, x_nice.d1), (plot.left, plot.right));
        canvas.add(axis::value_axis_bottom(ctx, plot, &x, &ticks, &tick_labels));

        let value_font = &ctx.typo().value;
        let bw = band.bandwidth();
        let zero = x.scale(0.0);
        let mut bars = Group::new().set("class", "bars");
        for (i, (cat, value)) in items.iter().enumerate() {
            let color = ctx.palette.color_for(cat, i);
            let top = band.position_at(i);
            let mid = top + bw * 0.5;
            let end = x.scale(*value);
            let (bx, w) = if end >= zero { (zero, end - zero) } else { (end, zero - end) };
            bars = bars.add(draw::rect(bx, top, w, bw, color));

            let lines = &wrapped[i];
            let first = mid - (lines.len() as f32 - 1.0) * lh * 0.5;
            let label_x = if has_icons { plot.left - icon - ICON_GAP * 2.0 } else { plot.left - 6.0 };
            for (k, line) in lines.iter().enumerate() {
                bars = bars.add(draw::text_middle(label_x, first + k as f32 * lh, line, font, &ctx.palette.text, Anchor::End));
            }
            if let Some(url) = ctx.cfg.image_for(cat) {
                bars = bars.add(draw::image(url, plot.left - icon - ICON_GAP, mid - icon * 0.5, icon, icon));
            }

            if v.show_values {
                let text = ctx.fmt(*value, Role::Y);
                let tw = ctx.measure(&text, value_font);
                let inside = tw + 8.0 <= w && value_font.size <= bw;
                let node = match (inside, *value >= 0.0) {
                    (true, true) => draw::text_middle(bx + w - 4.0, mid, &text, value_font, contrast_text(color), Anchor::End),
                    (true, false) => draw::text_middle(bx + 4.0, mid, &text, value_font, contrast_text(color), Anchor::Start),
                    (false, true) => draw::text_middle(bx + w + 4.0, mid, &text, value_font, &ctx.palette.text, Anchor::Start),
                    (false, false) => draw::text_middle(bx - 4.0, mid, &text, value_font, &ctx.palette.text, Anchor::End),
                };
                bars = bars.add(node);
            }
        }
        canvas.add(bars);
        Ok(canvas.finish())
    }
}
