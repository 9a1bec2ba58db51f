// File: crates/chartkit-core/src/charts/axis.rs
// Summary: Value, band and linear axes with gridlines and measured/wrapped tick labels.

use svg::node::element::Group;

use super::RenderCtx;
use crate::config::Role;
use crate::draw::{self, Anchor};
use crate::geometry::Rect;
use crate::layout::wrap_limited;
use crate::scale::{BandScale, LinearScale};

const TICK_GAP: f32 = 6.0;

/// Which side of the plot value labels sit on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Formatted tick labels for a value column.
pub fn value_tick_labels(ctx: &RenderCtx<'_>, ticks: &[f64], role: Role) -> Vec<String> {
    ticks.iter().map(|&t| ctx.fmt(t, role)).collect()
}

/// Horizontal gridlines and tick labels for a vertical value scale.
pub fn value_axis(ctx: &RenderCtx<'_>, plot: Rect, scale: &LinearScale, ticks: &[f64], labels: &[String], side: Side, grid: bool) -> Group {
    let font = &ctx.typo().axis;
    let mut g = Group::new().set("class", "axis value-axis");
    for (t, label) in ticks.iter().zip(labels) {
        let y = scale.scale(*t);
        if grid {
            let stroke = if t.abs() < 1e-12 { ctx.palette.axis.as_str() } else { ctx.palette.grid.as_str() };
            g = g.add(draw::line(plot.left, y, plot.right, y, stroke, 1.0));
        }
        g = match side {
            Side::Left => g.add(draw::text_middle(plot.left - TICK_GAP, y, label, font, &ctx.palette.muted, Anchor::End)),
            Side::Right => g.add(draw::text_middle(plot.right + TICK_GAP, y, label, font, &ctx.palette.muted, Anchor::Start)),
        };
    }
    g
}

/// Vertical gridlines and tick labels for a horizontal value scale (bars, scatter x).
pub fn value_axis_bottom(ctx: &RenderCtx<'_>, plot: Rect, scale: &LinearScale, ticks: &[f64], labels: &[String]) -> Group {
    let font = &ctx.typo().axis;
    let baseline = plot.bottom + TICK_GAP + font.size;
    let mut g = Group::new().set("class", "axis value-axis");
    for (t, label) in ticks.iter().zip(labels) {
        let x = scale.scale(*t);
        let stroke = if t.abs() < 1e-12 { ctx.palette.axis.as_str() } else { ctx.palette.grid.as_str() };
        g = g
            .add(draw::line(x, plot.top, x, plot.bottom, stroke, 1.0))
            .add(draw::text(x, baseline, label, font, &ctx.palette.muted, Anchor::Middle));
    }
    g
}

/// Category labels under each band, wrapped to the band's slot width.
pub fn wrap_band_labels(ctx: &RenderCtx<'_>, categories: &[String], slot_width: f32) -> Vec<Vec<String>> {
    let font = &ctx.typo().axis;
    let max_lines = ctx.vars().max_label_lines;
    categories
        .iter()
        .map(|c| wrap_limited(c, (slot_width - 4.0).max(font.size), max_lines, font, ctx.metrics))
        .collect()
}

pub fn band_axis_bottom(ctx: &RenderCtx<'_>, plot: Rect, band: &BandScale, labels: &[Vec<String>]) -> Group {
    let font = &ctx.typo().axis;
    let lh = ctx.line_height(font);
    let mut g = Group::new()
        .set("class", "axis band-axis")
        .add(draw::line(plot.left, plot.bottom, plot.right, plot.bottom, &ctx.palette.axis, 1.0));
    for (i, lines) in labels.iter().enumerate() {
        let x = band.center_at(i);
        g = g.add(draw::text_lines(x, plot.bottom + TICK_GAP + font.size, lines, font, &ctx.palette.muted, Anchor::Middle, lh));
    }
    g
}

/// Ticks along a continuous x axis; `label` turns a tick value into text.
pub fn linear_axis_bottom<F>(ctx: &RenderCtx<'_>, plot: Rect, scale: &LinearScale, ticks: &[f64], label: F) -> Group
where
    F: Fn(f64) -> String,
{
    let font = &ctx.typo().axis;
    let baseline = plot.bottom + TICK_GAP + font.size;
    let mut g = Group::new()
        .set("class", "axis x-axis")
        .add(draw::line(plot.left, plot.bottom, plot.right, plot.bottom, &ctx.palette.axis, 1.0));
    for &t in ticks {
        let x = scale.scale(t);
        g = g
            .add(draw::line(x, plot.bottom, x, plot.bottom + 4.0, &ctx.palette.axis, 1.0))
            .add(draw::text(x, baseline, &label(t), font, &ctx.palette.muted, Anchor::Middle));
    }
    g
}

/// Pixel band occupied by bottom-axis tick text, for label placement.
pub fn bottom_tick_band(ctx: &RenderCtx<'_>, plot: Rect) -> (f32, f32) {
    let font = &ctx.typo().axis;
    (plot.bottom + 2.0, plot.bottom + TICK_GAP + ctx.line_height(font))
}
