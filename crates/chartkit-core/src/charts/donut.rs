// File: crates/chartkit-core/src/charts/donut.rs
// Summary: Donut (or pie) chart with placed outside labels and a fitted centre total.

use std::f32::consts::{PI, TAU};

use svg::node::element::Group;
use svg::Document;

use super::frame::Canvas;
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::totals_by;
use crate::draw::{self, Anchor, PathData};
use crate::error::{ChartError, Result};
use crate::geometry::polar;
use crate::layout::{fit_font_size, max_width, MarginRequest};
use crate::placement::{place_labels, LabelCost};

const LABEL_GAP: f32 = 16.0;

pub struct DonutChart;

/// Annulus sector path(s) from `a0` to `a1`; a full turn is split in two.
fn sector(cx: f32, cy: f32, inner: f32, outer: f32, a0: f32, a1: f32) -> Vec<String> {
    if a1 - a0 >= TAU - 1e-4 {
        let mid = a0 + (a1 - a0) * 0.5;
        let mut out = sector(cx, cy, inner, outer, a0, mid);
        out.extend(sector(cx, cy, inner, outer, mid, a1));
        return out;
    }
    let large = a1 - a0 > PI;
    let (ox0, oy0) = polar(cx, cy, outer, a0);
    let (ox1, oy1) = polar(cx, cy, outer, a1);
    let mut d = PathData::new().move_to(ox0, oy0).arc_to(outer, large, true, ox1, oy1);
    if inner > 0.5 {
        let (ix1, iy1) = polar(cx, cy, inner, a1);
        let (ix0, iy0) = polar(cx, cy, inner, a0);
        d = d.line_to(ix1, iy1).arc_to(inner, large, false, ix0, iy0);
    } else {
        d = d.line_to(cx, cy);
    }
    vec![d.close().build()]
}

struct Slice {
    name: String,
    value: f64,
    start: f32,
    end: f32,
    mid: f32,
    label: String,
}

impl ChartTemplate for DonutChart {
    fn id(&self) -> &'static str { "donut" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Y] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let v = ctx.vars();
        let items: Vec<(String, f64)> = totals_by(ctx.rows(), ctx.col(Role::X), ctx.col(Role::Y))
            .into_iter()
            .filter(|(_, x)| *x > 0.0)
            .collect();
        let total: f64 = items.iter().map(|(_, x)| x).sum();
        if items.is_empty() || total <= 0.0 {
            return Err(ChartError::NoNumericValues(ctx.col(Role::Y).into()));
        }

        let mut angle = 0.0f32;
        let slices: Vec<Slice> = items
            .into_iter()
            .map(|(name, value)| {
                let span = (value / total) as f32 * TAU;
                let start = angle;
                angle += span;
                let mid = start + span * 0.5;
                let pct = value / total * 100.0;
                let label = if v.show_values {
                    format!("{name} {} ({pct:.0}%)", ctx.fmt(value, Role::Y))
                } else {
                    name.clone()
                };
                Slice { name, value, start, end: angle, mid, label }
            })
            .collect();

        let mut canvas = Canvas::new(ctx)?;
        let plot = canvas.plot(&MarginRequest::default())?;
        let font = &ctx.typo().label;
        let label_w = max_width(slices.iter().map(|s| s.label.as_str()), font, ctx.metrics);
        let radius = (plot.height() * 0.5 - 4.0).min((plot.width() - 2.0 * (label_w + LABEL_GAP * 2.0)) * 0.5);
        if radius < 8.0 {
            return Err(ChartError::NonPositiveLayout { width: plot.width(), height: plot.height() });
        }
        let inner = radius * v.inner_radius.clamp(0.0, 0.95);
        let (cx, cy) = (plot.center_x(), plot.center_y());

        let mut arcs = Group::new().set("class", "slices");
        for (i, s) in slices.iter().enumerate() {
            let color = ctx.palette.color_for(&s.name, i);
            for d in sector(cx, cy, inner, radius, s.start, s.end) {
                arcs = arcs.add(draw::fill_path(d, color).set("stroke", ctx.palette.background.as_str()).set("stroke-width", 1));
            }
        }
        canvas.add(arcs);

        // Labels on each side are placed independently, top to bottom.
        let lh = ctx.line_height(font);
        let params = ctx.placement((plot.top - lh * 0.5, plot.bottom + lh * 0.5), LabelCost::Linear);
        let mut labels = Group::new().set("class", "slice-labels");
        for right in [true, false] {
            let idx: Vec<usize> = (0..slices.len()).filter(|&i| (slices[i].mid < PI) == right).collect();
            let anchors: Vec<f32> = idx.iter().map(|&i| polar(cx, cy, radius + 8.0, slices[i].mid).1).collect();
            let placed = place_labels(&anchors, &[], &params);
            let tx = if right { cx + radius + LABEL_GAP * 1.5 } else { cx - radius - LABEL_GAP * 1.5 };
            for (k, &i) in idx.iter().enumerate() {
                let s = &slices[i];
                let color = ctx.palette.color_for(&s.name, i);
                let (ex, ey) = polar(cx, cy, radius + 2.0, s.mid);
                let (kx, ky) = polar(cx, cy, radius + 8.0, s.mid);
                let y = placed.positions[k];
                let elbow = if right { tx - 4.0 } else { tx + 4.0 };
                let leader = PathData::new().move_to(ex, ey).line_to(kx, ky).line_to(elbow, y);
                labels = labels
                    .add(draw::stroke_path(leader.build(), color, 1.0))
                    .add(draw::text_middle(tx, y, &s.label, font, &ctx.palette.text, if right { Anchor::Start } else { Anchor::End }));
            }
        }
        canvas.add(labels);

        if inner > 12.0 {
            let text = ctx.fmt(slices.iter().map(|s| s.value).sum(), Role::Y);
            let base = ctx.typo().title.with_size(inner * 0.6);
            let size = fit_font_size(&text, &base, inner * 1.5, inner, 8.0, ctx.metrics);
            let centre = draw::text_middle(cx, cy, &text, &base.with_size(size), &ctx.palette.text, Anchor::Middle);
            canvas.add(centre.set("class", "total"));
        }

        Ok(canvas.finish())
    }
}
