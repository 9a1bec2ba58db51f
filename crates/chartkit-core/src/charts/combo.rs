// File: crates/chartkit-core/src/charts/combo.rs
// Summary: Columns for the primary value with a line for the secondary value on a right axis.

use svg::node::element::Group;
use svg::Document;

use super::axis::{self, Side};
use super::frame::{Canvas, LegendItem};
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::{categories, num, text};
use crate::draw::{self, Anchor, PathData};
use crate::error::{ChartError, Result};
use crate::layout::MarginRequest;
use crate::scale::{extent, value_domain, BandScale, LinearScale};

pub struct ComboChart;

/// Sum of `col` per category, aligned with `cats`; `None` where no row parses.
fn aligned(ctx: &RenderCtx<'_>, cats: &[String], col: &str) -> Vec<Option<f64>> {
    let x = ctx.col(Role::X);
    cats.iter()
        .map(|c| {
            ctx.rows()
                .iter()
                .filter(|r| text(r, x) == *c)
                .filter_map(|r| num(r, col))
                .reduce(|a, b| a + b)
        })
        .collect()
}

impl ChartTemplate for ComboChart {
    fn id(&self) -> &'static str { "combo" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Y, Role::Y2] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let v = ctx.vars();
        let cats = categories(ctx.rows(), ctx.col(Role::X));
        let bars = aligned(ctx, &cats, ctx.col(Role::Y));
        let line = aligned(ctx, &cats, ctx.col(Role::Y2));
        let (b0, b1) = extent(bars.iter().flatten().copied()).ok_or_else(|| ChartError::NoNumericValues(ctx.col(Role::Y).into()))?;
        let (l0, l1) = extent(line.iter().flatten().copied()).ok_or_else(|| ChartError::NoNumericValues(ctx.col(Role::Y2).into()))?;

        let left_nice = LinearScale::new(value_domain(b0, b1, v.y_min, v.y_max), (0.0, 1.0)).nice(v.tick_count);
        let right_nice = LinearScale::new(value_domain(l0, l1, None, None), (0.0, 1.0)).nice(v.tick_count);
        let left_ticks = left_nice.ticks(v.tick_count);
        let right_ticks = right_nice.ticks(v.tick_count);
        let left_labels = axis::value_tick_labels(ctx, &left_ticks, Role::Y);
        let right_labels = axis::value_tick_labels(ctx, &right_ticks, Role::Y2);

        let bar_color = ctx.palette.color_for(ctx.col(Role::Y), 0).to_string();
        let line_color = ctx.palette.color_for(ctx.col(Role::Y2), 1).to_string();
        let mut canvas = Canvas::new(ctx)?;
        canvas.legend(&[
            LegendItem::new(ctx.col(Role::Y), bar_color.as_str()),
            LegendItem::new(ctx.col(Role::Y2), line_color.as_str()),
        ]);
        let slot_guess = canvas.body.width() * 0.75 / cats.len().max(1) as f32;
        let wrapped = axis::wrap_band_labels(ctx, &cats, slot_guess);
        let bottom_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let plot = canvas.plot(&MarginRequest {
            left_labels: &left_labels,
            right_labels: &right_labels,
            bottom_lines,
            ..Default::default()
        })?;

        let band = BandScale::new(cats.clone(), (plot.left, plot.right), v.bar_padding);
        let yl = LinearScale::new((left_nice.d0, left_nice.d1), (plot.bottom, plot.top));
        let yr = LinearScale::new((right_nice.d0, right_nice.d1), (plot.bottom, plot.top));
        canvas.add(axis::value_axis(ctx, plot, &yl, &left_ticks, &left_labels, Side::Left, true));
        canvas.add(axis::value_axis(ctx, plot, &yr, &right_ticks, &right_labels, Side::Right, false));

        let zero = yl.scale(0.0);
        let bw = band.bandwidth();
        let mut columns = Group::new().set("class", "columns");
        for (i, value) in bars.iter().enumerate() {
            let Some(value) = *value else { continue };
            let top = yl.scale(value);
            columns = columns.add(draw::rect(band.position_at(i), top.min(zero), bw, (zero - top).abs(), &bar_color));
        }
        canvas.add(columns);

        let pts: Vec<(f32, f32)> = line
            .iter()
            .enumerate()
            .filter_map(|(i, val)| Some((band.center_at(i), yr.scale((*val)?))))
            .collect();
        let mut overlay = Group::new()
            .set("class", "line")
            .add(draw::stroke_path(PathData::polyline(&pts).build(), &line_color, 2.5));
        let font = &ctx.typo().value;
        for (k, &(px, py)) in pts.iter().enumerate() {
            overlay = overlay.add(draw::circle(px, py, 3.5, &line_color));
            if v.show_values && (k == 0 || k + 1 == pts.len()) {
                let Some(value) = line.iter().flatten().nth(k) else { continue };
                overlay = overlay.add(draw::text(px, py - 8.0, &ctx.fmt(*value, Role::Y2), font, &line_color, Anchor::Middle));
            }
        }
        canvas.add(overlay);
        canvas.add(axis::band_axis_bottom(ctx, plot, &band, &wrapped));
        Ok(canvas.finish())
    }
}
