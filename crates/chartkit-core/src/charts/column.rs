// File: crates/chartkit-core/src/charts/column.rs
// Summary: Vertical column chart, grouped side by side when a group column is mapped.

use svg::node::element::Group;
use svg::Document;

use super::axis::{self, Side};
use super::frame::{Canvas, LegendItem};
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::{totals_by, Matrix};
use crate::draw::{self, Anchor};
use crate::error::{ChartError, Result};
use crate::layout::{fit_font_size, MarginRequest};
use crate::scale::{extent, value_domain, BandScale, LinearScale};

pub struct ColumnChart;

/// Category × series values; a single unnamed series without a group column.
pub(crate) fn column_matrix(ctx: &RenderCtx<'_>) -> Matrix {
    if ctx.roles.has(Role::Group) {
        return Matrix::pivot(ctx.rows(), ctx.col(Role::X), ctx.col(Role::Group), ctx.col(Role::Y));
    }
    let totals = totals_by(ctx.rows(), ctx.col(Role::X), ctx.col(Role::Y));
    Matrix {
        rows: totals.iter().map(|(k, _)| k.clone()).collect(),
        cols: vec![ctx.col(Role::Y).to_string()],
        values: totals.iter().map(|(_, v)| vec![Some(*v)]).collect(),
    }
}

/// Legend entries for the series of a matrix, with icons where configured.
pub(crate) fn series_legend(ctx: &RenderCtx<'_>, names: &[String]) -> Vec<LegendItem> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| LegendItem {
            icon: ctx.cfg.image_for(name).map(str::to_string),
            ..LegendItem::new(name.clone(), ctx.palette.color_for(name, i))
        })
        .collect()
}

impl ChartTemplate for ColumnChart {
    fn id(&self) -> &'static str { "column" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Y] }
    fn optional_roles(&self) -> &'static [Role] { &[Role::Group] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let v = ctx.vars();
        let m = column_matrix(ctx);
        let (lo, hi) = extent(m.values.iter().flatten().flatten().copied())
            .ok_or_else(|| ChartError::NoNumericValues(ctx.col(Role::Y).into()))?;
        let y_nice = LinearScale::new(value_domain(lo, hi, v.y_min, v.y_max), (0.0, 1.0)).nice(v.tick_count);
        let ticks = y_nice.ticks(v.tick_count);
        let tick_labels = axis::value_tick_labels(ctx, &ticks, Role::Y);

        let mut canvas = Canvas::new(ctx)?;
        if m.cols.len() > 1 {
            canvas.legend(&series_legend(ctx, &m.cols));
        }
        // Slot width before the left margin is known; slightly narrow so labels never outgrow it.
        let slot_guess = canvas.body.width() * 0.85 / m.rows.len().max(1) as f32;
        let wrapped = axis::wrap_band_labels(ctx, &m.rows, slot_guess);
        let bottom_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let plot = canvas.plot(&MarginRequest { left_labels: &tick_labels, bottom_lines, ..Default::default() })?;

        let band = BandScale::new(m.rows.clone(), (plot.left, plot.right), v.bar_padding);
        let y = LinearScale::new((y_nice.d0, y_nice.d1), (plot.bottom, plot.top));
        canvas.add(axis::value_axis(ctx, plot, &y, &ticks, &tick_labels, Side::Left, true));

        let n = m.cols.len().max(1);
        let sub = band.bandwidth() / n as f32;
        let zero = y.scale(0.0);
        let value_font = &ctx.typo().value;
        let mut bars = Group::new().set("class", "columns");
        for (r, _) in m.rows.iter().enumerate() {
            let x0 = band.position_at(r);
            for (c, name) in m.cols.iter().enumerate() {
                let Some(value) = m.get(r, c) else { continue };
                let color = ctx.palette.color_for(name, c);
                let top = y.scale(value);
                let (ry, h) = if top <= zero { (top, zero - top) } else { (zero, top - zero) };
                let x = x0 + sub * c as f32;
                bars = bars.add(draw::rect(x, ry, sub, h, color));
                if v.show_values {
                    let text = ctx.fmt(value, Role::Y);
                    let size = fit_font_size(&text, value_font, sub, value_font.size * 1.5, 7.0, ctx.metrics);
                    if ctx.measure(&text, &value_font.with_size(size)) <= sub + 2.0 {
                        let ty = if value >= 0.0 { ry - 4.0 } else { ry + h + size + 2.0 };
                        bars = bars.add(draw::text(x + sub * 0.5, ty, &text, &value_font.with_size(size), &ctx.palette.text, Anchor::Middle));
                    }
                }
            }
        }
        canvas.add(bars);
        canvas.add(axis::band_axis_bottom(ctx, plot, &band, &wrapped));
        Ok(canvas.finish())
    }
}
