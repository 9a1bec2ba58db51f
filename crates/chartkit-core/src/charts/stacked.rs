// File: crates/chartkit-core/src/charts/stacked.rs
// Summary: Stacked column chart, optionally normalised to 100% per column.

use svg::node::element::Group;
use svg::Document;

use super::axis::{self, Side};
use super::bar::contrast_text;
use super::column::series_legend;
use super::frame::Canvas;
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::Matrix;
use crate::draw::{self, Anchor};
use crate::error::{ChartError, Result};
use crate::format::{format_number, NumberFormat};
use crate::layout::MarginRequest;
use crate::scale::{value_domain, BandScale, LinearScale};

pub struct StackedColumnChart;

/// Per-column segments as (bottom, top, raw value); negatives are dropped.
fn segments(m: &Matrix, normalize: bool) -> Vec<Vec<Option<(f64, f64, f64)>>> {
    m.values
        .iter()
        .map(|row| {
            let total: f64 = row.iter().flatten().filter(|v| **v > 0.0).sum();
            let k = if normalize && total > 0.0 { 100.0 / total } else { 1.0 };
            let mut acc = 0.0;
            row.iter()
                .map(|cell| {
                    let v = cell.filter(|v| *v > 0.0)?;
                    let seg = (acc, acc + v * k, v);
                    acc += v * k;
                    Some(seg)
                })
                .collect()
        })
        .collect()
}

impl ChartTemplate for StackedColumnChart {
    fn id(&self) -> &'static str { "stacked_column" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Y, Role::Group] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let v = ctx.vars();
        let m = Matrix::pivot(ctx.rows(), ctx.col(Role::X), ctx.col(Role::Group), ctx.col(Role::Y));
        let segs = segments(&m, v.normalize);
        let max = segs
            .iter()
            .filter_map(|col| col.iter().flatten().map(|s| s.1).reduce(f64::max))
            .reduce(f64::max)
            .ok_or_else(|| ChartError::NoNumericValues(ctx.col(Role::Y).into()))?;

        let domain = if v.normalize { (0.0, 100.0) } else { value_domain(0.0, max, v.y_min, v.y_max) };
        let y_nice = LinearScale::new(domain, (0.0, 1.0)).nice(v.tick_count);
        let ticks = y_nice.ticks(v.tick_count);
        let tick_labels: Vec<String> = if v.normalize {
            ticks.iter().map(|t| format_number(*t, NumberFormat::Percent { decimals: 0 })).collect()
        } else {
            axis::value_tick_labels(ctx, &ticks, Role::Y)
        };

        let mut canvas = Canvas::new(ctx)?;
        canvas.legend(&series_legend(ctx, &m.cols));
        let slot_guess = canvas.body.width() * 0.85 / m.rows.len().max(1) as f32;
        let wrapped = axis::wrap_band_labels(ctx, &m.rows, slot_guess);
        let bottom_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let plot = canvas.plot(&MarginRequest { left_labels: &tick_labels, bottom_lines, ..Default::default() })?;

        let band = BandScale::new(m.rows.clone(), (plot.left, plot.right), v.bar_padding);
        let y = LinearScale::new((y_nice.d0, y_nice.d1), (plot.bottom, plot.top));
        canvas.add(axis::value_axis(ctx, plot, &y, &ticks, &tick_labels, Side::Left, true));

        let bw = band.bandwidth();
        let font = &ctx.typo().value;
        let mut g = Group::new().set("class", "stacks");
        for (r, col) in segs.iter().enumerate() {
            let x = band.position_at(r);
            for (c, seg) in col.iter().enumerate() {
                let Some((lo, hi, raw)) = *seg else { continue };
                let color = ctx.palette.color_for(&m.cols[c], c);
                let (top, bottom) = (y.scale(hi), y.scale(lo));
                g = g.add(draw::rect(x, top, bw, bottom - top, color));
                if !v.show_values {
                    continue;
                }
                let text = if v.normalize {
                    format_number(hi - lo, NumberFormat::Percent { decimals: 0 })
                } else {
                    ctx.fmt(raw, Role::Y)
                };
                if bottom - top >= ctx.line_height(font) && ctx.measure(&text, font) + 4.0 <= bw {
                    g = g.add(draw::text_middle(x + bw * 0.5, (top + bottom) * 0.5, &text, font, contrast_text(color), Anchor::Middle));
                }
            }
            if v.show_values && !v.normalize {
                if let Some(total) = col.iter().flatten().map(|s| s.1).reduce(f64::max) {
                    let label = ctx.fmt(total, Role::Y);
                    g = g.add(draw::text(x + bw * 0.5, y.scale(total) - 4.0, &label, &ctx.typo().label, &ctx.palette.text, Anchor::Middle));
                }
            }
        }
        canvas.add(g);
        canvas.add(axis::band_axis_bottom(ctx, plot, &band, &wrapped));
        Ok(canvas.finish())
    }
}

