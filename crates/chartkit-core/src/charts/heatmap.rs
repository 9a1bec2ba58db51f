// File: crates/chartkit-core/src/charts/heatmap.rs
// Summary: Categorical heatmap with a two-colour ramp and fitted cell values.

use svg::node::element::Group;
use svg::Document;

use super::axis;
use super::bar::contrast_text;
use super::frame::Canvas;
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::Matrix;
use crate::draw::{self, Anchor};
use crate::error::{ChartError, Result};
use crate::layout::{fit_font_size, truncate, MarginRequest};
use crate::scale::{extent, BandScale};
use crate::theme::mix;

pub struct HeatmapChart;

impl ChartTemplate for HeatmapChart {
    fn id(&self) -> &'static str { "heatmap" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Group, Role::Y] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let v = ctx.vars();
        let m = Matrix::pivot(ctx.rows(), ctx.col(Role::Group), ctx.col(Role::X), ctx.col(Role::Y));
        let (lo, hi) = extent(m.values.iter().flatten().flatten().copied())
            .ok_or_else(|| ChartError::NoNumericValues(ctx.col(Role::Y).into()))?;

        let mut canvas = Canvas::new(ctx)?;
        let font = &ctx.typo().axis;
        let max_row_w = canvas.body.width() * 0.25;
        let row_labels: Vec<String> = m.rows.iter().map(|r| truncate(r, max_row_w, font, ctx.metrics)).collect();
        let slot_guess = canvas.body.width() * 0.75 / m.cols.len().max(1) as f32;
        let col_labels = axis::wrap_band_labels(ctx, &m.cols, slot_guess);
        let bottom_lines = col_labels.iter().map(Vec::len).max().unwrap_or(1);
        let plot = canvas.plot(&MarginRequest { left_labels: &row_labels, bottom_lines, ..Default::default() })?;

        let cols = BandScale::new(m.cols.clone(), (plot.left, plot.right), 0.0);
        let rows = BandScale::new(m.rows.clone(), (plot.top, plot.bottom), 0.0);
        let (cw, ch) = (cols.bandwidth(), rows.bandwidth());
        let low = mix(&ctx.palette.background, &ctx.palette.grid, 0.5);
        let high = ctx.palette.series.first().cloned().unwrap_or_else(|| ctx.palette.text.clone());
        let value_font = &ctx.typo().value;

        let mut g = Group::new().set("class", "cells");
        for (r, _) in m.rows.iter().enumerate() {
            for (c, _) in m.cols.iter().enumerate() {
                let Some(value) = m.get(r, c) else { continue };
                let t = if hi > lo { ((value - lo) / (hi - lo)) as f32 } else { 1.0 };
                let fill = mix(&low, &high, t);
                let (x, y) = (cols.position_at(c), rows.position_at(r));
                g = g.add(draw::rect(x + 1.0, y + 1.0, cw - 2.0, ch - 2.0, &fill));
                if v.show_values {
                    let text = ctx.fmt(value, Role::Y);
                    let size = fit_font_size(&text, value_font, cw - 6.0, ch - 2.0, 6.0, ctx.metrics);
                    let f = value_font.with_size(size);
                    if ctx.measure(&text, &f) <= cw - 2.0 {
                        g = g.add(draw::text_middle(x + cw * 0.5, y + ch * 0.5, &text, &f, contrast_text(&fill), Anchor::Middle));
                    }
                }
            }
        }
        for (r, label) in row_labels.iter().enumerate() {
            g = g.add(draw::text_middle(plot.left - 6.0, rows.center_at(r), label, font, &ctx.palette.text, Anchor::End));
        }
        canvas.add(g);
        canvas.add(axis::band_axis_bottom(ctx, plot, &cols, &col_labels));
        Ok(canvas.finish())
    }
}
