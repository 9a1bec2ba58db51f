// File: crates/chartkit-core/src/charts/waffle.rs
// Summary: Waffle chart: a rows × columns grid of cells split between categories.

use svg::node::element::Group;
use svg::Document;

use super::frame::{Canvas, LegendItem};
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::totals_by;
use crate::draw;
use crate::error::{ChartError, Result};
use crate::layout::MarginRequest;
use crate::theme::mix;

const CELL_GAP: f32 = 2.0;

pub struct WaffleChart;

/// Split `cells` between `values` in proportion, largest remainder first.
/// Negative values count as zero; the counts always sum to `cells` when any
/// value is positive.
pub fn apportion(values: &[f64], cells: usize) -> Vec<usize> {
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    if total <= 0.0 {
        return vec![0; values.len()];
    }
    let quotas: Vec<f64> = values.iter().map(|v| v.max(0.0) / total * cells as f64).collect();
    let mut counts: Vec<usize> = quotas.iter().map(|q| q.floor() as usize).collect();
    let mut rest = cells.saturating_sub(counts.iter().sum());
    let mut order: Vec<usize> = (0..values.len()).collect();
    // Stable: ties go to the earlier category.
    order.sort_by(|&a, &b| (quotas[b] - quotas[b].floor()).total_cmp(&(quotas[a] - quotas[a].floor())));
    for i in order {
        if rest == 0 {
            break;
        }
        counts[i] += 1;
        rest -= 1;
    }
    counts
}

impl ChartTemplate for WaffleChart {
    fn id(&self) -> &'static str { "waffle" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Y] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let v = ctx.vars();
        let items = totals_by(ctx.rows(), ctx.col(Role::X), ctx.col(Role::Y));
        let values: Vec<f64> = items.iter().map(|(_, x)| *x).collect();
        let total: f64 = values.iter().map(|x| x.max(0.0)).sum();
        if total <= 0.0 {
            return Err(ChartError::NoNumericValues(ctx.col(Role::Y).into()));
        }
        let (rows, cols) = (v.waffle_rows.max(1), v.waffle_columns.max(1));
        let counts = apportion(&values, rows * cols);

        let legend: Vec<LegendItem> = items
            .iter()
            .enumerate()
            .map(|(i, (name, value))| {
                let text = if v.show_values { format!("{name} {:.0}%", value.max(0.0) / total * 100.0) } else { name.clone() };
                LegendItem { icon: ctx.cfg.image_for(name).map(str::to_string), ..LegendItem::new(text, ctx.palette.color_for(name, i)) }
            })
            .collect();

        let mut canvas = Canvas::new(ctx)?;
        canvas.legend(&legend);
        let plot = canvas.plot(&MarginRequest::default())?;
        let pitch = (plot.width() / cols as f32).min(plot.height() / rows as f32);
        let size = pitch - CELL_GAP;
        if size <= 0.0 {
            return Err(ChartError::NonPositiveLayout { width: plot.width(), height: plot.height() });
        }
        let left = plot.center_x() - pitch * cols as f32 * 0.5;
        let top = plot.center_y() - pitch * rows as f32 * 0.5;

        let empty = mix(&ctx.palette.grid, &ctx.palette.background, 0.3);
        let owners = counts.iter().enumerate().flat_map(|(i, &n)| std::iter::repeat(Some(i)).take(n));
        let mut g = Group::new().set("class", "cells");
        for (k, owner) in owners.chain(std::iter::repeat(None)).take(rows * cols).enumerate() {
            let (r, c) = (k / cols, k % cols);
            let fill = match owner {
                Some(i) => ctx.palette.color_for(&items[i].0, i),
                None => empty.as_str(),
            };
            g = g.add(draw::rect(left + c as f32 * pitch, top + r as f32 * pitch, size, size, fill).set("rx", 1.5));
        }
        canvas.add(g);
        Ok(canvas.finish())
    }
}
