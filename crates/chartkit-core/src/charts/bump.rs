// File: crates/chartkit-core/src/charts/bump.rs
// Summary: Bump chart: rank of each group per period, labelled at both ends.

use svg::node::element::Group;
use svg::Document;

use super::bar::contrast_text;
use super::frame::Canvas;
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::Matrix;
use crate::draw::{self, Anchor, PathData};
use crate::error::{ChartError, Result};
use crate::layout::MarginRequest;
use crate::placement::{place_labels, LabelCost};
use crate::scale::{BandScale, LinearScale};

pub struct BumpChart;

/// `ranks[row][col]`: 1-based rank of each group within a period, highest value first.
/// Groups without a value in a period have no rank there.
pub fn ranks(m: &Matrix) -> Vec<Vec<Option<usize>>> {
    let mut out = vec![vec![None; m.cols.len()]; m.rows.len()];
    for c in 0..m.cols.len() {
        let mut present: Vec<(usize, f64)> = m.column(c).enumerate().filter_map(|(r, v)| Some((r, v?))).collect();
        present.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        for (rank, (r, _)) in present.into_iter().enumerate() {
            out[r][c] = Some(rank + 1);
        }
    }
    out
}

impl ChartTemplate for BumpChart {
    fn id(&self) -> &'static str { "bump" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Y, Role::Group] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let m = Matrix::pivot(ctx.rows(), ctx.col(Role::Group), ctx.col(Role::X), ctx.col(Role::Y));
        let r = ranks(&m);
        let n = r.iter().flatten().flatten().copied().max().ok_or_else(|| ChartError::NoNumericValues(ctx.col(Role::Y).into()))?;
        if m.cols.len() < 2 {
            return Err(ChartError::NoNumericValues(ctx.col(Role::X).into()));
        }

        let first_label = |row: usize| r[row].iter().flatten().next().map(|k| format!("{} {}", m.rows[row], k));
        let last_label = |row: usize| r[row].iter().rev().flatten().next().map(|k| format!("{k} {}", m.rows[row]));
        let starts: Vec<String> = (0..m.rows.len()).filter_map(first_label).collect();
        let ends: Vec<String> = (0..m.rows.len()).filter_map(last_label).collect();

        let mut canvas = Canvas::new(ctx)?;
        let mut plot = canvas.plot(&MarginRequest {
            left_series_labels: &starts,
            right_labels: &ends,
            bottom_lines: 1,
            ..Default::default()
        })?;
        let head = &ctx.typo().axis;
        plot.top += 4.0;
        let periods = BandScale::new(m.cols.clone(), (plot.left, plot.right), 0.0);
        let x = |c: usize| periods.position_at(c) + periods.step_width() * 0.5;
        let step = plot.height() / n as f32;
        let y = LinearScale::new((0.5, n as f64 + 0.5), (plot.top, plot.bottom));
        let dot = (step * 0.35).clamp(4.0, 11.0);

        let mut axis = Group::new().set("class", "axis periods");
        for (c, period) in m.cols.iter().enumerate() {
            axis = axis.add(draw::line(x(c), plot.top, x(c), plot.bottom, &ctx.palette.grid, 1.0));
            axis = axis.add(draw::text(x(c), plot.bottom + 6.0 + head.size, period, head, &ctx.palette.muted, Anchor::Middle));
        }
        canvas.add(axis);

        let value_font = ctx.typo().value.with_size((dot * 1.1).min(ctx.typo().value.size));
        let mut lines = Group::new().set("class", "ranks");
        let mut left_anchor = Vec::new();
        let mut right_anchor = Vec::new();
        for (row, name) in m.rows.iter().enumerate() {
            let color = ctx.palette.color_for(name, row);
            let pts: Vec<(usize, usize)> = r[row].iter().enumerate().filter_map(|(c, k)| Some((c, (*k)?))).collect();
            let Some((&(c0, k0), &(c1, k1))) = pts.first().zip(pts.last()) else { continue };
            let poly: Vec<(f32, f32)> = pts.iter().map(|&(c, k)| (x(c), y.scale(k as f64))).collect();
            lines = lines.add(draw::stroke_path(PathData::polyline(&poly).build(), color, 3.0));
            for &(c, k) in &pts {
                lines = lines
                    .add(draw::circle(x(c), y.scale(k as f64), dot, color))
                    .add(draw::text_middle(x(c), y.scale(k as f64), &k.to_string(), &value_font, contrast_text(color), Anchor::Middle));
            }
            left_anchor.push((row, x(c0), y.scale(k0 as f64)));
            right_anchor.push((row, x(c1), y.scale(k1 as f64)));
        }
        canvas.add(lines);

        let font = &ctx.typo().label;
        let lh = ctx.line_height(font);
        let params = ctx.placement((plot.top - lh * 0.5, plot.bottom + lh * 0.5), LabelCost::Squared);
        let mut labels = Group::new().set("class", "rank-labels");
        for (anchors, texts, right) in [(&left_anchor, &starts, false), (&right_anchor, &ends, true)] {
            let ys: Vec<f32> = anchors.iter().map(|a| a.2).collect();
            let placed = place_labels(&ys, &[], &params);
            for (k, &(row, ax, _)) in anchors.iter().enumerate() {
                let color = ctx.palette.color_for(&m.rows[row], row);
                let (tx, anchor) = if right { (ax + dot + 6.0, Anchor::Start) } else { (ax - dot - 6.0, Anchor::End) };
                labels = labels.add(draw::text_middle(tx, placed.positions[k], &texts[k], font, color, anchor));
            }
        }
        canvas.add(labels);
        Ok(canvas.finish())
    }
}
