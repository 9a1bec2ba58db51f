// File: crates/chartkit-core/src/charts/area.rs
// Summary: Stacked area chart with direct labels at each band's right edge.

use svg::node::element::Group;
use svg::Document;

use super::axis::{self, Side};
use super::frame::Canvas;
use super::line::plain_number;
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::{date_label, date_ticks};
use crate::draw::{self, Anchor, PathData};
use crate::error::{ChartError, Result};
use crate::layout::MarginRequest;
use crate::placement::{place_labels, LabelCost};
use crate::scale::{value_domain, LinearScale};
use crate::series::SeriesSet;

pub struct AreaChart;

/// Cumulative baselines: `stack[s][k]` is the top of series `s` at `xs[k]`.
fn stack(set: &SeriesSet, xs: &[f64]) -> Vec<Vec<f64>> {
    let mut acc = vec![0.0; xs.len()];
    set.series
        .iter()
        .map(|s| {
            for (k, &x) in xs.iter().enumerate() {
                acc[k] += s.at(x).unwrap_or(0.0).max(0.0);
            }
            acc.clone()
        })
        .collect()
}

impl ChartTemplate for AreaChart {
    fn id(&self) -> &'static str { "area" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Y, Role::Group] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let v = ctx.vars();
        let set = SeriesSet::from_rows(ctx.rows(), ctx.col(Role::X), ctx.col(Role::Y), Some(ctx.col(Role::Group)), "")?;
        let xs = set.xs();
        if xs.len() < 2 {
            return Err(ChartError::NoNumericValues(ctx.col(Role::X).into()));
        }
        let tops = stack(&set, &xs);
        let max = tops.last().map(|t| t.iter().copied().fold(0.0, f64::max)).unwrap_or(1.0);

        let y_nice = LinearScale::new(value_domain(0.0, max, v.y_min, v.y_max), (0.0, 1.0)).nice(v.tick_count);
        let y_ticks = y_nice.ticks(v.tick_count);
        let y_labels = axis::value_tick_labels(ctx, &y_ticks, Role::Y);
        let names: Vec<String> = set.series.iter().map(|s| s.name.clone()).collect();

        let mut canvas = Canvas::new(ctx)?;
        let plot = canvas.plot(&MarginRequest {
            left_labels: &y_labels,
            bottom_lines: 1,
            right_labels: &names,
            ..Default::default()
        })?;
        let (x0, x1) = (xs[0], xs[xs.len() - 1]);
        let x = LinearScale::new((x0, x1), (plot.left, plot.right));
        let y = LinearScale::new((y_nice.d0, y_nice.d1), (plot.bottom, plot.top));

        let mut bands = Group::new().set("class", "areas");
        let mut anchors = Vec::with_capacity(tops.len());
        for (s, top) in tops.iter().enumerate() {
            let color = ctx.palette.color_for(&names[s], s);
            let mut d = PathData::new();
            for (k, &xv) in xs.iter().enumerate() {
                d = if k == 0 { d.move_to(x.scale(xv), y.scale(top[k])) } else { d.line_to(x.scale(xv), y.scale(top[k])) };
            }
            for (k, &xv) in xs.iter().enumerate().rev() {
                let base = if s == 0 { 0.0 } else { tops[s - 1][k] };
                d = d.line_to(x.scale(xv), y.scale(base));
            }
            bands = bands.add(draw::fill_path(d.close().build(), color).set("fill-opacity", 0.85));
            let last = xs.len() - 1;
            let base = if s == 0 { 0.0 } else { tops[s - 1][last] };
            anchors.push(y.scale((base + top[last]) * 0.5));
        }
        canvas.add(bands);
        canvas.add(axis::value_axis(ctx, plot, &y, &y_ticks, &y_labels, Side::Left, false));
        let x_axis = if set.dates {
            axis::linear_axis_bottom(ctx, plot, &x, &date_ticks(x0, x1, v.tick_count + 1), |t| date_label(t, x1 - x0))
        } else {
            axis::linear_axis_bottom(ctx, plot, &x, &x.ticks(v.tick_count + 1), plain_number)
        };
        canvas.add(x_axis);

        let lh = ctx.line_height(&ctx.typo().label);
        let params = ctx.placement((plot.top - lh, plot.bottom + lh), LabelCost::Linear);
        let placed = place_labels(&anchors, &[], &params);
        let font = &ctx.typo().label;
        let mut labels = Group::new().set("class", "end-labels");
        for (s, name) in names.iter().enumerate() {
            let color = ctx.palette.color_for(name, s);
            labels = labels.add(draw::text_middle(plot.right + 8.0, placed.positions[s], name, font, color, Anchor::Start));
        }
        canvas.add(labels);

        Ok(canvas.finish())
    }
}
