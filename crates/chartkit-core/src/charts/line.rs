// File: crates/chartkit-core/src/charts/line.rs
// Summary: Multi-series line chart with de-collided end labels.

use svg::node::element::Group;
use svg::Document;

use super::axis::{self, Side};
use super::frame::Canvas;
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::{date_label, date_ticks};
use crate::draw::{self, Anchor, PathData};
use crate::error::{ChartError, Result};
use crate::layout::MarginRequest;
use crate::placement::{place_labels, Band, LabelCost};
use crate::scale::{value_domain, LinearScale};
use crate::series::SeriesSet;

const LABEL_GAP: f32 = 8.0;

pub struct LineChart;

impl ChartTemplate for LineChart {
    fn id(&self) -> &'static str { "line" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Y] }
    fn optional_roles(&self) -> &'static [Role] { &[Role::Group] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let v = ctx.vars();
        let group_col = ctx.roles.has(Role::Group).then(|| ctx.col(Role::Group));
        let set = SeriesSet::from_rows(ctx.rows(), ctx.col(Role::X), ctx.col(Role::Y), group_col, ctx.col(Role::Y))?;
        let series: Vec<_> = set.series.iter().map(|s| s.downsample(v.max_points)).collect();
        let (x0, x1) = set.x_extent().ok_or_else(|| ChartError::NoNumericValues(ctx.col(Role::X).into()))?;
        let (y0, y1) = set.y_extent().ok_or_else(|| ChartError::NoNumericValues(ctx.col(Role::Y).into()))?;

        // Lines need not start at zero unless the data crosses it.
        let lo = v.y_min.unwrap_or(if y0 > 0.0 && y0 > (y1 - y0) { y0 } else { y0.min(0.0) });
        let y_domain = value_domain(lo, y1, Some(lo), v.y_max);
        let y_nice = LinearScale::new(y_domain, (0.0, 1.0)).nice(v.tick_count);
        let y_ticks = y_nice.ticks(v.tick_count);
        let y_labels = axis::value_tick_labels(ctx, &y_ticks, Role::Y);

        let end_labels: Vec<String> = series
            .iter()
            .map(|s| {
                let value = s.last().map(|p| ctx.fmt(p.1, Role::Y)).unwrap_or_default();
                if series.len() > 1 && v.show_values { format!("{} {value}", s.name) }
                else if series.len() > 1 { s.name.clone() }
                else { value }
            })
            .collect();

        let mut canvas = Canvas::new(ctx)?;
        let plot = canvas.plot(&MarginRequest {
            left_labels: &y_labels,
            bottom_lines: 1,
            right_labels: &end_labels,
            ..Default::default()
        })?;

        let x_scale = LinearScale::new((x0, x1), (plot.left, plot.right));
        let y_scale = LinearScale::new((y_nice.d0, y_nice.d1), (plot.bottom, plot.top));

        canvas.add(axis::value_axis(ctx, plot, &y_scale, &y_ticks, &y_labels, Side::Left, true));
        let x_axis = if set.dates {
            let ticks = date_ticks(x0, x1, v.tick_count + 1);
            axis::linear_axis_bottom(ctx, plot, &x_scale, &ticks, |t| date_label(t, x1 - x0))
        } else {
            let ticks = x_scale.ticks(v.tick_count + 1);
            axis::linear_axis_bottom(ctx, plot, &x_scale, &ticks, plain_number)
        };
        canvas.add(x_axis);

        let mut lines = Group::new().set("class", "series");
        let mut anchors = Vec::with_capacity(series.len());
        for (i, s) in series.iter().enumerate() {
            let color = ctx.palette.color_for(&s.name, i);
            let pts: Vec<(f32, f32)> = s.points.iter().map(|&(x, y)| (x_scale.scale(x), y_scale.scale(y))).collect();
            lines = lines.add(draw::stroke_path(PathData::polyline(&pts).build(), color, 2.0));
            if let Some(&(ex, ey)) = pts.last() {
                lines = lines.add(draw::circle(ex, ey, 3.0, color));
                anchors.push(ey);
            }
        }
        canvas.add(lines);

        let tick_band = axis::bottom_tick_band(ctx, plot);
        let lh = ctx.line_height(&ctx.typo().label);
        let params = ctx.placement((plot.top - lh, tick_band.1 + lh), LabelCost::Linear);
        let placed = place_labels(&anchors, &[Band::new(tick_band.0, tick_band.1)], &params);

        let font = &ctx.typo().label;
        let mut labels = Group::new().set("class", "end-labels");
        for (i, (s, y)) in series.iter().zip(&placed.positions).enumerate() {
            let color = ctx.palette.color_for(&s.name, i);
            let anchor_y = anchors[i];
            if (y - anchor_y).abs() > 2.0 {
                labels = labels.add(draw::line(plot.right + 2.0, anchor_y, plot.right + LABEL_GAP - 2.0, *y, color, 1.0));
            }
            labels = labels.add(draw::text_middle(plot.right + LABEL_GAP, *y, &end_labels[i], font, color, Anchor::Start));
        }
        canvas.add(labels);

        Ok(canvas.finish())
    }
}

/// x tick text: integers (often years) without grouping, fractions as-is.
pub(crate) fn plain_number(t: f64) -> String {
    if t.fract().abs() < 1e-9 { format!("{t:.0}") } else { format!("{t}") }
}
