// File: crates/chartkit-core/src/charts/scatter.rs
// Summary: Scatter / bubble chart with optional colour groups, sizes and point labels.

use indexmap::IndexSet;
use svg::node::element::Group;
use svg::Document;

use super::axis::{self, Side};
use super::column::series_legend;
use super::frame::Canvas;
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::{num, text};
use crate::draw::{self, Anchor};
use crate::error::{ChartError, Result};
use crate::layout::MarginRequest;
use crate::scale::{extent, LinearScale};

const MIN_RADIUS: f32 = 3.5;

pub struct ScatterChart;

struct Dot {
    x: f64,
    y: f64,
    size: Option<f64>,
    group: usize,
    label: String,
}

/// Bubble radius for `size` on a square-root scale up to `max_radius`.
pub fn bubble_radius(size: Option<f64>, max_size: f64, max_radius: f32) -> f32 {
    match size {
        Some(s) if s > 0.0 && max_size > 0.0 => MIN_RADIUS + ((s / max_size).sqrt() as f32) * (max_radius - MIN_RADIUS).max(0.0),
        _ => MIN_RADIUS,
    }
}

impl ChartTemplate for ScatterChart {
    fn id(&self) -> &'static str { "scatter" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Y] }
    fn optional_roles(&self) -> &'static [Role] { &[Role::Group, Role::Size, Role::Label] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let v = ctx.vars();
        let mut groups: IndexSet<String> = IndexSet::new();
        let mut dots = Vec::new();
        for row in ctx.rows() {
            let (Some(x), Some(y)) = (num(row, ctx.col(Role::X)), num(row, ctx.col(Role::Y))) else { continue };
            let group = if ctx.roles.has(Role::Group) { text(row, ctx.col(Role::Group)) } else { String::new() };
            let (group, _) = groups.insert_full(group);
            dots.push(Dot {
                x,
                y,
                size: ctx.roles.has(Role::Size).then(|| num(row, ctx.col(Role::Size))).flatten(),
                group,
                label: if ctx.roles.has(Role::Label) { text(row, ctx.col(Role::Label)) } else { String::new() },
            });
        }
        let (x0, x1) = extent(dots.iter().map(|d| d.x)).ok_or_else(|| ChartError::NoNumericValues(ctx.col(Role::X).into()))?;
        let (y0, y1) = extent(dots.iter().map(|d| d.y)).ok_or_else(|| ChartError::NoNumericValues(ctx.col(Role::Y).into()))?;
        let x_nice = LinearScale::new((x0, x1), (0.0, 1.0)).nice(v.tick_count);
        let y_nice = LinearScale::new((v.y_min.unwrap_or(y0), v.y_max.unwrap_or(y1)), (0.0, 1.0)).nice(v.tick_count);
        let x_ticks = x_nice.ticks(v.tick_count);
        let y_ticks = y_nice.ticks(v.tick_count);
        let x_labels = axis::value_tick_labels(ctx, &x_ticks, Role::X);
        let y_labels = axis::value_tick_labels(ctx, &y_ticks, Role::Y);

        let names: Vec<String> = groups.into_iter().collect();
        let mut canvas = Canvas::new(ctx)?;
        if names.len() > 1 {
            canvas.legend(&series_legend(ctx, &names));
        }
        let plot = canvas.plot(&MarginRequest { left_labels: &y_labels, bottom_lines: 1, ..Default::default() })?;
        let x = LinearScale::new((x_nice.d0, x_nice.d1), (plot.left, plot.right));
        let y = LinearScale::new((y_nice.d0, y_nice.d1), (plot.bottom, plot.top));
        canvas.add(axis::value_axis(ctx, plot, &y, &y_ticks, &y_labels, Side::Left, true));
        canvas.add(axis::value_axis_bottom(ctx, plot, &x, &x_ticks, &x_labels));

        let max_size = dots.iter().filter_map(|d| d.size).fold(0.0, f64::max);
        let max_radius = (plot.width().min(plot.height()) / 12.0).min(30.0);
        // Big bubbles first so small ones stay visible.
        let mut order: Vec<usize> = (0..dots.len()).collect();
        order.sort_by(|&a, &b| dots[b].size.unwrap_or(0.0).total_cmp(&dots[a].size.unwrap_or(0.0)));

        let font = &ctx.typo().value;
        let mut marks = Group::new().set("class", "points");
        let mut labels = Group::new().set("class", "point-labels");
        for i in order {
            let d = &dots[i];
            let color = ctx.palette.color_for(&names[d.group], d.group);
            let (px, py) = (x.scale(d.x), y.scale(d.y));
            let r = bubble_radius(d.size, max_size, max_radius);
            marks = marks.add(
                draw::circle(px, py, r, color)
                    .set("fill-opacity", 0.75)
                    .set("stroke", ctx.palette.background.as_str())
                    .set("stroke-width", 1),
            );
            if !d.label.is_empty() {
                labels = labels.add(draw::text_middle(px + r + 3.0, py, &d.label, font, &ctx.palette.text, Anchor::Start));
            }
        }
        canvas.add(marks);
        canvas.add(labels);
        Ok(canvas.finish())
    }
}
