// File: crates/chartkit-core/src/charts/slope.rs
// Summary: Slope chart between the first and last period, labelled on both sides.

use svg::node::element::Group;
use svg::Document;

use super::frame::Canvas;
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::Matrix;
use crate::draw::{self, Anchor};
use crate::error::{ChartError, Result};
use crate::layout::MarginRequest;
use crate::placement::{place_labels, LabelCost};
use crate::scale::{extent, LinearScale};

const GAP: f32 = 8.0;

pub struct SlopeChart;

struct Slope {
    name: String,
    start: f64,
    end: f64,
}

impl ChartTemplate for SlopeChart {
    fn id(&self) -> &'static str { "slope" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Y, Role::Group] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let m = Matrix::pivot(ctx.rows(), ctx.col(Role::Group), ctx.col(Role::X), ctx.col(Role::Y));
        if m.cols.len() < 2 {
            return Err(ChartError::NoNumericValues(ctx.col(Role::X).into()));
        }
        let (first, last) = (0, m.cols.len() - 1);
        let slopes: Vec<Slope> = m
            .rows
            .iter()
            .enumerate()
            .filter_map(|(r, name)| Some(Slope { name: name.clone(), start: m.get(r, first)?, end: m.get(r, last)? }))
            .collect();
        if slopes.is_empty() {
            return Err(ChartError::NoNumericValues(ctx.col(Role::Y).into()));
        }

        let v = ctx.vars();
        let show = v.show_values;
        let start_labels: Vec<String> = slopes
            .iter()
            .map(|s| if show { format!("{} {}", s.name, ctx.fmt(s.start, Role::Y)) } else { s.name.clone() })
            .collect();
        let end_labels: Vec<String> = slopes
            .iter()
            .map(|s| if show { format!("{} {}", ctx.fmt(s.end, Role::Y), s.name) } else { s.name.clone() })
            .collect();

        let mut canvas = Canvas::new(ctx)?;
        let mut plot = canvas.plot(&MarginRequest {
            left_series_labels: &start_labels,
            right_labels: &end_labels,
            ..Default::default()
        })?;
        let head_font = &ctx.typo().axis;
        let lh = ctx.line_height(&ctx.typo().label);
        plot.top += ctx.line_height(head_font) + 6.0;
        if plot.height() <= lh {
            return Err(ChartError::NonPositiveLayout { width: plot.width(), height: plot.height() });
        }

        let (lo, hi) = extent(slopes.iter().flat_map(|s| [s.start, s.end])).unwrap_or((0.0, 1.0));
        let (lo, hi) = (v.y_min.unwrap_or(lo), v.y_max.unwrap_or(hi));
        let y = LinearScale::new((lo, hi), (plot.bottom, plot.top));

        let mut g = Group::new().set("class", "slopes");
        for x in [plot.left, plot.right] {
            g = g.add(draw::line(x, plot.top, x, plot.bottom, &ctx.palette.grid, 1.0));
        }
        g = g
            .add(draw::text(plot.left, plot.top - 8.0, &m.cols[first], head_font, &ctx.palette.muted, Anchor::Middle))
            .add(draw::text(plot.right, plot.top - 8.0, &m.cols[last], head_font, &ctx.palette.muted, Anchor::Middle));

        let starts: Vec<f32> = slopes.iter().map(|s| y.scale(s.start)).collect();
        let ends: Vec<f32> = slopes.iter().map(|s| y.scale(s.end)).collect();
        for (i, s) in slopes.iter().enumerate() {
            let color = ctx.palette.color_for(&s.name, i);
            g = g
                .add(draw::line(plot.left, starts[i], plot.right, ends[i], color, 2.0))
                .add(draw::circle(plot.left, starts[i], 3.5, color))
                .add(draw::circle(plot.right, ends[i], 3.5, color));
        }
        canvas.add(g);

        let params = ctx.placement((plot.top - lh * 0.5, plot.bottom + lh), LabelCost::Squared);
        let left = place_labels(&starts, &[], &params);
        let right = place_labels(&ends, &[], &params);
        let font = &ctx.typo().label;
        let mut labels = Group::new().set("class", "slope-labels");
        for (i, s) in slopes.iter().enumerate() {
            let color = ctx.palette.color_for(&s.name, i);
            labels = labels
                .add(draw::text_middle(plot.left - GAP, left.positions[i], &start_labels[i], font, color, Anchor::End))
                .add(draw::text_middle(plot.right + GAP, right.positions[i], &end_labels[i], font, color, Anchor::Start));
        }
        canvas.add(labels);

        Ok(canvas.finish())
    }
}
