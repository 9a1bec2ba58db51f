// File: crates/chartkit-core/src/charts/dumbbell.rs
// Summary: Dumbbell chart: start and end values per category joined by a bar.

use svg::node::element::Group;
use svg::Document;

use super::axis;
use super::frame::{Canvas, LegendItem};
use super::{ChartTemplate, RenderCtx};
use crate::config::Role;
use crate::data::{num, text};
use crate::draw::{self, Anchor};
use crate::error::{ChartError, Result};
use crate::layout::{wrap_limited, MarginRequest};
use crate::scale::{extent, BandScale, LinearScale};

const DOT: f32 = 6.0;

pub struct DumbbellChart;

impl ChartTemplate for DumbbellChart {
    fn id(&self) -> &'static str { "dumbbell" }
    fn required_roles(&self) -> &'static [Role] { &[Role::X, Role::Y, Role::Y2] }

    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document> {
        let v = ctx.vars();
        let pairs: Vec<(String, f64, f64)> = ctx
            .rows()
            .iter()
            .filter_map(|r| {
                let name = text(r, ctx.col(Role::X));
                let a = num(r, ctx.col(Role::Y))?;
                let b = num(r, ctx.col(Role::Y2))?;
                (!name.is_empty()).then_some((name, a, b))
            })
            .collect();
        let (lo, hi) = extent(pairs.iter().flat_map(|p| [p.1, p.2]))
            .ok_or_else(|| ChartError::NoNumericValues(ctx.col(Role::Y).into()))?;
        let nice = LinearScale::new((v.y_min.unwrap_or(lo), v.y_max.unwrap_or(hi)), (0.0, 1.0)).nice(v.tick_count);
        let ticks = nice.ticks(v.tick_count);
        let tick_labels = axis::value_tick_labels(ctx, &ticks, Role::Y);

        let start_color = ctx.palette.color_for(ctx.col(Role::Y), 0).to_string();
        let end_color = ctx.palette.color_for(ctx.col(Role::Y2), 1).to_string();
        let mut canvas = Canvas::new(ctx)?;
        canvas.legend(&[
            LegendItem::new(ctx.col(Role::Y), start_color.as_str()),
            LegendItem::new(ctx.col(Role::Y2), end_color.as_str()),
        ]);

        let font = &ctx.typo().axis;
        let max_w = canvas.body.width() * 0.3;
        let wrapped: Vec<Vec<String>> = pairs.iter().map(|p| wrap_limited(&p.0, max_w, v.max_label_lines, font, ctx.metrics)).collect();
        let flat: Vec<String> = wrapped.iter().flatten().cloned().collect();
        let plot = canvas.plot(&MarginRequest { left_labels: &flat, bottom_lines: 1, ..Default::default() })?;

        let band = BandScale::new(pairs.iter().map(|p| p.0.clone()).collect(), (plot.top, plot.bottom), 0.0);
        let x = LinearScale::new((nice.d0, nice.d1), (plot.left, plot.right));
        canvas.add(axis::value_axis_bottom(ctx, plot, &x, &ticks, &tick_labels));

        let lh = ctx.line_height(font);
        let value_font = &ctx.typo().value;
        let mut g = Group::new().set("class", "dumbbells");
        for (i, (_, a, b)) in pairs.iter().enumerate() {
            let cy = band.center_at(i);
            let (xa, xb) = (x.scale(*a), x.scale(*b));
            g = g
                .add(draw::line(xa, cy, xb, cy, &ctx.palette.muted, 2.5))
                .add(draw::circle(xa, cy, DOT, &start_color))
                .add(draw::circle(xb, cy, DOT, &end_color));
            let first = cy - (wrapped[i].len() as f32 - 1.0) * lh * 0.5;
            for (k, line) in wrapped[i].iter().enumerate() {
                g = g.add(draw::text_middle(plot.left - 6.0, first + k as f32 * lh, line, font, &ctx.palette.text, Anchor::End));
            }
            if v.show_values {
                // Each value sits on the outer side of its dot.
                let (sa, sb) = if xa <= xb { (-1.0, 1.0) } else { (1.0, -1.0) };
                let anchor = |s: f32| if s < 0.0 { Anchor::End } else { Anchor::Start };
                g = g
                    .add(draw::text_middle(xa + sa * (DOT + 4.0), cy, &ctx.fmt(*a, Role::Y), value_font, &start_color, anchor(sa)))
                    .add(draw::text_middle(xb + sb * (DOT + 4.0), cy, &ctx.fmt(*b, Role::Y2), value_font, &end_color, anchor(sb)));
            }
        }
        canvas.add(g);
        Ok(canvas.finish())
    }
}
