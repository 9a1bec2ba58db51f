// File: crates/chartkit-core/src/draw.rs
// Summary: Small builders over the `svg` crate for text, shapes and path data.

use std::fmt::Write as _;

use svg::node::element::{Circle, Group, Image, Line, Path, Rectangle, Text};

use crate::config::FontSpec;

/// Round to 1/100 px so documents stay short and stable.
#[inline]
pub fn r2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Single-line text. `y` is the alphabetic baseline.
pub fn text(x: f32, y: f32, content: &str, font: &FontSpec, fill: &str, anchor: Anchor) -> Text {
    Text::new(content)
        .set("x", r2(x))
        .set("y", r2(y))
        .set("font-family", font.family.as_str())
        .set("font-size", r2(font.size))
        .set("font-weight", u32::from(font.weight))
        .set("fill", fill)
        .set("text-anchor", anchor.as_str())
}

/// Text vertically centred on `y`.
pub fn text_middle(x: f32, y: f32, content: &str, font: &FontSpec, fill: &str, anchor: Anchor) -> Text {
    text(x, y, content, font, fill, anchor).set("dominant-baseline", "middle")
}

/// Stacked lines, first baseline at `y`.
pub fn text_lines(
    x: f32,
    y: f32,
    lines: &[String],
    font: &FontSpec,
    fill: &str,
    anchor: Anchor,
    line_height: f32,
) -> Group {
    lines.iter().enumerate().fold(Group::new(), |g, (i, line)| {
        g.add(text(x, y + i as f32 * line_height, line, font, fill, anchor))
    })
}

pub fn rect(x: f32, y: f32, w: f32, h: f32, fill: &str) -> Rectangle {
    Rectangle::new()
        .set("x", r2(x))
        .set("y", r2(y))
        .set("width", r2(w.max(0.0)))
        .set("height", r2(h.max(0.0)))
        .set("fill", fill)
}

pub fn line(x1: f32, y1: f32, x2: f32, y2: f32, stroke: &str, width: f32) -> Line {
    Line::new()
        .set("x1", r2(x1))
        .set("y1", r2(y1))
        .set("x2", r2(x2))
        .set("y2", r2(y2))
        .set("stroke", stroke)
        .set("stroke-width", r2(width))
}

pub fn circle(cx: f32, cy: f32, r: f32, fill: &str) -> Circle {
    Circle::new().set("cx", r2(cx)).set("cy", r2(cy)).set("r", r2(r.max(0.0))).set("fill", fill)
}

pub fn image(href: &str, x: f32, y: f32, w: f32, h: f32) -> Image {
    Image::new()
        .set("href", href)
        .set("x", r2(x))
        .set("y", r2(y))
        .set("width", r2(w))
        .set("height", r2(h))
        .set("preserveAspectRatio", "xMidYMid meet")
}

pub fn stroke_path(d: String, stroke: &str, width: f32) -> Path {
    Path::new()
        .set("d", d)
        .set("fill", "none")
        .set("stroke", stroke)
        .set("stroke-width", r2(width))
        .set("stroke-linejoin", "round")
        .set("stroke-linecap", "round")
}

pub fn fill_path(d: String, fill: &str) -> Path {
    Path::new().set("d", d).set("fill", fill)
}

/// Accumulates SVG path data.
#[derive(Clone, Debug, Default)]
pub struct PathData {
    d: String,
}

impl PathData {
    pub fn new() -> Self { Self::default() }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        let _ = write!(self.d, "M{},{}", r2(x), r2(y));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        let _ = write!(self.d, "L{},{}", r2(x), r2(y));
        self
    }

    /// Circular arc of radius `r` to (`x`, `y`).
    pub fn arc_to(mut self, r: f32, large: bool, sweep: bool, x: f32, y: f32) -> Self {
        let _ = write!(self.d, "A{},{} 0 {} {} {},{}", r2(r), r2(r), u8::from(large), u8::from(sweep), r2(x), r2(y));
        self
    }

    pub fn close(mut self) -> Self {
        self.d.push('Z');
        self
    }

    /// Polyline through `points`, starting with a move.
    pub fn polyline(points: &[(f32, f32)]) -> Self {
        points.iter().enumerate().fold(Self::new(), |p, (i, &(x, y))| {
            if i == 0 { p.move_to(x, y) } else { p.line_to(x, y) }
        })
    }

    pub fn build(self) -> String { self.d }
}
