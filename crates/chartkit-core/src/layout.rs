// File: crates/chartkit-core/src/layout.rs
// Summary: Text wrapping, truncation, font fitting and margin sizing driven by measured text.

use crate::config::{FontSpec, Typography};
use crate::text::TextMetrics;
use crate::types::Insets;

const ELLIPSIS: &str = "…";
const FONT_STEP: f32 = 0.5;

/// Greedy wrap: words are accumulated until the measured line exceeds
/// `max_width`. Words wider than a whole line are broken by characters.
/// Explicit newlines always break.
pub fn wrap_text(text: &str, max_width: f32, font: &FontSpec, metrics: &dyn TextMetrics) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() { word.to_string() } else { format!("{current} {word}") };
            if metrics.measure(&candidate, font) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if metrics.measure(word, font) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, max_width, font, metrics);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn break_word(word: &str, max_width: f32, font: &FontSpec, metrics: &dyn TextMetrics) -> Vec<String> {
    let mut out = Vec::new();
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        // A single character always stays, even when it alone is too wide.
        if metrics.measure(&piece, font) > max_width && piece.chars().count() > 1 {
            piece.pop();
            out.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    if !piece.is_empty() {
        out.push(piece);
    }
    out
}

/// Wrap, keeping at most `max_lines`; overflow is folded into an ellipsised last line.
pub fn wrap_limited(
    text: &str,
    max_width: f32,
    max_lines: usize,
    font: &FontSpec,
    metrics: &dyn TextMetrics,
) -> Vec<String> {
    let mut lines = wrap_text(text, max_width, font, metrics);
    let max_lines = max_lines.max(1);
    if lines.len() > max_lines {
        let rest = lines.split_off(max_lines - 1).join(" ");
        lines.push(truncate(&format!("{rest}{ELLIPSIS}"), max_width, font, metrics));
    }
    lines
}

/// Cut `text` until it (plus an ellipsis) fits `max_width`.
pub fn truncate(text: &str, max_width: f32, font: &FontSpec, metrics: &dyn TextMetrics) -> String {
    if metrics.measure(text, font) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.trim_end_matches(ELLIPSIS).chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate = format!("{}{ELLIPSIS}", chars.iter().collect::<String>().trim_end());
        if metrics.measure(&candidate, font) <= max_width {
            return candidate;
        }
    }
    String::new()
}

/// Largest size (stepping down from `font.size` in `FONT_STEP`s) at which
/// `text` fits the box. Never returns less than `min_size`.
pub fn fit_font_size(
    text: &str,
    font: &FontSpec,
    max_width: f32,
    max_height: f32,
    min_size: f32,
    metrics: &dyn TextMetrics,
) -> f32 {
    let fits = |size: f32| {
        let f = font.with_size(size);
        metrics.measure(text, &f) <= max_width && metrics.line_height(&f) <= max_height
    };
    let top = f64::from(font.size.max(min_size));
    if !top.is_finite() || !min_size.is_finite() {
        return min_size;
    }
    let step = f64::from(FONT_STEP);
    let steps = ((top - f64::from(min_size)) / step).ceil().max(0.0) as usize;

    // Width and line height grow linearly with size: skip straight to just
    // above the size the box allows.
    let f = font.with_size(top as f32);
    let (w, h) = (metrics.measure(text, &f), metrics.line_height(&f));
    let mut ratio = 1.0f64;
    if w > max_width && w > 0.0 {
        ratio = ratio.min(f64::from(max_width) / f64::from(w));
    }
    if h > max_height && h > 0.0 {
        ratio = ratio.min(f64::from(max_height) / f64::from(h));
    }
    let skip = ((top * (1.0 - ratio.max(0.0)) / step).floor() - 2.0).max(0.0) as usize;

    for k in skip.min(steps)..steps {
        let size = (top - k as f64 * step) as f32;
        if fits(size) {
            return size;
        }
    }
    min_size
}

/// Width of the widest string.
pub fn max_width<'a, I>(texts: I, font: &FontSpec, metrics: &dyn TextMetrics) -> f32
where
    I: IntoIterator<Item = &'a str>,
{
    texts.into_iter().map(|t| metrics.measure(t, font)).fold(0.0, f32::max)
}

/// Margins around the plot area sized from what has to fit in them.
#[derive(Clone, Debug, Default)]
pub struct MarginRequest<'a> {
    /// Value-axis tick labels drawn left of the plot.
    pub left_labels: &'a [String],
    /// Line count of the tallest wrapped x tick label.
    pub bottom_lines: usize,
    /// Labels drawn right of the plot (series end labels, secondary axis).
    pub right_labels: &'a [String],
    /// Labels drawn left of the plot in label font (slope start labels).
    pub left_series_labels: &'a [String],
}

pub fn auto_margins(req: &MarginRequest<'_>, typo: &Typography, metrics: &dyn TextMetrics) -> Insets {
    let tick_w = max_width(req.left_labels.iter().map(String::as_str), &typo.axis, metrics);
    let series_w = max_width(req.left_series_labels.iter().map(String::as_str), &typo.label, metrics);
    let right_w = max_width(req.right_labels.iter().map(String::as_str), &typo.label, metrics);
    let left = if tick_w > 0.0 || series_w > 0.0 { tick_w.max(series_w) + 10.0 } else { 8.0 };
    let bottom = if req.bottom_lines > 0 {
        req.bottom_lines as f32 * metrics.line_height(&typo.axis) + 10.0
    } else {
        8.0
    };
    let right = if right_w > 0.0 { right_w + 14.0 } else { 16.0 };
    Insets::new(left.ceil(), right.ceil(), 10.0, bottom.ceil())
}
