// File: crates/chartkit-core/src/text.rs
// Summary: Text measurement seam and a deterministic heuristic measurer.

use crate::config::FontSpec;

/// Measures rendered text. Layout code only ever talks to this trait, so it
/// runs the same against a real shaper or the heuristic below.
pub trait TextMetrics {
    /// Advance width of `text` in pixels.
    fn measure(&self, text: &str, font: &FontSpec) -> f32;

    /// Distance between consecutive baselines.
    fn line_height(&self, font: &FontSpec) -> f32 {
        font.size * 1.2
    }
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 { (**self).measure(text, font) }
    fn line_height(&self, font: &FontSpec) -> f32 { (**self).line_height(font) }
}

/// Per-character advance estimate tuned to a Helvetica-like face.
/// Deterministic across platforms, which keeps snapshots stable.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicMetrics;

impl HeuristicMetrics {
    fn advance(ch: char) -> f32 {
        match ch {
            'i' | 'j' | 'l' | '|' | '!' | '\'' | '.' | ',' | ':' | ';' => 0.25,
            ' ' | 'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | '/' => 0.33,
            'm' | 'w' => 0.82,
            'M' | 'W' | '@' | '%' => 0.88,
            '0'..='9' | '$' | '#' | '?' | '_' | '+' | '=' | '<' | '>' | '~' => 0.56,
            'a'..='z' => 0.53,
            'A'..='Z' => 0.68,
            c if c.is_ascii() => 0.5,
            // Wide scripts (CJK, emoji) take a full em.
            c if (c as u32) >= 0x2E80 => 1.0,
            _ => 0.6,
        }
    }
}

impl TextMetrics for HeuristicMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        let em: f32 = text.chars().map(Self::advance).sum();
        let bold = if font.is_bold() { 1.07 } else { 1.0 };
        em * font.size * bold
    }
}
