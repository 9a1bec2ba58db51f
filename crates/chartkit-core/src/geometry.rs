// File: crates/chartkit-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

use crate::error::{ChartError, Result};
use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn center_x(&self) -> f32 { (self.left + self.right) * 0.5 }
    pub fn center_y(&self) -> f32 { (self.top + self.bottom) * 0.5 }

    /// Shrink by `insets`, failing when nothing drawable is left.
    pub fn inset(&self, insets: &Insets) -> Result<Self> {
        let r = Self::from_ltrb(
            self.left + insets.left,
            self.top + insets.top,
            self.right - insets.right,
            self.bottom - insets.bottom,
        );
        if r.width() <= 0.0 || r.height() <= 0.0 {
            return Err(ChartError::NonPositiveLayout { width: r.width(), height: r.height() });
        }
        Ok(r)
    }
}

/// Point on a circle of radius `r` around (`cx`, `cy`); angle 0 is 12 o'clock, clockwise.
pub fn polar(cx: f32, cy: f32, r: f32, angle: f32) -> (f32, f32) {
    (cx + r * angle.sin(), cy - r * angle.cos())
}
