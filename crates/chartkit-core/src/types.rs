// File: crates/chartkit-core/src/types.rs
// Summary: Shared types and constants (default sizes, margins).

use serde::{Deserialize, Serialize};

/// Default chart width in pixels.
pub const WIDTH: f32 = 800.0;
/// Default chart height in pixels.
pub const HEIGHT: f32 = 500.0;

/// Outer margins around the plot area, in pixels.
/// Contract: all fields are non-negative once clamped via `Insets::new`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left: left.max(0.0), right: right.max(0.0), top: top.max(0.0), bottom: bottom.max(0.0) }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(48.0, 24.0, 24.0, 40.0)
    }
}
