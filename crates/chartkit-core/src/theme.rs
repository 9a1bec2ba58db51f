// File: crates/chartkit-core/src/theme.rs
// Summary: Light/dark colour palettes with per-category overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// CSS colours used by every template. Missing fields fall back to the light preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub text: String,
    pub muted: String,
    pub axis: String,
    pub grid: String,
    pub series: Vec<String>,
    pub categories: BTreeMap<String, String>,
}

impl Default for Palette {
    fn default() -> Self { Self::light() }
}

impl Palette {
    pub fn light() -> Self {
        Self {
            background: "#ffffff".into(),
            text: "#1d1d1f".into(),
            muted: "#6e6e73".into(),
            axis: "#3c3c46".into(),
            grid: "#e6e6eb".into(),
            series: to_strings(&["#2078c8", "#e4572e", "#17a398", "#f3a712", "#7b5ea7", "#c03f72", "#5f6b7a", "#8cb369"]),
            categories: BTreeMap::new(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#121214".into(),
            text: "#ebebf5".into(),
            muted: "#9696a0".into(),
            axis: "#b4b4be".into(),
            grid: "#28282d".into(),
            series: to_strings(&["#40a0ff", "#ff7a59", "#2ec4b6", "#ffc857", "#a88beb", "#f06d9c", "#9aa5b1", "#b5e48c"]),
            categories: BTreeMap::new(),
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            background: "#fdf6e3".into(), // base3
            text: "#002b36".into(),       // base03
            muted: "#586e75".into(),      // base01
            axis: "#657b83".into(),       // base00
            grid: "#eee8d5".into(),       // base2
            series: to_strings(&["#268bd2", "#dc322f", "#2aa198", "#b58900", "#6c71c4", "#d33682", "#cb4b16", "#859900"]),
            categories: BTreeMap::new(),
        }
    }

    pub fn solarized_dark() -> Self {
        Self {
            background: "#002b36".into(), // base03
            text: "#eee8d5".into(),       // base2
            muted: "#839496".into(),      // base0
            axis: "#93a1a1".into(),       // base1
            grid: "#073642".into(),       // base02
            ..Self::solarized_light()
        }
    }

    /// Colour for `category`, honouring overrides before cycling the series list.
    pub fn color_for(&self, category: &str, index: usize) -> &str {
        if let Some(c) = self.categories.get(category) {
            return c;
        }
        if self.series.is_empty() {
            return &self.text;
        }
        &self.series[index % self.series.len()]
    }

    /// Fill a partially specified palette from `base`.
    pub(crate) fn or_from(mut self, base: &Palette) -> Self {
        if self.series.is_empty() { self.series = base.series.clone(); }
        for (field, fallback) in [
            (&mut self.background, &base.background),
            (&mut self.text, &base.text),
            (&mut self.muted, &base.muted),
            (&mut self.axis, &base.axis),
            (&mut self.grid, &base.grid),
        ] {
            if field.trim().is_empty() { *field = fallback.clone(); }
        }
        self
    }
}

fn to_strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| (*s).to_string()).collect()
}

/// Built-in presets as (name, palette).
pub fn presets() -> Vec<(&'static str, Palette)> {
    vec![
        ("light", Palette::light()),
        ("dark", Palette::dark()),
        ("solarized-light", Palette::solarized_light()),
        ("solarized-dark", Palette::solarized_dark()),
    ]
}

/// Find a preset by name, falling back to light.
pub fn find(name: &str) -> Palette {
    presets()
        .into_iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, p)| p)
        .unwrap_or_else(Palette::light)
}

/// Linear blend between two `#rrggbb` colours; `t` in [0, 1].
pub fn mix(a: &str, b: &str, t: f32) -> String {
    match (parse_hex(a), parse_hex(b)) {
        (Some(ca), Some(cb)) => {
            let t = t.clamp(0.0, 1.0);
            let ch = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
            format!("#{:02x}{:02x}{:02x}", ch(ca.0, cb.0), ch(ca.1, cb.1), ch(ca.2, cb.2))
        }
        _ => if t < 0.5 { a.to_string() } else { b.to_string() },
    }
}

/// Relative luminance in [0, 1], used to pick readable text over fills.
pub fn luminance(color: &str) -> Option<f32> {
    let (r, g, b) = parse_hex(color)?;
    Some((0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32) / 255.0)
}

fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim().strip_prefix('#')?;
    let full: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let v = u32::from_str_radix(&full, 16).ok()?;
    Some(((v >> 16) as u8, (v >> 8) as u8, v as u8))
}
