// File: crates/chartkit-core/src/config.rs
// Summary: JSON chart configuration (data, column roles, variables, typography, colours, images).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::format::NumberFormat;
use crate::placement::LabelCost;
use crate::theme::Palette;
use crate::types::{Insets, HEIGHT, WIDTH};

/// One data row, keyed by column name.
pub type Row = Map<String, Value>;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub data: DataSpec,
    #[serde(default)]
    pub variables: Variables,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default)]
    pub colors: Palette,
    #[serde(default)]
    pub colors_dark: Option<Palette>,
    /// Icon URL per category.
    #[serde(default)]
    pub images: BTreeMap<String, String>,
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Active palette: `colors_dark` (or the dark preset) in dark mode, `colors` otherwise.
    pub fn palette(&self) -> Palette {
        if self.variables.dark_mode {
            let mut p = match &self.colors_dark {
                Some(p) => p.clone().or_from(&Palette::dark()),
                None => Palette::dark(),
            };
            // Light overrides apply unless the dark palette names the category itself.
            for (k, c) in &self.colors.categories {
                p.categories.entry(k.clone()).or_insert_with(|| c.clone());
            }
            p
        } else {
            self.colors.clone().or_from(&Palette::light())
        }
    }

    pub fn image_for(&self, category: &str) -> Option<&str> {
        self.images.get(category).map(String::as_str).filter(|u| !u.trim().is_empty())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DataSpec {
    #[serde(default)]
    pub data: Vec<Row>,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub role: Role,
    pub name: String,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Semantic axis a column is mapped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    X,
    Y,
    Y2,
    Group,
    Label,
    Size,
    #[serde(other)]
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::X => "x",
            Role::Y => "y",
            Role::Y2 => "y2",
            Role::Group => "group",
            Role::Label => "label",
            Role::Size => "size",
            Role::Other => "other",
        }
    }
}

/// Chart dimensions and tuning knobs. Every field has a default.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Variables {
    pub width: f32,
    pub height: f32,
    pub dark_mode: bool,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    /// Footer note, usually the data source.
    pub source: Option<String>,
    /// Explicit margins; replaces the measured auto margins.
    pub margin: Option<Insets>,
    pub number_format: NumberFormat,
    pub show_values: bool,
    pub show_legend: bool,
    pub tick_count: usize,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub bar_padding: f32,
    /// Donut hole as a fraction of the outer radius.
    pub inner_radius: f32,
    pub waffle_rows: usize,
    pub waffle_columns: usize,
    /// Stack columns to 100%.
    pub normalize: bool,
    pub max_label_lines: usize,
    /// Line series longer than this are downsampled.
    pub max_points: usize,
    /// Label placement grid cell, in pixels.
    pub label_grid: f32,
    /// Label height in grid cells; derived from the label font when absent.
    pub label_height: Option<usize>,
    pub label_protect_radius: usize,
    /// Displacement cost; each template picks its own default when absent.
    pub label_cost: Option<LabelCost>,
}

impl Default for Variables {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            dark_mode: false,
            title: None,
            subtitle: None,
            source: None,
            margin: None,
            number_format: NumberFormat::default(),
            show_values: true,
            show_legend: true,
            tick_count: 5,
            y_min: None,
            y_max: None,
            bar_padding: 0.2,
            inner_radius: 0.6,
            waffle_rows: 10,
            waffle_columns: 10,
            normalize: false,
            max_label_lines: 2,
            max_points: 2000,
            label_grid: 3.0,
            label_height: None,
            label_protect_radius: 0,
            label_cost: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub weight: u16,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self { family: "Helvetica, Arial, sans-serif".into(), size: 12.0, weight: 400 }
    }
}

impl FontSpec {
    pub fn new(size: f32, weight: u16) -> Self {
        Self { size, weight, ..Self::default() }
    }

    pub fn with_size(&self, size: f32) -> Self {
        Self { size, ..self.clone() }
    }

    pub fn is_bold(&self) -> bool { self.weight >= 600 }
}

/// Font per text class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub title: FontSpec,
    pub subtitle: FontSpec,
    pub axis: FontSpec,
    pub label: FontSpec,
    pub value: FontSpec,
    pub legend: FontSpec,
    pub footer: FontSpec,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            title: FontSpec::new(20.0, 700),
            subtitle: FontSpec::new(14.0, 400),
            axis: FontSpec::new(11.0, 400),
            label: FontSpec::new(12.0, 600),
            value: FontSpec::new(11.0, 400),
            legend: FontSpec::new(12.0, 400),
            footer: FontSpec::new(10.0, 400),
        }
    }
}
