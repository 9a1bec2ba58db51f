// File: crates/chartkit-core/src/charts/mod.rs
// Summary: Chart template trait, the template registry and the per-render context.

use std::fmt;
use std::str::FromStr;

use svg::Document;

use crate::config::{ChartConfig, FontSpec, Role, Row, Typography, Variables};
use crate::data::RoleMap;
use crate::error::{ChartError, Result};
use crate::format::format_value;
use crate::placement::{LabelCost, PlacementParams};
use crate::text::TextMetrics;
use crate::theme::Palette;

pub mod area;
pub mod axis;
pub mod bar;
pub mod bump;
pub mod column;
pub mod combo;
pub mod donut;
pub mod dumbbell;
pub mod frame;
pub mod heatmap;
pub mod line;
pub mod scatter;
pub mod slope;
pub mod stacked;
pub mod waffle;

/// One chart archetype: which roles it reads and how it draws them.
pub trait ChartTemplate {
    fn id(&self) -> &'static str;
    fn required_roles(&self) -> &'static [Role];
    fn optional_roles(&self) -> &'static [Role] { &[] }
    fn build(&self, ctx: &RenderCtx<'_>) -> Result<Document>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Slope,
    Area,
    Bar,
    Column,
    StackedColumn,
    Donut,
    Waffle,
    Bump,
    Scatter,
    Dumbbell,
    Heatmap,
    Combo,
}

impl ChartKind {
    pub const ALL: [ChartKind; 13] = [
        ChartKind::Line,
        ChartKind::Slope,
        ChartKind::Area,
        ChartKind::Bar,
        ChartKind::Column,
        ChartKind::StackedColumn,
        ChartKind::Donut,
        ChartKind::Waffle,
        ChartKind::Bump,
        ChartKind::Scatter,
        ChartKind::Dumbbell,
        ChartKind::Heatmap,
        ChartKind::Combo,
    ];

    pub fn template(&self) -> &'static dyn ChartTemplate {
        match self {
            ChartKind::Line => &line::LineChart,
            ChartKind::Slope => &slope::SlopeChart,
            ChartKind::Area => &area::AreaChart,
            ChartKind::Bar => &bar::BarChart,
            ChartKind::Column => &column::ColumnChart,
            ChartKind::StackedColumn => &stacked::StackedColumnChart,
            ChartKind::Donut => &donut::DonutChart,
            ChartKind::Waffle => &waffle::WaffleChart,
            ChartKind::Bump => &bump::BumpChart,
            ChartKind::Scatter => &scatter::ScatterChart,
            ChartKind::Dumbbell => &dumbbell::DumbbellChart,
            ChartKind::Heatmap => &heatmap::HeatmapChart,
            ChartKind::Combo => &combo::ComboChart,
        }
    }

    pub fn id(&self) -> &'static str {
        self.template().id()
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        ChartKind::ALL
            .into_iter()
            .find(|k| k.id() == wanted)
            .ok_or_else(|| ChartError::UnknownKind(s.to_string()))
    }
}

/// Everything a template needs for one render.
pub struct RenderCtx<'a> {
    pub cfg: &'a ChartConfig,
    pub metrics: &'a dyn TextMetrics,
    pub roles: RoleMap,
    pub palette: Palette,
}

impl<'a> RenderCtx<'a> {
    pub fn new(cfg: &'a ChartConfig, metrics: &'a dyn TextMetrics, roles: RoleMap) -> Self {
        Self { cfg, metrics, roles, palette: cfg.palette() }
    }

    /// Resolve the template's roles against the config and build the context.
    pub fn for_template(cfg: &'a ChartConfig, metrics: &'a dyn TextMetrics, template: &dyn ChartTemplate) -> Result<Self> {
        let roles = RoleMap::resolve(&cfg.data.columns, &cfg.data.data, template.required_roles(), template.optional_roles())?;
        Ok(Self::new(cfg, metrics, roles))
    }

    pub fn vars(&self) -> &Variables { &self.cfg.variables }
    pub fn typo(&self) -> &Typography { &self.cfg.typography }
    pub fn rows(&self) -> &[Row] { &self.cfg.data.data }
    pub fn col(&self, role: Role) -> &str { self.roles.name(role) }

    /// Format a value of the column bound to `role`, with its unit.
    pub fn fmt(&self, v: f64, role: Role) -> String {
        format_value(v, self.vars().number_format, self.roles.unit(role))
    }

    pub fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        self.metrics.measure(text, font)
    }

    pub fn line_height(&self, font: &FontSpec) -> f32 {
        self.metrics.line_height(font)
    }

    /// Placer settings from `variables`, with the template's default cost.
    pub fn placement(&self, extent: (f32, f32), default_cost: LabelCost) -> PlacementParams {
        let v = self.vars();
        let mut p = PlacementParams::new(extent);
        p.grid = v.label_grid.max(1.0);
        p.label_height = v.label_height.unwrap_or_else(|| p.cells_for(self.line_height(&self.typo().label)));
        p.protect_radius = v.label_protect_radius;
        p.cost = v.label_cost.unwrap_or(default_cost);
        p.spacing = 1.0;
        p
    }
}
