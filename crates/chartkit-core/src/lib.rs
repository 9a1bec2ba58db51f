// File: crates/chartkit-core/src/lib.rs
// Summary: Core library entry point; config model, layout helpers, label placer and chart rendering.

use log::{debug, error};
use svg::Document;

pub mod charts;
pub mod config;
pub mod container;
pub mod data;
pub mod downsample;
pub mod draw;
pub mod error;
pub mod format;
pub mod geometry;
pub mod layout;
pub mod placement;
pub mod scale;
pub mod series;
pub mod text;
pub mod theme;
pub mod types;

pub use charts::{ChartKind, ChartTemplate, RenderCtx};
pub use config::{ChartConfig, ColumnSpec, FontSpec, Role, Typography, Variables};
pub use container::Container;
pub use error::{ChartError, Result};
pub use format::NumberFormat;
pub use placement::{place_labels, Band, LabelCost, LabelPoint, Placement, PlacementParams};
pub use text::{HeuristicMetrics, TextMetrics};
pub use theme::Palette;

/// Build the chart without touching a container.
pub fn build(kind: ChartKind, cfg: &ChartConfig, metrics: &dyn TextMetrics) -> Result<Document> {
    let template = kind.template();
    let ctx = RenderCtx::for_template(cfg, metrics, template)?;
    debug!("rendering {kind} with {} rows", ctx.rows().len());
    template.build(&ctx)
}

/// Clear `container`, render and mount the chart. On a configuration error the
/// message is logged, shown in the container and `None` is returned.
pub fn render(kind: ChartKind, cfg: &ChartConfig, metrics: &dyn TextMetrics, container: &mut Container) -> Option<Document> {
    container.clear();
    match build(kind, cfg, metrics) {
        Ok(doc) => {
            container.mount(doc.clone());
            Some(doc)
        }
        Err(e) => {
            let message = format!("{kind}: {e}");
            error!("{message}");
            container.show_error(&message, cfg.variables.width, cfg.variables.height);
            None
        }
    }
}

/// `render` from a kind id and raw JSON.
pub fn render_str(kind_id: &str, json: &str, metrics: &dyn TextMetrics, container: &mut Container) -> Option<Document> {
    container.clear();
    let parsed = kind_id.parse::<ChartKind>().and_then(|kind| Ok((kind, ChartConfig::from_json(json)?)));
    match parsed {
        Ok((kind, cfg)) => render(kind, &cfg, metrics, container),
        Err(e) => {
            let message = e.to_string();
            error!("{message}");
            container.show_error(&message, types::WIDTH, types::HEIGHT);
            None
        }
    }
}
