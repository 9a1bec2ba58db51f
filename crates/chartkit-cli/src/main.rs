// File: crates/chartkit-cli/src/main.rs
// Summary: Renders a JSON chart config (optionally fed with CSV rows) to SVG and/or PNG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chartkit_core::config::Row;
use chartkit_core::{render, theme, ChartConfig, ChartKind, Container, HeuristicMetrics, TextMetrics};
use chartkit_skia::{rasterize_svg, SkiaTextMetrics};
use clap::{Parser, Subcommand};
use log::info;
use serde_json::{Number, Value};

/// Chart templates from JSON configs
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one chart
    Render {
        /// Template id, e.g. line, slope, donut
        #[arg(short, long)]
        kind: String,

        /// JSON chart configuration
        #[arg(short, long)]
        config: PathBuf,

        /// CSV file whose rows replace `data.data`
        #[arg(long)]
        csv: Option<PathBuf>,

        /// SVG output (defaults to target/out/<kind>.svg)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also rasterise to this PNG
        #[arg(long)]
        png: Option<PathBuf>,

        /// Force dark mode
        #[arg(long)]
        dark: bool,

        /// Built-in palette (light, dark, solarized-light, solarized-dark)
        #[arg(long)]
        theme: Option<String>,

        /// Measure text with Skia instead of the built-in estimate
        #[arg(long)]
        skia_metrics: bool,
    },

    /// List template ids and their column roles
    Kinds,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Render { kind, config, csv, out, png, dark, theme, skia_metrics } => {
            let kind: ChartKind = kind.parse()?;
            let json = std::fs::read_to_string(&config).with_context(|| format!("reading {}", config.display()))?;
            let mut cfg = ChartConfig::from_json(&json).with_context(|| format!("parsing {}", config.display()))?;
            if let Some(path) = csv {
                cfg.data.data = load_csv_rows(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
                info!("loaded {} rows from {}", cfg.data.data.len(), path.display());
            }
            cfg.variables.dark_mode |= dark;
            if let Some(name) = theme {
                let categories = std::mem::take(&mut cfg.colors.categories);
                cfg.colors = theme::find(&name);
                cfg.colors.categories = categories;
            }

            let metrics: Box<dyn TextMetrics> = if skia_metrics { Box::new(SkiaTextMetrics::new()) } else { Box::new(HeuristicMetrics) };
            let mut container = Container::new(kind.id());
            let rendered = render(kind, &cfg, metrics.as_ref(), &mut container);

            let out = out.unwrap_or_else(|| PathBuf::from("target/out").join(format!("{}.svg", kind.id())));
            write_file(&out, container.to_svg_string().as_bytes())?;
            println!("Wrote {}", out.display());
            if let Some(png) = png {
                let bytes = rasterize_svg(&container.to_svg_string(), cfg.variables.width.round() as i32, cfg.variables.height.round() as i32)?;
                write_file(&png, &bytes)?;
                println!("Wrote {}", png.display());
            }
            if rendered.is_none() {
                anyhow::bail!("{}", container.error().unwrap_or("render failed"));
            }
        }
        Commands::Kinds => {
            for kind in ChartKind::ALL {
                let t = kind.template();
                let roles = |rs: &[chartkit_core::Role]| rs.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", ");
                println!("{:<16} required: {:<20} optional: {}", kind.id(), roles(t.required_roles()), roles(t.optional_roles()));
            }
        }
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

/// Read a headed CSV into JSON rows; numeric cells become numbers.
fn load_csv_rows(path: &Path) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    info!("CSV headers: {headers:?}");

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let row: Row = headers
            .iter()
            .zip(rec.iter())
            .map(|(h, cell)| (h.clone(), cell_value(cell)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn cell_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    match cell.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(cell.to_string()),
    }
}
