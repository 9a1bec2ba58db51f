// File: crates/chartkit-gallery/src/bin/gallery.rs
// Summary: Renders each demos/<kind>.json (light and dark) to target/out as SVG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chartkit_core::{render, ChartConfig, ChartKind, Container, HeuristicMetrics};
use log::warn;

fn main() -> Result<()> {
    env_logger::init();
    let demos = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos"));
    let out_dir = PathBuf::from("target/out");
    std::fs::create_dir_all(&out_dir)?;

    let mut failed = 0usize;
    for kind in ChartKind::ALL {
        let path = demos.join(format!("{}.json", kind.id()));
        if !path.exists() {
            warn!("no demo config for {kind} at {}", path.display());
            continue;
        }
        let json = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let mut cfg = ChartConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?;
        for dark in [false, true] {
            cfg.variables.dark_mode = dark;
            let mut container = Container::new(kind.id());
            if render(kind, &cfg, &HeuristicMetrics, &mut container).is_none() {
                failed += 1;
            }
            let suffix = if dark { "_dark" } else { "" };
            let out = out_dir.join(format!("{}{suffix}.svg", kind.id()));
            std::fs::write(&out, container.to_svg_string())?;
            println!("Wrote {}", out.display());
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} demo render(s) failed");
    }
    Ok(())
}
