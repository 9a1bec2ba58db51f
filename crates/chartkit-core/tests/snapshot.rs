// File: crates/chartkit-core/tests/snapshot.rs
// Purpose: Golden SVG snapshots with bless flow.
// Behavior:
// - Renders a few demo configs with the built-in text estimate (no font lookup).
// - Always checks the document outline (root, background, header, the
//   template's own groups) so a missing snapshot still asserts something.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot files.
// - Else, if a snapshot exists, compares the SVG text exactly.
// - Else, logs a note and returns (skips) without failing to ease first run.

use std::path::PathBuf;

use chartkit_core::{build, ChartConfig, ChartKind, HeuristicMetrics};

fn render_svg(kind: ChartKind) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let json = std::fs::read_to_string(root.join("../../demos").join(format!("{}.json", kind.id()))).expect("read demo");
    let cfg = ChartConfig::from_json(&json).expect("parse demo");
    build(kind, &cfg, &HeuristicMetrics).expect("render demo").to_string()
}

fn check_snapshot(kind: ChartKind, groups: &[&str]) {
    let svg = render_svg(kind);
    assert!(svg.starts_with("<svg") && svg.trim_end().ends_with("</svg>"), "{kind}: not an svg document");
    assert_eq!(svg.matches("<svg").count(), 1);
    for class in ["background", "chart", "header"].iter().chain(groups) {
        assert!(svg.contains(&format!(r#"class="{class}""#)), "{kind}: no element with class {class}");
    }
    let snap_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join(format!("{}.svg", kind.id()));

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &svg).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), svg.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read_to_string(&snap_path).expect("read snapshot");
        assert_eq!(svg, want, "rendered SVG differs from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}

#[test]
fn golden_line_chart() {
    check_snapshot(ChartKind::Line, &["series", "end-labels", "axis value-axis", "axis x-axis"]);
}

#[test]
fn golden_slope_chart() {
    check_snapshot(ChartKind::Slope, &["slopes", "slope-labels"]);
}

#[test]
fn golden_donut_chart() {
    check_snapshot(ChartKind::Donut, &["slices", "slice-labels"]);
}

#[test]
fn rendering_is_deterministic() {
    for kind in ChartKind::ALL {
        assert_eq!(render_svg(kind), render_svg(kind), "{kind} output varies between runs");
    }
}
