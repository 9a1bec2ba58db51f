// File: crates/chartkit-core/tests/charts.rs
// Purpose: Every template renders its demo config; error sentinel and container behaviour.

use std::path::PathBuf;

use chartkit_core::charts::bump::ranks;
use chartkit_core::charts::scatter::bubble_radius;
use chartkit_core::charts::waffle::apportion;
use chartkit_core::data::Matrix;
use chartkit_core::{render, render_str, ChartConfig, ChartError, ChartKind, Container, HeuristicMetrics};

fn demo(kind: ChartKind) -> ChartConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos").join(format!("{}.json", kind.id()));
    let json = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()));
    ChartConfig::from_json(&json).expect("demo config parses")
}

fn svg_of(kind: ChartKind, cfg: &ChartConfig) -> String {
    let mut container = Container::new(kind.id());
    let doc = render(kind, cfg, &HeuristicMetrics, &mut container);
    assert!(doc.is_some(), "{kind} failed: {:?}", container.error());
    assert!(container.error().is_none());
    container.to_svg_string()
}

#[test]
fn every_template_renders_its_demo() {
    for kind in ChartKind::ALL {
        let cfg = demo(kind);
        let svg = svg_of(kind, &cfg);
        assert!(svg.starts_with("<svg"), "{kind}: {}", &svg[..svg.len().min(80)]);
        assert!(svg.contains(r#"viewBox="0 0 800 500""#), "{kind}");
        if let Some(title) = &cfg.variables.title {
            assert!(svg.contains(title.split_whitespace().next().unwrap_or_default()), "{kind} lost its title");
        }
    }
}

#[test]
fn every_template_renders_in_dark_mode() {
    for kind in ChartKind::ALL {
        let mut cfg = demo(kind);
        cfg.variables.dark_mode = true;
        let svg = svg_of(kind, &cfg);
        assert!(svg.contains("#121214"), "{kind} did not switch background");
    }
}

#[test]
fn line_end_labels_name_each_series() {
    let cfg = demo(ChartKind::Line);
    let svg = svg_of(ChartKind::Line, &cfg);
    for name in ["Solar", "Wind", "Hydro", "Nuclear", "Coal"] {
        assert!(svg.contains(name), "missing end label for {name}");
    }
    assert!(svg.contains(r#"class="end-labels""#));
}

#[test]
fn small_charts_still_render() {
    for kind in ChartKind::ALL {
        let mut cfg = demo(kind);
        cfg.variables.width = 360.0;
        cfg.variables.height = 260.0;
        let mut container = Container::new("small");
        // Tight layouts may give up with a layout error but never panic.
        if render(kind, &cfg, &HeuristicMetrics, &mut container).is_none() {
            assert!(container.error().is_some());
        }
    }
}

#[test]
fn missing_roles_render_an_error_message() {
    let mut cfg = demo(ChartKind::Line);
    cfg.data.columns.retain(|c| c.name != "twh");
    let mut container = Container::new("chart");
    assert!(render(ChartKind::Line, &cfg, &HeuristicMetrics, &mut container).is_none());
    let message = container.error().expect("error recorded");
    assert!(message.contains("missing required column roles: y"), "{message}");
    assert!(container.to_svg_string().contains("missing required column roles: y"));
}

#[test]
fn empty_data_and_bad_layout_are_errors() {
    let mut cfg = demo(ChartKind::Bar);
    cfg.data.data.clear();
    let mut container = Container::new("chart");
    assert!(render(ChartKind::Bar, &cfg, &HeuristicMetrics, &mut container).is_none());
    assert!(container.error().unwrap_or_default().contains("empty"));

    let mut cfg = demo(ChartKind::Bar);
    cfg.variables.width = 0.0;
    assert!(render(ChartKind::Bar, &cfg, &HeuristicMetrics, &mut container).is_none());
    assert!(container.error().unwrap_or_default().contains("not positive"));
    assert!(!container.is_empty(), "error message is mounted");
}

#[test]
fn container_is_cleared_between_renders() {
    let mut container = Container::new("chart");
    let mut broken = demo(ChartKind::Donut);
    broken.data.columns.clear();
    assert!(render(ChartKind::Donut, &broken, &HeuristicMetrics, &mut container).is_none());
    assert!(container.error().is_some());
    assert!(render(ChartKind::Donut, &demo(ChartKind::Donut), &HeuristicMetrics, &mut container).is_some());
    assert!(container.error().is_none());
    assert!(!container.to_svg_string().contains("missing required"));
}

#[test]
fn render_str_parses_kind_and_json() {
    let json = std::fs::read_to_string(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/waffle.json")).expect("read");
    let mut container = Container::new("chart");
    assert!(render_str("waffle", &json, &HeuristicMetrics, &mut container).is_some());
    assert!(render_str("pie", &json, &HeuristicMetrics, &mut container).is_none());
    assert!(container.error().unwrap_or_default().contains("unknown chart kind 'pie'"));
    assert!(render_str("waffle", "{not json", &HeuristicMetrics, &mut container).is_none());
}

#[test]
fn kind_ids_round_trip() {
    for kind in ChartKind::ALL {
        assert_eq!(kind.id().parse::<ChartKind>().ok(), Some(kind));
    }
    assert_eq!("Stacked-Column".parse::<ChartKind>().ok(), Some(ChartKind::StackedColumn));
    assert!(matches!("pie".parse::<ChartKind>(), Err(ChartError::UnknownKind(_))));
}

#[test]
fn waffle_apportions_every_cell() {
    let counts = apportion(&[412.0, 298.0, 97.0], 100);
    assert_eq!(counts.iter().sum::<usize>(), 100);
    assert_eq!(counts, vec![51, 37, 12]);
    assert_eq!(apportion(&[1.0, 1.0, 1.0], 10), vec![4, 3, 3]);
    assert_eq!(apportion(&[0.0, -2.0], 10), vec![0, 0]);
}

#[test]
fn bump_ranks_highest_first() {
    let m = Matrix {
        rows: vec!["a".into(), "b".into(), "c".into()],
        cols: vec!["p1".into(), "p2".into()],
        values: vec![vec![Some(1.0), Some(9.0)], vec![Some(5.0), None], vec![Some(3.0), Some(4.0)]],
    };
    let r = ranks(&m);
    assert_eq!(r[0], vec![Some(3), Some(1)]);
    assert_eq!(r[1], vec![Some(1), None]);
    assert_eq!(r[2], vec![Some(2), Some(2)]);
}

#[test]
fn bubbles_scale_by_area() {
    let small = bubble_radius(Some(25.0), 100.0, 30.0);
    let big = bubble_radius(Some(100.0), 100.0, 30.0);
    assert_eq!(big, 30.0);
    assert!(small < big && small > bubble_radius(None, 100.0, 30.0));
}

#[test]
fn values_far_outside_the_axis_still_render() {
    let json = r#"{
      "data": {
        "data": [
          {"t": 1, "name": "a", "v": 0.5},
          {"t": 2, "name": "a", "v": 1e18},
          {"t": 1, "name": "b", "v": 0.2},
          {"t": 2, "name": "b", "v": 0.9}
        ],
        "columns": [
          {"role": "x", "name": "t"},
          {"role": "y", "name": "v"},
          {"role": "group", "name": "name"}
        ]
      },
      "variables": {"y_max": 1}
    }"#;
    let cfg = ChartConfig::from_json(json).expect("config");
    let mut container = Container::new("chart");
    assert!(render(ChartKind::Line, &cfg, &HeuristicMetrics, &mut container).is_some(), "{:?}", container.error());
    assert!(container.to_svg_string().contains(r#"class="end-labels""#));

    let mut huge = demo(ChartKind::Column);
    huge.typography.value.size = 3.0e7;
    assert!(render(ChartKind::Column, &huge, &HeuristicMetrics, &mut container).is_some());
}
