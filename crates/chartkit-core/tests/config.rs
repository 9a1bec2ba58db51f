// File: crates/chartkit-core/tests/config.rs
// Purpose: Config parsing defaults, role validation and palette selection.

use chartkit_core::data::RoleMap;
use chartkit_core::theme::{self, Palette};
use chartkit_core::{ChartConfig, ChartError, LabelCost, Role};

fn cfg(json: &str) -> ChartConfig {
    ChartConfig::from_json(json).expect("valid config")
}

#[test]
fn empty_object_uses_defaults() {
    let c = cfg("{}");
    assert_eq!(c.variables.width, 800.0);
    assert_eq!(c.variables.height, 500.0);
    assert!(c.variables.show_values);
    assert_eq!(c.variables.tick_count, 5);
    assert_eq!(c.variables.label_cost, None);
    assert_eq!(c.typography.title.size, 20.0);
    assert!(c.data.data.is_empty());
}

#[test]
fn variables_and_roles_parse() {
    let c = cfg(r#"{
        "data": {"data": [{"a": 1}], "columns": [{"role": "x", "name": "a", "unit": "$"}, {"role": "weird", "name": "b"}]},
        "variables": {"width": 640, "label_cost": "squared", "margin": {"left": 5}}
    }"#);
    assert_eq!(c.variables.width, 640.0);
    assert_eq!(c.variables.label_cost, Some(LabelCost::Squared));
    let margin = c.variables.margin.expect("margin");
    assert_eq!(margin.left, 5.0);
    assert_eq!(c.data.columns[0].role, Role::X);
    assert_eq!(c.data.columns[0].unit.as_deref(), Some("$"));
    assert_eq!(c.data.columns[1].role, Role::Other);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(matches!(ChartConfig::from_json("{"), Err(ChartError::Json(_))));
}

#[test]
fn every_missing_role_is_reported() {
    let c = cfg(r#"{"data": {"data": [{"a": 1}], "columns": [{"role": "group", "name": "a"}]}}"#);
    let err = RoleMap::resolve(&c.data.columns, &c.data.data, &[Role::X, Role::Y, Role::Group], &[]).unwrap_err();
    match &err {
        ChartError::MissingColumns(roles) => assert_eq!(roles, &vec!["x".to_string(), "y".to_string()]),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(err.to_string(), "missing required column roles: x, y");
}

#[test]
fn empty_data_and_unknown_columns() {
    let c = cfg(r#"{"data": {"data": [], "columns": [{"role": "x", "name": "a"}]}}"#);
    assert!(matches!(RoleMap::resolve(&c.data.columns, &c.data.data, &[Role::X], &[]), Err(ChartError::EmptyData)));

    let c = cfg(r#"{"data": {"data": [{"b": 1}], "columns": [{"role": "x", "name": "a"}]}}"#);
    let err = RoleMap::resolve(&c.data.columns, &c.data.data, &[Role::X], &[]).unwrap_err();
    assert!(matches!(err, ChartError::UnknownColumn { ref name, .. } if name == "a"));
}

#[test]
fn optional_roles_bind_when_present() {
    let c = cfg(r#"{"data": {"data": [{"a": 1, "g": "k"}], "columns": [{"role": "x", "name": "a"}, {"role": "group", "name": "g"}]}}"#);
    let roles = RoleMap::resolve(&c.data.columns, &c.data.data, &[Role::X], &[Role::Group, Role::Size]).expect("roles");
    assert_eq!(roles.name(Role::X), "a");
    assert!(roles.has(Role::Group));
    assert!(!roles.has(Role::Size));
}

#[test]
fn dark_mode_selects_dark_palette() {
    let light = cfg("{}");
    let dark = cfg(r##"{"variables": {"dark_mode": true}, "colors_dark": {"background": "#000000"}}"##);
    assert_eq!(light.palette().background, "#ffffff");
    let p = dark.palette();
    assert_eq!(p.background, "#000000");
    assert!(!p.text.is_empty(), "missing fields fall back to the dark preset");
}

#[test]
fn category_overrides_and_images() {
    let c = cfg(r##"{"colors": {"categories": {"Wind": "#00ff00"}}, "images": {"Wind": "wind.svg", "Sun": " "}}"##);
    let p = c.palette();
    assert_eq!(p.color_for("Wind", 3), "#00ff00");
    assert_eq!(p.color_for("Other", 0), p.series[0]);
    assert_eq!(c.image_for("Wind"), Some("wind.svg"));
    assert_eq!(c.image_for("Sun"), None);
}

#[test]
fn dark_mode_keeps_category_overrides() {
    let c = cfg(r##"{"variables": {"dark_mode": true}, "colors": {"categories": {"Wind": "#00ff00", "Sun": "#ffff00"}},
        "colors_dark": {"categories": {"Sun": "#aaaa00"}}}"##);
    let p = c.palette();
    assert_eq!(p.color_for("Wind", 0), "#00ff00");
    assert_eq!(p.color_for("Sun", 0), "#aaaa00");
}

#[test]
fn theme_presets_by_name() {
    let names: Vec<_> = theme::presets().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, ["light", "dark", "solarized-light", "solarized-dark"]);
    assert_eq!(theme::find("Solarized-Dark").background, "#002b36");
    assert_eq!(theme::find("no-such-theme"), Palette::light());
    assert_eq!(theme::mix("#000000", "#ffffff", 0.5), "#808080");
    assert!(theme::luminance("#ffffff").unwrap_or_default() > 0.9);
}
