// File: crates/chartkit-core/tests/data.rs
// Purpose: Cell parsing, pivots, series grouping, date ticks, scales and downsampling.

use chartkit_core::config::Row;
use chartkit_core::data::{categories, date_label, date_ticks, num, totals_by, x_value, Matrix, XValue};
use chartkit_core::downsample::lttb;
use chartkit_core::scale::{extent, value_domain, BandScale, LinearScale};
use chartkit_core::series::SeriesSet;
use serde_json::json;

fn rows(v: serde_json::Value) -> Vec<Row> {
    serde_json::from_value(v).expect("rows")
}

#[test]
fn numbers_parse_from_strings() {
    let r = rows(json!([{"a": "1,234.5", "b": "12%", "c": "$7", "d": "n/a", "e": 3}]));
    assert_eq!(num(&r[0], "a"), Some(1234.5));
    assert_eq!(num(&r[0], "b"), Some(12.0));
    assert_eq!(num(&r[0], "c"), Some(7.0));
    assert_eq!(num(&r[0], "d"), None);
    assert_eq!(num(&r[0], "e"), Some(3.0));
    assert_eq!(num(&r[0], "missing"), None);
}

#[test]
fn x_values_accept_dates() {
    let r = rows(json!([{"d": "2024-03-01"}, {"d": "2024-03"}, {"d": 2020}]));
    assert!(matches!(x_value(&r[0], "d"), Some(XValue::Date(_))));
    assert_eq!(x_value(&r[0], "d").map(|x| x.as_f64()), x_value(&r[1], "d").map(|x| x.as_f64()));
    assert_eq!(x_value(&r[2], "d"), Some(XValue::Number(2020.0)));
}

#[test]
fn categories_keep_first_seen_order() {
    let r = rows(json!([{"k": "b", "v": 1}, {"k": "a", "v": 2}, {"k": "b", "v": 3}]));
    assert_eq!(categories(&r, "k"), vec!["b", "a"]);
    assert_eq!(totals_by(&r, "k", "v"), vec![("b".to_string(), 4.0), ("a".to_string(), 2.0)]);
}

#[test]
fn pivot_sums_and_leaves_gaps() {
    let r = rows(json!([
        {"g": "x", "p": "2020", "v": 1},
        {"g": "x", "p": "2020", "v": 2},
        {"g": "y", "p": "2021", "v": 5}
    ]));
    let m = Matrix::pivot(&r, "g", "p", "v");
    assert_eq!(m.rows, vec!["x", "y"]);
    assert_eq!(m.cols, vec!["2020", "2021"]);
    assert_eq!(m.get(0, 0), Some(3.0));
    assert_eq!(m.get(0, 1), None);
    assert_eq!(m.column(1).collect::<Vec<_>>(), vec![None, Some(5.0)]);
}

#[test]
fn series_group_and_sort() {
    let r = rows(json!([
        {"x": 2, "y": 20, "g": "b"},
        {"x": 1, "y": 10, "g": "b"},
        {"x": 1, "y": 5, "g": "a"}
    ]));
    let set = SeriesSet::from_rows(&r, "x", "y", Some("g"), "").expect("series");
    assert_eq!(set.series.len(), 2);
    assert_eq!(set.series[0].name, "b");
    assert_eq!(set.series[0].points, vec![(1.0, 10.0), (2.0, 20.0)]);
    assert_eq!(set.xs(), vec![1.0, 2.0]);
    assert!(!set.dates);

    let single = SeriesSet::from_rows(&r, "x", "y", None, "total").expect("series");
    assert_eq!(single.series[0].name, "total");
    assert!(SeriesSet::from_rows(&r, "x", "nope", None, "t").is_err());
}

#[test]
fn date_ticks_land_on_month_starts() {
    let r = rows(json!([{"d": "2020-01-15"}, {"d": "2022-06-01"}]));
    let lo = x_value(&r[0], "d").map(|x| x.as_f64()).unwrap_or_default();
    let hi = x_value(&r[1], "d").map(|x| x.as_f64()).unwrap_or_default();
    let ticks = date_ticks(lo, hi, 5);
    assert!(!ticks.is_empty() && ticks.len() <= 8, "{ticks:?}");
    assert!(ticks.iter().all(|t| *t >= lo && *t <= hi));
    assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    assert!(ticks.iter().all(|t| date_label(*t, 10.0).ends_with(" 1")), "ticks are first-of-month");
}

#[test]
fn linear_scale_nice_and_ticks() {
    let s = LinearScale::new((3.0, 97.0), (0.0, 100.0)).nice(5);
    assert_eq!((s.d0, s.d1), (0.0, 100.0));
    assert_eq!(s.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    assert_eq!(s.scale(50.0), 50.0);
    assert!((s.invert(25.0) - 25.0).abs() < 1e-9);

    let fine = LinearScale::new((0.0, 0.3), (0.0, 1.0));
    assert_eq!(fine.ticks(3), vec![0.0, 0.1, 0.2, 0.3]);
}

#[test]
fn domains_and_extents() {
    assert_eq!(value_domain(5.0, 10.0, None, None), (0.0, 10.0));
    assert_eq!(value_domain(5.0, 10.0, Some(4.0), None), (4.0, 10.0));
    assert_eq!(extent([2.0, f64::NAN, 2.0]), Some((2.0, 3.0)));
    assert_eq!(extent(std::iter::empty::<f64>()), None);
}

#[test]
fn band_scale_spacing() {
    let b = BandScale::new(vec!["a".into(), "b".into()], (0.0, 100.0), 0.0);
    assert_eq!(b.bandwidth(), 50.0);
    assert_eq!(b.position("b"), Some(50.0));
    assert_eq!(b.center_at(0), 25.0);
}

#[test]
fn lttb_keeps_endpoints() {
    let pts: Vec<(f64, f64)> = (0..1000).map(|i| (i as f64, (i as f64 * 0.1).sin())).collect();
    let out = lttb(&pts, 100);
    assert_eq!(out.len(), 100);
    assert_eq!(out.first(), pts.first());
    assert_eq!(out.last(), pts.last());
}
