// File: crates/chartkit-core/tests/layout.rs
// Purpose: Wrapping, truncation, font fitting and margin sizing against the heuristic metrics.

use chartkit_core::layout::{auto_margins, fit_font_size, truncate, wrap_limited, wrap_text, MarginRequest};
use chartkit_core::{FontSpec, HeuristicMetrics, TextMetrics, Typography};
use proptest::prelude::*;

const M: HeuristicMetrics = HeuristicMetrics;

fn font() -> FontSpec {
    FontSpec::new(12.0, 400)
}

#[test]
fn wrap_breaks_between_words() {
    let lines = wrap_text("the quick brown fox jumps over the lazy dog", 80.0, &font(), &M);
    assert!(lines.len() > 1);
    assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
    for l in &lines {
        assert!(M.measure(l, &font()) <= 80.0, "{l:?} too wide");
    }
}

#[test]
fn wrap_honours_newlines_and_breaks_long_words() {
    let lines = wrap_text("a\nb", 500.0, &font(), &M);
    assert_eq!(lines, vec!["a", "b"]);

    let long = "supercalifragilisticexpialidocious";
    let pieces = wrap_text(long, 40.0, &font(), &M);
    assert!(pieces.len() > 1);
    assert_eq!(pieces.concat(), long);
}

#[test]
fn single_character_may_exceed_width() {
    let lines = wrap_text("WW", 1.0, &font(), &M);
    assert_eq!(lines, vec!["W", "W"]);
}

#[test]
fn wrap_limited_ellipsises_overflow() {
    let lines = wrap_limited("one two three four five six seven eight", 40.0, 2, &font(), &M);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with('…'), "{lines:?}");
    assert!(M.measure(&lines[1], &font()) <= 40.0);
}

#[test]
fn truncate_fits_or_returns_input() {
    assert_eq!(truncate("short", 500.0, &font(), &M), "short");
    let t = truncate("a considerably longer label", 60.0, &font(), &M);
    assert!(t.ends_with('…'));
    assert!(M.measure(&t, &font()) <= 60.0);
}

#[test]
fn fitted_font_stays_in_bounds() {
    let f = FontSpec::new(30.0, 700);
    let size = fit_font_size("1,234,567", &f, 50.0, 40.0, 8.0, &M);
    assert!((8.0..=30.0).contains(&size));
    if size > 8.0 {
        assert!(M.measure("1,234,567", &f.with_size(size)) <= 50.0);
    }
    assert_eq!(fit_font_size("x", &f, 500.0, 500.0, 8.0, &M), 30.0);
    assert_eq!(fit_font_size("a very long value", &f, 1.0, 1.0, 8.0, &M), 8.0);
}

#[test]
fn huge_font_sizes_fit_quickly() {
    let f = FontSpec::new(3.0e7, 400);
    let size = fit_font_size("12.3K", &f, 40.0, 20.0, 7.0, &M);
    assert!(size > 7.0 && size <= 20.0, "{size}");
    let fits = |s: f32| M.measure("12.3K", &f.with_size(s)) <= 40.0 && M.line_height(&f.with_size(s)) <= 20.0;
    assert!(fits(size));
    assert!(!fits(size + 0.5), "{size} is not the largest fitting step");

    assert_eq!(fit_font_size("x", &FontSpec::new(f32::INFINITY, 400), 40.0, 20.0, 7.0, &M), 7.0);
    assert_eq!(fit_font_size("x", &FontSpec::new(1.0e30, 400), 1.0e36, 1.0e36, 7.0, &M), 1.0e30);
}

#[test]
fn stepped_fit_matches_the_largest_half_point() {
    let f = FontSpec::new(24.0, 400);
    let size = fit_font_size("1,234", &f, 40.0, 100.0, 6.0, &M);
    assert_eq!(size * 2.0, (size * 2.0).round(), "{size} is off the 0.5 grid");
    assert!(M.measure("1,234", &f.with_size(size)) <= 40.0);
    assert!(M.measure("1,234", &f.with_size(size + 0.5)) > 40.0);
}

#[test]
fn margins_grow_with_labels() {
    let typo = Typography::default();
    let small = auto_margins(&MarginRequest::default(), &typo, &M);
    let ticks = vec!["1,000,000".to_string()];
    let names = vec!["A long series name".to_string()];
    let big = auto_margins(
        &MarginRequest { left_labels: &ticks, right_labels: &names, bottom_lines: 2, ..Default::default() },
        &typo,
        &M,
    );
    assert!(big.left > small.left);
    assert!(big.right > small.right);
    assert!(big.bottom > small.bottom);
    assert!(big.left >= M.measure("1,000,000", &typo.axis));
}

#[test]
fn bold_measures_wider() {
    let regular = M.measure("Label", &FontSpec::new(12.0, 400));
    let bold = M.measure("Label", &FontSpec::new(12.0, 700));
    assert!(bold > regular);
    assert_eq!(M.line_height(&font()), 12.0 * 1.2);
}

proptest! {
    #[test]
    fn wrapped_lines_fit_unless_single_char(text in "[a-zA-Z ]{0,80}", width in 20.0f32..300.0) {
        for line in wrap_text(&text, width, &font(), &M) {
            prop_assert!(M.measure(&line, &font()) <= width || line.chars().count() == 1);
        }
    }
}
