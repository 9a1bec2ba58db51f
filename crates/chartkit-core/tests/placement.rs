// File: crates/chartkit-core/tests/placement.rs
// Purpose: Label de-collision: ordering, non-overlap, forbidden bands, fallback and determinism.

use chartkit_core::placement::{place_labels, place_points, Band, LabelCost, LabelPoint, PlacementParams};
use proptest::prelude::*;

fn params(extent: (f32, f32)) -> PlacementParams {
    let mut p = PlacementParams::new(extent);
    p.grid = 3.0;
    p.label_height = 5;
    p
}

fn assert_separated(positions: &[f32], label_px: f32) {
    for w in positions.windows(2) {
        assert!(w[1] - w[0] >= label_px - 1e-3, "labels overlap: {positions:?}");
    }
}

#[test]
fn close_pair_is_pushed_apart_far_point_stays() {
    let p = params((0.0, 300.0));
    let out = place_labels(&[10.0, 15.0, 200.0], &[], &p);
    assert!(out.optimal);
    assert_eq!(out.positions.len(), 3);
    assert_separated(&out.positions, p.label_px());
    assert!((out.positions[2] - 200.0).abs() <= p.grid, "far label moved: {:?}", out.positions);
}

#[test]
fn single_point_stays_within_one_cell() {
    let p = params((0.0, 300.0));
    let out = place_labels(&[100.0], &[], &p);
    assert_eq!(out.positions.len(), 1);
    assert!((out.positions[0] - 100.0).abs() <= p.grid);
}

#[test]
fn empty_input_gives_empty_output() {
    let out = place_labels(&[], &[], &params((0.0, 100.0)));
    assert!(out.positions.is_empty());
}

#[test]
fn labels_avoid_forbidden_band() {
    let p = params((0.0, 300.0));
    let band = Band::new(90.0, 120.0);
    let out = place_labels(&[100.0, 110.0], &[band], &p);
    let half = p.label_px() * 0.5;
    for y in &out.positions {
        assert!(!band.overlaps(y - half + 1e-3, y + half - 1e-3), "label at {y} touches {band:?}");
    }
    assert_separated(&out.positions, p.label_px());
}

#[test]
fn unsorted_input_keeps_caller_order() {
    let p = params((0.0, 300.0));
    let sorted = place_labels(&[10.0, 15.0, 200.0], &[], &p);
    let shuffled = place_labels(&[200.0, 10.0, 15.0], &[], &p);
    assert_eq!(shuffled.positions, vec![sorted.positions[2], sorted.positions[0], sorted.positions[1]]);
}

#[test]
fn identical_inputs_identical_output() {
    let p = params((0.0, 400.0));
    let ys = [40.0, 41.0, 42.0, 150.0, 152.0, 380.0];
    let bands = [Band::new(300.0, 320.0)];
    assert_eq!(place_labels(&ys, &bands, &p), place_labels(&ys, &bands, &p));
}

#[test]
fn too_little_room_falls_back_to_greedy() {
    let p = params((0.0, 30.0));
    let out = place_labels(&[5.0, 6.0, 7.0, 8.0, 9.0], &[], &p);
    assert!(!out.optimal);
    assert_eq!(out.positions.len(), 5);
    assert_separated(&out.positions, p.label_px());
}

#[test]
fn greedy_fallback_moves_below_bands() {
    let mut p = params((0.0, 30.0));
    p.spacing = 2.0;
    let band = Band::new(0.0, 12.0);
    let out = place_labels(&[5.0, 6.0, 7.0, 8.0, 9.0], &[band], &p);
    assert!(!out.optimal);
    let half = p.label_px() * 0.5;
    assert!(out.positions.iter().all(|y| y - half >= band.bottom - 1e-3), "{:?}", out.positions);
    assert_separated(&out.positions, p.label_px() + p.spacing);
}

#[test]
fn protection_radius_keeps_labels_off_other_anchors() {
    let mut p = params((0.0, 300.0));
    p.protect_radius = 3;
    let ys = [60.0, 66.0];
    let out = place_labels(&ys, &[], &p);
    assert!(out.optimal);
    let half = p.label_px() * 0.5;
    let covers = |c: f32, y: f32| y >= c - half && y < c + half;
    assert!(!covers(out.positions[0], ys[1]), "{:?}", out.positions);
    assert!(!covers(out.positions[1], ys[0]), "{:?}", out.positions);

    p.protect_radius = 0;
    let free = place_labels(&ys, &[], &p);
    assert_separated(&free.positions, p.label_px());
}

#[test]
fn squared_cost_still_separates() {
    let mut p = params((0.0, 300.0));
    p.cost = LabelCost::Squared;
    let out = place_labels(&[50.0, 50.0, 150.0, 152.0], &[], &p);
    assert!(out.optimal);
    assert_separated(&out.positions, p.label_px());
}

#[test]
fn label_points_place_by_y() {
    let p = params((0.0, 300.0));
    let pts: Vec<LabelPoint> = [(10.0, "a"), (15.0, "b")]
        .iter()
        .map(|&(y, l)| LabelPoint { x: 100.0, y, value: f64::from(y), label: l.into() })
        .collect();
    let ys = place_points(&pts, &[], &p);
    assert_eq!(ys.len(), 2);
    assert_separated(&ys, p.label_px());
}

#[test]
fn label_cost_parses_lowercase() {
    let c: LabelCost = serde_json::from_str("\"squared\"").expect("parse");
    assert_eq!(c, LabelCost::Squared);
    assert_eq!(LabelCost::default(), LabelCost::Linear);
}

#[test]
fn far_off_grid_anchors_are_placed_without_overflow() {
    let p = params((0.0, 300.0));
    let out = place_labels(&[-1.0e20, 100.0], &[], &p);
    assert!(out.optimal);
    assert_eq!(out.positions.len(), 2);
    assert!(out.positions.iter().all(|y| (0.0..=300.0).contains(y)), "{:?}", out.positions);
    assert_separated(&out.positions, p.label_px());
    assert!((out.positions[1] - 100.0).abs() <= p.grid);

    let out = place_labels(&[100.0, 1.0e20, f32::MAX], &[], &p);
    assert_eq!(out.positions.len(), 3);
    assert!(out.positions.iter().all(|y| y.is_finite()));

    let mut wide = params((0.0, 300.0));
    wide.protect_radius = usize::MAX;
    assert_eq!(place_labels(&[-1.0e20, 50.0, 120.0], &[], &wide).positions.len(), 3);
}

#[test]
fn oversized_grids_use_the_greedy_pass() {
    for extent in [(0.0, 1.0e9), (0.0, f32::INFINITY)] {
        let p = params(extent);
        let out = place_labels(&[10.0, 15.0, 200.0], &[], &p);
        assert!(!out.optimal, "{extent:?}");
        assert_eq!(out.positions.len(), 3);
        assert_separated(&out.positions, p.label_px());
        assert_eq!(out.positions[0], 10.0);
    }
}

proptest! {
    #[test]
    fn placements_are_ordered_and_disjoint(
        mut ys in prop::collection::vec(0.0f32..300.0, 1..12),
        squared in any::<bool>(),
        band_top in 0.0f32..300.0,
        band_len in 5.0f32..40.0,
    ) {
        ys.sort_by(f32::total_cmp);
        let mut p = params((0.0, 400.0));
        p.cost = if squared { LabelCost::Squared } else { LabelCost::Linear };
        let band = Band::new(band_top, band_top + band_len);
        let out = place_labels(&ys, &[band], &p);
        prop_assert_eq!(out.positions.len(), ys.len());
        let half = p.label_px() * 0.5;
        for w in out.positions.windows(2) {
            prop_assert!(w[1] >= w[0]);
            prop_assert!(w[1] - w[0] >= p.label_px() - 1e-3);
        }
        for y in &out.positions {
            prop_assert!(!band.overlaps(y - half + 1e-3, y + half - 1e-3));
        }
        if out.optimal {
            // Each label stays between its neighbours' anchors, to within a cell.
            for i in 0..ys.len() {
                if i + 1 < ys.len() {
                    prop_assert!(out.positions[i] <= ys[i + 1] + p.grid, "{:?} vs {:?}", out.positions, ys);
                }
                if i > 0 {
                    prop_assert!(out.positions[i] >= ys[i - 1] - p.grid, "{:?} vs {:?}", out.positions, ys);
                }
            }
        }
    }

    #[test]
    fn any_finite_anchors_are_placed(
        ys in prop::collection::vec(-1.0e30f32..1.0e30, 1..8),
        radius in 0usize..200,
    ) {
        let mut p = params((0.0, 300.0));
        p.protect_radius = radius;
        let out = place_labels(&ys, &[], &p);
        prop_assert_eq!(out.positions.len(), ys.len());
    }
}
