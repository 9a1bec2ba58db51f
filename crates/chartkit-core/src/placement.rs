// File: crates/chartkit-core/src/placement.rs
// Summary: Vertical label de-collision: grid DP with a greedy fallback.
//
// Labels are placed on a grid of `grid`-pixel cells covering `extent`. Label i
// occupies `label_height` consecutive cells centred on cell j_i. A placement is
// feasible when labels keep the anchors' order without overlapping, stay
// between the neighbouring anchors' cells, fit inside the grid and avoid
// blocked cells (forbidden bands, plus cells protected around other anchors).
// Among feasible placements the DP minimises the summed displacement cost.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Upper bound on DP states (labels × cells); larger problems go greedy.
const MAX_DP_STATES: usize = 1 << 22;

/// Per-label cost of moving away from the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelCost {
    #[default]
    Linear,
    Squared,
}

impl LabelCost {
    #[inline]
    fn of(self, displacement: i64) -> f64 {
        let d = displacement as f64;
        match self {
            LabelCost::Linear => d.abs(),
            LabelCost::Squared => d * d,
        }
    }
}

/// A series end (or start) point that needs a text label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPoint {
    pub x: f32,
    pub y: f32,
    pub value: f64,
    pub label: String,
}

/// Vertical pixel range no label may touch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub top: f32,
    pub bottom: f32,
}

impl Band {
    pub fn new(a: f32, b: f32) -> Self {
        Self { top: a.min(b), bottom: a.max(b) }
    }

    #[inline]
    pub fn overlaps(&self, top: f32, bottom: f32) -> bool {
        top < self.bottom && bottom > self.top
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementParams {
    /// Cell size in pixels.
    pub grid: f32,
    /// Label height in cells.
    pub label_height: usize,
    /// Cells closer than this to another label's anchor are blocked; 0 disables.
    pub protect_radius: usize,
    pub cost: LabelCost,
    /// Vertical pixel range labels may use.
    pub extent: (f32, f32),
    /// Greedy fallback: shift from the anchor.
    pub offset: f32,
    /// Greedy fallback: extra gap between consecutive labels.
    pub spacing: f32,
}

impl PlacementParams {
    pub fn new(extent: (f32, f32)) -> Self {
        Self { grid: 3.0, label_height: 5, protect_radius: 0, cost: LabelCost::Linear, extent, offset: 0.0, spacing: 1.0 }
    }

    /// Label height in cells for a given pixel height.
    pub fn cells_for(&self, px: f32) -> usize {
        (px / self.grid.max(0.5)).ceil().max(1.0) as usize
    }

    pub fn label_px(&self) -> f32 {
        self.label_height.max(1) as f32 * self.grid.max(0.5)
    }
}

/// Label centres in input order, plus whether the DP found them.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub positions: Vec<f32>,
    pub optimal: bool,
}

/// Place one label per anchor y. Input order is free; the result follows it.
pub fn place_labels(anchors: &[f32], forbidden: &[Band], params: &PlacementParams) -> Placement {
    if anchors.is_empty() {
        return Placement { positions: Vec::new(), optimal: true };
    }
    let mut order: Vec<usize> = (0..anchors.len()).collect();
    order.sort_by(|&a, &b| anchors[a].total_cmp(&anchors[b]));
    let ys: Vec<f32> = order.iter().map(|&i| anchors[i]).collect();

    let (sorted, optimal) = match solve(&ys, forbidden, params) {
        Some(p) => (p, true),
        None => {
            warn!("label placement: no feasible grid assignment for {} labels, using greedy pass", ys.len());
            (greedy(&ys, forbidden, params), false)
        }
    };

    let mut positions = vec![0.0; anchors.len()];
    for (slot, &orig) in order.iter().enumerate() {
        positions[orig] = sorted[slot];
    }
    Placement { positions, optimal }
}

/// Convenience over `place_labels` for labelled points.
pub fn place_points(points: &[LabelPoint], forbidden: &[Band], params: &PlacementParams) -> Vec<f32> {
    let ys: Vec<f32> = points.iter().map(|p| p.y).collect();
    place_labels(&ys, forbidden, params).positions
}

struct Grid {
    origin: f32,
    cell: f32,
    cells: usize,
    height: usize,
    half: usize,
}

impl Grid {
    fn center_px(&self, j: usize) -> f32 {
        let top = (j - self.half) as f32 * self.cell;
        self.origin + top + self.height as f32 * self.cell * 0.5
    }
}

fn solve(ys: &[f32], forbidden: &[Band], params: &PlacementParams) -> Option<Vec<f32>> {
    let (e0, e1) = params.extent;
    let cell = params.grid.max(0.5);
    if !(e1 > e0) || ys.iter().any(|y| !y.is_finite()) {
        return None;
    }
    let height = params.label_height.max(1);
    let g = Grid { origin: e0, cell, cells: ((e1 - e0) / cell).floor() as usize, height, half: height / 2 };
    let n = ys.len();
    if g.cells < height.saturating_mul(n) {
        return None;
    }
    if g.cells.saturating_mul(n) > MAX_DP_STATES {
        debug!("label placement: {n} labels on {} cells is too large for the grid pass", g.cells);
        return None;
    }

    // Prefix count of cells covered by a forbidden band.
    let mut blocked = vec![0usize; g.cells + 1];
    for k in 0..g.cells {
        let top = e0 + k as f32 * cell;
        let hit = forbidden.iter().any(|b| b.overlaps(top, top + cell));
        blocked[k + 1] = blocked[k] + usize::from(hit);
    }
    // Anchors far outside the grid behave like ones just past its edge.
    let reach = g.cells as f64;
    let anchor_cell: Vec<i64> = ys
        .iter()
        .map(|y| ((f64::from(*y) - f64::from(e0)) / f64::from(cell)).floor().clamp(-reach, 2.0 * reach) as i64)
        .collect();
    let radius = params.protect_radius.min(g.cells) as i64;

    let span_free = |i: usize, j: usize| -> bool {
        let top = j - g.half;
        let bottom = top + height;
        if blocked[bottom] - blocked[top] > 0 {
            return false;
        }
        if radius == 0 {
            return true;
        }
        // Protected cells of anchor k: |cell - p| < radius.
        anchor_cell.iter().enumerate().all(|(k, &p)| {
            k == i || p + radius <= top as i64 || p - radius + 1 >= bottom as i64
        })
    };

    let lo_j = g.half;
    let hi_j = g.cells - height + g.half;
    let inf = f64::INFINITY;
    let mut dp = vec![vec![inf; g.cells]; n];
    let mut parent = vec![vec![usize::MAX; g.cells]; n];

    for i in 0..n {
        let min_j = if i > 0 { anchor_cell[i - 1].max(lo_j as i64) } else { lo_j as i64 };
        let max_j = if i + 1 < n { anchor_cell[i + 1].min(hi_j as i64) } else { hi_j as i64 };
        if min_j > max_j {
            return None;
        }

        // Running minimum of dp[i-1][k] for k <= j - height.
        let mut best = inf;
        let mut best_k = usize::MAX;
        let mut next_k = 0usize;
        for j in min_j as usize..=max_j as usize {
            if i > 0 {
                while next_k + height <= j {
                    if dp[i - 1][next_k] < best {
                        best = dp[i - 1][next_k];
                        best_k = next_k;
                    }
                    next_k += 1;
                }
                if !best.is_finite() {
                    continue;
                }
            }
            if !span_free(i, j) {
                continue;
            }
            let base = if i > 0 { best } else { 0.0 };
            dp[i][j] = base + params.cost.of(j as i64 - anchor_cell[i]);
            parent[i][j] = best_k;
        }
    }

    let mut end = usize::MAX;
    let mut end_cost = inf;
    for (j, &c) in dp[n - 1].iter().enumerate() {
        if c < end_cost {
            end_cost = c;
            end = j;
        }
    }
    if !end_cost.is_finite() {
        return None;
    }
    debug!("label placement: {} labels on {} cells, cost {end_cost}", n, g.cells);

    let mut cells = vec![0usize; n];
    let mut j = end;
    for i in (0..n).rev() {
        cells[i] = j;
        j = parent[i][j];
    }
    Some(cells.into_iter().map(|j| g.center_px(j)).collect())
}

/// Top-down pass: each label sits at its anchor (plus offset) or just below the
/// previous label, clipped toward the next anchor, then moved below any
/// forbidden band it touches. Consecutive labels never overlap.
fn greedy(ys: &[f32], forbidden: &[Band], params: &PlacementParams) -> Vec<f32> {
    let label_px = params.label_px();
    let half = label_px * 0.5;
    let spacing = params.spacing.max(0.0);
    let mut bands = forbidden.to_vec();
    bands.sort_by(|a, b| a.top.total_cmp(&b.top));

    let mut out = Vec::with_capacity(ys.len());
    let mut prev: Option<f32> = None;
    for (i, &y) in ys.iter().enumerate() {
        let floor = prev.map(|p| p + label_px + spacing);
        let mut c = y + params.offset;
        if let Some(f) = floor { c = c.max(f); }
        if let Some(&next) = ys.get(i + 1) { c = c.min(next); }
        if let Some(f) = floor { c = c.max(f); }
        for band in &bands {
            if band.overlaps(c - half, c + half) {
                c = band.bottom + half;
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}
