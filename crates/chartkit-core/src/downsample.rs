// File: crates/chartkit-core/src/downsample.rs
// Summary: Largest-Triangle-Three-Buckets thinning for dense line series.

/// Keep at most `threshold` points of `points` (sorted by x) while preserving
/// the visual shape. First and last points always survive.
pub fn lttb(points: &[(f64, f64)], threshold: usize) -> Vec<(f64, f64)> {
    let n = points.len();
    if threshold >= n || n <= 2 {
        return points.to_vec();
    }
    match threshold {
        0 => return Vec::new(),
        1 => return vec![points[0]],
        2 => return vec![points[0], points[n - 1]],
        _ => {}
    }

    let every = (n - 2) as f64 / (threshold - 2) as f64;
    let bucket = |b: usize| -> std::ops::Range<usize> {
        let start = (b as f64 * every).floor() as usize + 1;
        let end = (((b + 1) as f64 * every).floor() as usize + 1).min(n - 1);
        start..end.max(start + 1)
    };

    let mut out = Vec::with_capacity(threshold);
    out.push(points[0]);
    let mut prev = points[0];
    for b in 0..threshold - 2 {
        // Average of the following bucket, or the last point for the final bucket.
        let next = if b + 3 <= threshold - 1 { bucket(b + 1) } else { n - 1..n };
        let len = next.len().max(1) as f64;
        let (ax, ay) = points[next].iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.0, sy + p.1));
        let avg = (ax / len, ay / len);

        let pick = points[bucket(b)]
            .iter()
            .copied()
            .max_by(|p, q| triangle(prev, *p, avg).total_cmp(&triangle(prev, *q, avg)))
            .unwrap_or(prev);
        out.push(pick);
        prev = pick;
    }
    out.push(points[n - 1]);
    out
}

fn triangle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    ((a.0 - c.0) * (b.1 - a.1) - (a.0 - b.0) * (c.1 - a.1)).abs()
}
