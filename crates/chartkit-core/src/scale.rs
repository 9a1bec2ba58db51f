// File: crates/chartkit-core/src/scale.rs
// Summary: Linear and band scales, nice tick generation and extent helpers.

/// Continuous domain → pixel range. The range may be inverted (y grows down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub r0: f32,
    pub r1: f32,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        let (mut d0, mut d1) = domain;
        if (d1 - d0).abs() < 1e-12 {
            d0 -= 0.5;
            d1 += 0.5;
        }
        Self { d0, d1, r0: range.0, r1: range.1 }
    }

    #[inline]
    pub fn scale(&self, v: f64) -> f32 {
        let t = (v - self.d0) / (self.d1 - self.d0);
        self.r0 + t as f32 * (self.r1 - self.r0)
    }

    #[inline]
    pub fn invert(&self, px: f32) -> f64 {
        let span = (self.r1 - self.r0) as f64;
        if span.abs() < 1e-12 {
            return self.d0;
        }
        self.d0 + ((px - self.r0) as f64 / span) * (self.d1 - self.d0)
    }

    /// Extend the domain outward to multiples of the tick step.
    pub fn nice(mut self, count: usize) -> Self {
        let step = tick_step(self.d0.min(self.d1), self.d0.max(self.d1), count);
        if step > 0.0 && step.is_finite() {
            if self.d0 <= self.d1 {
                self.d0 = (self.d0 / step).floor() * step;
                self.d1 = (self.d1 / step).ceil() * step;
            } else {
                self.d0 = (self.d0 / step).ceil() * step;
                self.d1 = (self.d1 / step).floor() * step;
            }
        }
        self
    }

    /// Round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = (self.d0.min(self.d1), self.d0.max(self.d1));
        let step = tick_step(lo, hi, count);
        if step <= 0.0 || !step.is_finite() {
            return vec![lo, hi];
        }
        let start = (lo / step - 1e-9).ceil() as i64;
        let stop = (hi / step + 1e-9).floor() as i64;
        // Strip float noise such as 0.30000000000000004.
        let m = 10f64.powi((-step.log10().floor()).max(0.0) as i32);
        (start..=stop).map(|i| (i as f64 * step * m).round() / m).collect()
    }
}

/// Step of 1, 2 or 5 × 10ⁿ giving about `count` intervals.
pub fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let span = hi - lo;
    if span <= 0.0 || !span.is_finite() {
        return 0.0;
    }
    let raw = span / count.max(1) as f64;
    let power = 10f64.powf(raw.log10().floor());
    let err = raw / power;
    let mult = if err >= 7.07 { 10.0 } else if err >= 3.16 { 5.0 } else if err >= 1.41 { 2.0 } else { 1.0 };
    mult * power
}

/// Categories → evenly spaced bands.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    pub domain: Vec<String>,
    pub r0: f32,
    pub r1: f32,
    pub padding_inner: f32,
    pub padding_outer: f32,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f32, f32), padding: f32) -> Self {
        let p = padding.clamp(0.0, 0.95);
        Self { domain, r0: range.0, r1: range.1, padding_inner: p, padding_outer: p * 0.5 }
    }

    fn step(&self) -> f32 {
        let n = self.domain.len() as f32;
        let denom = (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        (self.r1 - self.r0) / denom
    }

    pub fn bandwidth(&self) -> f32 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Full slot width including inner padding.
    pub fn step_width(&self) -> f32 {
        self.step()
    }

    /// Start of the band for index `i`.
    pub fn position_at(&self, i: usize) -> f32 {
        self.r0 + self.step() * (self.padding_outer + i as f32)
    }

    pub fn position(&self, category: &str) -> Option<f32> {
        self.domain.iter().position(|c| c == category).map(|i| self.position_at(i))
    }

    pub fn center_at(&self, i: usize) -> f32 {
        self.position_at(i) + self.bandwidth() * 0.5
    }
}

/// Min/max of finite values with a guaranteed non-zero span.
pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    if (hi - lo).abs() < 1e-9 {
        hi = lo + 1.0;
    }
    Some((lo, hi))
}

/// Value-axis domain that includes zero unless overridden.
pub fn value_domain(lo: f64, hi: f64, y_min: Option<f64>, y_max: Option<f64>) -> (f64, f64) {
    let lo = y_min.unwrap_or(lo.min(0.0));
    let hi = y_max.unwrap_or(hi.max(0.0));
    if (hi - lo).abs() < 1e-9 { (lo, lo + 1.0) } else { (lo, hi) }
}
