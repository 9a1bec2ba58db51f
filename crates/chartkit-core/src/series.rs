// File: crates/chartkit-core/src/series.rs
// Summary: Named XY series grouped from rows by the `group` role.

use indexmap::IndexMap;

use crate::config::Row;
use crate::data::{num, text, x_value, XValue};
use crate::downsample::lttb;
use crate::error::{ChartError, Result};
use crate::scale::extent;

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    /// (x, y) sorted by x.
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), points: Vec::new() }
    }

    pub fn first(&self) -> Option<(f64, f64)> { self.points.first().copied() }
    pub fn last(&self) -> Option<(f64, f64)> { self.points.last().copied() }

    /// Value at `x`, if the series has a point there.
    pub fn at(&self, x: f64) -> Option<f64> {
        self.points.iter().find(|p| (p.0 - x).abs() < 1e-9).map(|p| p.1)
    }

    /// Thin to at most `max_points` with LTTB; shorter series are untouched.
    pub fn downsample(&self, max_points: usize) -> Self {
        if self.points.len() <= max_points || max_points < 3 {
            return self.clone();
        }
        Self { name: self.name.clone(), points: lttb(&self.points, max_points) }
    }
}

/// Series set with the x-axis kind it was parsed as.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesSet {
    pub series: Vec<Series>,
    pub dates: bool,
}

impl SeriesSet {
    /// Group rows into series. Without a group column all rows form one series
    /// named `default_name`. Rows with unparseable x or y are skipped.
    pub fn from_rows(rows: &[Row], x_col: &str, y_col: &str, group_col: Option<&str>, default_name: &str) -> Result<Self> {
        let mut groups: IndexMap<String, Series> = IndexMap::new();
        let mut dates = false;
        for row in rows {
            let (Some(x), Some(y)) = (x_value(row, x_col), num(row, y_col)) else { continue };
            dates |= matches!(x, XValue::Date(_));
            let name = match group_col {
                Some(g) => text(row, g),
                None => default_name.to_string(),
            };
            if name.is_empty() {
                continue;
            }
            groups.entry(name.clone()).or_insert_with(|| Series::new(name)).points.push((x.as_f64(), y));
        }
        if groups.is_empty() {
            return Err(ChartError::NoNumericValues(y_col.to_string()));
        }
        let series = groups
            .into_values()
            .map(|mut s| {
                s.points.sort_by(|a, b| a.0.total_cmp(&b.0));
                s
            })
            .collect();
        Ok(Self { series, dates })
    }

    pub fn x_extent(&self) -> Option<(f64, f64)> {
        extent(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)))
    }

    pub fn y_extent(&self) -> Option<(f64, f64)> {
        extent(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)))
    }

    /// Distinct x values across all series, ascending.
    pub fn xs(&self) -> Vec<f64> {
        let mut xs: Vec<f64> = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)).collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        xs
    }
}
