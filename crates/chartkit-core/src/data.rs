// File: crates/chartkit-core/src/data.rs
// Summary: Column role resolution and typed access to JSON data rows.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use indexmap::IndexSet;
use serde_json::Value;

use crate::config::{ColumnSpec, Role, Row};
use crate::error::{ChartError, Result};

/// Column names bound to roles for one render.
#[derive(Clone, Debug, Default)]
pub struct RoleMap {
    columns: BTreeMap<Role, ColumnSpec>,
}

impl RoleMap {
    /// Bind `required` and `optional` roles. Every unmapped required role is
    /// reported in a single error; a mapped column absent from every row is an
    /// error too.
    pub fn resolve(columns: &[ColumnSpec], rows: &[Row], required: &[Role], optional: &[Role]) -> Result<Self> {
        let find = |role: Role| columns.iter().find(|c| c.role == role && !c.name.trim().is_empty());

        let missing: Vec<String> = required
            .iter()
            .filter(|r| find(**r).is_none())
            .map(|r| r.as_str().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ChartError::MissingColumns(missing));
        }
        if rows.is_empty() {
            return Err(ChartError::EmptyData);
        }

        let mut map = BTreeMap::new();
        for &role in required.iter().chain(optional) {
            let Some(spec) = find(role) else { continue };
            if !rows.iter().any(|r| r.contains_key(&spec.name)) {
                return Err(ChartError::UnknownColumn { role: role.as_str().into(), name: spec.name.clone() });
            }
            map.insert(role, spec.clone());
        }
        Ok(Self { columns: map })
    }

    pub fn get(&self, role: Role) -> Option<&ColumnSpec> {
        self.columns.get(&role)
    }

    /// Column name for a role the caller listed as required.
    pub fn name(&self, role: Role) -> &str {
        self.columns.get(&role).map(|c| c.name.as_str()).unwrap_or("")
    }

    pub fn unit(&self, role: Role) -> Option<&str> {
        self.columns.get(&role).and_then(|c| c.unit.as_deref())
    }

    pub fn has(&self, role: Role) -> bool {
        self.columns.contains_key(&role)
    }
}

/// Numeric reading of a cell: JSON numbers, or strings such as "1,234.5" and "12%".
pub fn num(row: &Row, column: &str) -> Option<f64> {
    let v = match row.get(column)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| !matches!(c, ',' | '%' | '$' | '€' | '£' | ' ')).collect();
            cleaned.parse::<f64>().ok()
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    v.filter(|v| v.is_finite())
}

/// Display text of a cell; null and missing cells are empty.
pub fn text(row: &Row, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Distinct values of a column in first-seen order.
pub fn categories(rows: &[Row], column: &str) -> Vec<String> {
    let set: IndexSet<String> = rows.iter().map(|r| text(r, column)).filter(|s| !s.is_empty()).collect();
    set.into_iter().collect()
}

/// Sum of `value_col` per (`key_col`) category, in first-seen order.
pub fn totals_by(rows: &[Row], key_col: &str, value_col: &str) -> Vec<(String, f64)> {
    let mut keys: IndexSet<String> = IndexSet::new();
    let mut sums: Vec<f64> = Vec::new();
    for r in rows {
        let k = text(r, key_col);
        if k.is_empty() {
            continue;
        }
        let v = num(r, value_col).unwrap_or(0.0);
        let (idx, inserted) = keys.insert_full(k);
        if inserted {
            sums.push(v);
        } else {
            sums[idx] += v;
        }
    }
    keys.into_iter().zip(sums).collect()
}

/// Pivot rows into a category × group matrix of summed values.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    pub rows: Vec<String>,
    pub cols: Vec<String>,
    /// `values[row][col]`; `None` where no data row exists.
    pub values: Vec<Vec<Option<f64>>>,
}

impl Matrix {
    pub fn pivot(rows: &[Row], row_col: &str, col_col: &str, value_col: &str) -> Self {
        let row_keys = categories(rows, row_col);
        let col_keys = categories(rows, col_col);
        let mut values = vec![vec![None; col_keys.len()]; row_keys.len()];
        for r in rows {
            let (Some(ri), Some(ci)) = (
                row_keys.iter().position(|k| *k == text(r, row_col)),
                col_keys.iter().position(|k| *k == text(r, col_col)),
            ) else {
                continue;
            };
            if let Some(v) = num(r, value_col) {
                let cell: &mut Option<f64> = &mut values[ri][ci];
                *cell = Some(cell.unwrap_or(0.0) + v);
            }
        }
        Self { rows: row_keys, cols: col_keys, values }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values.iter().map(move |r| r[col])
    }
}

/// An x value on a continuous axis: plain number or calendar date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum XValue {
    Number(f64),
    Date(NaiveDate),
}

impl XValue {
    /// Position on a linear scale; dates count days since the common era.
    pub fn as_f64(&self) -> f64 {
        match self {
            XValue::Number(v) => *v,
            XValue::Date(d) => d.num_days_from_ce() as f64,
        }
    }
}

/// Parse a cell as a number, an ISO date (`2024-03-01`), or a year-month (`2024-03`).
pub fn x_value(row: &Row, column: &str) -> Option<XValue> {
    if let Some(Value::Number(n)) = row.get(column) {
        return n.as_f64().map(XValue::Number);
    }
    let s = text(row, column);
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Some(XValue::Date(d));
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some(XValue::Date(d));
    }
    if let Ok(d) = NaiveDate::parse_from_str(&s, "%d/%m/%Y") {
        return Some(XValue::Date(d));
    }
    num(row, column).map(XValue::Number)
}

/// Calendar-aligned ticks between two day numbers: whole years for long spans,
/// month starts otherwise. Roughly `count` of them.
pub fn date_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let (Some(start), Some(end)) = (
        NaiveDate::from_num_days_from_ce_opt(lo.floor() as i32),
        NaiveDate::from_num_days_from_ce_opt(hi.ceil() as i32),
    ) else {
        return Vec::new();
    };
    let count = count.max(1) as i32;
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let step = [1, 2, 3, 6, 12, 24, 60, 120]
        .into_iter()
        .find(|s| months / s <= count)
        .unwrap_or(240);
    let mut out = Vec::new();
    let mut m = start.year() * 12 + start.month0() as i32;
    m = (m + step - 1) / step * step;
    loop {
        let Some(d) = NaiveDate::from_ymd_opt(m.div_euclid(12), m.rem_euclid(12) as u32 + 1, 1) else { break };
        if d > end {
            break;
        }
        if d >= start {
            out.push(d.num_days_from_ce() as f64);
        }
        m += step;
    }
    out
}

/// Tick label for a position on a date axis; coarser for longer spans.
pub fn date_label(days: f64, span_days: f64) -> String {
    let Some(d) = NaiveDate::from_num_days_from_ce_opt(days.round() as i32) else {
        return String::new();
    };
    if span_days > 365.0 * 3.0 {
        d.format("%Y").to_string()
    } else if span_days > 62.0 {
        d.format("%b %Y").to_string()
    } else {
        d.format("%b %-d").to_string()
    }
}
