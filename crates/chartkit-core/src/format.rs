// File: crates/chartkit-core/src/format.rs
// Summary: Number formatting rules (abbreviation, fixed, percent, thousands) and unit placement.

use serde::{Deserialize, Serialize};

/// How numeric values are printed in tick labels, data labels and legends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NumberFormat {
    /// 1.2K, 3.4M, 5B, 1T.
    Abbreviated { decimals: u8 },
    Fixed { decimals: u8 },
    /// Value is already expressed in percent units.
    Percent { decimals: u8 },
    /// 1,234,567 with the given decimals.
    Thousands { decimals: u8 },
}

impl Default for NumberFormat {
    fn default() -> Self { NumberFormat::Abbreviated { decimals: 1 } }
}

const SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Abbreviate with K/M/B/T suffixes; trailing zeros are trimmed.
pub fn abbreviate(v: f64, decimals: u8) -> String {
    if !v.is_finite() {
        return String::from("–");
    }
    let abs = v.abs();
    for (i, &(threshold, suffix)) in SUFFIXES.iter().enumerate() {
        if abs < threshold {
            continue;
        }
        let mut scaled = round_to(abs / threshold, decimals);
        let mut suffix = suffix;
        // 999_950 at one decimal rounds to 1000K; promote to 1M.
        if scaled >= 1000.0 && i > 0 {
            scaled = round_to(abs / SUFFIXES[i - 1].0, decimals);
            suffix = SUFFIXES[i - 1].1;
        }
        let sign = if v < 0.0 { "-" } else { "" };
        return format!("{sign}{}{suffix}", trim_zeros(&format!("{:.*}", decimals as usize, scaled)));
    }
    trim_zeros(&format!("{:.*}", decimals as usize, v))
}

/// Group the integer part with commas.
pub fn thousands(v: f64, decimals: u8) -> String {
    if !v.is_finite() {
        return String::from("–");
    }
    let s = format!("{:.*}", decimals as usize, v.abs());
    let (int, frac) = match s.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (s.clone(), None),
    };
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if v < 0.0 && s.chars().any(|c| c.is_ascii_digit() && c != '0') { "-" } else { "" };
    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_number(v: f64, fmt: NumberFormat) -> String {
    match fmt {
        NumberFormat::Abbreviated { decimals } => abbreviate(v, decimals),
        NumberFormat::Fixed { decimals } => format!("{:.*}", decimals as usize, v),
        NumberFormat::Percent { decimals } => format!("{:.*}%", decimals as usize, v),
        NumberFormat::Thousands { decimals } => thousands(v, decimals),
    }
}

/// Format with a unit: currency symbols prefix, `%` attaches, words follow after a space.
pub fn format_value(v: f64, fmt: NumberFormat, unit: Option<&str>) -> String {
    let body = format_number(v, fmt);
    let unit = match unit.map(str::trim) {
        Some(u) if !u.is_empty() => u,
        _ => return body,
    };
    if matches!(fmt, NumberFormat::Percent { .. }) && unit == "%" {
        return body;
    }
    if is_currency(unit) {
        match body.strip_prefix('-') {
            Some(rest) => format!("-{unit}{rest}"),
            None => format!("{unit}{body}"),
        }
    } else if unit == "%" {
        format!("{body}%")
    } else {
        format!("{body} {unit}")
    }
}

fn is_currency(unit: &str) -> bool {
    matches!(unit, "$" | "€" | "£" | "¥" | "₹" | "US$")
}

fn round_to(v: f64, decimals: u8) -> f64 {
    let m = 10f64.powi(decimals as i32);
    (v * m).round() / m
}

fn trim_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    let t = s.trim_end_matches('0').trim_end_matches('.');
    if t == "-0" { "0".to_string() } else { t.to_string() }
}
