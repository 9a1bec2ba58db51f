// File: crates/chartkit-core/tests/format.rs
// Purpose: Number abbreviation thresholds, grouping and unit placement.

use chartkit_core::format::{abbreviate, format_number, format_value, thousands};
use chartkit_core::NumberFormat;

#[test]
fn abbreviations_at_thresholds() {
    assert_eq!(abbreviate(999.0, 1), "999");
    assert_eq!(abbreviate(1_000.0, 1), "1K");
    assert_eq!(abbreviate(1_500.0, 1), "1.5K");
    assert_eq!(abbreviate(1_000_000.0, 1), "1M");
    assert_eq!(abbreviate(2_500_000_000.0, 1), "2.5B");
    assert_eq!(abbreviate(1e12, 1), "1T");
    assert_eq!(abbreviate(-1_200.0, 1), "-1.2K");
}

#[test]
fn rounding_promotes_to_next_suffix() {
    assert_eq!(abbreviate(999_950.0, 1), "1M");
}

#[test]
fn thousands_grouping() {
    assert_eq!(thousands(1_234_567.0, 0), "1,234,567");
    assert_eq!(thousands(-1_234.5, 1), "-1,234.5");
    assert_eq!(thousands(12.0, 0), "12");
}

#[test]
fn formats_by_variant() {
    assert_eq!(format_number(3.14159, NumberFormat::Fixed { decimals: 2 }), "3.14");
    assert_eq!(format_number(42.0, NumberFormat::Percent { decimals: 0 }), "42%");
    assert_eq!(format_number(1_500.0, NumberFormat::default()), "1.5K");
}

#[test]
fn units_prefix_suffix_or_attach() {
    let fmt = NumberFormat::Fixed { decimals: 0 };
    assert_eq!(format_value(12.0, fmt, Some("$")), "$12");
    assert_eq!(format_value(-12.0, fmt, Some("€")), "-€12");
    assert_eq!(format_value(12.0, fmt, Some("%")), "12%");
    assert_eq!(format_value(12.0, fmt, Some("TWh")), "12 TWh");
    assert_eq!(format_value(12.0, NumberFormat::Percent { decimals: 0 }, Some("%")), "12%");
    assert_eq!(format_value(12.0, fmt, None), "12");
}

#[test]
fn number_format_deserialises_tagged() {
    let f: NumberFormat = serde_json::from_str(r#"{"type": "thousands", "decimals": 2}"#).expect("parse");
    assert_eq!(f, NumberFormat::Thousands { decimals: 2 });
}
