// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of numeric attribute values.
//!
//! Absolute units are converted to pixels at 96 pixels per inch. Percentages are not resolved
//! against any reference length: `50%` is simply `50`.

use imgshift_common::kurbo::Point;

const UNITS: [(&str, f64); 6] = [
    ("px", 1.0),
    ("pt", 96.0 / 72.0),
    ("pc", 16.0),
    ("mm", 96.0 / 25.4),
    ("cm", 96.0 / 2.54),
    ("in", 96.0),
];

/// Parse a plain number, ignoring surrounding whitespace.
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

/// Parse a length with an optional unit suffix into pixels.
///
/// Returns `None` for values that are not a number followed by a known unit.
pub fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    if let Some(number) = value.strip_suffix('%') {
        return parse_number(number);
    }
    for (unit, factor) in UNITS {
        if let Some(number) = value.strip_suffix(unit) {
            return parse_number(number).map(|n| n * factor);
        }
    }
    parse_number(value)
}

/// Parse a length, substituting zero for invalid values.
pub fn length_or_zero(value: &str) -> f64 {
    parse_length(value).unwrap_or(0.0)
}

/// Parse a number or percentage as a fraction, e.g. `0.5` or `50%`.
pub fn parse_fraction(value: &str) -> Option<f64> {
    let value = value.trim();
    match value.strip_suffix('%') {
        Some(number) => parse_number(number).map(|n| n / 100.0),
        None => parse_number(value),
    }
}

/// Parse an opacity-like value, clamped to `[0, 1]`.
pub fn parse_opacity(value: &str) -> Option<f64> {
    parse_fraction(value).map(|v| v.clamp(0.0, 1.0))
}

/// Split a list of numbers separated by whitespace and/or commas.
///
/// Entries that are not numbers are skipped.
pub fn parse_number_list(value: &str) -> Vec<f64> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .filter_map(parse_number)
        .collect()
}

/// Parse the `points` attribute of polylines and polygons.
///
/// A trailing odd coordinate is ignored.
pub fn parse_points(value: &str) -> Vec<Point> {
    parse_number_list(value)
        .chunks_exact(2)
        .map(|xy| Point::new(xy[0], xy[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn absolute_units() {
        assert_eq!(parse_length("12"), Some(12.0));
        assert_eq!(parse_length(" 12px "), Some(12.0));
        assert_eq!(parse_length("1in"), Some(96.0));
        assert_eq!(parse_length("2pc"), Some(32.0));
        assert!(close(parse_length("72pt").unwrap(), 96.0));
        assert!(close(parse_length("25.4mm").unwrap(), 96.0));
        assert!(close(parse_length("2.54cm").unwrap(), 96.0));
    }

    #[test]
    fn percentages_are_plain_numbers() {
        assert_eq!(parse_length("50%"), Some(50.0));
    }

    #[test]
    fn invalid_lengths() {
        assert_eq!(parse_length("10em"), None);
        assert_eq!(parse_length("abc"), None);
        assert_eq!(parse_length(""), None);
        assert_eq!(length_or_zero("wide"), 0.0);
    }

    #[test]
    fn fractions_and_opacity() {
        assert_eq!(parse_fraction("50%"), Some(0.5));
        assert_eq!(parse_fraction("0.25"), Some(0.25));
        assert_eq!(parse_opacity("1.5"), Some(1.0));
        assert_eq!(parse_opacity("-3"), Some(0.0));
        assert_eq!(parse_opacity("half"), None);
    }

    #[test]
    fn point_lists() {
        assert_eq!(
            parse_points("0,0 10,0\n10 10,  0 10"),
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ]
        );
        assert_eq!(parse_points("1 2 3"), vec![Point::new(1.0, 2.0)]);
        assert!(parse_points("").is_empty());
    }
}
