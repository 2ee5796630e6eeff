//! Textual measurement export.
//!
//! The row format `Pomiar <index>: <length> mm` is read back by the weld analysis tooling,
//! so labels, the unit suffix and the 4-significant-digit formatting must stay as they are.

use crate::document::Document;
use crate::line::Line;

/// Unit suffix used in every exported length.
pub const UNIT: &str = "mm";
/// Significant digits of exported values.
pub const PRECISION: usize = 4;

pub const MEASUREMENT_LABEL: &str = "Pomiar";
pub const SCALE_LABEL: &str = "Pomiar do skali";
pub const EMPTY_TABLE_TEXT: &str = "No measurements yet";

/// Formats `value` with `precision` significant digits the way ECMAScript's
/// `Number.prototype.toPrecision` does: fixed notation for decimal exponents in
/// `-6..precision`, `d.ddde+x` otherwise.
pub fn format_precision(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    let precision = precision.max(1);
    if value == 0.0 {
        return format!("{:.*}", precision - 1, 0.0);
    }

    let (digits, exponent) = round_half_up(value.abs(), precision);
    let sign = if value < 0.0 { "-" } else { "" };

    if exponent < -6 || exponent >= precision as i32 {
        let (first, rest) = digits.split_at(1);
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{sign}{first}e{exp_sign}{}", exponent.abs())
        } else {
            format!("{sign}{first}.{rest}e{exp_sign}{}", exponent.abs())
        }
    } else if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("{sign}0.{zeros}{digits}")
    } else {
        let (int_part, fraction) = digits.split_at(exponent as usize + 1);
        if fraction.is_empty() {
            format!("{sign}{int_part}")
        } else {
            format!("{sign}{int_part}.{fraction}")
        }
    }
}

/// The first `precision` significant digits of a positive `magnitude`, rounded half up,
/// and the decimal exponent of the first digit.
///
/// Rust's formatter rounds exact ties to even; `toPrecision` rounds them up. Forty digits
/// are enough to tell an exact tie in an `f64` from a near miss.
fn round_half_up(magnitude: f64, precision: usize) -> (String, i32) {
    let scientific = format!("{magnitude:.40e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let mut digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let round_up = digits.get(precision).is_some_and(|&d| d >= 5);
    digits.truncate(precision);
    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
            digits.truncate(precision);
            exponent += 1;
        }
    }
    let digits = digits.into_iter().map(|d| char::from(b'0' + d)).collect();
    (digits, exponent)
}

fn format_units(value: f32) -> String {
    format!("{} {UNIT}", format_precision(f64::from(value), PRECISION))
}

/// One exported measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    /// 1-based position in insertion order.
    pub index: usize,
    pub is_scale: bool,
    /// Calibrated length including the unit, e.g. `"12.35 mm"`.
    pub length: String,
    pub dx: String,
    pub dy: String,
}

impl MeasurementRow {
    fn new(index: usize, line: &Line, units_per_pixel: f32) -> Self {
        Self {
            index,
            is_scale: line.is_scale,
            length: format_units(line.length() * units_per_pixel),
            dx: format_units(line.dx() * units_per_pixel),
            dy: format_units(line.dy() * units_per_pixel),
        }
    }

    pub fn label(&self) -> &'static str {
        if self.is_scale { SCALE_LABEL } else { MEASUREMENT_LABEL }
    }

    pub fn text(&self, show_deltas: bool) -> String {
        let mut text = format!("{} {}: {}", self.label(), self.index, self.length);
        if show_deltas {
            text.push_str(&format!(" (dx={}, dy={})", self.dx, self.dy));
        }
        text
    }
}

/// Snapshot of the committed measurements, in insertion order, ready for display or export.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTable {
    pub units_per_pixel: f32,
    pub show_deltas: bool,
    pub rows: Vec<MeasurementRow>,
}

impl MeasurementTable {
    pub fn collect(document: &Document, show_deltas: bool) -> Self {
        let units_per_pixel = document.units_per_pixel();
        let rows = document
            .lines()
            .enumerate()
            .map(|(i, line)| MeasurementRow::new(i + 1, line, units_per_pixel))
            .collect();
        Self {
            units_per_pixel,
            show_deltas,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn scale_text(&self) -> String {
        format!(
            "Scale: 1 px = {} {UNIT}",
            format_precision(f64::from(self.units_per_pixel), PRECISION)
        )
    }

    /// Row texts for a summary list; a single placeholder line when empty.
    pub fn summary_lines(&self) -> Vec<String> {
        if self.rows.is_empty() {
            return vec![EMPTY_TABLE_TEXT.to_owned()];
        }
        self.rows.iter().map(|row| row.text(self.show_deltas)).collect()
    }

    /// CSV with the scale header, an empty row, then one single-cell row per measurement.
    pub fn to_csv(&self) -> String {
        let mut rows = vec![csv_cell(&self.scale_text()), String::new()];
        rows.extend(self.rows.iter().map(|row| csv_cell(&row.text(self.show_deltas))));
        rows.join("\n")
    }
}

fn csv_cell(value: &str) -> String {
    if value.contains('"') || value.contains(',') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// Parses one exported line into `(index, value)`.
///
/// Accepts `Pomiar <index>: <value> mm` (optionally CSV-quoted) and the older
/// `Pomiar,<index>,<value>,...` column format. Scale lines and anything else yield `None`.
pub fn parse_measurement_line(line: &str) -> Option<(usize, f64)> {
    let line = line.trim_end_matches('\r');

    if let Some(columns) = line.strip_prefix("Pomiar,") {
        let mut parts = columns.split(',');
        let index = parts.next()?.trim().parse().ok()?;
        let value = parts.next()?.trim().parse().ok()?;
        return Some((index, value));
    }

    let rest = line.trim_start_matches('"').strip_prefix("Pomiar ")?;
    let (index, rest) = rest.split_once(": ")?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'.')
        .count();
    if value_len == 0 || !rest[value_len..].starts_with(" mm") {
        return None;
    }
    Some((index.parse().ok()?, rest[..value_len].parse().ok()?))
}

/// Parses every measurement in an exported document, skipping headers and scale lines.
pub fn parse_measurements(content: &str) -> Vec<(usize, f64)> {
    content.lines().filter_map(parse_measurement_line).collect()
}
