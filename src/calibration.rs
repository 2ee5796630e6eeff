//! Deriving the units-per-pixel scale from a line of known real-world length.

use log::info;

use crate::document::Document;
use crate::error::CalibrationError;
use crate::export::format_precision;
use crate::line::LineId;

/// A pending "how long is this line?" prompt, produced by double-clicking a line.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationRequest {
    pub line: LineId,
    /// The line's current calibrated length, offered as the default answer.
    pub current_text: String,
}

impl CalibrationRequest {
    /// Builds a request for `line`, or `None` if the line is not in the document.
    pub fn for_line(document: &Document, line: LineId) -> Option<Self> {
        let committed = document.line(line)?;
        Some(Self {
            line,
            current_text: format_precision(f64::from(document.calibrated_length(committed)), 4),
        })
    }
}

/// Reads the longest numeric prefix of `input` after leading whitespace, so `"25 mm"` is 25.
fn leading_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - fraction_start;
        end = fraction_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    // An exponent only counts if at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].trim_end_matches('.').parse::<f64>().ok()
}

/// Validates a user-supplied real-world length.
pub fn parse_length(input: &str) -> Result<f32, CalibrationError> {
    let value =
        leading_number(input).ok_or_else(|| CalibrationError::NotANumber(input.to_owned()))?;
    if !value.is_finite() {
        return Err(CalibrationError::NotFinite);
    }
    let value = value as f32;
    if !value.is_finite() {
        return Err(CalibrationError::NotFinite);
    }
    if value <= 0.0 {
        return Err(CalibrationError::NotPositive(value));
    }
    Ok(value)
}

/// Applies the user's answer to `request`, returning the new units per pixel.
///
/// Answering with the unchanged default text keeps the scale as is, so repeatedly
/// confirming the prompt does not accumulate rounding drift.
pub fn apply(
    document: &mut Document,
    request: &CalibrationRequest,
    input: &str,
) -> Result<f32, CalibrationError> {
    if input == request.current_text {
        return Err(CalibrationError::Unchanged);
    }
    let supplied = parse_length(input)?;
    let line = document
        .line(request.line)
        .ok_or(CalibrationError::MissingLine(request.line))?;
    let pixels = line.length();
    if pixels <= 0.0 {
        return Err(CalibrationError::DegenerateLine(request.line));
    }

    let units_per_pixel = supplied / pixels;
    if !units_per_pixel.is_finite() || units_per_pixel <= 0.0 {
        return Err(CalibrationError::NotFinite);
    }
    document.set_units_per_pixel(units_per_pixel);
    info!(
        "Calibrated with line {}: {} px = {}, {} per pixel",
        request.line, pixels, supplied, units_per_pixel
    );
    Ok(units_per_pixel)
}
