//! Clamp-on-input for numeric fields.

use crate::ui::dom::{Document, ElementId};

/// Parse the leading decimal number of `text`, ignoring leading whitespace
/// and any trailing garbage (`"10abc"` is `10`).
pub fn parse_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse().ok();
    }

    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Shortest rendering, as a number is written back into a field.
///
/// Magnitudes outside `[1e-6, 1e21)` use exponent form with a signed
/// exponent (`1e+21`, `1e-7`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude.is_finite() && !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{value:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    value.to_string()
}

/// Clamp the field's value into its `[min, max]` attributes.
///
/// Missing or unparsable bounds leave that side open; an unparsable value
/// is left alone.
pub fn clamp_input(doc: &mut Document, input: ElementId) {
    let min = doc.attribute(input, "min").and_then(parse_float);
    let max = doc.attribute(input, "max").and_then(parse_float);
    let Some(value) = parse_float(doc.value(input)) else {
        return;
    };

    if let Some(min) = min.filter(|min| value < *min) {
        doc.set_value(input, format_number(min));
    }
    if let Some(max) = max.filter(|max| value > *max) {
        doc.set_value(input, format_number(max));
    }
}
