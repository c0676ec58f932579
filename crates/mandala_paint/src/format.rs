//! Number formatting and rounding shared by attribute serialization

/// Format a number the way paint strings expect it.
///
/// Integral values print without a fractional part, negative zero prints
/// as `0`, and non-finite values print as `NaN` / `Infinity`. Magnitudes
/// below 1e-6 or from 1e21 up use exponent notation (`3.06e-15`, `1e+21`).
pub fn fmt_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        "0".to_string()
    } else if !(EXPONENT_BELOW..EXPONENT_FROM).contains(&value.abs()) {
        let formatted = format!("{value:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    } else {
        value.to_string()
    }
}

const EXPONENT_BELOW: f64 = 1e-6;
const EXPONENT_FROM: f64 = 1e21;

/// Round to the nearest integer, with halves rounding toward +∞
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
