//! Tolerant numeric coercion and cent rounding.

use serde_json::Value;

/// Read a number out of a loosely typed field.
///
/// Accepts JSON numbers and numeric strings. Missing values, `null`,
/// booleans, non-numeric strings and non-finite results yield `fallback`.
pub fn to_number(value: Option<&Value>, fallback: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => n,
        _ => fallback,
    }
}

/// Round to cents, half up (on `value * 100`).
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}
