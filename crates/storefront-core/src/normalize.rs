//! Parse-with-default coercions for untrusted cart input.
//!
//! Every ingestion point (persisted record decode, catalog card, detail modal)
//! funnels through these functions, so a malformed field never reaches the
//! in-memory cart. None of them fail: anything unusable becomes the safe
//! default.

use serde_json::Value;

/// Title used when an entry carries no usable title.
pub const PLACEHOLDER_TITLE: &str = "Sin título";

/// Clamp a price to a finite, non-negative number.
pub fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

/// Clamp a signed quantity to `1..=u32::MAX`.
pub fn sanitize_quantity(quantity: i64) -> u32 {
    if quantity < 1 {
        1
    } else {
        u32::try_from(quantity).unwrap_or(u32::MAX)
    }
}

fn quantity_from_f64(quantity: f64) -> u32 {
    if !quantity.is_finite() || quantity < 1.0 {
        return 1;
    }
    if quantity >= u32::MAX as f64 {
        u32::MAX
    } else {
        quantity.trunc() as u32
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

/// Coerce a stored price field. Numbers and numeric strings are accepted;
/// everything else, including negatives and non-finite values, becomes `0`.
pub fn price_from_value(value: &Value) -> f64 {
    number_from_value(value).map(sanitize_price).unwrap_or(0.0)
}

/// Coerce a stored quantity field to a positive integer, defaulting to `1`.
pub fn quantity_from_value(value: &Value) -> u32 {
    number_from_value(value).map(quantity_from_f64).unwrap_or(1)
}

/// Coerce a stored title field. Strings are kept as-is, including the empty
/// title; a missing or non-string title falls back to [`PLACEHOLDER_TITLE`].
pub fn title_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_f64() != Some(0.0) => n.to_string(),
        _ => PLACEHOLDER_TITLE.to_string(),
    }
}

/// Coerce a stored image source; anything but a string is dropped.
pub fn image_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

/// Read a price out of display text such as `"$3.000"`.
///
/// Only ASCII digits are kept, so thousands separators and currency symbols
/// disappear (`"$3.000"` is `3000`). No digits at all yields `0`.
pub fn price_from_display(text: &str) -> f64 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse::<f64>().map(sanitize_price).unwrap_or(0.0)
}

/// Read a quantity from a form input, taking its leading integer.
///
/// `"3"` and `"3 units"` are `3`; blank, non-numeric, zero or negative input
/// is `1`.
pub fn quantity_from_display(text: &str) -> u32 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || negative {
        return 1;
    }
    match digits.parse::<u64>() {
        Ok(n) => sanitize_quantity(i64::try_from(n).unwrap_or(i64::MAX)),
        // Only overflow reaches here; the digits are all valid.
        Err(_) => u32::MAX,
    }
}

/// Normalize a caller-supplied title: surrounding whitespace is trimmed and a
/// missing title becomes the placeholder. An empty string is kept as-is.
pub fn title_from_display(text: Option<&str>) -> String {
    match text {
        Some(t) => t.trim().to_string(),
        None => PLACEHOLDER_TITLE.to_string(),
    }
}
