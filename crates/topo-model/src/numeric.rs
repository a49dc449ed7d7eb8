//! Numeric coercion shared by the store, aggregator and archive codec
//!
//! Non-numeric input never fails: it becomes an absent value, and absent
//! values contribute zero to any sum.

/// Parse a cell into a finite number
///
/// Surrounding whitespace is ignored. Empty text, unparseable text, `NaN`
/// and infinities all coerce to `None`.
#[must_use]
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read-time value of a length field
///
/// Absent, negative and non-finite lengths contribute zero.
#[inline]
#[must_use]
pub fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_plain_numbers() {
        assert_eq!(coerce_number("120.5"), Some(120.5));
        assert_eq!(coerce_number(" 300 "), Some(300.0));
        assert_eq!(coerce_number("-4"), Some(-4.0));
    }

    #[test]
    fn coerce_garbage_to_absent() {
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("   "), None);
        assert_eq!(coerce_number("OK"), None);
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("inf"), None);
    }

    #[test]
    fn non_negative_clamps_malformed() {
        assert_eq!(non_negative(Some(12.0)), 12.0);
        assert_eq!(non_negative(None), 0.0);
        assert_eq!(non_negative(Some(-3.0)), 0.0);
        assert_eq!(non_negative(Some(f64::NAN)), 0.0);
        assert_eq!(non_negative(Some(f64::INFINITY)), 0.0);
    }
}
