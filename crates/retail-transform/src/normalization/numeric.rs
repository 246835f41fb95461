//! Numeric normalization utilities.

/// Text markers that stand for a missing value in the raw feeds.
const NULL_SENTINELS: &[&str] = &["NULL", "NONE", "NAN"];

/// True for empty cells and `NULL`/`None`/`NaN` in any case.
pub fn is_null_sentinel(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || NULL_SENTINELS
            .iter()
            .any(|sentinel| trimmed.eq_ignore_ascii_case(sentinel))
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a string as i64, accepting integral floats such as `"3.0"`.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(parsed);
    }
    let float = trimmed.parse::<f64>().ok()?;
    (float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64)
        .then_some(float as i64)
}

pub fn strip_non_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Parse a sterling price such as `"£1,299.99"`; letters or negatives reject.
pub fn parse_price(raw: &str) -> Option<f64> {
    if raw.chars().any(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }
    let cleaned: String = raw.chars().filter(|ch| !matches!(ch, '£' | ',')).collect();
    parse_f64(&cleaned).filter(|price| *price >= 0.0)
}

/// Parse a coordinate, mapping `N/A`, sentinels and out-of-range values to `None`.
pub fn normalize_coordinate(raw: &str, limit: f64) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("N/A") || is_null_sentinel(trimmed) {
        return None;
    }
    parse_f64(trimmed).filter(|value| value.abs() <= limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_case_insensitive() {
        for value in ["", "  ", "NULL", "null", "None", "NaN", "nan"] {
            assert!(is_null_sentinel(value), "{value:?}");
        }
        assert!(!is_null_sentinel("Nanette"));
        assert!(!is_null_sentinel("0"));
    }

    #[test]
    fn integers_accept_integral_floats() {
        assert_eq!(parse_i64("12"), Some(12));
        assert_eq!(parse_i64("12.0"), Some(12));
        assert_eq!(parse_i64("12.5"), None);
        assert_eq!(parse_i64("abc"), None);
    }

    #[test]
    fn prices_strip_currency_and_separators() {
        assert_eq!(parse_price("£1,299.99"), Some(1299.99));
        assert_eq!(parse_price("0.00"), Some(0.0));
        assert_eq!(parse_price("-1.00"), None);
        assert_eq!(parse_price("ABC1.00"), None);
    }

    #[test]
    fn coordinates_outside_range_are_missing() {
        assert_eq!(normalize_coordinate("51.5", 90.0), Some(51.5));
        assert_eq!(normalize_coordinate("N/A", 90.0), None);
        assert_eq!(normalize_coordinate("-181", 180.0), None);
        assert_eq!(normalize_coordinate("", 180.0), None);
    }
}
