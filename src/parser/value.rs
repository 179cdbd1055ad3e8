use crate::ast::ScalarValue;

/// Infer a typed scalar from a raw token. Total: anything that is not a
/// boolean or a number stays text.
///
/// Rules, first match wins:
/// 1. `yes` / `true` (any case) → `Bool(true)`
/// 2. `no` / `false` (any case) → `Bool(false)`
/// 3. a whole signed decimal integer that fits `i64` → `Int`
/// 4. a whole finite floating point number → `Float`
/// 5. anything else → `Text`, unchanged
///
/// Integer-shaped tokens too large for `i64` and tokens such as `inf` or
/// `1e999` stay text so that identifiers which happen to look numeric are not
/// silently rounded.
pub fn coerce(raw: &str) -> ScalarValue {
    if raw.eq_ignore_ascii_case("yes") || raw.eq_ignore_ascii_case("true") {
        return ScalarValue::Bool(true);
    }
    if raw.eq_ignore_ascii_case("no") || raw.eq_ignore_ascii_case("false") {
        return ScalarValue::Bool(false);
    }

    if let Ok(n) = raw.parse::<i64>() {
        return ScalarValue::Int(n);
    }
    if is_integer_literal(raw) {
        return ScalarValue::Text(raw.to_string());
    }

    match raw.parse::<f64>() {
        Ok(x) if x.is_finite() => ScalarValue::Float(x),
        _ => ScalarValue::Text(raw.to_string()),
    }
}

fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion_exactness() {
        assert_eq!(coerce("yes"), ScalarValue::Bool(true));
        assert_eq!(coerce("no"), ScalarValue::Bool(false));
        assert_eq!(coerce("100"), ScalarValue::Int(100));
        assert_eq!(coerce("1.5"), ScalarValue::Float(1.5));
        assert_eq!(coerce("alua"), ScalarValue::Text("alua".into()));
        assert_eq!(coerce("ID_SERIAL"), ScalarValue::Text("ID_SERIAL".into()));
    }

    #[test]
    fn test_booleans_ignore_case() {
        assert_eq!(coerce("TRUE"), ScalarValue::Bool(true));
        assert_eq!(coerce("Yes"), ScalarValue::Bool(true));
        assert_eq!(coerce("False"), ScalarValue::Bool(false));
        assert_eq!(coerce("NO"), ScalarValue::Bool(false));
        assert_eq!(coerce("yess"), ScalarValue::Text("yess".into()));
    }

    #[test]
    fn test_numbers_must_parse_fully() {
        assert_eq!(coerce("-5"), ScalarValue::Int(-5));
        assert_eq!(coerce("+7"), ScalarValue::Int(7));
        assert_eq!(coerce("2.0"), ScalarValue::Float(2.0));
        assert_eq!(coerce("1e3"), ScalarValue::Float(1000.0));
        assert_eq!(coerce("10s"), ScalarValue::Text("10s".into()));
        assert_eq!(coerce("round-robin 0"), ScalarValue::Text("round-robin 0".into()));
        assert_eq!(coerce(""), ScalarValue::Text(String::new()));
    }

    #[test]
    fn test_numeric_looking_identifiers_stay_text() {
        let huge = "360060160123456789012345678901234";
        assert_eq!(coerce(huge), ScalarValue::Text(huge.into()));
        assert_eq!(coerce("360060e8012345"), ScalarValue::Text("360060e8012345".into()));
        assert_eq!(coerce("inf"), ScalarValue::Text("inf".into()));
        assert_eq!(coerce("NaN"), ScalarValue::Text("NaN".into()));
    }

    #[test]
    fn test_coercion_is_idempotent_through_rendering() {
        for raw in ["yes", "no", "100", "-3", "1.5", "2.0", "1e-7", "alua", "OPEN-.*"] {
            let first = coerce(raw);
            let again = coerce(&first.to_string());
            assert_eq!(first, again, "re-coercing {:?}", raw);
        }
    }
}
