//! Scalar coercion from raw environment strings.

use serde_json::Value;

const TRUE_WORDS: &[&str] = &["true", "yes", "y"];
const FALSE_WORDS: &[&str] = &["false", "no", "n"];

/// Coerce a raw env string into a boolean, number, or string value.
///
/// Rules apply in order, first match wins:
/// 1. `true`/`yes`/`y` (any case) → `true`
/// 2. `false`/`no`/`n` (any case) → `false`
/// 3. integer literal that fits an i64 → integer
/// 4. decimal literal that parses to a finite f64 → float
/// 5. anything else → the string, unchanged (including empty string)
///
/// Total over all inputs; never fails.
pub fn coerce_value(raw: &str) -> Value {
    let lower = raw.to_ascii_lowercase();
    if TRUE_WORDS.contains(&lower.as_str()) {
        return Value::Bool(true);
    }
    if FALSE_WORDS.contains(&lower.as_str()) {
        return Value::Bool(false);
    }

    if is_integer_literal(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::Number(n.into());
        }
        // Overflows i64: fall through to the string case
        return Value::String(raw.to_string());
    }

    if is_decimal_literal(raw) {
        if let Ok(f) = raw.parse::<f64>() {
            if let Some(n) = serde_json::Number::from_f64(f) {
                return Value::Number(n);
            }
        }
    }

    Value::String(raw.to_string())
}

/// `^-?\d+$`
fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `^-?\d+\.\d+$`
fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    match unsigned.split_once('.') {
        Some((int_part, frac_part)) => {
            !int_part.is_empty()
                && !frac_part.is_empty()
                && int_part.bytes().all(|b| b.is_ascii_digit())
                && frac_part.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_true_words() {
        assert_eq!(coerce_value("true"), json!(true));
        assert_eq!(coerce_value("TRUE"), json!(true));
        assert_eq!(coerce_value("Yes"), json!(true));
        assert_eq!(coerce_value("y"), json!(true));
    }

    #[test]
    fn test_false_words() {
        assert_eq!(coerce_value("false"), json!(false));
        assert_eq!(coerce_value("No"), json!(false));
        assert_eq!(coerce_value("N"), json!(false));
    }

    #[test]
    fn test_integer() {
        assert_eq!(coerce_value("3000"), json!(3000));
        assert_eq!(coerce_value("-42"), json!(-42));
        assert_eq!(coerce_value("0"), json!(0));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(coerce_value("3.25"), json!(3.25));
        assert_eq!(coerce_value("-0.5"), json!(-0.5));
    }

    #[test]
    fn test_string_passthrough() {
        assert_eq!(coerce_value("debug"), json!("debug"));
        assert_eq!(coerce_value(""), json!(""));
        assert_eq!(coerce_value("/var/log"), json!("/var/log"));
    }

    #[test]
    fn test_almost_numbers_stay_strings() {
        assert_eq!(coerce_value("3000ms"), json!("3000ms"));
        assert_eq!(coerce_value("1.2.3"), json!("1.2.3"));
        assert_eq!(coerce_value(".5"), json!(".5"));
        assert_eq!(coerce_value("5."), json!("5."));
        assert_eq!(coerce_value("-"), json!("-"));
        assert_eq!(coerce_value("1e5"), json!("1e5"));
    }

    #[test]
    fn test_integer_overflow_stays_string() {
        let big = "999999999999999999999999";
        assert_eq!(coerce_value(big), json!(big));
    }

    #[test]
    fn test_yes_inside_word_is_not_boolean() {
        assert_eq!(coerce_value("yesterday"), json!("yesterday"));
        assert_eq!(coerce_value("noop"), json!("noop"));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(coerce_value("true"), coerce_value("true"));
        assert_eq!(coerce_value("17"), coerce_value("17"));
        assert_eq!(coerce_value("hello"), coerce_value("hello"));
    }
}
