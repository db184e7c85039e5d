// Lenient input parsing for query strings and JSON payloads

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Parses the leading integer of `input`
///
/// Leading whitespace is skipped and an optional sign is accepted. At
/// least one digit must follow; anything after the digits is ignored.
/// Values outside the `i64` range saturate to `i64::MIN`/`i64::MAX`.
///
/// # Example
/// ```
/// use ledger_api::api::validation::parse_int;
///
/// assert_eq!(parse_int("1000"), Some(1000));
/// assert_eq!(parse_int("  -42"), Some(-42));
/// assert_eq!(parse_int("12abc"), Some(12));
/// assert_eq!(parse_int("abc"), None);
/// assert_eq!(parse_int(""), None);
/// assert_eq!(parse_int("99999999999999999999"), Some(i64::MAX));
/// ```
pub fn parse_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    let value = match (negative, digits.parse::<i64>()) {
        (false, Ok(magnitude)) => magnitude,
        (true, Ok(magnitude)) => -magnitude,
        (false, Err(_)) => i64::MAX,
        (true, Err(_)) => i64::MIN,
    };
    Some(value)
}

/// Reads an integer out of a JSON value
///
/// Numbers are taken as-is (fractions truncate toward zero, out of range
/// values saturate), strings go through [`parse_int`]. Anything else is
/// not an integer.
pub fn int_from_json(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            // `as` saturates at the i64 bounds
            n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}

/// Reads a decimal out of a JSON number or numeric string
pub fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Deserializes a field whose presence matters
///
/// Used with `#[serde(default)]`: a missing key stays `None`, while a key
/// set to `null` becomes `Some(Value::Null)`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Returns the text of a present field
///
/// Only an absent field is missing. Strings are kept as-is, `null`
/// becomes an empty string and other values their JSON text.
pub fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some(String::new()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_int_plain() {
        assert_eq!(parse_int("0"), Some(0));
        assert_eq!(parse_int("2000"), Some(2000));
    }

    #[test]
    fn parse_int_sign_and_whitespace() {
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("-1"), Some(-1));
        assert_eq!(parse_int("\t 15"), Some(15));
    }

    #[test]
    fn parse_int_ignores_trailing_garbage() {
        assert_eq!(parse_int("10.9"), Some(10));
        assert_eq!(parse_int("99 bottles"), Some(99));
    }

    #[test]
    fn parse_int_rejects_non_numeric() {
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(" "), None);
        assert_eq!(parse_int("NaN"), None);
    }

    #[test]
    fn parse_int_saturates_on_overflow() {
        assert_eq!(parse_int("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int("-99999999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_int("-9223372036854775808"), Some(i64::MIN));
    }

    #[test]
    fn int_from_json_numbers_and_strings() {
        assert_eq!(int_from_json(&json!(1234)), Some(1234));
        assert_eq!(int_from_json(&json!(12.75)), Some(12));
        assert_eq!(int_from_json(&json!(-3.5)), Some(-3));
        assert_eq!(int_from_json(&json!("1234")), Some(1234));
    }

    #[test]
    fn int_from_json_saturates_large_numbers() {
        assert_eq!(int_from_json(&json!(1e20)), Some(i64::MAX));
        assert_eq!(int_from_json(&json!(-1e20)), Some(i64::MIN));
        assert_eq!(int_from_json(&json!("99999999999999999999")), Some(i64::MAX));
    }

    #[test]
    fn int_from_json_other_types() {
        assert_eq!(int_from_json(&json!(true)), None);
        assert_eq!(int_from_json(&json!(null)), None);
        assert_eq!(int_from_json(&json!([1])), None);
        assert_eq!(int_from_json(&json!("x1")), None);
    }

    #[test]
    fn decimal_from_json_values() {
        assert_eq!(decimal_from_json(&json!(10)), Some(Decimal::new(10, 0)));
        assert_eq!(decimal_from_json(&json!("10.50")), Some(Decimal::new(1050, 2)));
        assert_eq!(decimal_from_json(&json!("ten")), None);
        assert_eq!(decimal_from_json(&json!(false)), None);
    }

    #[test]
    fn text_field_only_rejects_absent() {
        assert_eq!(text_field(None), None);
        assert_eq!(text_field(Some(&json!(null))), Some(String::new()));
        assert_eq!(text_field(Some(&json!(""))), Some(String::new()));
        assert_eq!(text_field(Some(&json!("food"))), Some("food".to_string()));
        assert_eq!(text_field(Some(&json!(5))), Some("5".to_string()));
        assert_eq!(text_field(Some(&json!(true))), Some("true".to_string()));
    }

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "present")]
        field: Option<Value>,
    }

    #[test]
    fn present_keeps_explicit_null() {
        let missing: Payload = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.field, None);

        let null: Payload = serde_json::from_value(json!({ "field": null })).unwrap();
        assert_eq!(null.field, Some(Value::Null));
    }
}
