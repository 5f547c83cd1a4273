//! Lenient numeric parsing for pricing payloads.
//!
//! Pricing APIs disagree on whether money is a JSON number or a decimal
//! string ("1234.56"), so both are accepted.

use serde_json::Value;

/// Parse a JSON number or numeric string. `null` and missing are `None`;
/// anything else unparseable is NaN so it fails the usable-total check.
pub(crate) fn parse_amount(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => Some(s.trim().parse::<f64>().unwrap_or(f64::NAN)),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => Some(f64::NAN),
    }
}

/// First non-null amount among `keys`, else `default`.
pub(crate) fn amount_field(body: &Value, keys: &[&str], default: f64) -> f64 {
    keys.iter()
        .find_map(|key| parse_amount(body.get(*key)))
        .unwrap_or(default)
}

/// Non-empty string field.
pub(crate) fn text_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_amount_variants() {
        assert_eq!(parse_amount(Some(&json!(12.5))), Some(12.5));
        assert_eq!(parse_amount(Some(&json!("812.40"))), Some(812.4));
        assert_eq!(parse_amount(Some(&json!(null))), None);
        assert_eq!(parse_amount(None), None);
        assert!(parse_amount(Some(&json!("n/a"))).unwrap().is_nan());
    }

    #[test]
    fn test_amount_field_fallback_order() {
        let body = json!({ "totalFare": "900" });
        assert_eq!(amount_field(&body, &["totalAdultFare", "totalFare"], 0.0), 900.0);
        assert_eq!(amount_field(&body, &["totalKidFare"], 0.0), 0.0);
    }

    #[test]
    fn test_text_field() {
        let body = json!({ "provider": "  ", "detail": "live" });
        assert_eq!(text_field(&body, "provider"), None);
        assert_eq!(text_field(&body, "detail"), Some("live"));
    }
}
