//! Tolerant field decoders for upstream records.
//!
//! Anomaly and series data come from best-effort producers. A field with the
//! wrong JSON type degrades to its documented default instead of rejecting the
//! whole record, so every decoder here is infallible past JSON syntax.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Integral values print without a fractional part (`5.0` -> `"5"`).
pub fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Text form of any JSON value; `null` is the empty string.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// A non-negative whole number, or `None`.
pub fn value_count(value: &Value) -> Option<u64> {
    if let Some(u) = value.as_u64() {
        return Some(u);
    }
    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Some(f as u64),
        _ => None,
    }
}

pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_text(&Value::deserialize(deserializer)?))
}

/// Like [`text`], but `null` stays absent.
pub fn opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        other => Some(value_text(&other)),
    })
}

/// Numbers only; anything else is absent.
pub fn opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}

pub fn opt_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(value_count(&Value::deserialize(deserializer)?))
}

pub fn opt_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(value_count(&Value::deserialize(deserializer)?).and_then(|n| u32::try_from(n).ok()))
}

/// A nested object; anything that is not one is absent.
pub fn opt_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// A list of records. A non-list is empty; an element that cannot be read
/// keeps its slot as `T::default()` so positions and counts are preserved.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!("a")), "a");
        assert_eq!(value_text(&json!(3)), "3");
        assert_eq!(value_text(&json!(3.0)), "3");
        assert_eq!(value_text(&json!(2.5)), "2.5");
        assert_eq!(value_text(&json!(false)), "false");
    }

    #[test]
    fn test_value_count() {
        assert_eq!(value_count(&json!(3)), Some(3));
        assert_eq!(value_count(&json!(3.0)), Some(3));
        assert_eq!(value_count(&json!(3.5)), None);
        assert_eq!(value_count(&json!(-1)), None);
        assert_eq!(value_count(&json!("3")), None);
        assert_eq!(value_count(&json!(null)), None);
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "text")]
        name: String,
        #[serde(default, deserialize_with = "opt_f64")]
        value: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    struct Table {
        #[serde(default, deserialize_with = "records")]
        rows: Vec<Row>,
    }

    #[test]
    fn test_records_keep_bad_slots() {
        let t: Table =
            serde_json::from_value(json!({"rows": [{"name": 1, "value": "x"}, 7, {"value": 2}]})).unwrap();
        assert_eq!(t.rows.len(), 3);
        assert_eq!(t.rows[0], Row { name: "1".into(), value: None });
        assert_eq!(t.rows[1], Row::default());
        assert_eq!(t.rows[2].value, Some(2.0));

        let t: Table = serde_json::from_value(json!({"rows": "nope"})).unwrap();
        assert!(t.rows.is_empty());
    }
}
