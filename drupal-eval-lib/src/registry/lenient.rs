//! Tolerant field decoders for registry payloads.
//!
//! The node API is inconsistent about scalar encoding: identifiers and
//! timestamps arrive as strings or numbers, booleans as `"1"`/`1`/`true`,
//! and empty objects are sometimes serialized as `[]`.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

pub fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(u64::from(*b)),
        _ => None,
    }
}

pub fn u64_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    value_as_u64(&value).ok_or_else(|| D::Error::custom(format!("expected an unsigned integer, found {value}")))
}

pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::String(s) => matches!(s.trim(), "1" | "true"),
        other => value_as_u64(other).is_some_and(|n| n != 0),
    })
}

pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Counts entries in an array-valued field; a bare number is taken as the count.
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Array(items) => items.len() as u64,
        Value::Object(map) => map.len() as u64,
        other => value_as_u64(other).unwrap_or(0),
    })
}

pub fn usage_map<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<String, u64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Value::Object(map) = value else {
        return Ok(BTreeMap::new());
    };

    Ok(map
        .into_iter()
        .filter_map(|(branch, count)| value_as_u64(&count).map(|c| (branch, c)))
        .collect())
}

pub fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let secs = match &value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    secs.and_then(|s| DateTime::from_timestamp(s, 0))
        .ok_or_else(|| D::Error::custom(format!("expected a unix timestamp, found {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "u64_from_any")]
        id: u64,
        #[serde(deserialize_with = "flag", default)]
        enabled: bool,
        #[serde(deserialize_with = "count", default)]
        stars: u64,
        #[serde(deserialize_with = "usage_map", default)]
        usage: BTreeMap<String, u64>,
        #[serde(deserialize_with = "timestamp")]
        created: DateTime<Utc>,
        #[serde(deserialize_with = "opt_string", default)]
        major: Option<String>,
    }

    #[test]
    fn accepts_string_encoded_scalars() {
        let probe: Probe = serde_json::from_value(json!({
            "id": "2936",
            "enabled": "1",
            "stars": [{"id": "1"}, {"id": "2"}],
            "usage": {"8.x-3.x": "12000", "7.x-1.x": 50},
            "created": "1600000000",
            "major": 3,
        }))
        .unwrap();

        assert_eq!(probe.id, 2936);
        assert!(probe.enabled);
        assert_eq!(probe.stars, 2);
        assert_eq!(probe.usage.get("8.x-3.x"), Some(&12000));
        assert_eq!(probe.usage.get("7.x-1.x"), Some(&50));
        assert_eq!(probe.created.timestamp(), 1_600_000_000);
        assert_eq!(probe.major.as_deref(), Some("3"));
    }

    #[test]
    fn empty_usage_array_becomes_empty_map() {
        let probe: Probe = serde_json::from_value(json!({
            "id": 1,
            "enabled": false,
            "stars": null,
            "usage": [],
            "created": 0,
            "major": null,
        }))
        .unwrap();

        assert!(!probe.enabled);
        assert_eq!(probe.stars, 0);
        assert!(probe.usage.is_empty());
        assert_eq!(probe.major, None);
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let probe: Probe = serde_json::from_value(json!({"id": 5, "created": 10})).unwrap();
        assert!(!probe.enabled);
        assert_eq!(probe.stars, 0);
        assert!(probe.usage.is_empty());
    }

    #[test]
    fn rejects_non_numeric_identifier() {
        let result = serde_json::from_value::<Probe>(json!({"id": "abc", "created": 10}));
        let _ = result.unwrap_err();
    }
}
