//! Lenient timestamp (de)serialization.
//!
//! The gateway emits RFC 3339 strings, older builds emitted epoch milliseconds.
//! Both decode to `DateTime<Utc>`; output is always RFC 3339.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

pub(crate) fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{s}': {e}"))),
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .ok_or_else(|| D::Error::custom(format!("invalid epoch millis {n}")))?;
            DateTime::from_timestamp_millis(millis)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("epoch millis out of range: {millis}")))
        }
        other => Err(D::Error::custom(format!("unsupported timestamp {other}"))),
    }
}
