use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer for visit times that accepts epoch milliseconds (integer or
/// fractional, as the history API reports them), RFC3339 strings, or null
pub fn deserialize_visit_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let ms = n.as_f64().ok_or_else(|| Error::custom("invalid visit time"))?;
            if !ms.is_finite() {
                return Err(Error::custom("visit time must be finite"));
            }
            DateTime::from_timestamp_millis(ms.trunc() as i64)
                .map(Some)
                .ok_or_else(|| Error::custom("visit time out of range"))
        }
        Value::String(s) => s
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(|e| Error::custom(format!("invalid RFC3339 visit time: {}", e))),
        _ => Err(Error::custom("visit time must be a number, string or null")),
    }
}
