use crate::StoreError;
use chrono::{DateTime, SecondsFormat, Utc};

/// ISO 8601 with millisecond precision, as written by the mobile clients
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StoreError::Decode(format!("Invalid timestamp {}: {}", raw, e)))
}
