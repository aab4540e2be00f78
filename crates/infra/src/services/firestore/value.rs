use crate::repos::shared::timestamp::{format_timestamp, parse_timestamp};
use crate::StoreError;
use chrono::{DateTime, Utc};
use companion_reminders_domain::ID;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Typed field value as encoded by the Firestore REST API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// int64 values travel as decimal strings
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl Value {
    pub fn string(value: &str) -> Self {
        Self::StringValue(value.into())
    }

    pub fn timestamp(at: &DateTime<Utc>) -> Self {
        Self::TimestampValue(format_timestamp(at))
    }

    pub fn strings(values: &[&str]) -> Self {
        Self::ArrayValue(ArrayValue {
            values: values.iter().map(|v| Self::string(v)).collect(),
        })
    }

    pub fn optional_string(value: Option<&str>) -> Self {
        match value {
            Some(v) => Self::string(v),
            None => Self::NullValue(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreDocument {
    /// projects/{p}/databases/(default)/documents/{collection}/{id}
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
    #[serde(default)]
    pub create_time: Option<String>,
}

impl FirestoreDocument {
    pub fn id(&self) -> Result<ID, StoreError> {
        let id = self.name.rsplit('/').next().unwrap_or_default();
        id.parse()
            .map_err(|_| StoreError::Decode(format!("Invalid document name: {}", self.name)))
    }

    fn missing(&self, field: &str) -> StoreError {
        StoreError::Decode(format!("Document {} has no valid field {}", self.name, field))
    }

    pub fn get_string(&self, field: &str) -> Result<String, StoreError> {
        match self.fields.get(field) {
            Some(Value::StringValue(v)) => Ok(v.clone()),
            _ => Err(self.missing(field)),
        }
    }

    pub fn get_optional_string(&self, field: &str) -> Option<String> {
        match self.fields.get(field) {
            Some(Value::StringValue(v)) => Some(v.clone()),
            _ => None,
        }
    }

    pub fn get_id(&self, field: &str) -> Result<ID, StoreError> {
        self.get_string(field)?
            .parse()
            .map_err(|_| self.missing(field))
    }

    /// Absent booleans read as `false`
    pub fn get_bool(&self, field: &str) -> Result<bool, StoreError> {
        match self.fields.get(field) {
            Some(Value::BooleanValue(v)) => Ok(*v),
            None | Some(Value::NullValue(_)) => Ok(false),
            _ => Err(self.missing(field)),
        }
    }

    pub fn get_timestamp(&self, field: &str) -> Result<DateTime<Utc>, StoreError> {
        let raw = match self.fields.get(field) {
            Some(Value::TimestampValue(v)) | Some(Value::StringValue(v)) => v,
            _ => return Err(self.missing(field)),
        };
        parse_timestamp(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn decodes_rest_document() {
        let doc: FirestoreDocument = serde_json::from_str(
            r#"{
                "name": "projects/p/databases/(default)/documents/reminders/abc123",
                "fields": {
                    "title": { "stringValue": "Take pills" },
                    "description": { "nullValue": null },
                    "isCompleted": { "booleanValue": true },
                    "dueDate": { "timestampValue": "2024-03-01T09:00:00.000Z" }
                },
                "createTime": "2024-02-29T10:00:00.000000Z"
            }"#,
        )
        .unwrap();

        assert_eq!(doc.id().unwrap().as_str(), "abc123");
        assert_eq!(doc.get_string("title").unwrap(), "Take pills");
        assert_eq!(doc.get_optional_string("description"), None);
        assert!(doc.get_bool("isCompleted").unwrap());
        assert!(!doc.get_bool("isAcknowledged").unwrap());
        assert_eq!(
            doc.get_timestamp("dueDate").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
        );
        assert!(doc.get_string("patientId").is_err());
    }

    #[test]
    fn encodes_values() {
        assert_eq!(
            serde_json::to_value(Value::NullValue(())).unwrap(),
            serde_json::json!({ "nullValue": null })
        );
        assert_eq!(
            serde_json::to_value(Value::strings(&["a"])).unwrap(),
            serde_json::json!({ "arrayValue": { "values": [{ "stringValue": "a" }] } })
        );
    }
}
