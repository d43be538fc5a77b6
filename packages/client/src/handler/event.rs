//! Inbound event envelope

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// `{"Records": [...]}` envelope carrying one payload per record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "Records")]
    pub records: Vec<EventRecord>,
}

/// One record; `detail` holds the payload as a JSON string or inline value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(rename = "detail-type", default)]
    pub detail_type: Option<String>,
    #[serde(default)]
    pub detail: Option<Value>,
}

impl EventRecord {
    /// Decode the payload
    ///
    /// # Errors
    ///
    /// Returns a description when `detail` is missing, is a string that is
    /// not JSON, or is neither a string nor an object.
    pub fn payload(&self) -> Result<Value, String> {
        match &self.detail {
            None => Err("record has no detail".to_string()),
            Some(Value::String(text)) => {
                serde_json::from_str(text).map_err(|e| format!("detail is not JSON: {e}"))
            }
            Some(inline @ Value::Object(_)) => Ok(inline.clone()),
            Some(_) => Err("detail must be a JSON string or object".to_string()),
        }
    }
}

/// Build a single-record event whose detail is `detail` encoded as a string
#[must_use]
pub fn generate_event(detail: &Value) -> Value {
    json!({
        "Records": [
            {
                "source": "testing.local",
                "detail-type": "Local Testing",
                "detail": detail.to_string(),
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_event_round_trips() {
        let detail = json!({"loan": {"id": 7}});
        let event: Event =
            serde_json::from_value(generate_event(&detail)).expect("generated event deserializes");
        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].source.as_deref(), Some("testing.local"));
        assert_eq!(event.records[0].detail_type.as_deref(), Some("Local Testing"));
        assert_eq!(event.records[0].payload(), Ok(detail));
    }

    #[test]
    fn test_inline_detail() {
        let record = EventRecord {
            source: None,
            detail_type: None,
            detail: Some(json!({"a": 1})),
        };
        assert_eq!(record.payload(), Ok(json!({"a": 1})));
    }

    #[test]
    fn test_bad_details() {
        let mut record = EventRecord {
            source: None,
            detail_type: None,
            detail: None,
        };
        assert!(record.payload().is_err());
        record.detail = Some(json!("{not json"));
        assert!(record.payload().is_err());
        record.detail = Some(json!([1, 2]));
        assert!(record.payload().is_err());
    }
}
