use herald_directory::ContactRecord;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{JobError, Result};

/// A job declaration exactly as it appears in the jobs file.
///
/// Fields are optional and `contacts` stays raw JSON so the resolver can
/// report precisely which field is missing or malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawJob {
    /// Zero-based index into the message catalog.
    #[serde(default)]
    pub message: Option<i64>,
    /// `"all"` or a list of contact ids.
    #[serde(default)]
    pub contacts: Option<Value>,
    /// `[hour, minute]` time of day.
    #[serde(default)]
    pub date: Option<Vec<i64>>,
}

/// A job after validation, with its recipient set and message text fully
/// materialised. Consumed once by the scheduler; the fire instant is
/// computed at arm time rather than stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedJob {
    pub message: String,
    /// Deduplicated, in Directory insertion order.
    pub recipients: Vec<ContactRecord>,
    pub hour: u8,
    pub minute: u8,
}

impl ResolvedJob {
    /// Short message prefix for log lines.
    pub fn label(&self) -> &str {
        let end = self
            .message
            .char_indices()
            .nth(32)
            .map(|(i, _)| i)
            .unwrap_or(self.message.len());
        &self.message[..end]
    }
}

/// Decode the jobs file: a JSON object (values iterated) or a JSON array,
/// each element one [`RawJob`].
pub fn decode_jobs(value: Value) -> Result<Vec<RawJob>> {
    let entries: Vec<Value> = match value {
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        Value::Array(items) => items,
        other => {
            return Err(JobError::Decode(format!(
                "expected an object or array of jobs, got {}",
                json_kind(&other)
            )))
        }
    };

    entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).map_err(|e| JobError::Decode(e.to_string())))
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_object_form() {
        let jobs = decode_jobs(json!({
            "morning": { "message": 0, "contacts": "all", "date": [9, 0] },
            "evening": { "message": 1, "contacts": ["Bob"], "date": [18, 30] },
        }))
        .unwrap();
        assert_eq!(jobs.len(), 2);
    }

    #[test]
    fn decodes_array_form() {
        let jobs = decode_jobs(json!([
            { "message": 0, "contacts": "all", "date": [9, 0] },
        ]))
        .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].message, Some(0));
    }

    #[test]
    fn scalar_file_is_rejected() {
        let err = decode_jobs(json!(42)).unwrap_err();
        assert_eq!(err.code(), "JOBS_DECODE");
    }

    #[test]
    fn missing_fields_survive_decoding() {
        // Field-level defects are left for the resolver to diagnose.
        let jobs = decode_jobs(json!([{ "contacts": "all" }])).unwrap();
        assert!(jobs[0].message.is_none());
        assert!(jobs[0].date.is_none());
    }

    #[test]
    fn label_truncates_long_messages() {
        let job = ResolvedJob {
            message: "x".repeat(100),
            recipients: vec![],
            hour: 0,
            minute: 0,
        };
        assert_eq!(job.label().len(), 32);
    }
}
