use crate::domain::error::RenderError;
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One point-in-time view of the regime and its signals, as produced upstream.
///
/// `signals` is kept as a raw JSON value: a missing or mistyped mapping is a
/// render-time error, not a parse-time one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub regime: String,
    pub score: Number,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signals: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Map<String, Value>>,
}

impl Snapshot {
    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str::<Snapshot>(text)
            .context("snapshot is not valid JSON for the snapshot schema")
    }

    /// Signal entries in document order.
    pub fn signal_entries(&self) -> Result<Vec<(&str, &str)>, RenderError> {
        let signals = self
            .signals
            .as_ref()
            .ok_or_else(|| RenderError::malformed("`signals` is missing"))?;

        let Value::Object(map) = signals else {
            return Err(RenderError::malformed(format!(
                "`signals` must be an object (got {})",
                json_kind(signals)
            )));
        };

        map.iter()
            .map(|(key, status)| match status {
                Value::String(s) => Ok((key.as_str(), s.as_str())),
                other => Err(RenderError::malformed(format!(
                    "status of signal `{key}` must be a string (got {})",
                    json_kind(other)
                ))),
            })
            .collect()
    }

    pub fn score_text(&self) -> String {
        self.score.to_string()
    }

    pub fn value_entries(&self) -> Vec<(&str, String)> {
        let Some(values) = &self.values else {
            return Vec::new();
        };
        values
            .iter()
            .map(|(name, v)| {
                let text = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.as_str(), text)
            })
            .collect()
    }

    pub fn as_of_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    pub fn staleness_days(&self, today: NaiveDate) -> Option<i64> {
        self.as_of_date().map(|d| (today - d).num_days())
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
