//! Per-query outcome, as persisted to `api-data.json`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::QueryDescriptor;

/// One partner record: an opaque key/value map.
pub type Record = serde_json::Map<String, Value>;

/// Outcome of one query, as persisted in `api-data.json`.
///
/// Exactly one of `data` / `error_message` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedResult {
    /// Display name of the query.
    pub query_name: String,
    /// Form identifier the query ran against.
    pub form_id: String,
    /// Whether the query (not its child tables) succeeded.
    pub success: bool,
    /// Unwrapped payload with child rows merged in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl NamedResult {
    /// Creates a successful result.
    #[must_use]
    pub fn success(descriptor: &QueryDescriptor, data: Value) -> Self {
        Self {
            query_name: descriptor.display_name.to_string(),
            form_id: descriptor.form_id.to_string(),
            success: true,
            data: Some(data),
            error_message: None,
        }
    }

    /// Creates a failed result.
    #[must_use]
    pub fn failure(descriptor: &QueryDescriptor, error_message: impl Into<String>) -> Self {
        Self {
            query_name: descriptor.display_name.to_string(),
            form_id: descriptor.form_id.to_string(),
            success: false,
            data: None,
            error_message: Some(error_message.into()),
        }
    }

    /// Returns the record list of a successful result.
    ///
    /// Failed results and payloads that are not arrays yield no records.
    #[must_use]
    pub fn records(&self) -> &[Value] {
        match (&self.data, self.success) {
            (Some(Value::Array(records)), true) => records,
            _ => &[],
        }
    }
}
