//! Partner response envelope handling.
//!
//! The partner API wraps the same logical outcome in one of two shapes:
//!
//! - `{"status": "success", "result": ...}`
//! - `{"code": 200, "data": ...}`
//!
//! Every call site goes through [`unwrap_envelope`] so both shapes are
//! accepted everywhere and anything else is reported with the vendor's own
//! message.

use serde_json::Value;
use thiserror::Error;

/// Outcome of classifying a partner response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// One of the two success shapes; holds the inner payload.
    Success(Value),
    /// Neither success marker present; holds the diagnostic message.
    Failure(String),
}

/// A partner response that carried no success marker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EnvelopeError {
    /// Upstream `err_msg`, else `message`, else the serialized body.
    pub message: String,
}

/// Classifies a response body into [`Envelope::Success`] or
/// [`Envelope::Failure`].
#[must_use]
pub fn classify_envelope(body: &Value) -> Envelope {
    if body.get("status").and_then(Value::as_str) == Some("success")
        && let Some(result) = body.get("result")
    {
        return Envelope::Success(result.clone());
    }

    if is_code_200(body.get("code"))
        && let Some(data) = body.get("data")
    {
        return Envelope::Success(data.clone());
    }

    Envelope::Failure(failure_message(body))
}

/// Returns the payload of a successful envelope.
///
/// # Errors
///
/// Returns [`EnvelopeError`] when neither success shape matches.
pub fn unwrap_envelope(body: &Value) -> Result<Value, EnvelopeError> {
    match classify_envelope(body) {
        Envelope::Success(payload) => Ok(payload),
        Envelope::Failure(message) => Err(EnvelopeError { message }),
    }
}

fn is_code_200(code: Option<&Value>) -> bool {
    match code {
        Some(Value::Number(n)) => n.as_u64() == Some(200),
        Some(Value::String(s)) => s.trim() == "200",
        _ => false,
    }
}

fn failure_message(body: &Value) -> String {
    ["err_msg", "message"]
        .iter()
        .find_map(|key| {
            body.get(*key)
                .and_then(Value::as_str)
                .filter(|msg| !msg.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_success_shape_yields_result() {
        let body = json!({"status": "success", "result": {"token": "abc"}});
        assert_eq!(unwrap_envelope(&body).unwrap(), json!({"token": "abc"}));
    }

    #[test]
    fn test_code_200_shape_yields_data() {
        let body = json!({"code": 200, "data": [{"id": 1}]});
        assert_eq!(unwrap_envelope(&body).unwrap(), json!([{"id": 1}]));
    }

    #[test]
    fn test_code_200_as_string_is_accepted() {
        let body = json!({"code": "200", "data": []});
        assert_eq!(unwrap_envelope(&body).unwrap(), json!([]));
    }

    #[test]
    fn test_null_payload_is_still_success() {
        let body = json!({"status": "success", "result": null});
        assert_eq!(classify_envelope(&body), Envelope::Success(Value::Null));
    }

    #[test]
    fn test_success_status_without_result_is_failure() {
        let body = json!({"status": "success"});
        assert!(unwrap_envelope(&body).is_err());
    }

    #[test]
    fn test_code_other_than_200_is_failure() {
        let body = json!({"code": 500, "data": {}, "message": "server busy"});
        assert_eq!(unwrap_envelope(&body).unwrap_err().message, "server busy");
    }

    #[test]
    fn test_failure_prefers_err_msg_over_message() {
        let body = json!({"status": "fail", "err_msg": "bad password", "message": "generic"});
        assert_eq!(unwrap_envelope(&body).unwrap_err().message, "bad password");
    }

    #[test]
    fn test_failure_falls_back_to_message() {
        let body = json!({"status": "fail", "message": "account locked"});
        assert_eq!(unwrap_envelope(&body).unwrap_err().message, "account locked");
    }

    #[test]
    fn test_empty_err_msg_falls_through_to_message() {
        let body = json!({"err_msg": "", "message": "use this"});
        assert_eq!(unwrap_envelope(&body).unwrap_err().message, "use this");
    }

    #[test]
    fn test_failure_falls_back_to_raw_body() {
        let body = json!({"unexpected": true});
        assert_eq!(
            unwrap_envelope(&body).unwrap_err().message,
            r#"{"unexpected":true}"#
        );
    }

    #[test]
    fn test_non_object_body_is_failure_with_raw_text() {
        let body = json!([1, 2]);
        assert_eq!(unwrap_envelope(&body).unwrap_err().message, "[1,2]");
    }
}
