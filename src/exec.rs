//! Response classification shared by the async and blocking clients.

use serde_json::Value;
use tracing::debug;

use crate::error::{AlksError, MAX_ERROR_BODY_CHARS, Result, truncate_str};

/// Status code and body text of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Parses the body, treating unparseable text the same as an empty body.
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(
                error = %err,
                body = truncate_str(text, MAX_ERROR_BODY_CHARS),
                "response body is not JSON"
            );
            None
        }
    }
}

/// Standard reason phrase for `status`, or `HTTP <status>` when there is none.
pub(crate) fn reason_phrase(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// Renders a message value: strings verbatim, anything else as JSON text.
fn message_text(value: &Value) -> String {
    match value {
        Value::String(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// `statusMessage` counts when it is set to anything other than null, `false`,
/// zero, an empty string or `"Success"`.
fn status_message(body: &Value) -> Option<String> {
    match body.get("statusMessage")? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(msg) if msg.is_empty() || msg == "Success" => None,
        other => Some(message_text(other)),
    }
}

/// Picks the message the service attached to a failed response, if any.
fn service_message(body: &Value) -> Option<String> {
    if let Some(msg) = status_message(body) {
        return Some(msg);
    }
    body.get("errors")
        .and_then(Value::as_array)?
        .first()
        .map(message_text)
}

/// Builds the error for a non-2xx response.
pub(crate) fn parse_error_response(status: u16, body: Option<&Value>) -> AlksError {
    match body.and_then(service_message) {
        Some(message) => AlksError::Service { status, message },
        None => AlksError::Status {
            status,
            reason: reason_phrase(status),
        },
    }
}

/// Classifies a response and returns the parsed body on success.
///
/// A 2xx body that is absent or not JSON comes back as `Value::Null`, leaving
/// it to the projector whether that is acceptable.
pub(crate) fn handle_response(raw: RawResponse) -> Result<Value> {
    let parsed = parse_body(&raw.body);
    debug!(status = raw.status, "ALKS response received");

    if raw.is_success() {
        Ok(parsed.unwrap_or(Value::Null))
    } else {
        Err(parse_error_response(raw.status, parsed.as_ref()))
    }
}
