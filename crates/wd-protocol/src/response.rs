//! Response envelope, structured error payload and the dispatcher output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::SessionId;
use crate::error::CommandError;
use crate::status::{HttpStatus, WireStatus};

/// Content type for JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";
/// Content type for 4xx bodies.
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// The envelope returned for every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "sessionId")]
    pub session_id: Option<SessionId>,
    pub status: i32,
    pub value: Value,
}

impl Response {
    pub fn new(session_id: Option<SessionId>, status: WireStatus, value: Value) -> Self {
        Self { session_id, status: status.code(), value }
    }

    pub fn success(session_id: Option<SessionId>, value: Value) -> Self {
        Self::new(session_id, WireStatus::Success, value)
    }

    /// An empty success envelope.
    pub fn empty() -> Self {
        Self::success(None, Value::Null)
    }

    pub fn wire_status(&self) -> Option<WireStatus> {
        WireStatus::from_code(self.status)
    }
}

/// One frame of the synthetic stack trace in an error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    #[serde(rename = "methodName")]
    pub method_name: String,
    #[serde(rename = "className")]
    pub class_name: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "lineNumber")]
    pub line_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertInfo {
    pub text: String,
}

/// Structured payload carried in `value` for driver-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
    pub class: String,
    #[serde(rename = "stackTrace")]
    pub stack_trace: Vec<StackFrame>,
    pub screen: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<AlertInfo>,
}

impl ErrorPayload {
    /// Build the payload for `error`, raised by `handler` while running `command`.
    pub fn from_error(command: &str, handler: &str, error: &CommandError) -> Self {
        Self {
            message: format!("{command}: {error}"),
            class: error.class_name().to_string(),
            stack_trace: vec![StackFrame {
                method_name: "execute".to_string(),
                class_name: handler.to_string(),
                file_name: String::new(),
                line_number: 0,
            }],
            screen: String::new(),
            alert: error.alert_text().map(|text| AlertInfo { text: text.to_string() }),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A response paired with the HTTP status it should be sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerResponse {
    pub response: Response,
    pub status: HttpStatus,
}

impl ServerResponse {
    pub fn new(response: Response, status: HttpStatus) -> Self {
        Self { response, status }
    }

    pub fn ok(response: Response) -> Self {
        Self::new(response, HttpStatus::Ok)
    }

    pub fn content_type(&self) -> &'static str {
        if self.status.is_client_error() { TEXT_CONTENT_TYPE } else { JSON_CONTENT_TYPE }
    }
}
