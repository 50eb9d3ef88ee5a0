//! Parsed commands and their parameter maps.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CommandError;

/// Parameters bound from the URL path template.
pub type LocatorParams = BTreeMap<String, String>;

/// Parameters carried in the JSON request body.
pub type BodyParams = Map<String, Value>;

/// Locator parameter names used by the resource path templates.
pub mod params {
    pub const SESSION_ID: &str = "sessionId";
    pub const ELEMENT_ID: &str = "id";
    pub const NAME: &str = "name";
    pub const OTHER: &str = "other";
    pub const PROPERTY_NAME: &str = "propertyName";
    pub const WINDOW_HANDLE: &str = "windowHandle";
    pub const KEY: &str = "key";
}

/// Opaque session identifier, unique for the lifetime of the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A request resolved against the route table.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub name: String,
    pub locator: LocatorParams,
    pub body: BodyParams,
}

impl Command {
    pub fn new(name: impl Into<String>, locator: LocatorParams, body: BodyParams) -> Self {
        Self { name: name.into(), locator, body }
    }

    /// Parse a request body. An empty body is an empty parameter map.
    pub fn parse_body(body: &[u8]) -> Result<BodyParams, CommandError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(BodyParams::new());
        }
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(Value::Null) => Ok(BodyParams::new()),
            Ok(_) => Err(CommandError::invalid_parameter(
                "Request body must be a JSON object",
            )),
            Err(e) => Err(CommandError::invalid_parameter(format!(
                "Request body is not valid JSON: {e}"
            ))),
        }
    }
}
