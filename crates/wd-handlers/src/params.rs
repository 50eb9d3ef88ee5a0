//! Parameter extraction helpers shared by all handlers.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use wd_protocol::{BodyParams, CommandError, LocatorParams};

/// A URL-bound parameter. Missing means the URL did not name the resource.
pub fn locator_param<'a>(locator: &'a LocatorParams, name: &str) -> Result<&'a str, CommandError> {
    locator.get(name).map(String::as_str).ok_or_else(|| {
        CommandError::resource_not_found(format!(
            "Parameter '{name}' not specified in locator parameters"
        ))
    })
}

/// A body parameter. JSON `null` counts as present.
pub fn body_param<'a>(body: &'a BodyParams, name: &str) -> Result<&'a Value, CommandError> {
    body.get(name)
        .ok_or_else(|| CommandError::invalid_parameter(format!("Parameter '{name}' not found")))
}

pub fn string_param(body: &BodyParams, name: &str) -> Result<String, CommandError> {
    match body_param(body, name)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(wrong_type(name, "a string")),
    }
}

pub fn optional_string_param(body: &BodyParams, name: &str) -> Result<Option<String>, CommandError> {
    match body.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => string_param(body, name).map(Some),
    }
}

pub fn i64_param(body: &BodyParams, name: &str) -> Result<i64, CommandError> {
    let value = body_param(body, name)?;
    as_i64(value).ok_or_else(|| wrong_type(name, "a number"))
}

pub fn optional_i64_param(body: &BodyParams, name: &str) -> Result<Option<i64>, CommandError> {
    match body.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => i64_param(body, name).map(Some),
    }
}

pub fn object_param<'a>(body: &'a BodyParams, name: &str) -> Result<&'a Map<String, Value>, CommandError> {
    body_param(body, name)?.as_object().ok_or_else(|| {
        CommandError::invalid_parameter(format!("Parameter '{name}' is not a dictionary"))
    })
}

/// Keys to type, from `value`: an array of strings joined together, or a scalar.
pub fn keys_param(body: &BodyParams) -> Result<String, CommandError> {
    match body_param(body, "value")? {
        Value::Array(parts) => parts
            .iter()
            .map(|part| match part {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(wrong_type("value", "an array of strings")),
            })
            .collect(),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(wrong_type("value", "an array of strings")),
    }
}

/// Deserialize the whole body into a typed parameter struct.
pub fn parse_params<T: DeserializeOwned>(body: &BodyParams) -> Result<T, CommandError> {
    serde_json::from_value(Value::Object(body.clone()))
        .map_err(|e| CommandError::invalid_parameter(format!("Invalid parameters: {e}")))
}

/// Integer view of a JSON number or numeric string. Fractions are truncated.
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn wrong_type(name: &str, expected: &str) -> CommandError {
    CommandError::invalid_parameter(format!("Parameter '{name}' must be {expected}"))
}
