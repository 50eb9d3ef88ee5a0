//! Script execution.

use serde_json::Value;
use wd_protocol::{BodyParams, CommandError, LocatorParams};
use wd_session::ScriptValue;

use crate::handler::{BuildResult, HandlerContext};
use crate::params::string_param;
use crate::scope::SessionScope;

/// Script source plus its arguments with element objects resolved.
fn script_params(scope: &SessionScope, body: &BodyParams) -> Result<(String, Vec<ScriptValue>), CommandError> {
    let script = string_param(body, "script")?;
    let args = match body.get("args") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| scope.to_script_value(item))
            .collect::<Result<_, _>>()?,
        Some(_) => {
            return Err(CommandError::invalid_parameter("Parameter 'args' must be an array"));
        }
    };
    Ok((script, args))
}

pub fn execute(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let (script, args) = script_params(&scope, body)?;
    Ok(scope.into_handler("execute script", move |s| {
        let result = s.driver().execute_script(&script, args)?;
        Ok(s.from_script_value(result))
    }))
}

pub fn execute_async(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let (script, args) = script_params(&scope, body)?;
    Ok(scope.into_handler("execute async script", move |s| {
        let result = s.driver().execute_async_script(&script, args)?;
        Ok(s.from_script_value(result))
    }))
}
