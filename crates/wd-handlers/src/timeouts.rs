//! Timeout commands. Durations arrive as milliseconds in `ms`.

use std::time::Duration;

use serde_json::Value;
use wd_protocol::{BodyParams, CommandError, LocatorParams};
use wd_session::TimeoutKind;

use crate::handler::{BuildResult, HandlerContext};
use crate::params::{body_param, as_i64, string_param};
use crate::scope::SessionScope;

fn duration_param(body: &BodyParams) -> Result<Duration, CommandError> {
    let ms = as_i64(body_param(body, "ms")?)
        .filter(|ms| *ms >= 0)
        .ok_or_else(|| CommandError::invalid_parameter("Parameter 'ms' must be a non-negative number"))?;
    Ok(Duration::from_millis(ms as u64))
}

fn timeout_handler(
    ctx: &HandlerContext,
    locator: &LocatorParams,
    body: &BodyParams,
    kind: impl FnOnce(&BodyParams) -> Result<TimeoutKind, CommandError>,
) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let kind = kind(body)?;
    let duration = duration_param(body)?;
    let description = format!("set {kind:?} timeout: {}ms", duration.as_millis());
    Ok(scope.into_handler(&description, move |s| {
        s.driver().set_timeout(kind, duration)?;
        Ok(Value::Null)
    }))
}

pub fn implicitly_wait(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    timeout_handler(ctx, locator, body, |_| Ok(TimeoutKind::Implicit))
}

pub fn async_script(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    timeout_handler(ctx, locator, body, |_| Ok(TimeoutKind::Script))
}

/// `type` selects the timeout: `implicit`, `script` or `page load`.
pub fn set_timeout(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    timeout_handler(ctx, locator, body, |body| {
        string_param(body, "type")?
            .parse::<TimeoutKind>()
            .map_err(CommandError::invalid_parameter)
    })
}
