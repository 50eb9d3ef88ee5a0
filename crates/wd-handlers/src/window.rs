//! Window and frame commands.

use serde::Deserialize;
use serde_json::{Value, json};
use wd_protocol::{BodyParams, CommandError, LocatorParams, params};
use wd_session::{FrameTarget, Point, Size};

use crate::handler::{BuildResult, HandlerContext};
use crate::params::{body_param, locator_param, parse_params, string_param};
use crate::scope::{SessionScope, element_handle};

pub fn current_handle(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("get current window handle", |s| Ok(json!(s.driver().window_handle()?))))
}

pub fn all_handles(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("get window handles", |s| Ok(json!(s.driver().window_handles()?))))
}

pub fn switch_to_window(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let name = string_param(body, "name")?;
    Ok(scope.into_handler(&format!("switch to window: {name}"), move |s| {
        s.driver().switch_to_window(&name)?;
        Ok(Value::Null)
    }))
}

/// Frame target from `id`: null is the top document, an element object is
/// a frame element, an integer (or integer string) is an index and any
/// other string is a frame name.
pub fn frame_target(scope: &SessionScope, id: &Value) -> Result<FrameTarget, CommandError> {
    let target = match id {
        Value::Null => FrameTarget::Default,
        Value::Object(map) => {
            let handle = element_handle(map).ok_or_else(|| {
                CommandError::invalid_parameter("Frame id object must contain 'ELEMENT'")
            })?;
            FrameTarget::Element(scope.element(handle)?)
        }
        Value::Number(n) => {
            let index = n
                .as_u64()
                .and_then(|i| u32::try_from(i).ok())
                .ok_or_else(|| CommandError::invalid_parameter(format!("Invalid frame index {n}")))?;
            FrameTarget::Index(index)
        }
        Value::String(s) => match s.parse::<u32>() {
            Ok(index) => FrameTarget::Index(index),
            Err(_) => FrameTarget::Name(s.clone()),
        },
        _ => return Err(CommandError::invalid_parameter("Invalid frame id")),
    };
    Ok(target)
}

pub fn switch_to_frame(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let id = body_param(body, "id")?;
    let target = frame_target(&scope, id)?;
    let description = match id {
        Value::Null => "switch to frame: default content".to_string(),
        other => format!("switch to frame: {other}"),
    };
    Ok(scope.into_handler(&description, move |s| {
        s.driver().switch_to_frame(target)?;
        Ok(Value::Null)
    }))
}

#[derive(Deserialize)]
struct SizeParams {
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct PositionParams {
    x: f64,
    y: f64,
}

pub fn get_size(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let handle = locator_param(locator, params::WINDOW_HANDLE)?.to_string();
    Ok(scope.into_handler(&format!("get window size: {handle}"), move |s| {
        Ok(json!(s.driver().window_size(&handle)?))
    }))
}

pub fn set_size(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let handle = locator_param(locator, params::WINDOW_HANDLE)?.to_string();
    let p: SizeParams = parse_params(body)?;
    let size = Size { width: p.width as i64, height: p.height as i64 };
    let description = format!("set window size: {}, {}", size.width, size.height);
    Ok(scope.into_handler(&description, move |s| {
        s.driver().set_window_size(&handle, size)?;
        Ok(Value::Null)
    }))
}

pub fn get_position(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let handle = locator_param(locator, params::WINDOW_HANDLE)?.to_string();
    Ok(scope.into_handler(&format!("get window position: {handle}"), move |s| {
        Ok(json!(s.driver().window_position(&handle)?))
    }))
}

pub fn set_position(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let handle = locator_param(locator, params::WINDOW_HANDLE)?.to_string();
    let p: PositionParams = parse_params(body)?;
    let position = Point { x: p.x as i64, y: p.y as i64 };
    let description = format!("set window position: {}, {}", position.x, position.y);
    Ok(scope.into_handler(&description, move |s| {
        s.driver().set_window_position(&handle, position)?;
        Ok(Value::Null)
    }))
}

pub fn maximize(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let handle = locator_param(locator, params::WINDOW_HANDLE)?.to_string();
    Ok(scope.into_handler(&format!("maximize window: {handle}"), move |s| {
        s.driver().maximize_window(&handle)?;
        Ok(Value::Null)
    }))
}
