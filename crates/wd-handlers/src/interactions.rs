//! Mouse and orientation commands.

use serde_json::{Value, json};
use wd_protocol::{BodyParams, CommandError, LocatorParams};
use wd_session::{MouseButton, Orientation, Point};

use crate::handler::{BuildResult, HandlerContext};
use crate::params::{optional_i64_param, optional_string_param, string_param};
use crate::scope::SessionScope;

/// `button` is 0 (left), 1 (middle) or 2 (right); absent means left.
fn button_param(body: &BodyParams) -> Result<MouseButton, CommandError> {
    match optional_i64_param(body, "button")? {
        None => Ok(MouseButton::Left),
        Some(index) => MouseButton::from_index(index)
            .ok_or_else(|| CommandError::invalid_parameter(format!("Unknown mouse button {index}"))),
    }
}

/// Moves to an element, to an offset, or to an offset from an element.
/// Offsets only count when both `xoffset` and `yoffset` are given.
pub fn move_to(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let element = match optional_string_param(body, "element")? {
        Some(handle) => Some(scope.element(&handle)?),
        None => None,
    };
    let offset = match (optional_i64_param(body, "xoffset")?, optional_i64_param(body, "yoffset")?) {
        (Some(x), Some(y)) => Some(Point { x, y }),
        _ => None,
    };
    let description = format!(
        "move mouse: {}, {}",
        element.as_ref().map_or("<none>".to_string(), |e| e.to_string()),
        offset.is_some()
    );
    Ok(scope.into_handler(&description, move |s| {
        s.driver().mouse_move_to(element.as_ref(), offset)?;
        Ok(Value::Null)
    }))
}

pub fn click(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let button = button_param(body)?;
    Ok(scope.into_handler(&format!("mouse click: {button:?}"), move |s| {
        s.driver().mouse_click(button)?;
        Ok(Value::Null)
    }))
}

pub fn double_click(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("mouse double click", |s| {
        s.driver().mouse_double_click()?;
        Ok(Value::Null)
    }))
}

pub fn button_down(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let button = button_param(body)?;
    Ok(scope.into_handler(&format!("mouse down: {button:?}"), move |s| {
        s.driver().mouse_down(button)?;
        Ok(Value::Null)
    }))
}

pub fn button_up(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let button = button_param(body)?;
    Ok(scope.into_handler(&format!("mouse up: {button:?}"), move |s| {
        s.driver().mouse_up(button)?;
        Ok(Value::Null)
    }))
}

pub fn get_orientation(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("get orientation", |s| Ok(json!(s.driver().orientation()?.as_str()))))
}

pub fn set_orientation(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let orientation: Orientation = string_param(body, "orientation")?
        .parse()
        .map_err(CommandError::invalid_parameter)?;
    Ok(scope.into_handler(&format!("set orientation: {}", orientation.as_str()), move |s| {
        s.driver().set_orientation(orientation)?;
        Ok(Value::Null)
    }))
}
