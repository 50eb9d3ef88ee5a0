//! Alert commands.

use serde_json::{Value, json};
use wd_protocol::{BodyParams, LocatorParams};

use crate::handler::{BuildResult, HandlerContext};
use crate::params::string_param;
use crate::scope::SessionScope;

pub fn accept(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("accept alert", |s| {
        s.driver().accept_alert()?;
        Ok(Value::Null)
    }))
}

pub fn dismiss(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("dismiss alert", |s| {
        s.driver().dismiss_alert()?;
        Ok(Value::Null)
    }))
}

pub fn get_text(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("get alert text", |s| Ok(json!(s.driver().alert_text()?))))
}

pub fn set_text(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let text = string_param(body, "text")?;
    Ok(scope.into_handler(&format!("set alert text: {text}"), move |s| {
        s.driver().send_alert_text(&text)?;
        Ok(Value::Null)
    }))
}
