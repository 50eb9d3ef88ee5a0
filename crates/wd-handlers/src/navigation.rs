//! Navigation and page queries.

use serde_json::{Value, json};
use wd_protocol::{BodyParams, LocatorParams};

use crate::handler::{BuildResult, HandlerContext};
use crate::params::string_param;
use crate::scope::SessionScope;

pub fn get(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let url = string_param(body, "url")?;
    Ok(scope.into_handler(&format!("get {url}"), move |s| {
        s.driver().navigate_to(&url)?;
        Ok(Value::Null)
    }))
}

pub fn go_back(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("go back", |s| {
        s.driver().back()?;
        Ok(Value::Null)
    }))
}

pub fn go_forward(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("go forward", |s| {
        s.driver().forward()?;
        Ok(Value::Null)
    }))
}

pub fn refresh(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("refresh", |s| {
        s.driver().refresh()?;
        Ok(Value::Null)
    }))
}

pub fn current_url(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("get current url", |s| Ok(json!(s.driver().current_url()?))))
}

pub fn title(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("get title", |s| Ok(json!(s.driver().title()?))))
}

pub fn page_source(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("get page source", |s| Ok(json!(s.driver().page_source()?))))
}

pub fn screenshot(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("take screenshot", |s| Ok(json!(s.driver().screenshot()?))))
}
