//! Element lookup, interaction and state queries.

use serde_json::{Value, json};
use wd_protocol::{BodyParams, CommandError, LocatorParams, params};
use wd_session::Locator;

use crate::handler::{BuildResult, HandlerContext};
use crate::params::{keys_param, locator_param, string_param};
use crate::scope::{ELEMENT_KEY, ElementScope, SessionScope};

/// Locator from the `using` and `value` body parameters.
pub fn locator_from_body(body: &BodyParams) -> Result<Locator, CommandError> {
    let using = string_param(body, "using")?;
    let value = string_param(body, "value")?;
    Locator::from_strategy(&using, value)
        .ok_or_else(|| CommandError::invalid_parameter(format!("Cannot find on '{using}'")))
}

// ── Lookup ──────────────────────────────────────────────────────────────

pub fn find_element(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let by = locator_from_body(body)?;
    Ok(scope.into_handler(&format!("find element: {by}"), move |s| {
        let element = s.driver().find_element(&by)?;
        Ok(s.wrap_element(element))
    }))
}

pub fn find_elements(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let by = locator_from_body(body)?;
    Ok(scope.into_handler(&format!("find elements: {by}"), move |s| {
        let elements = s.driver().find_elements(&by)?;
        Ok(s.wrap_elements(elements))
    }))
}

pub fn find_child_element(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let by = locator_from_body(body)?;
    let description = format!("find child element: {}, {by}", scope.handle());
    Ok(scope.into_handler(&description, move |e| {
        let child = e.driver().find_child_element(e.element(), &by)?;
        Ok(e.session().wrap_element(child))
    }))
}

pub fn find_child_elements(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let by = locator_from_body(body)?;
    let description = format!("find child elements: {}, {by}", scope.handle());
    Ok(scope.into_handler(&description, move |e| {
        let children = e.driver().find_child_elements(e.element(), &by)?;
        Ok(e.session().wrap_elements(children))
    }))
}

pub fn active_element(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("get active element", |s| {
        let element = s.driver().active_element()?;
        Ok(s.wrap_element(element))
    }))
}

pub fn describe(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let description = format!("describe element: {}", scope.handle());
    Ok(scope.into_handler(&description, |e| Ok(json!({ ELEMENT_KEY: e.handle() }))))
}

// ── Interaction ─────────────────────────────────────────────────────────

pub fn click(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let description = format!("click: {}", scope.handle());
    Ok(scope.into_handler(&description, |e| {
        e.driver().click_element(e.element())?;
        Ok(Value::Null)
    }))
}

pub fn submit(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let description = format!("submit: {}", scope.handle());
    Ok(scope.into_handler(&description, |e| {
        e.driver().submit_element(e.element())?;
        Ok(Value::Null)
    }))
}

pub fn clear(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let description = format!("clear: {}", scope.handle());
    Ok(scope.into_handler(&description, |e| {
        e.driver().clear_element(e.element())?;
        Ok(Value::Null)
    }))
}

pub fn send_keys(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let keys = keys_param(body)?;
    let description = format!("send keys: {}, {keys}", scope.handle());
    Ok(scope.into_handler(&description, move |e| {
        e.driver().send_keys_to_element(e.element(), &keys)?;
        Ok(Value::Null)
    }))
}

pub fn send_keys_to_active(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let keys = keys_param(body)?;
    Ok(scope.into_handler(&format!("send keys to active element: {keys}"), move |s| {
        s.driver().send_keys_to_active_element(&keys)?;
        Ok(Value::Null)
    }))
}

// ── State ───────────────────────────────────────────────────────────────

pub fn text(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let description = format!("get text: {}", scope.handle());
    Ok(scope.into_handler(&description, |e| Ok(json!(e.driver().element_text(e.element())?))))
}

pub fn tag_name(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let description = format!("get tag name: {}", scope.handle());
    Ok(scope.into_handler(&description, |e| Ok(json!(e.driver().element_tag_name(e.element())?))))
}

pub fn attribute(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let name = locator_param(locator, params::NAME)?.to_string();
    let description = format!("get attribute: {}, {name}", scope.handle());
    Ok(scope.into_handler(&description, move |e| {
        Ok(json!(e.driver().element_attribute(e.element(), &name)?))
    }))
}

pub fn css_value(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let property = locator_param(locator, params::PROPERTY_NAME)?.to_string();
    let description = format!("get css value: {}, {property}", scope.handle());
    Ok(scope.into_handler(&description, move |e| {
        Ok(json!(e.driver().element_css_value(e.element(), &property)?))
    }))
}

pub fn is_selected(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let description = format!("is element selected: {}", scope.handle());
    Ok(scope.into_handler(&description, |e| Ok(json!(e.driver().is_element_selected(e.element())?))))
}

pub fn is_enabled(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let description = format!("is element enabled: {}", scope.handle());
    Ok(scope.into_handler(&description, |e| Ok(json!(e.driver().is_element_enabled(e.element())?))))
}

pub fn is_displayed(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let description = format!("is element displayed: {}", scope.handle());
    Ok(scope.into_handler(&description, |e| Ok(json!(e.driver().is_element_displayed(e.element())?))))
}

pub fn location(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let description = format!("get element location: {}", scope.handle());
    Ok(scope.into_handler(&description, |e| Ok(json!(e.driver().element_location(e.element())?))))
}

pub fn location_in_view(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let description = format!("get element location once scrolled into view: {}", scope.handle());
    Ok(scope.into_handler(&description, |e| {
        Ok(json!(e.driver().element_location_in_view(e.element())?))
    }))
}

pub fn size(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let description = format!("get element size: {}", scope.handle());
    Ok(scope.into_handler(&description, |e| Ok(json!(e.driver().element_size(e.element())?))))
}

/// Compares two elements. The second handle must belong to the same session.
pub fn equals(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = ElementScope::resolve(ctx, locator)?;
    let other_handle = locator_param(locator, params::OTHER)?;
    let other = scope.session().element(other_handle)?;
    let description = format!("element equals: {}, {other_handle}", scope.handle());
    Ok(scope.into_handler(&description, move |e| {
        Ok(json!(e.driver().elements_equal(e.element(), &other)?))
    }))
}
