//! Cookie commands.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use wd_protocol::{BodyParams, CommandError, LocatorParams, params};
use wd_session::Cookie;

use crate::handler::{BuildResult, HandlerContext};
use crate::params::{as_i64, locator_param, object_param};
use crate::scope::SessionScope;

/// Wire form of a cookie. `expiry` is seconds since the epoch and only
/// present when the cookie has one.
pub fn cookie_to_json(cookie: &Cookie) -> Value {
    let mut value = json!({
        "name": cookie.name,
        "value": cookie.value,
        "path": cookie.path,
        "domain": cookie.domain,
        "secure": cookie.secure,
    });
    if let (Some(expiry), Some(map)) = (cookie.expiry, value.as_object_mut()) {
        map.insert("expiry".into(), json!(expiry.timestamp()));
    }
    value
}

/// Parse a wire cookie. `name` and `value` are required.
pub fn cookie_from_json(map: &Map<String, Value>) -> Result<Cookie, CommandError> {
    let text = |key: &str| -> Option<String> {
        match map.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    };
    let name = text("name")
        .ok_or_else(|| CommandError::invalid_parameter("Cookie requires a 'name'"))?;
    let value = text("value")
        .ok_or_else(|| CommandError::invalid_parameter("Cookie requires a 'value'"))?;
    let expiry = match map.get("expiry") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().parse::<i64>().is_err() => Some(
            DateTime::parse_from_rfc3339(s)
                .map_err(|e| CommandError::invalid_parameter(format!("Invalid cookie expiry: {e}")))?
                .with_timezone(&Utc),
        ),
        Some(other) => {
            let seconds = as_i64(other)
                .ok_or_else(|| CommandError::invalid_parameter("Invalid cookie expiry"))?;
            Some(
                DateTime::<Utc>::from_timestamp(seconds, 0)
                    .ok_or_else(|| CommandError::invalid_parameter("Cookie expiry out of range"))?,
            )
        }
    };
    Ok(Cookie {
        name,
        value,
        path: text("path"),
        domain: text("domain"),
        secure: map.get("secure").and_then(Value::as_bool).unwrap_or(false),
        expiry,
    })
}

pub fn get_all(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("get all cookies", |s| {
        let cookies = s.driver().cookies()?;
        Ok(Value::Array(cookies.iter().map(cookie_to_json).collect()))
    }))
}

pub fn add(ctx: &HandlerContext, locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let cookie = cookie_from_json(object_param(body, "cookie")?)?;
    Ok(scope.into_handler(&format!("add cookie {}", cookie.name), move |s| {
        s.driver().add_cookie(cookie)?;
        Ok(Value::Null)
    }))
}

pub fn delete(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let name = locator_param(locator, params::NAME)?.to_string();
    Ok(scope.into_handler(&format!("delete cookie {name}"), move |s| {
        s.driver().delete_cookie(&name)?;
        Ok(Value::Null)
    }))
}

pub fn delete_all(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("delete all cookies", |s| {
        s.driver().delete_all_cookies()?;
        Ok(Value::Null)
    }))
}
