//! Session lifecycle commands.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;
use wd_protocol::{BodyParams, LocatorParams};

use crate::handler::{BuildResult, HandlerContext};
use crate::scope::SessionScope;

pub fn get_capabilities(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("get session capabilities", |s| {
        Ok(s.session().capabilities().to_json())
    }))
}

/// Ends the session: it is removed from the registry, then its driver quits.
pub fn quit(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    let sessions = Arc::clone(&ctx.sessions);
    Ok(scope.into_handler("quit", move |s| {
        sessions.remove_session(s.id());
        if let Err(e) = s.driver().quit() {
            warn!("Driver for session {} failed to quit: {e}", s.id());
            return Err(e.into());
        }
        Ok(Value::Null)
    }))
}

pub fn close(ctx: &HandlerContext, locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    let scope = SessionScope::resolve(ctx, locator)?;
    Ok(scope.into_handler("close window", |s| {
        s.driver().close()?;
        Ok(Value::Null)
    }))
}
