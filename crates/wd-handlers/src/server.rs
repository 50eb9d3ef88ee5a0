//! Server-level commands: status, session creation and listing, driver mappings.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::info;
use wd_protocol::{BodyParams, Capabilities, CommandError, HttpStatus, LocatorParams, SessionId};
use wd_session::SessionRegistry;

use crate::handler::{BuildResult, CommandHandler, HandlerContext, HandlerResult};
use crate::params::{object_param, string_param};

/// Reports build and host details. Needs no session.
pub struct StatusHandler;

impl CommandHandler for StatusHandler {
    fn execute(&mut self) -> HandlerResult {
        Ok(json!({
            "build": { "version": env!("CARGO_PKG_VERSION") },
            "os": {
                "name": std::env::consts::OS,
                "arch": std::env::consts::ARCH,
                "version": wd_protocol::Platform::current().as_str(),
            },
        }))
    }

    fn describe(&self) -> String {
        "[status]".to_string()
    }
}

pub fn status(_ctx: &HandlerContext, _locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    Ok(Box::new(StatusHandler))
}

/// Creates a session and answers with a redirect to it.
pub struct NewSessionHandler {
    sessions: Arc<SessionRegistry>,
    desired: Capabilities,
    created: Option<SessionId>,
}

impl CommandHandler for NewSessionHandler {
    fn status_code(&self) -> HttpStatus {
        HttpStatus::SeeOther
    }

    fn session_id(&self) -> Option<&SessionId> {
        self.created.as_ref()
    }

    fn execute(&mut self) -> HandlerResult {
        let id = self
            .sessions
            .create_session(&self.desired)
            .map_err(|e| CommandError::DriverInstantiation(e.to_string()))?;
        let value = Value::String(id.to_string());
        self.created = Some(id);
        Ok(value)
    }

    fn describe(&self) -> String {
        "[create new session]".to_string()
    }
}

pub fn new_session(ctx: &HandlerContext, _locator: &LocatorParams, body: &BodyParams) -> BuildResult {
    let desired = object_param(body, "desiredCapabilities")?;
    let desired = Capabilities::from_json(desired)
        .map_err(|e| CommandError::invalid_parameter(e.to_string()))?;
    Ok(Box::new(NewSessionHandler {
        sessions: Arc::clone(&ctx.sessions),
        desired,
        created: None,
    }))
}

/// Lists live sessions with their capabilities.
pub struct SessionListHandler {
    sessions: Arc<SessionRegistry>,
}

impl CommandHandler for SessionListHandler {
    fn execute(&mut self) -> HandlerResult {
        let sessions: Vec<Value> = self
            .sessions
            .list()
            .into_iter()
            .map(|(id, caps)| json!({ "id": id, "capabilities": caps.to_json() }))
            .collect();
        Ok(Value::Array(sessions))
    }

    fn describe(&self) -> String {
        "[get session list]".to_string()
    }
}

pub fn session_list(ctx: &HandlerContext, _locator: &LocatorParams, _body: &BodyParams) -> BuildResult {
    Ok(Box::new(SessionListHandler { sessions: Arc::clone(&ctx.sessions) }))
}

/// Maps a capabilities descriptor onto a named driver type.
///
/// An unknown driver type is reported through the registry's failure
/// listeners; the command itself still succeeds with `null`.
pub struct DefineDriverMappingHandler {
    ctx: HandlerContext,
    capabilities: Capabilities,
    driver_type: String,
}

impl CommandHandler for DefineDriverMappingHandler {
    fn execute(&mut self) -> HandlerResult {
        let registered = self
            .ctx
            .drivers()
            .register(self.capabilities.clone(), &self.driver_type);
        if registered.is_ok() {
            info!("Driver mapping defined: {} -> {}", self.capabilities, self.driver_type);
        }
        Ok(Value::Null)
    }

    fn describe(&self) -> String {
        format!("[define driver mapping: {}]", self.driver_type)
    }
}

pub fn define_driver_mapping(
    ctx: &HandlerContext,
    _locator: &LocatorParams,
    body: &BodyParams,
) -> BuildResult {
    let capabilities = Capabilities::from_json(object_param(body, "capabilities")?)
        .map_err(|e| CommandError::invalid_parameter(e.to_string()))?;
    let driver_type = string_param(body, "class")?;
    Ok(Box::new(DefineDriverMappingHandler { ctx: ctx.clone(), capabilities, driver_type }))
}
