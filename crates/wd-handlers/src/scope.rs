//! Session and element scopes.
//!
//! Session-scoped handlers are built from a `SessionScope`, element-scoped
//! ones from an `ElementScope`. Both resolve their target while the handler
//! is being constructed, then wrap a closure that runs against it.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value, json};
use wd_protocol::{CommandError, LocatorParams, SessionId, params};
use wd_session::{Driver, DriverSession, ElementRef, ScriptValue};

use crate::handler::{CommandHandler, HandlerContext, HandlerResult};
use crate::params::locator_param;

/// Key of the object clients use to refer to an element.
pub const ELEMENT_KEY: &str = "ELEMENT";

/// A resolved, live session.
pub struct SessionScope {
    id: SessionId,
    session: Arc<DriverSession>,
}

impl SessionScope {
    /// Resolve the `sessionId` locator parameter against the session registry.
    pub fn resolve(ctx: &HandlerContext, locator: &LocatorParams) -> Result<Self, CommandError> {
        let raw = locator
            .get(params::SESSION_ID)
            .ok_or_else(|| CommandError::invalid_command("Command requires a session ID"))?;
        let id = SessionId::new(raw.as_str());
        let session = ctx.sessions.get_session(&id).ok_or_else(|| {
            CommandError::resource_not_found(format!("Could not find active session with id '{id}'"))
        })?;
        Ok(Self { id, session })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn session(&self) -> &DriverSession {
        &self.session
    }

    pub fn driver(&self) -> &dyn Driver {
        self.session.driver()
    }

    /// Resolve a client element handle.
    pub fn element(&self, handle: &str) -> Result<ElementRef, CommandError> {
        self.session.elements().get(handle).ok_or_else(|| {
            CommandError::resource_not_found(format!("Could not find element with id '{handle}'"))
        })
    }

    /// Register `element` and return the `{"ELEMENT": handle}` object for it.
    pub fn wrap_element(&self, element: ElementRef) -> Value {
        json!({ ELEMENT_KEY: self.session.elements().add(element) })
    }

    pub fn wrap_elements(&self, elements: Vec<ElementRef>) -> Value {
        Value::Array(elements.into_iter().map(|e| self.wrap_element(e)).collect())
    }

    /// Convert a script argument, resolving element objects at any depth.
    pub fn to_script_value(&self, value: &Value) -> Result<ScriptValue, CommandError> {
        let converted = match value {
            Value::Null => ScriptValue::Null,
            Value::Bool(b) => ScriptValue::Bool(*b),
            Value::Number(n) => ScriptValue::Number(n.clone()),
            Value::String(s) => ScriptValue::String(s.clone()),
            Value::Array(items) => ScriptValue::List(
                items.iter().map(|v| self.to_script_value(v)).collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => match element_handle(map) {
                Some(handle) => {
                    let element = self.session.elements().get(handle).ok_or_else(|| {
                        CommandError::invalid_parameter(format!(
                            "Could not find element with id '{handle}'"
                        ))
                    })?;
                    ScriptValue::Element(element)
                }
                None => ScriptValue::Map(
                    map.iter()
                        .map(|(k, v)| Ok((k.clone(), self.to_script_value(v)?)))
                        .collect::<Result<BTreeMap<_, _>, CommandError>>()?,
                ),
            },
        };
        Ok(converted)
    }

    /// Convert a script result, wrapping every element it contains.
    pub fn from_script_value(&self, value: ScriptValue) -> Value {
        match value {
            ScriptValue::Null => Value::Null,
            ScriptValue::Bool(b) => Value::Bool(b),
            ScriptValue::Number(n) => Value::Number(n),
            ScriptValue::String(s) => Value::String(s),
            ScriptValue::List(items) => {
                Value::Array(items.into_iter().map(|v| self.from_script_value(v)).collect())
            }
            ScriptValue::Map(entries) => Value::Object(
                entries.into_iter().map(|(k, v)| (k, self.from_script_value(v))).collect(),
            ),
            ScriptValue::Element(element) => self.wrap_element(element),
        }
    }

    /// Build a handler that runs `call` against this session.
    pub fn into_handler<F>(self, description: &str, call: F) -> Box<dyn CommandHandler>
    where
        F: FnOnce(&SessionScope) -> HandlerResult + Send + 'static,
    {
        Box::new(ScopedHandler::new(self, description, call))
    }
}

/// A resolved element inside a live session.
pub struct ElementScope {
    scope: SessionScope,
    handle: String,
    element: ElementRef,
}

impl ElementScope {
    /// Resolve the `sessionId` and `id` locator parameters.
    pub fn resolve(ctx: &HandlerContext, locator: &LocatorParams) -> Result<Self, CommandError> {
        let scope = SessionScope::resolve(ctx, locator)?;
        let handle = locator_param(locator, params::ELEMENT_ID)?.to_string();
        let element = scope.element(&handle)?;
        Ok(Self { scope, handle, element })
    }

    pub fn session(&self) -> &SessionScope {
        &self.scope
    }

    pub fn driver(&self) -> &dyn Driver {
        self.scope.driver()
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    /// Build a handler that runs `call` against this element.
    pub fn into_handler<F>(self, description: &str, call: F) -> Box<dyn CommandHandler>
    where
        F: FnOnce(&ElementScope) -> HandlerResult + Send + 'static,
    {
        Box::new(ScopedHandler::new(self, description, call))
    }
}

/// Scopes expose the session their handlers run in.
trait Scope: Send + 'static {
    fn session_id(&self) -> &SessionId;
}

impl Scope for SessionScope {
    fn session_id(&self) -> &SessionId {
        &self.id
    }
}

impl Scope for ElementScope {
    fn session_id(&self) -> &SessionId {
        &self.scope.id
    }
}

struct ScopedHandler<S, F> {
    scope: S,
    description: String,
    call: Option<F>,
}

impl<S, F> ScopedHandler<S, F> {
    fn new(scope: S, description: &str, call: F) -> Self {
        Self { scope, description: format!("[{description}]"), call: Some(call) }
    }
}

impl<S, F> CommandHandler for ScopedHandler<S, F>
where
    S: Scope,
    F: FnOnce(&S) -> HandlerResult + Send + 'static,
{
    fn session_id(&self) -> Option<&SessionId> {
        Some(self.scope.session_id())
    }

    fn execute(&mut self) -> HandlerResult {
        let call = self
            .call
            .take()
            .ok_or_else(|| CommandError::unhandled(format!("{} already executed", self.description)))?;
        call(&self.scope)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

/// The handle inside an `{"ELEMENT": handle}` object.
pub fn element_handle(map: &Map<String, Value>) -> Option<&str> {
    map.get(ELEMENT_KEY).and_then(Value::as_str)
}
