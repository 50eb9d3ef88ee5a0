//! HandlerRegistry: maps command names to handler factories.

use std::collections::HashMap;

use tracing::debug;
use wd_handlers::{
    BuildResult, HandlerContext, HandlerFactory, NotImplementedHandler, builtin_handlers,
};
use wd_protocol::{BodyParams, LocatorParams};

/// Command name → handler factory. Commands without a factory get a
/// handler that always reports "not implemented".
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in handler.
    pub fn with_builtin_handlers() -> Self {
        let mut registry = Self::new();
        for (command, factory) in builtin_handlers() {
            registry.register(command, factory);
        }
        registry
    }

    /// Register (or replace) the factory for `command`.
    pub fn register(&mut self, command: impl Into<String>, factory: HandlerFactory) {
        let command = command.into();
        debug!("Registering handler: {command}");
        self.factories.insert(command, factory);
    }

    pub fn can_create_handler(&self, command: &str) -> bool {
        self.factories.contains_key(command)
    }

    /// Build the handler for `command`, validating its parameters.
    pub fn create_handler(
        &self,
        command: &str,
        ctx: &HandlerContext,
        locator: &LocatorParams,
        body: &BodyParams,
    ) -> BuildResult {
        match self.factories.get(command) {
            Some(factory) => factory(ctx, locator, body),
            None => Ok(Box::new(NotImplementedHandler::new(command))),
        }
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
