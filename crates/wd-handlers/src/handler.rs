//! The handler contract and the shared context handlers are built from.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use wd_protocol::{BodyParams, CommandError, HttpStatus, LocatorParams, SessionId};
use wd_session::{DriverRegistry, SessionRegistry};

/// Result of executing a handler.
pub type HandlerResult = Result<Value, CommandError>;

/// Result of constructing a handler.
pub type BuildResult = Result<Box<dyn CommandHandler>, CommandError>;

/// Builds a handler for one command from its locator and body parameters.
///
/// Construction validates parameters and resolves sessions and elements, so
/// a missing session or element fails here rather than during execution.
pub type HandlerFactory =
    Arc<dyn Fn(&HandlerContext, &LocatorParams, &BodyParams) -> BuildResult + Send + Sync>;

/// Wrap a plain function as a `HandlerFactory`.
pub fn factory<F>(build: F) -> HandlerFactory
where
    F: Fn(&HandlerContext, &LocatorParams, &BodyParams) -> BuildResult + Send + Sync + 'static,
{
    Arc::new(build)
}

/// A single command, bound to its parameters and ready to run once.
pub trait CommandHandler: Send {
    /// HTTP status for a successful execution.
    fn status_code(&self) -> HttpStatus {
        HttpStatus::Ok
    }

    /// Session the command runs in, if any.
    fn session_id(&self) -> Option<&SessionId> {
        None
    }

    fn execute(&mut self) -> HandlerResult;

    /// Human-readable description used in logs.
    fn describe(&self) -> String;
}

impl fmt::Debug for dyn CommandHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Server-wide state handlers are constructed against.
#[derive(Clone)]
pub struct HandlerContext {
    pub sessions: Arc<SessionRegistry>,
    /// Root directory uploaded files are extracted under.
    pub upload_dir: PathBuf,
}

impl HandlerContext {
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self { sessions, upload_dir: std::env::temp_dir() }
    }

    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    pub fn drivers(&self) -> &Arc<DriverRegistry> {
        self.sessions.drivers()
    }
}

/// Fallback for commands that have no handler.
pub struct NotImplementedHandler {
    command: String,
}

impl NotImplementedHandler {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }
}

impl CommandHandler for NotImplementedHandler {
    fn execute(&mut self) -> HandlerResult {
        Err(CommandError::not_implemented("Command not implemented"))
    }

    fn describe(&self) -> String {
        format!("[not implemented: {}]", self.command)
    }
}
