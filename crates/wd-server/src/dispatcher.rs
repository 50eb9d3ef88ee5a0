//! Dispatcher: the single per-request control point.
//!
//! A request is routed, its body decoded, its handler built and executed,
//! and every failure on the way classified into a `ServerResponse`:
//! transport-level errors become an HTTP status with a bare message,
//! everything else an HTTP 200 carrying a result code and error payload.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, warn};
use wd_handlers::HandlerContext;
use wd_protocol::{
    BodyParams, Command, CommandError, ErrorPayload, HttpMethod, HttpStatus, Response,
    ServerResponse, SessionId, WireStatus, is_shutdown_path,
};
use wd_transport::{IncomingRequest, RequestHandler};

use crate::registry::HandlerRegistry;
use crate::routes::{RouteMatch, RouteTable};

struct DispatcherInner {
    routes: RouteTable,
    handlers: HandlerRegistry,
    context: HandlerContext,
}

/// Routes requests to command handlers. Cheap to clone.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

impl Dispatcher {
    /// Build a dispatcher, warning about every route without a handler.
    pub fn new(routes: RouteTable, handlers: HandlerRegistry, context: HandlerContext) -> Self {
        for (_, command, _) in routes.entries() {
            if !handlers.can_create_handler(command) {
                warn!("No command handler implemented for {command}");
            }
        }
        info!(
            "Dispatcher ready: {} routes, {} handlers under {}",
            routes.len(),
            handlers.len(),
            routes.base_path()
        );
        Self { inner: Arc::new(DispatcherInner { routes, handlers, context }) }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }

    pub fn context(&self) -> &HandlerContext {
        &self.inner.context
    }

    /// Dispatch one request synchronously. Handlers call into drivers, so
    /// this may block for as long as the driver does.
    pub fn dispatch(&self, request: &IncomingRequest) -> ServerResponse {
        if is_shutdown_path(&request.path) {
            info!("Executing: [Shutdown] at URL: {}", request.path);
            return ServerResponse::ok(Response::empty());
        }

        let Some(route) = self.inner.routes.match_route(&request.method, &request.path) else {
            return ServerResponse::new(
                Response::success(None, json!(format!("No command associated with {}", request.path))),
                HttpStatus::NotFound,
            );
        };

        match panic::catch_unwind(AssertUnwindSafe(|| self.run(request, &route))) {
            Ok(response) => response,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Handler for {} panicked: {message}", route.command);
                let err = CommandError::unhandled(message);
                error_response(route.command, &request.path, route.command, None, err)
            }
        }
    }

    fn run(&self, request: &IncomingRequest, route: &RouteMatch) -> ServerResponse {
        let body = if HttpMethod::parse(&request.method) == Some(HttpMethod::Post) {
            match Command::parse_body(&request.body) {
                Ok(body) => body,
                Err(e) => return error_response(route.command, &request.path, route.command, None, e),
            }
        } else {
            BodyParams::new()
        };
        let command = Command::new(route.command, route.variables.clone(), body);

        let inner = &self.inner;
        let mut handler = match inner.handlers.create_handler(
            &command.name,
            &inner.context,
            &command.locator,
            &command.body,
        ) {
            Ok(handler) => handler,
            Err(e) => return error_response(&command.name, &request.path, &command.name, None, e),
        };

        let description = handler.describe();
        info!("Executing: {description} at URL: {}", route.relative_path);
        let result = handler.execute();
        let session_id = handler.session_id().cloned();
        let response = match result {
            Ok(value) => ServerResponse::new(Response::success(session_id, value), handler.status_code()),
            Err(e) => error_response(&command.name, &request.path, &description, session_id, e),
        };
        info!("Done: {}", route.relative_path);
        response
    }
}

impl RequestHandler for Dispatcher {
    async fn handle_request(&self, request: IncomingRequest) -> ServerResponse {
        let dispatcher = self.clone();
        let path = request.path.clone();
        match tokio::task::spawn_blocking(move || dispatcher.dispatch(&request)).await {
            Ok(response) => response,
            Err(e) => {
                error!("Dispatch task for {path} failed: {e}");
                ServerResponse::ok(Response::new(
                    None,
                    WireStatus::UnhandledError,
                    json!(format!("Dispatch failed: {e}")),
                ))
            }
        }
    }
}

/// Classify a failure raised while building or executing `handler`.
fn error_response(
    command: &str,
    path: &str,
    handler: &str,
    session_id: Option<SessionId>,
    err: CommandError,
) -> ServerResponse {
    let value = match &err {
        CommandError::NotImplemented(message) => json!(format!("{message} ({command})")),
        CommandError::ResourceNotFound(message) => json!(format!("{message} ({path})")),
        CommandError::InvalidCommand(message) | CommandError::InvalidParameter(message) => {
            json!(message)
        }
        other => {
            warn!("{command} failed: {other}");
            ErrorPayload::from_error(command, handler, other).to_value()
        }
    };
    ServerResponse::new(Response::new(session_id, err.wire_status(), value), err.http_status())
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
