//! HTTP transport server using Axum.
//!
//! Every request is handed to the `RequestHandler` as method, raw path and
//! body bytes. The handler's `ServerResponse` is written back as JSON (or
//! plain text for client errors) with an exact `Content-Length`.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header},
    response::Response as HttpResponse,
};
use bytes::Bytes;
use futures_util::{StreamExt, stream};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use wd_protocol::{HttpStatus, ServerResponse, is_shutdown_path};

/// Trait implemented by the dispatcher to handle incoming requests.
/// The transport calls this once per HTTP request.
pub trait RequestHandler: Send + Sync + 'static {
    fn handle_request(
        &self,
        request: IncomingRequest,
    ) -> impl std::future::Future<Output = ServerResponse> + Send;
}

/// A request as read off the wire.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    /// HTTP method name, upper case.
    pub method: String,
    /// Absolute request path, still percent-encoded.
    pub path: String,
    pub body: Bytes,
}

impl IncomingRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self { method: method.into(), path: path.into(), body: body.into() }
    }
}

/// Raised after the response to a SHUTDOWN request has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownRequested;

/// Transport server configuration.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Hostname to bind to
    pub hostname: String,
    /// Port to listen on (0 for OS-assigned)
    pub port: u16,
    /// Prefix every command path lives under
    pub base_path: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { hostname: "0.0.0.0".into(), port: 4444, base_path: "wd/hub/".into() }
    }
}

impl TransportConfig {
    /// The base path with exactly one leading and one trailing slash.
    pub fn normalized_base_path(&self) -> String {
        let trimmed = self.base_path.trim_matches('/');
        if trimmed.is_empty() { "/".to_string() } else { format!("/{trimmed}/") }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid listen address '{address}': {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Shared state for the request handlers.
struct AppState<H: RequestHandler> {
    handler: Arc<H>,
    shutdown_tx: mpsc::UnboundedSender<ShutdownRequested>,
}

/// Build the axum router serving every path through `handler`.
pub fn router<H: RequestHandler>(
    handler: Arc<H>,
    shutdown_tx: mpsc::UnboundedSender<ShutdownRequested>,
) -> Router {
    let state = Arc::new(AppState { handler, shutdown_tx });
    Router::new()
        .fallback(dispatch_handler::<H>)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The transport server: owns the listener task and the shutdown channel.
pub struct TransportServer {
    /// Shutdown signal
    stop_tx: Option<mpsc::Sender<()>>,
    /// Server task handle
    handle: Option<tokio::task::JoinHandle<()>>,
    /// Remote shutdown requests, until taken
    shutdown_rx: Option<mpsc::UnboundedReceiver<ShutdownRequested>>,
    /// Actual bound port
    port: u16,
}

impl TransportServer {
    /// Bind the listener and start serving with the given request handler.
    pub async fn start<H: RequestHandler>(
        config: TransportConfig,
        handler: Arc<H>,
    ) -> Result<Self, TransportError> {
        let (stop_tx, mut stop_rx) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = mpsc::unbounded_channel();

        let app = router(handler, shutdown_tx);

        let address = format!("{}:{}", config.hostname, config.port);
        let addr: SocketAddr =
            address.parse().map_err(|source| TransportError::Address { address, source })?;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| TransportError::Bind { address: addr, source })?;
        let actual_port = listener.local_addr()?.port();

        info!(
            "Listening on http://{}:{}{}",
            config.hostname,
            actual_port,
            config.normalized_base_path()
        );

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stop_rx.recv().await;
                })
                .await
            {
                error!("HTTP server error: {e}");
            }
        });

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
            shutdown_rx: Some(shutdown_rx),
            port: actual_port,
        })
    }

    /// Get the actual bound port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Take the receiver of remote shutdown requests. Returns `None` once taken.
    pub fn take_shutdown_requests(&mut self) -> Option<mpsc::UnboundedReceiver<ShutdownRequested>> {
        self.shutdown_rx.take()
    }

    /// Gracefully stop the server.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(()).await;
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        info!("HTTP transport stopped");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP Handler
// ─────────────────────────────────────────────────────────────────────────────

async fn dispatch_handler<H: RequestHandler>(
    State(state): State<Arc<AppState<H>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> HttpResponse {
    let path = uri.path().to_string();
    let shutdown = is_shutdown_path(&path);
    let request = IncomingRequest::new(method.as_str(), path.clone(), body);

    let response = state.handler.handle_request(request).await;

    let host = headers.get(header::HOST).and_then(|h| h.to_str().ok());
    let notify = shutdown.then(|| state.shutdown_tx.clone());
    encode_response(response, host, &path, notify)
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Sends one shutdown request when dropped.
struct ShutdownGuard(Option<mpsc::UnboundedSender<ShutdownRequested>>);

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.0.take() {
            info!("Shutdown requested by client");
            let _ = tx.send(ShutdownRequested);
        }
    }
}

/// Turn a `ServerResponse` into the HTTP response written to the client.
///
/// A 303 response carries the new session id in `Location` and an empty
/// value. When `notify` is set, the shutdown request is raised once the
/// body has been handed over and dropped by the connection.
fn encode_response(
    mut server_response: ServerResponse,
    host: Option<&str>,
    path: &str,
    notify: Option<mpsc::UnboundedSender<ShutdownRequested>>,
) -> HttpResponse {
    let mut location = None;
    if server_response.status == HttpStatus::SeeOther {
        match &server_response.response.session_id {
            Some(id) => {
                let host = host.unwrap_or("localhost");
                location = Some(format!("http://{host}{}/{id}", path.trim_end_matches('/')));
            }
            None => warn!("Redirect response without a session id for {path}"),
        }
        server_response.response.value = Value::String(String::new());
    }

    let payload = match serde_json::to_vec(&server_response.response) {
        Ok(bytes) => Bytes::from(bytes),
        Err(e) => {
            error!("Failed to serialize response for {path}: {e}");
            Bytes::new()
        }
    };
    let length = payload.len();

    let body = match notify {
        Some(tx) => {
            let guard = ShutdownGuard(Some(tx));
            Body::from_stream(stream::iter([Ok::<_, Infallible>(payload)]).map(move |chunk| {
                let _ = &guard;
                chunk
            }))
        }
        None => Body::from(payload),
    };

    let status = StatusCode::from_u16(server_response.status.code()).unwrap_or(StatusCode::OK);
    let mut response = HttpResponse::new(body);
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(server_response.content_type()),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    if let Some(location) = location {
        match HeaderValue::from_str(&location) {
            Ok(value) => {
                headers.insert(header::LOCATION, value);
            }
            Err(e) => warn!("Invalid Location header '{location}': {e}"),
        }
    }
    response
}
