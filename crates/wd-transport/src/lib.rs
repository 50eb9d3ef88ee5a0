//! Strontium HTTP transport.
//!
//! Serves the wire protocol over HTTP using axum. The transport handles:
//! - Listener lifecycle (bind, serve, graceful stop)
//! - Reading request bodies and writing JSON or text responses
//! - Redirecting new sessions with a `Location` header
//! - Raising a shutdown request once a SHUTDOWN response is written
//!
//! The transport is decoupled from dispatch via the `RequestHandler` trait.

pub mod server;

pub use server::{
    IncomingRequest, RequestHandler, ShutdownRequested, TransportConfig, TransportError,
    TransportServer, router,
};
