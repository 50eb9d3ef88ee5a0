//! Strontium server: routes wire protocol requests to command handlers.
//!
//! The `Dispatcher` owns the route table, the handler registry and the
//! handler context, and provides the `RequestHandler` implementation for
//! the transport layer.

pub mod dispatcher;
pub mod registry;
pub mod routes;

pub use dispatcher::Dispatcher;
pub use registry::HandlerRegistry;
pub use routes::{RouteMatch, RouteTable};
