//! Strontium wire protocol types.
//!
//! Types for the JSON wire protocol spoken by remote automation clients.
//! This crate is the single source of truth for command names, resource
//! path templates, wire result codes, HTTP statuses and the error taxonomy.

pub mod capabilities;
pub mod command;
pub mod commands;
pub mod error;
pub mod response;
pub mod status;

pub use capabilities::{Capabilities, CapabilityError, Platform};
pub use command::{BodyParams, Command, LocatorParams, SessionId, params};
pub use commands::{COMMANDS, CommandInfo, DriverCommand, HttpMethod, command_info};
pub use error::{CommandError, DriverError, DriverErrorKind};
pub use response::{ErrorPayload, Response, ServerResponse, StackFrame};
pub use status::{HttpStatus, WireStatus};

/// Case-insensitive fragment that marks a request as a shutdown request.
pub const SHUTDOWN_URL_FRAGMENT: &str = "SHUTDOWN";

/// Whether a request path asks the server to shut down.
///
/// Such requests bypass routing entirely.
pub fn is_shutdown_path(path: &str) -> bool {
    path.to_ascii_uppercase().contains(SHUTDOWN_URL_FRAGMENT)
}
