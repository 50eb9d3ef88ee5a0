//! Error taxonomy and its mapping onto HTTP statuses and wire result codes.
//!
//! Four transport-level errors (not implemented, invalid command, resource
//! not found, invalid parameter) are reported with a non-200 HTTP status and
//! a plain message. Everything else is reported with HTTP 200, a wire result
//! code and a structured error payload.

use thiserror::Error;

use crate::status::{HttpStatus, WireStatus};

/// Failure kinds a driver can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverErrorKind {
    NoSuchWindow,
    NoSuchElement,
    NoSuchFrame,
    StaleElementReference,
    ElementNotVisible,
    InvalidElementState,
    NotImplemented,
    XPathLookup,
    Timeout,
    UnhandledAlert,
    Unknown,
}

impl DriverErrorKind {
    pub fn wire_status(&self) -> WireStatus {
        match self {
            Self::NoSuchWindow => WireStatus::NoSuchWindow,
            Self::NoSuchElement => WireStatus::NoSuchElement,
            Self::NoSuchFrame => WireStatus::NoSuchFrame,
            Self::StaleElementReference => WireStatus::StaleElementReference,
            Self::ElementNotVisible => WireStatus::ElementNotVisible,
            Self::InvalidElementState => WireStatus::InvalidElementState,
            Self::NotImplemented => WireStatus::InvalidElementState,
            Self::XPathLookup => WireStatus::XPathLookupError,
            Self::Timeout => WireStatus::Timeout,
            Self::UnhandledAlert => WireStatus::UnexpectedAlertOpen,
            Self::Unknown => WireStatus::UnhandledError,
        }
    }

    /// Class name reported in the structured error payload.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::NoSuchWindow => "NoSuchWindowError",
            Self::NoSuchElement => "NoSuchElementError",
            Self::NoSuchFrame => "NoSuchFrameError",
            Self::StaleElementReference => "StaleElementReferenceError",
            Self::ElementNotVisible => "ElementNotVisibleError",
            Self::InvalidElementState => "InvalidElementStateError",
            Self::NotImplemented => "NotImplementedError",
            Self::XPathLookup => "XPathLookupError",
            Self::Timeout => "TimeoutError",
            Self::UnhandledAlert => "UnhandledAlertError",
            Self::Unknown => "DriverError",
        }
    }
}

/// Error raised by a driver while executing a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DriverError {
    pub kind: DriverErrorKind,
    pub message: String,
    /// Text of the open alert, for `UnhandledAlert` errors.
    pub alert_text: Option<String>,
}

impl DriverError {
    pub fn new(kind: DriverErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), alert_text: None }
    }

    pub fn no_such_window(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::NoSuchWindow, message)
    }

    pub fn no_such_element(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::NoSuchElement, message)
    }

    pub fn no_such_frame(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::NoSuchFrame, message)
    }

    pub fn stale_element(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::StaleElementReference, message)
    }

    pub fn element_not_visible(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::ElementNotVisible, message)
    }

    pub fn invalid_element_state(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::InvalidElementState, message)
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::NotImplemented, message)
    }

    pub fn xpath_lookup(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::XPathLookup, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Timeout, message)
    }

    pub fn unhandled_alert(message: impl Into<String>, alert_text: impl Into<String>) -> Self {
        Self {
            kind: DriverErrorKind::UnhandledAlert,
            message: message.into(),
            alert_text: Some(alert_text.into()),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Unknown, message)
    }

    /// The driver has no support for an operation at all.
    pub fn unsupported(operation: &str) -> Self {
        Self::unknown(format!("Driver does not support '{operation}'"))
    }
}

/// Every failure a command can produce on its way through the dispatcher.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("{0}")]
    NotImplemented(String),
    #[error("{0}")]
    InvalidCommand(String),
    #[error("{0}")]
    ResourceNotFound(String),
    #[error("{0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error("{0}")]
    DriverInstantiation(String),
    #[error("{0}")]
    Unhandled(String),
}

impl CommandError {
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented(message.into())
    }

    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::InvalidCommand(message.into())
    }

    pub fn resource_not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound(message.into())
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub fn unhandled(message: impl Into<String>) -> Self {
        Self::Unhandled(message.into())
    }

    /// Transport-level errors carry their own HTTP status and a bare message.
    pub fn is_transport_level(&self) -> bool {
        matches!(
            self,
            Self::NotImplemented(_)
                | Self::InvalidCommand(_)
                | Self::ResourceNotFound(_)
                | Self::InvalidParameter(_)
        )
    }

    pub fn http_status(&self) -> HttpStatus {
        match self {
            Self::NotImplemented(_) => HttpStatus::NotImplemented,
            Self::InvalidCommand(_) => HttpStatus::MethodNotAllowed,
            Self::ResourceNotFound(_) => HttpStatus::NotFound,
            Self::InvalidParameter(_) => HttpStatus::BadRequest,
            Self::Driver(_) | Self::DriverInstantiation(_) | Self::Unhandled(_) => HttpStatus::Ok,
        }
    }

    /// Result code placed in the response envelope.
    ///
    /// Transport-level errors leave the code at `Success`; their HTTP status
    /// is what signals the failure.
    pub fn wire_status(&self) -> WireStatus {
        match self {
            Self::Driver(e) => e.kind.wire_status(),
            Self::DriverInstantiation(_) | Self::Unhandled(_) => WireStatus::UnhandledError,
            _ => WireStatus::Success,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Self::NotImplemented(_) => "CommandNotImplementedError",
            Self::InvalidCommand(_) => "InvalidCommandError",
            Self::ResourceNotFound(_) => "ResourceNotFoundError",
            Self::InvalidParameter(_) => "InvalidParameterError",
            Self::Driver(e) => e.kind.class_name(),
            Self::DriverInstantiation(_) => "DriverInstantiationError",
            Self::Unhandled(_) => "UnhandledError",
        }
    }

    /// Alert text to attach to the error payload, if any.
    pub fn alert_text(&self) -> Option<&str> {
        match self {
            Self::Driver(e) if e.kind == DriverErrorKind::UnhandledAlert => {
                Some(e.alert_text.as_deref().unwrap_or_default())
            }
            _ => None,
        }
    }
}
