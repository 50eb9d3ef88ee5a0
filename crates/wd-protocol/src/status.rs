//! Wire result codes and the HTTP statuses the server emits.

use std::fmt;

/// Numeric result code carried in the `status` field of every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireStatus {
    Success,
    NoSuchDriver,
    NoSuchElement,
    NoSuchFrame,
    UnknownCommand,
    StaleElementReference,
    ElementNotVisible,
    InvalidElementState,
    UnhandledError,
    JavaScriptError,
    XPathLookupError,
    Timeout,
    NoSuchWindow,
    InvalidCookieDomain,
    UnableToSetCookie,
    UnexpectedAlertOpen,
    NoAlertPresent,
    AsyncScriptTimeout,
    InvalidElementCoordinates,
    InvalidSelector,
}

impl WireStatus {
    pub fn code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::NoSuchDriver => 6,
            Self::NoSuchElement => 7,
            Self::NoSuchFrame => 8,
            Self::UnknownCommand => 9,
            Self::StaleElementReference => 10,
            Self::ElementNotVisible => 11,
            Self::InvalidElementState => 12,
            Self::UnhandledError => 13,
            Self::JavaScriptError => 17,
            Self::XPathLookupError => 19,
            Self::Timeout => 21,
            Self::NoSuchWindow => 23,
            Self::InvalidCookieDomain => 24,
            Self::UnableToSetCookie => 25,
            Self::UnexpectedAlertOpen => 26,
            Self::NoAlertPresent => 27,
            Self::AsyncScriptTimeout => 28,
            Self::InvalidElementCoordinates => 29,
            Self::InvalidSelector => 32,
        }
    }

    /// Map a numeric code back to a result code. Unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        let status = match code {
            0 => Self::Success,
            6 => Self::NoSuchDriver,
            7 => Self::NoSuchElement,
            8 => Self::NoSuchFrame,
            9 => Self::UnknownCommand,
            10 => Self::StaleElementReference,
            11 => Self::ElementNotVisible,
            12 => Self::InvalidElementState,
            13 => Self::UnhandledError,
            17 => Self::JavaScriptError,
            19 => Self::XPathLookupError,
            21 => Self::Timeout,
            23 => Self::NoSuchWindow,
            24 => Self::InvalidCookieDomain,
            25 => Self::UnableToSetCookie,
            26 => Self::UnexpectedAlertOpen,
            27 => Self::NoAlertPresent,
            28 => Self::AsyncScriptTimeout,
            29 => Self::InvalidElementCoordinates,
            32 => Self::InvalidSelector,
            _ => return None,
        };
        Some(status)
    }
}

/// HTTP statuses the dispatcher can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpStatus {
    #[default]
    Ok,
    SeeOther,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    NotImplemented,
}

impl HttpStatus {
    pub fn code(&self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::SeeOther => 303,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::NotImplemented => 501,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.code())
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
