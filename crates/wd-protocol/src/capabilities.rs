//! Capability descriptors and the platform model.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value, json};
use thiserror::Error;

/// Wire key for the browser name.
pub const BROWSER_NAME: &str = "browserName";
/// Wire key for the browser version.
pub const VERSION: &str = "version";
/// Wire key for the platform.
pub const PLATFORM: &str = "platform";
/// Wire key for the JavaScript-enabled flag.
pub const JAVASCRIPT_ENABLED: &str = "javascriptEnabled";

/// Operating-system families a driver can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Any,
    Windows,
    Xp,
    Vista,
    Mac,
    Unix,
    Linux,
    Android,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::Windows => "WINDOWS",
            Self::Xp => "XP",
            Self::Vista => "VISTA",
            Self::Mac => "MAC",
            Self::Unix => "UNIX",
            Self::Linux => "LINUX",
            Self::Android => "ANDROID",
        }
    }

    /// The platform this process runs on.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Mac
        } else if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(unix) {
            Self::Unix
        } else {
            Self::Any
        }
    }

    /// Whether `self` belongs to the family named by `other`.
    pub fn is_platform_type(&self, other: Platform) -> bool {
        match other {
            Self::Any => true,
            Self::Windows => matches!(self, Self::Windows | Self::Xp | Self::Vista),
            Self::Xp => matches!(self, Self::Xp | Self::Windows),
            Self::Vista => matches!(self, Self::Vista | Self::Windows),
            Self::Linux => matches!(self, Self::Linux | Self::Unix),
            Self::Unix => matches!(self, Self::Unix | Self::Linux | Self::Mac),
            Self::Mac => *self == Self::Mac,
            Self::Android => *self == Self::Android,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let platform = match s.trim().to_ascii_uppercase().as_str() {
            "ANY" | "" => Self::Any,
            "WINDOWS" | "WIN" => Self::Windows,
            "XP" => Self::Xp,
            "VISTA" => Self::Vista,
            "MAC" | "MACOS" | "DARWIN" => Self::Mac,
            "UNIX" => Self::Unix,
            "LINUX" => Self::Linux,
            "ANDROID" => Self::Android,
            _ => return Err(CapabilityError::UnknownPlatform(s.to_string())),
        };
        Ok(platform)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("Unknown platform '{0}'")]
    UnknownPlatform(String),
    #[error("Capability '{key}' has the wrong type, expected {expected}")]
    WrongType { key: &'static str, expected: &'static str },
}

/// A capability descriptor, either desired by a client or declared by a driver.
///
/// Absent fields mean "no preference" on the desired side and "unspecified"
/// on the registered side. Keys outside the four well-known ones are kept
/// verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Capabilities {
    pub browser_name: Option<String>,
    pub version: Option<String>,
    pub platform: Option<Platform>,
    pub javascript_enabled: Option<bool>,
    pub extra: Map<String, Value>,
}

impl Capabilities {
    pub fn new(browser_name: impl Into<String>) -> Self {
        Self { browser_name: Some(browser_name.into()), ..Self::default() }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_javascript(mut self, enabled: bool) -> Self {
        self.javascript_enabled = Some(enabled);
        self
    }

    pub fn chrome() -> Self {
        Self::new("chrome").with_platform(Platform::Any).with_javascript(true)
    }

    pub fn firefox() -> Self {
        Self::new("firefox").with_platform(Platform::Any).with_javascript(true)
    }

    pub fn internet_explorer() -> Self {
        Self::new("internet explorer")
            .with_platform(Platform::Windows)
            .with_javascript(true)
    }

    pub fn html_unit() -> Self {
        Self::new("htmlunit").with_platform(Platform::Any)
    }

    /// JavaScript support as declared; unspecified counts as enabled.
    pub fn is_javascript_enabled(&self) -> bool {
        self.javascript_enabled.unwrap_or(true)
    }

    /// Parse a capabilities object received on the wire.
    pub fn from_json(map: &Map<String, Value>) -> Result<Self, CapabilityError> {
        let mut caps = Self::default();
        for (key, value) in map {
            match key.as_str() {
                BROWSER_NAME => caps.browser_name = optional_string(BROWSER_NAME, value)?,
                VERSION => caps.version = optional_string(VERSION, value)?,
                PLATFORM => {
                    caps.platform = optional_string(PLATFORM, value)?
                        .map(|p| p.parse())
                        .transpose()?;
                }
                JAVASCRIPT_ENABLED => {
                    caps.javascript_enabled = match value {
                        Value::Null => None,
                        Value::Bool(b) => Some(*b),
                        Value::String(s) => Some(s.eq_ignore_ascii_case("true")),
                        _ => {
                            return Err(CapabilityError::WrongType {
                                key: JAVASCRIPT_ENABLED,
                                expected: "boolean",
                            });
                        }
                    };
                }
                _ => {
                    caps.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(caps)
    }

    pub fn to_json(&self) -> Value {
        let mut map = self.extra.clone();
        map.insert(BROWSER_NAME.into(), json!(self.browser_name));
        map.insert(VERSION.into(), json!(self.version));
        map.insert(PLATFORM.into(), json!(self.platform.map(|p| p.as_str())));
        map.insert(JAVASCRIPT_ENABLED.into(), json!(self.javascript_enabled));
        Value::Object(map)
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{browserName: {}, version: {}, platform: {}, javascriptEnabled: {}}}",
            self.browser_name.as_deref().unwrap_or("<any>"),
            self.version.as_deref().unwrap_or("<any>"),
            self.platform.map_or("<any>", |p| p.as_str()),
            self.javascript_enabled.map_or("<any>".to_string(), |b| b.to_string()),
        )
    }
}

fn optional_string(key: &'static str, value: &Value) -> Result<Option<String>, CapabilityError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(CapabilityError::WrongType { key, expected: "string" }),
    }
}
