//! The driver collaborator interface.
//!
//! A `Driver` automates one browser instance. Every method has a default
//! body that reports the operation as unsupported, so a backend only
//! implements what it can actually do. Calls are synchronous and may block;
//! the dispatcher runs them off the async runtime.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Number;
use wd_protocol::{Capabilities, DriverError};

pub type DriverResult<T> = Result<T, DriverError>;

/// Driver-native reference to an element. Never shown to clients directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(String);

impl ElementRef {
    pub fn new(native: impl Into<String>) -> Self {
        Self(native.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element lookup strategy together with its search value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Id(String),
    Name(String),
    LinkText(String),
    PartialLinkText(String),
    XPath(String),
    TagName(String),
    ClassName(String),
    CssSelector(String),
}

impl Locator {
    /// Build a locator from a wire strategy name. Unknown strategies yield `None`.
    pub fn from_strategy(using: &str, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let locator = match using {
            "id" => Self::Id(value),
            "name" => Self::Name(value),
            "link text" => Self::LinkText(value),
            "partial link text" => Self::PartialLinkText(value),
            "xpath" => Self::XPath(value),
            "tag name" => Self::TagName(value),
            "class name" => Self::ClassName(value),
            "css selector" => Self::CssSelector(value),
            _ => return None,
        };
        Some(locator)
    }

    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::LinkText(_) => "link text",
            Self::PartialLinkText(_) => "partial link text",
            Self::XPath(_) => "xpath",
            Self::TagName(_) => "tag name",
            Self::ClassName(_) => "class name",
            Self::CssSelector(_) => "css selector",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Id(v)
            | Self::Name(v)
            | Self::LinkText(v)
            | Self::PartialLinkText(v)
            | Self::XPath(v)
            | Self::TagName(v)
            | Self::ClassName(v)
            | Self::CssSelector(v) => v,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.strategy(), self.value())
    }
}

/// A value crossing the script-execution boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<ScriptValue>),
    Map(BTreeMap<String, ScriptValue>),
    Element(ElementRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
    pub expiry: Option<DateTime<Utc>>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: None,
            domain: None,
            secure: false,
            expiry: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Size {
    pub width: i64,
    pub height: i64,
}

/// Frame to switch focus to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameTarget {
    /// The top-level document.
    Default,
    Index(u32),
    Name(String),
    Element(ElementRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "LANDSCAPE",
            Self::Portrait => "PORTRAIT",
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LANDSCAPE" => Ok(Self::Landscape),
            "PORTRAIT" => Ok(Self::Portrait),
            _ => Err(format!("Unknown orientation '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutKind {
    Implicit,
    Script,
    PageLoad,
}

impl FromStr for TimeoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "implicit" => Ok(Self::Implicit),
            "script" => Ok(Self::Script),
            "page load" | "pageLoad" => Ok(Self::PageLoad),
            _ => Err(format!("Unknown timeout type '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

/// A browser automation backend.
pub trait Driver: Send + Sync {
    /// Capabilities the running driver reports about itself, if it knows them.
    fn capabilities(&self) -> Option<Capabilities> {
        None
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Close the current window.
    fn close(&self) -> DriverResult<()> {
        Err(DriverError::unsupported("close"))
    }

    /// Shut the browser down. Called once when the session ends.
    fn quit(&self) -> DriverResult<()> {
        Ok(())
    }

    // ── Navigation ──────────────────────────────────────────────────────

    fn navigate_to(&self, _url: &str) -> DriverResult<()> {
        Err(DriverError::unsupported("navigate_to"))
    }

    fn back(&self) -> DriverResult<()> {
        Err(DriverError::unsupported("back"))
    }

    fn forward(&self) -> DriverResult<()> {
        Err(DriverError::unsupported("forward"))
    }

    fn refresh(&self) -> DriverResult<()> {
        Err(DriverError::unsupported("refresh"))
    }

    fn current_url(&self) -> DriverResult<String> {
        Err(DriverError::unsupported("current_url"))
    }

    fn title(&self) -> DriverResult<String> {
        Err(DriverError::unsupported("title"))
    }

    fn page_source(&self) -> DriverResult<String> {
        Err(DriverError::unsupported("page_source"))
    }

    /// Base64-encoded PNG of the current viewport.
    fn screenshot(&self) -> DriverResult<String> {
        Err(DriverError::unsupported("screenshot"))
    }

    // ── Element lookup ──────────────────────────────────────────────────

    fn find_element(&self, _locator: &Locator) -> DriverResult<ElementRef> {
        Err(DriverError::unsupported("find_element"))
    }

    fn find_elements(&self, _locator: &Locator) -> DriverResult<Vec<ElementRef>> {
        Err(DriverError::unsupported("find_elements"))
    }

    fn find_child_element(&self, _parent: &ElementRef, _locator: &Locator) -> DriverResult<ElementRef> {
        Err(DriverError::unsupported("find_child_element"))
    }

    fn find_child_elements(
        &self,
        _parent: &ElementRef,
        _locator: &Locator,
    ) -> DriverResult<Vec<ElementRef>> {
        Err(DriverError::unsupported("find_child_elements"))
    }

    fn active_element(&self) -> DriverResult<ElementRef> {
        Err(DriverError::unsupported("active_element"))
    }

    // ── Element interaction ─────────────────────────────────────────────

    fn click_element(&self, _element: &ElementRef) -> DriverResult<()> {
        Err(DriverError::unsupported("click_element"))
    }

    fn submit_element(&self, _element: &ElementRef) -> DriverResult<()> {
        Err(DriverError::unsupported("submit_element"))
    }

    fn clear_element(&self, _element: &ElementRef) -> DriverResult<()> {
        Err(DriverError::unsupported("clear_element"))
    }

    fn send_keys_to_element(&self, _element: &ElementRef, _keys: &str) -> DriverResult<()> {
        Err(DriverError::unsupported("send_keys_to_element"))
    }

    fn send_keys_to_active_element(&self, _keys: &str) -> DriverResult<()> {
        Err(DriverError::unsupported("send_keys_to_active_element"))
    }

    // ── Element state ───────────────────────────────────────────────────

    fn element_text(&self, _element: &ElementRef) -> DriverResult<String> {
        Err(DriverError::unsupported("element_text"))
    }

    fn element_tag_name(&self, _element: &ElementRef) -> DriverResult<String> {
        Err(DriverError::unsupported("element_tag_name"))
    }

    fn element_attribute(&self, _element: &ElementRef, _name: &str) -> DriverResult<Option<String>> {
        Err(DriverError::unsupported("element_attribute"))
    }

    fn element_css_value(&self, _element: &ElementRef, _property: &str) -> DriverResult<String> {
        Err(DriverError::unsupported("element_css_value"))
    }

    fn is_element_selected(&self, _element: &ElementRef) -> DriverResult<bool> {
        Err(DriverError::unsupported("is_element_selected"))
    }

    fn is_element_enabled(&self, _element: &ElementRef) -> DriverResult<bool> {
        Err(DriverError::unsupported("is_element_enabled"))
    }

    fn is_element_displayed(&self, _element: &ElementRef) -> DriverResult<bool> {
        Err(DriverError::unsupported("is_element_displayed"))
    }

    fn element_location(&self, _element: &ElementRef) -> DriverResult<Point> {
        Err(DriverError::unsupported("element_location"))
    }

    /// Scroll the element into view and report its location afterwards.
    fn element_location_in_view(&self, _element: &ElementRef) -> DriverResult<Point> {
        Err(DriverError::unsupported("element_location_in_view"))
    }

    fn element_size(&self, _element: &ElementRef) -> DriverResult<Size> {
        Err(DriverError::unsupported("element_size"))
    }

    fn elements_equal(&self, a: &ElementRef, b: &ElementRef) -> DriverResult<bool> {
        Ok(a == b)
    }

    // ── Scripts ─────────────────────────────────────────────────────────

    fn execute_script(&self, _script: &str, _args: Vec<ScriptValue>) -> DriverResult<ScriptValue> {
        Err(DriverError::unsupported("execute_script"))
    }

    fn execute_async_script(
        &self,
        _script: &str,
        _args: Vec<ScriptValue>,
    ) -> DriverResult<ScriptValue> {
        Err(DriverError::unsupported("execute_async_script"))
    }

    // ── Cookies ─────────────────────────────────────────────────────────

    fn cookies(&self) -> DriverResult<Vec<Cookie>> {
        Err(DriverError::unsupported("cookies"))
    }

    fn add_cookie(&self, _cookie: Cookie) -> DriverResult<()> {
        Err(DriverError::unsupported("add_cookie"))
    }

    fn delete_cookie(&self, _name: &str) -> DriverResult<()> {
        Err(DriverError::unsupported("delete_cookie"))
    }

    fn delete_all_cookies(&self) -> DriverResult<()> {
        Err(DriverError::unsupported("delete_all_cookies"))
    }

    // ── Windows and frames ──────────────────────────────────────────────

    fn window_handle(&self) -> DriverResult<String> {
        Err(DriverError::unsupported("window_handle"))
    }

    fn window_handles(&self) -> DriverResult<Vec<String>> {
        Err(DriverError::unsupported("window_handles"))
    }

    fn switch_to_window(&self, _name: &str) -> DriverResult<()> {
        Err(DriverError::unsupported("switch_to_window"))
    }

    fn switch_to_frame(&self, _target: FrameTarget) -> DriverResult<()> {
        Err(DriverError::unsupported("switch_to_frame"))
    }

    fn window_size(&self, _handle: &str) -> DriverResult<Size> {
        Err(DriverError::unsupported("window_size"))
    }

    fn set_window_size(&self, _handle: &str, _size: Size) -> DriverResult<()> {
        Err(DriverError::unsupported("set_window_size"))
    }

    fn window_position(&self, _handle: &str) -> DriverResult<Point> {
        Err(DriverError::unsupported("window_position"))
    }

    fn set_window_position(&self, _handle: &str, _position: Point) -> DriverResult<()> {
        Err(DriverError::unsupported("set_window_position"))
    }

    fn maximize_window(&self, _handle: &str) -> DriverResult<()> {
        Err(DriverError::unsupported("maximize_window"))
    }

    // ── Timeouts ────────────────────────────────────────────────────────

    fn set_timeout(&self, _kind: TimeoutKind, _duration: Duration) -> DriverResult<()> {
        Err(DriverError::unsupported("set_timeout"))
    }

    // ── Alerts ──────────────────────────────────────────────────────────

    fn alert_text(&self) -> DriverResult<String> {
        Err(DriverError::unsupported("alert_text"))
    }

    fn send_alert_text(&self, _text: &str) -> DriverResult<()> {
        Err(DriverError::unsupported("send_alert_text"))
    }

    fn accept_alert(&self) -> DriverResult<()> {
        Err(DriverError::unsupported("accept_alert"))
    }

    fn dismiss_alert(&self) -> DriverResult<()> {
        Err(DriverError::unsupported("dismiss_alert"))
    }

    // ── Orientation ─────────────────────────────────────────────────────

    fn orientation(&self) -> DriverResult<Orientation> {
        Err(DriverError::unsupported("orientation"))
    }

    fn set_orientation(&self, _orientation: Orientation) -> DriverResult<()> {
        Err(DriverError::unsupported("set_orientation"))
    }

    // ── Mouse ───────────────────────────────────────────────────────────

    /// Move the mouse to an element, to an offset, or to an offset from an element.
    fn mouse_move_to(&self, _element: Option<&ElementRef>, _offset: Option<Point>) -> DriverResult<()> {
        Err(DriverError::unsupported("mouse_move_to"))
    }

    fn mouse_click(&self, _button: MouseButton) -> DriverResult<()> {
        Err(DriverError::unsupported("mouse_click"))
    }

    fn mouse_double_click(&self) -> DriverResult<()> {
        Err(DriverError::unsupported("mouse_double_click"))
    }

    fn mouse_down(&self, _button: MouseButton) -> DriverResult<()> {
        Err(DriverError::unsupported("mouse_down"))
    }

    fn mouse_up(&self, _button: MouseButton) -> DriverResult<()> {
        Err(DriverError::unsupported("mouse_up"))
    }
}
