//! Command name constants and the command-info table.
//!
//! Each command name is paired with exactly one HTTP method and one resource
//! path template. Templates are relative to the listener prefix and use
//! `{placeholder}` segments for locator parameters.

use std::fmt;

/// All command names known to the wire protocol.
pub struct DriverCommand;

impl DriverCommand {
    // ── Server ──────────────────────────────────────────────────────────
    pub const STATUS: &str = "status";
    pub const NEW_SESSION: &str = "newSession";
    pub const GET_SESSION_LIST: &str = "getSessionList";
    pub const DEFINE_DRIVER_MAPPING: &str = "defineDriverMapping";

    // ── Session ─────────────────────────────────────────────────────────
    pub const GET_SESSION_CAPABILITIES: &str = "getSessionCapabilities";
    pub const QUIT: &str = "quit";
    pub const CLOSE: &str = "close";

    // ── Navigation ──────────────────────────────────────────────────────
    pub const GET: &str = "get";
    pub const GO_BACK: &str = "goBack";
    pub const GO_FORWARD: &str = "goForward";
    pub const REFRESH: &str = "refresh";
    pub const GET_CURRENT_URL: &str = "getCurrentUrl";
    pub const GET_TITLE: &str = "getTitle";
    pub const GET_PAGE_SOURCE: &str = "getPageSource";
    pub const SCREENSHOT: &str = "screenshot";

    // ── Scripts ─────────────────────────────────────────────────────────
    pub const EXECUTE_SCRIPT: &str = "executeScript";
    pub const EXECUTE_ASYNC_SCRIPT: &str = "executeAsyncScript";

    // ── Timeouts ────────────────────────────────────────────────────────
    pub const SET_TIMEOUT: &str = "setTimeout";
    pub const IMPLICITLY_WAIT: &str = "implicitlyWait";
    pub const SET_ASYNC_SCRIPT_TIMEOUT: &str = "setAsyncScriptTimeout";

    // ── Cookies ─────────────────────────────────────────────────────────
    pub const GET_ALL_COOKIES: &str = "getCookies";
    pub const ADD_COOKIE: &str = "addCookie";
    pub const DELETE_ALL_COOKIES: &str = "deleteAllCookies";
    pub const DELETE_COOKIE: &str = "deleteCookie";

    // ── Windows and frames ──────────────────────────────────────────────
    pub const GET_CURRENT_WINDOW_HANDLE: &str = "getCurrentWindowHandle";
    pub const GET_WINDOW_HANDLES: &str = "getWindowHandles";
    pub const SWITCH_TO_WINDOW: &str = "switchToWindow";
    pub const SWITCH_TO_FRAME: &str = "switchToFrame";
    pub const GET_WINDOW_SIZE: &str = "getWindowSize";
    pub const SET_WINDOW_SIZE: &str = "setWindowSize";
    pub const GET_WINDOW_POSITION: &str = "getWindowPosition";
    pub const SET_WINDOW_POSITION: &str = "setWindowPosition";
    pub const MAXIMIZE_WINDOW: &str = "maximizeWindow";

    // ── Element lookup ──────────────────────────────────────────────────
    pub const FIND_ELEMENT: &str = "findElement";
    pub const FIND_ELEMENTS: &str = "findElements";
    pub const FIND_CHILD_ELEMENT: &str = "findChildElement";
    pub const FIND_CHILD_ELEMENTS: &str = "findChildElements";
    pub const GET_ACTIVE_ELEMENT: &str = "getActiveElement";
    pub const DESCRIBE_ELEMENT: &str = "describeElement";

    // ── Element interaction ─────────────────────────────────────────────
    pub const CLICK_ELEMENT: &str = "clickElement";
    pub const SUBMIT_ELEMENT: &str = "submitElement";
    pub const CLEAR_ELEMENT: &str = "clearElement";
    pub const SEND_KEYS_TO_ELEMENT: &str = "sendKeysToElement";
    pub const SEND_KEYS_TO_ACTIVE_ELEMENT: &str = "sendKeysToActiveElement";

    // ── Element state ───────────────────────────────────────────────────
    pub const GET_ELEMENT_TEXT: &str = "getElementText";
    pub const GET_ELEMENT_TAG_NAME: &str = "getElementTagName";
    pub const GET_ELEMENT_ATTRIBUTE: &str = "getElementAttribute";
    pub const GET_ELEMENT_VALUE_OF_CSS_PROPERTY: &str = "getElementValueOfCssProperty";
    pub const IS_ELEMENT_SELECTED: &str = "isElementSelected";
    pub const IS_ELEMENT_ENABLED: &str = "isElementEnabled";
    pub const IS_ELEMENT_DISPLAYED: &str = "isElementDisplayed";
    pub const GET_ELEMENT_LOCATION: &str = "getElementLocation";
    pub const GET_ELEMENT_LOCATION_ONCE_SCROLLED_INTO_VIEW: &str =
        "getElementLocationOnceScrolledIntoView";
    pub const GET_ELEMENT_SIZE: &str = "getElementSize";
    pub const ELEMENT_EQUALS: &str = "elementEquals";

    // ── Alerts ──────────────────────────────────────────────────────────
    pub const GET_ALERT_TEXT: &str = "getAlertText";
    pub const SET_ALERT_VALUE: &str = "setAlertValue";
    pub const ACCEPT_ALERT: &str = "acceptAlert";
    pub const DISMISS_ALERT: &str = "dismissAlert";

    // ── Orientation ─────────────────────────────────────────────────────
    pub const GET_ORIENTATION: &str = "getOrientation";
    pub const SET_ORIENTATION: &str = "setOrientation";

    // ── Mouse ───────────────────────────────────────────────────────────
    pub const MOUSE_MOVE_TO: &str = "mouseMoveTo";
    pub const MOUSE_CLICK: &str = "mouseClick";
    pub const MOUSE_DOWN: &str = "mouseDown";
    pub const MOUSE_UP: &str = "mouseUp";
    pub const MOUSE_DOUBLE_CLICK: &str = "mouseDoubleClick";

    // ── Files ───────────────────────────────────────────────────────────
    pub const UPLOAD_FILE: &str = "uploadFile";

    // ── Touch ───────────────────────────────────────────────────────────
    pub const TOUCH_SINGLE_TAP: &str = "touchSingleTap";
    pub const TOUCH_DOUBLE_TAP: &str = "touchDoubleTap";
    pub const TOUCH_LONG_PRESS: &str = "touchLongPress";
    pub const TOUCH_PRESS: &str = "touchDown";
    pub const TOUCH_RELEASE: &str = "touchUp";
    pub const TOUCH_MOVE: &str = "touchMove";
    pub const TOUCH_SCROLL: &str = "touchScroll";
    pub const TOUCH_FLICK: &str = "touchFlick";

    // ── Location ────────────────────────────────────────────────────────
    pub const GET_LOCATION: &str = "getLocation";
    pub const SET_LOCATION: &str = "setLocation";

    // ── Web storage ─────────────────────────────────────────────────────
    pub const GET_LOCAL_STORAGE_KEYS: &str = "getLocalStorageKeys";
    pub const SET_LOCAL_STORAGE_ITEM: &str = "setLocalStorageItem";
    pub const CLEAR_LOCAL_STORAGE: &str = "clearLocalStorage";
    pub const GET_LOCAL_STORAGE_ITEM: &str = "getLocalStorageItem";
    pub const REMOVE_LOCAL_STORAGE_ITEM: &str = "removeLocalStorageItem";
    pub const GET_LOCAL_STORAGE_SIZE: &str = "getLocalStorageSize";
    pub const GET_SESSION_STORAGE_KEYS: &str = "getSessionStorageKeys";
    pub const SET_SESSION_STORAGE_ITEM: &str = "setSessionStorageItem";
    pub const CLEAR_SESSION_STORAGE: &str = "clearSessionStorage";
    pub const GET_SESSION_STORAGE_ITEM: &str = "getSessionStorageItem";
    pub const REMOVE_SESSION_STORAGE_ITEM: &str = "removeSessionStorageItem";
    pub const GET_SESSION_STORAGE_SIZE: &str = "getSessionStorageSize";

    // ── IME ─────────────────────────────────────────────────────────────
    pub const IME_GET_AVAILABLE_ENGINES: &str = "imeGetAvailableEngines";
    pub const IME_GET_ACTIVE_ENGINE: &str = "imeGetActiveEngine";
    pub const IME_IS_ACTIVATED: &str = "imeIsActivated";
    pub const IME_DEACTIVATE: &str = "imeDeactivate";
    pub const IME_ACTIVATE_ENGINE: &str = "imeActivateEngine";

    // ── Logs ────────────────────────────────────────────────────────────
    pub const GET_LOG: &str = "getLog";
    pub const GET_AVAILABLE_LOG_TYPES: &str = "getAvailableLogTypes";
}

/// HTTP methods used by the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    /// Parse an HTTP method name. Methods outside the protocol yield `None`.
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the command-info table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: &'static str,
    pub method: HttpMethod,
    pub resource_path: &'static str,
}

const fn get(name: &'static str, resource_path: &'static str) -> CommandInfo {
    CommandInfo { name, method: HttpMethod::Get, resource_path }
}

const fn post(name: &'static str, resource_path: &'static str) -> CommandInfo {
    CommandInfo { name, method: HttpMethod::Post, resource_path }
}

const fn delete(name: &'static str, resource_path: &'static str) -> CommandInfo {
    CommandInfo { name, method: HttpMethod::Delete, resource_path }
}

type C = DriverCommand;

/// Every command of the wire protocol, in declaration order.
pub const COMMANDS: &[CommandInfo] = &[
    get(C::STATUS, "/status"),
    post(C::NEW_SESSION, "/session"),
    get(C::GET_SESSION_LIST, "/sessions"),
    post(C::DEFINE_DRIVER_MAPPING, "/config/drivers"),
    get(C::GET_SESSION_CAPABILITIES, "/session/{sessionId}"),
    delete(C::QUIT, "/session/{sessionId}"),
    delete(C::CLOSE, "/session/{sessionId}/window"),
    get(C::GET_CURRENT_WINDOW_HANDLE, "/session/{sessionId}/window_handle"),
    get(C::GET_WINDOW_HANDLES, "/session/{sessionId}/window_handles"),
    post(C::SWITCH_TO_WINDOW, "/session/{sessionId}/window"),
    get(C::GET_WINDOW_SIZE, "/session/{sessionId}/window/{windowHandle}/size"),
    post(C::SET_WINDOW_SIZE, "/session/{sessionId}/window/{windowHandle}/size"),
    get(C::GET_WINDOW_POSITION, "/session/{sessionId}/window/{windowHandle}/position"),
    post(C::SET_WINDOW_POSITION, "/session/{sessionId}/window/{windowHandle}/position"),
    post(C::MAXIMIZE_WINDOW, "/session/{sessionId}/window/{windowHandle}/maximize"),
    post(C::SWITCH_TO_FRAME, "/session/{sessionId}/frame"),
    post(C::GET, "/session/{sessionId}/url"),
    get(C::GET_CURRENT_URL, "/session/{sessionId}/url"),
    post(C::GO_BACK, "/session/{sessionId}/back"),
    post(C::GO_FORWARD, "/session/{sessionId}/forward"),
    post(C::REFRESH, "/session/{sessionId}/refresh"),
    get(C::GET_TITLE, "/session/{sessionId}/title"),
    get(C::GET_PAGE_SOURCE, "/session/{sessionId}/source"),
    get(C::SCREENSHOT, "/session/{sessionId}/screenshot"),
    post(C::EXECUTE_SCRIPT, "/session/{sessionId}/execute"),
    post(C::EXECUTE_ASYNC_SCRIPT, "/session/{sessionId}/execute_async"),
    post(C::SET_TIMEOUT, "/session/{sessionId}/timeouts"),
    post(C::IMPLICITLY_WAIT, "/session/{sessionId}/timeouts/implicit_wait"),
    post(C::SET_ASYNC_SCRIPT_TIMEOUT, "/session/{sessionId}/timeouts/async_script"),
    get(C::GET_ALL_COOKIES, "/session/{sessionId}/cookie"),
    post(C::ADD_COOKIE, "/session/{sessionId}/cookie"),
    delete(C::DELETE_ALL_COOKIES, "/session/{sessionId}/cookie"),
    delete(C::DELETE_COOKIE, "/session/{sessionId}/cookie/{name}"),
    post(C::FIND_ELEMENT, "/session/{sessionId}/element"),
    post(C::FIND_ELEMENTS, "/session/{sessionId}/elements"),
    post(C::GET_ACTIVE_ELEMENT, "/session/{sessionId}/element/active"),
    get(C::DESCRIBE_ELEMENT, "/session/{sessionId}/element/{id}"),
    post(C::FIND_CHILD_ELEMENT, "/session/{sessionId}/element/{id}/element"),
    post(C::FIND_CHILD_ELEMENTS, "/session/{sessionId}/element/{id}/elements"),
    post(C::CLICK_ELEMENT, "/session/{sessionId}/element/{id}/click"),
    post(C::SUBMIT_ELEMENT, "/session/{sessionId}/element/{id}/submit"),
    post(C::CLEAR_ELEMENT, "/session/{sessionId}/element/{id}/clear"),
    post(C::SEND_KEYS_TO_ELEMENT, "/session/{sessionId}/element/{id}/value"),
    get(C::GET_ELEMENT_TEXT, "/session/{sessionId}/element/{id}/text"),
    get(C::GET_ELEMENT_TAG_NAME, "/session/{sessionId}/element/{id}/name"),
    get(C::GET_ELEMENT_ATTRIBUTE, "/session/{sessionId}/element/{id}/attribute/{name}"),
    get(
        C::GET_ELEMENT_VALUE_OF_CSS_PROPERTY,
        "/session/{sessionId}/element/{id}/css/{propertyName}",
    ),
    get(C::IS_ELEMENT_SELECTED, "/session/{sessionId}/element/{id}/selected"),
    get(C::IS_ELEMENT_ENABLED, "/session/{sessionId}/element/{id}/enabled"),
    get(C::IS_ELEMENT_DISPLAYED, "/session/{sessionId}/element/{id}/displayed"),
    get(C::GET_ELEMENT_LOCATION, "/session/{sessionId}/element/{id}/location"),
    get(
        C::GET_ELEMENT_LOCATION_ONCE_SCROLLED_INTO_VIEW,
        "/session/{sessionId}/element/{id}/location_in_view",
    ),
    get(C::GET_ELEMENT_SIZE, "/session/{sessionId}/element/{id}/size"),
    get(C::ELEMENT_EQUALS, "/session/{sessionId}/element/{id}/equals/{other}"),
    post(C::SEND_KEYS_TO_ACTIVE_ELEMENT, "/session/{sessionId}/keys"),
    get(C::GET_ALERT_TEXT, "/session/{sessionId}/alert_text"),
    post(C::SET_ALERT_VALUE, "/session/{sessionId}/alert_text"),
    post(C::ACCEPT_ALERT, "/session/{sessionId}/accept_alert"),
    post(C::DISMISS_ALERT, "/session/{sessionId}/dismiss_alert"),
    get(C::GET_ORIENTATION, "/session/{sessionId}/orientation"),
    post(C::SET_ORIENTATION, "/session/{sessionId}/orientation"),
    post(C::MOUSE_MOVE_TO, "/session/{sessionId}/moveto"),
    post(C::MOUSE_CLICK, "/session/{sessionId}/click"),
    post(C::MOUSE_DOWN, "/session/{sessionId}/buttondown"),
    post(C::MOUSE_UP, "/session/{sessionId}/buttonup"),
    post(C::MOUSE_DOUBLE_CLICK, "/session/{sessionId}/doubleclick"),
    post(C::UPLOAD_FILE, "/session/{sessionId}/file"),
    post(C::TOUCH_SINGLE_TAP, "/session/{sessionId}/touch/click"),
    post(C::TOUCH_DOUBLE_TAP, "/session/{sessionId}/touch/doubleclick"),
    post(C::TOUCH_LONG_PRESS, "/session/{sessionId}/touch/longclick"),
    post(C::TOUCH_PRESS, "/session/{sessionId}/touch/down"),
    post(C::TOUCH_RELEASE, "/session/{sessionId}/touch/up"),
    post(C::TOUCH_MOVE, "/session/{sessionId}/touch/move"),
    post(C::TOUCH_SCROLL, "/session/{sessionId}/touch/scroll"),
    post(C::TOUCH_FLICK, "/session/{sessionId}/touch/flick"),
    get(C::GET_LOCATION, "/session/{sessionId}/location"),
    post(C::SET_LOCATION, "/session/{sessionId}/location"),
    get(C::GET_LOCAL_STORAGE_KEYS, "/session/{sessionId}/local_storage"),
    post(C::SET_LOCAL_STORAGE_ITEM, "/session/{sessionId}/local_storage"),
    delete(C::CLEAR_LOCAL_STORAGE, "/session/{sessionId}/local_storage"),
    get(C::GET_LOCAL_STORAGE_ITEM, "/session/{sessionId}/local_storage/key/{key}"),
    delete(C::REMOVE_LOCAL_STORAGE_ITEM, "/session/{sessionId}/local_storage/key/{key}"),
    get(C::GET_LOCAL_STORAGE_SIZE, "/session/{sessionId}/local_storage/size"),
    get(C::GET_SESSION_STORAGE_KEYS, "/session/{sessionId}/session_storage"),
    post(C::SET_SESSION_STORAGE_ITEM, "/session/{sessionId}/session_storage"),
    delete(C::CLEAR_SESSION_STORAGE, "/session/{sessionId}/session_storage"),
    get(C::GET_SESSION_STORAGE_ITEM, "/session/{sessionId}/session_storage/key/{key}"),
    delete(
        C::REMOVE_SESSION_STORAGE_ITEM,
        "/session/{sessionId}/session_storage/key/{key}",
    ),
    get(C::GET_SESSION_STORAGE_SIZE, "/session/{sessionId}/session_storage/size"),
    get(C::IME_GET_AVAILABLE_ENGINES, "/session/{sessionId}/ime/available_engines"),
    get(C::IME_GET_ACTIVE_ENGINE, "/session/{sessionId}/ime/active_engine"),
    get(C::IME_IS_ACTIVATED, "/session/{sessionId}/ime/activated"),
    post(C::IME_DEACTIVATE, "/session/{sessionId}/ime/deactivate"),
    post(C::IME_ACTIVATE_ENGINE, "/session/{sessionId}/ime/activate"),
    post(C::GET_LOG, "/session/{sessionId}/log"),
    get(C::GET_AVAILABLE_LOG_TYPES, "/session/{sessionId}/log/types"),
];

/// Look up the command-info entry for a command name.
pub fn command_info(name: &str) -> Option<&'static CommandInfo> {
    COMMANDS.iter().find(|info| info.name == name)
}
