//! Command handlers.
//!
//! Every wire command with a handler maps to a factory that validates its
//! parameters, resolves the session and element it targets, and returns a
//! `CommandHandler` ready to execute once.

pub mod alerts;
pub mod cookies;
pub mod elements;
pub mod handler;
pub mod interactions;
pub mod navigation;
pub mod params;
pub mod scope;
pub mod script;
pub mod server;
pub mod session;
pub mod timeouts;
pub mod upload;
pub mod window;

pub use handler::{
    BuildResult, CommandHandler, HandlerContext, HandlerFactory, HandlerResult,
    NotImplementedHandler, factory,
};
pub use scope::{ELEMENT_KEY, ElementScope, SessionScope};

use wd_protocol::DriverCommand as C;

/// Every built-in handler factory, keyed by command name.
pub fn builtin_handlers() -> Vec<(&'static str, HandlerFactory)> {
    vec![
        // Server
        (C::STATUS, factory(server::status)),
        (C::NEW_SESSION, factory(server::new_session)),
        (C::GET_SESSION_LIST, factory(server::session_list)),
        (C::DEFINE_DRIVER_MAPPING, factory(server::define_driver_mapping)),
        // Session
        (C::GET_SESSION_CAPABILITIES, factory(session::get_capabilities)),
        (C::QUIT, factory(session::quit)),
        (C::CLOSE, factory(session::close)),
        // Navigation
        (C::GET, factory(navigation::get)),
        (C::GO_BACK, factory(navigation::go_back)),
        (C::GO_FORWARD, factory(navigation::go_forward)),
        (C::REFRESH, factory(navigation::refresh)),
        (C::GET_CURRENT_URL, factory(navigation::current_url)),
        (C::GET_TITLE, factory(navigation::title)),
        (C::GET_PAGE_SOURCE, factory(navigation::page_source)),
        (C::SCREENSHOT, factory(navigation::screenshot)),
        // Scripts
        (C::EXECUTE_SCRIPT, factory(script::execute)),
        (C::EXECUTE_ASYNC_SCRIPT, factory(script::execute_async)),
        // Timeouts
        (C::SET_TIMEOUT, factory(timeouts::set_timeout)),
        (C::IMPLICITLY_WAIT, factory(timeouts::implicitly_wait)),
        (C::SET_ASYNC_SCRIPT_TIMEOUT, factory(timeouts::async_script)),
        // Cookies
        (C::GET_ALL_COOKIES, factory(cookies::get_all)),
        (C::ADD_COOKIE, factory(cookies::add)),
        (C::DELETE_COOKIE, factory(cookies::delete)),
        (C::DELETE_ALL_COOKIES, factory(cookies::delete_all)),
        // Windows and frames
        (C::GET_CURRENT_WINDOW_HANDLE, factory(window::current_handle)),
        (C::GET_WINDOW_HANDLES, factory(window::all_handles)),
        (C::SWITCH_TO_WINDOW, factory(window::switch_to_window)),
        (C::SWITCH_TO_FRAME, factory(window::switch_to_frame)),
        (C::GET_WINDOW_SIZE, factory(window::get_size)),
        (C::SET_WINDOW_SIZE, factory(window::set_size)),
        (C::GET_WINDOW_POSITION, factory(window::get_position)),
        (C::SET_WINDOW_POSITION, factory(window::set_position)),
        (C::MAXIMIZE_WINDOW, factory(window::maximize)),
        // Elements
        (C::FIND_ELEMENT, factory(elements::find_element)),
        (C::FIND_ELEMENTS, factory(elements::find_elements)),
        (C::FIND_CHILD_ELEMENT, factory(elements::find_child_element)),
        (C::FIND_CHILD_ELEMENTS, factory(elements::find_child_elements)),
        (C::GET_ACTIVE_ELEMENT, factory(elements::active_element)),
        (C::DESCRIBE_ELEMENT, factory(elements::describe)),
        (C::CLICK_ELEMENT, factory(elements::click)),
        (C::SUBMIT_ELEMENT, factory(elements::submit)),
        (C::CLEAR_ELEMENT, factory(elements::clear)),
        (C::SEND_KEYS_TO_ELEMENT, factory(elements::send_keys)),
        (C::SEND_KEYS_TO_ACTIVE_ELEMENT, factory(elements::send_keys_to_active)),
        (C::GET_ELEMENT_TEXT, factory(elements::text)),
        (C::GET_ELEMENT_TAG_NAME, factory(elements::tag_name)),
        (C::GET_ELEMENT_ATTRIBUTE, factory(elements::attribute)),
        (C::GET_ELEMENT_VALUE_OF_CSS_PROPERTY, factory(elements::css_value)),
        (C::IS_ELEMENT_SELECTED, factory(elements::is_selected)),
        (C::IS_ELEMENT_ENABLED, factory(elements::is_enabled)),
        (C::IS_ELEMENT_DISPLAYED, factory(elements::is_displayed)),
        (C::GET_ELEMENT_LOCATION, factory(elements::location)),
        (C::GET_ELEMENT_LOCATION_ONCE_SCROLLED_INTO_VIEW, factory(elements::location_in_view)),
        (C::GET_ELEMENT_SIZE, factory(elements::size)),
        (C::ELEMENT_EQUALS, factory(elements::equals)),
        // Alerts
        (C::ACCEPT_ALERT, factory(alerts::accept)),
        (C::DISMISS_ALERT, factory(alerts::dismiss)),
        (C::GET_ALERT_TEXT, factory(alerts::get_text)),
        (C::SET_ALERT_VALUE, factory(alerts::set_text)),
        // Orientation and mouse
        (C::GET_ORIENTATION, factory(interactions::get_orientation)),
        (C::SET_ORIENTATION, factory(interactions::set_orientation)),
        (C::MOUSE_MOVE_TO, factory(interactions::move_to)),
        (C::MOUSE_CLICK, factory(interactions::click)),
        (C::MOUSE_DOUBLE_CLICK, factory(interactions::double_click)),
        (C::MOUSE_DOWN, factory(interactions::button_down)),
        (C::MOUSE_UP, factory(interactions::button_up)),
        // Files
        (C::UPLOAD_FILE, factory(upload::upload_file)),
    ]
}
