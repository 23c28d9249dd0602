//! Browser Adapters
//!
//! Implementations of the core ports on top of web APIs.

mod clipboard;
mod logger;
mod notifier;
mod storage;
mod transport;

pub use clipboard::write_clipboard;
pub use logger::ConsoleLogger;
pub use notifier::{Toast, ToastKind, ToastNotifier};
pub use storage::{CookieStore, LocalStore};
pub use transport::FetchTransport;

/// Path of the current page, without the query string
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Full page navigation
pub fn navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(path) {
            log::error!("[NAV] Failed to navigate to {}: {:?}", path, e);
        }
    }
}
