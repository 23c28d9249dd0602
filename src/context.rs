//! Application Context
//!
//! Services and app-wide signals provided via the Leptos Context API.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use flywheel_core::dashboard::TaskBoard;
use flywheel_core::http::Notifier;
use flywheel_core::nav::Navigation;
use flywheel_core::{ClientConfig, HttpClient, Session};

use crate::adapters::{current_path, CookieStore, FetchTransport, LocalStore, Toast};

/// Non-reactive services shared by every component
#[derive(Clone)]
pub struct Services {
    pub config: ClientConfig,
    pub session: Rc<Session>,
    pub client: Rc<HttpClient>,
    pub board: Rc<TaskBoard>,
    pub nav: Rc<RefCell<Navigation>>,
}

impl Services {
    pub fn new(config: ClientConfig, notifier: Rc<dyn Notifier>) -> Self {
        let session = Rc::new(Session::hydrate(Rc::new(CookieStore), Rc::new(LocalStore), &config));
        let client = Rc::new(
            HttpClient::new(config.clone(), Rc::new(FetchTransport), session.clone(), notifier)
                .with_location(Rc::new(current_path)),
        );
        let today = chrono::Local::now().date_naive();
        let board = Rc::new(TaskBoard::new(client.clone(), today));
        let nav = Rc::new(RefCell::new(Navigation::new(session.clone(), &config)));
        Self {
            config,
            session,
            client,
            board,
            nav,
        }
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    services: StoredValue<Services, LocalStorage>,
    /// Toasts currently on screen
    pub toasts: ReadSignal<Vec<Toast>>,
    /// Re-login dialog visibility - read
    pub session_expired: ReadSignal<bool>,
    /// Re-login dialog visibility - write
    set_session_expired: WriteSignal<bool>,
}

impl AppContext {
    pub fn new(
        services: Services,
        toasts: ReadSignal<Vec<Toast>>,
        session_expired: (ReadSignal<bool>, WriteSignal<bool>),
    ) -> Self {
        Self {
            services: StoredValue::new_local(services),
            toasts,
            session_expired: session_expired.0,
            set_session_expired: session_expired.1,
        }
    }

    pub fn services(&self) -> Services {
        self.services.get_value()
    }

    pub fn notifier(&self) -> Rc<dyn Notifier> {
        self.services.with_value(|s| s.client.notifier().clone())
    }

    pub fn close_session_dialog(&self) {
        self.set_session_expired.set(false);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
