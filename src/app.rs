//! Flywheel Dashboard App
//!
//! Sidebar plus dashboard layout, with the toaster and the re-login dialog
//! layered on top.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use flywheel_core::ClientConfig;

use crate::actions;
use crate::adapters::{Toast, ToastNotifier};
use crate::components::{AppSidebar, Dashboard, SessionExpiredDialog, Toaster};
use crate::context::{AppContext, Services};
use crate::store::DashboardState;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    // State
    let (toasts, set_toasts) = signal(Vec::<Toast>::new());
    let (session_expired, set_session_expired) = signal(false);

    let notifier = Rc::new(ToastNotifier::new(set_toasts, set_session_expired));
    let services = Services::new(config, notifier);
    let store = Store::new(DashboardState::new(services.session.user(), &services.board));

    let ctx = AppContext::new(services, toasts, (session_expired, set_session_expired));

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    // Menu, roster and first board load on mount
    Effect::new(move |_| {
        spawn_local(actions::load_navigation(ctx, store));
        spawn_local(actions::load_team_users(ctx, store));
        spawn_local(actions::refresh_board(ctx, store));
    });

    view! {
        <div class="app-layout">
            <AppSidebar />
            <main class="main-content">
                <Dashboard />
            </main>
            <Toaster />
            <SessionExpiredDialog />
        </div>
    }
}
