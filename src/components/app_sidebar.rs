//! App Sidebar Component
//!
//! Team switcher on top, "General" and "System" menu groups in the middle,
//! signed-in user at the bottom.

use leptos::prelude::*;

use flywheel_core::menu::nav_groups;

use crate::components::{NavGroup, NavUser, TeamSwitcher};
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn AppSidebar() -> impl IntoView {
    let store = use_dashboard_store();
    let groups = move || nav_groups(&store.nav().read());

    view! {
        <aside class="app-sidebar">
            <TeamSwitcher />
            <nav class="sidebar-content">
                <Show when=move || store.nav_loading().get()>
                    <div class="sidebar-loading">"加载菜单..."</div>
                </Show>
                <For
                    each=groups
                    key=|group| group.title
                    children=move |group| view! { <NavGroup title=group.title items=group.items /> }
                />
            </nav>
            <NavUser />
        </aside>
    }
}
