//! Nav User Component
//!
//! Signed-in user with a sign-out action.

use leptos::prelude::*;

use crate::actions;
use crate::context::use_app_context;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn NavUser() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();
    let user = move || store.user().get();

    view! {
        <div class="nav-user">
            {move || match user() {
                Some(user) => {
                    let avatar = match user.avatar.clone() {
                        Some(src) => view! { <img class="avatar" src=src alt=user.full_name.clone() /> }.into_any(),
                        None => view! { <span class="avatar avatar-fallback">{user.initial()}</span> }.into_any(),
                    };
                    view! {
                        {avatar}
                        <span class="user-text">
                            <span class="user-name">{user.full_name.clone()}</span>
                            <span class="user-email">{user.email.clone().unwrap_or_default()}</span>
                        </span>
                    }
                    .into_any()
                }
                None => view! { <span class="user-name">"未登录"</span> }.into_any(),
            }}
            <button class="sign-out-btn" title="退出登录" on:click=move |_| actions::sign_out(ctx)>
                "⎋"
            </button>
        </div>
    }
}
